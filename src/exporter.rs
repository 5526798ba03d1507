use std::fs;
use std::path::{Path, PathBuf};

use crate::app::{App, AppStats};
use crate::error::{DarsError, DarsResult};
use crate::{bundle, document, stylesheet};

pub const INDEX_FILE: &str = "index.html";
pub const STYLES_FILE: &str = "styles.css";
pub const SCRIPT_FILE: &str = "script.js";

/// What a successful export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub stats: AppStats,
}

pub fn generate_html(app: &App) -> DarsResult<String> {
    Ok(document::generate(app)?)
}

pub fn generate_css(app: &App) -> String {
    stylesheet::generate(app)
}

pub fn generate_javascript(app: &App) -> DarsResult<String> {
    bundle::generate(app)
}

/// Validate, then write `index.html`, `styles.css` and `script.js` into `output_dir`.
///
/// Nothing touches the file system when validation fails. A failure after
/// that leaves any files already written in place.
pub fn try_export(app: &App, output_dir: impl AsRef<Path>) -> DarsResult<ExportReport> {
    let output_dir = output_dir.as_ref();

    let errors = app.validate();
    if !errors.is_empty() {
        return Err(DarsError::Validation(errors));
    }

    fs::create_dir_all(output_dir).map_err(|e| DarsError::io(output_dir, e))?;

    let mut files = Vec::with_capacity(3);
    let html = generate_html(app)?;
    files.push(write_output(output_dir, INDEX_FILE, &html)?);
    let css = generate_css(app);
    files.push(write_output(output_dir, STYLES_FILE, &css)?);
    let js = generate_javascript(app)?;
    files.push(write_output(output_dir, SCRIPT_FILE, &js)?);

    let stats = app.stats();
    log::info!(
        "Exported '{}' to {} ({} components)",
        app.title,
        output_dir.display(),
        stats.total_components
    );
    Ok(ExportReport {
        output_dir: output_dir.to_path_buf(),
        files,
        stats,
    })
}

/// [`try_export`] reduced to success or failure; the error is logged.
pub fn export(app: &App, output_dir: impl AsRef<Path>) -> bool {
    match try_export(app, output_dir) {
        Ok(_) => true,
        Err(e) => {
            log::error!("Export failed: {}", e);
            false
        }
    }
}

fn write_output(dir: &Path, name: &str, content: &str) -> DarsResult<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content).map_err(|e| DarsError::io(&path, e))?;
    log::debug!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(path)
}
