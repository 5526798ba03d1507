use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DarsError, DarsResult};

/// Client-side code attached to an app. The bundle treats it as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Script {
    /// Code written directly in the app definition.
    Inline { code: String },
    /// Code read from disk when the bundle is generated.
    File { path: PathBuf },
}

impl Script {
    pub fn inline(code: impl Into<String>) -> Self {
        Script::Inline { code: code.into() }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Script::File { path: path.into() }
    }

    /// Label written in the comment line that precedes the script in the bundle.
    pub fn label(&self) -> &'static str {
        match self {
            Script::Inline { .. } => "InlineScript",
            Script::File { .. } => "FileScript",
        }
    }

    pub fn code(&self) -> DarsResult<String> {
        match self {
            Script::Inline { code } => Ok(code.clone()),
            Script::File { path } => fs::read_to_string(path).map_err(|source| DarsError::Script {
                name: path.display().to_string(),
                source,
            }),
        }
    }

    /// Anchor a relative file path at `base`; inline scripts are unchanged.
    pub(crate) fn resolve_against(&mut self, base: &Path) {
        if let Script::File { path } = self {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inline_code_is_returned_as_is() {
        let script = Script::inline("console.log(1)");
        assert_eq!(script.label(), "InlineScript");
        assert_eq!(script.code().unwrap(), "console.log(1)");
    }

    #[test]
    fn test_file_script_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.js");
        fs::write(&path, "alert('hi');").unwrap();

        let script = Script::file(&path);
        assert_eq!(script.label(), "FileScript");
        assert_eq!(script.code().unwrap(), "alert('hi');");
    }

    #[test]
    fn test_missing_file_script_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let script = Script::file(dir.path().join("missing.js"));
        match script.code() {
            Err(DarsError::Script { name, .. }) => assert!(name.ends_with("missing.js")),
            other => panic!("Expected Script error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_against_only_touches_relative_paths() {
        let mut relative = Script::file("js/app.js");
        relative.resolve_against(Path::new("/srv/site"));
        assert_eq!(relative, Script::file("/srv/site/js/app.js"));

        let mut inline = Script::inline("x()");
        inline.resolve_against(Path::new("/srv/site"));
        assert_eq!(inline, Script::inline("x()"));
    }

    #[test]
    fn test_deserialize_tagged() {
        let yaml = "- type: inline\n  code: init()\n- type: file\n  path: main.js\n";
        let scripts: Vec<Script> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scripts, vec![Script::inline("init()"), Script::file("main.js")]);
    }
}
