//! Apps authored as data.
//!
//! A manifest is a YAML or JSON document with the same shape as [`App`]:
//!
//! ```yaml
//! title: Hello
//! global_styles:
//!   .fade-in: { opacity: "0" }
//! scripts:
//!   - { type: inline, code: "console.log(1)" }
//! root:
//!   type: Container
//!   children:
//!     - { type: Text, text: Hi }
//! ```
//!
//! Nesting depth is bounded by the parser's recursion limit (128 levels for
//! both `serde_yaml` and `serde_json`).

use std::fs;
use std::path::Path;

use crate::app::App;
use crate::error::{DarsError, DarsResult};

pub fn from_yaml_str(source: &str) -> DarsResult<App> {
    serde_yaml::from_str(source).map_err(|e| DarsError::Manifest {
        format: "YAML",
        message: e.to_string(),
    })
}

pub fn from_json_str(source: &str) -> DarsResult<App> {
    serde_json::from_str(source).map_err(|e| DarsError::Manifest {
        format: "JSON",
        message: e.to_string(),
    })
}

/// Load a manifest, picking the format from the file extension.
///
/// Relative file script paths are resolved against the manifest's directory.
pub fn load(path: impl AsRef<Path>) -> DarsResult<App> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let parse: fn(&str) -> DarsResult<App> = match extension.as_deref() {
        Some("yaml") | Some("yml") => from_yaml_str,
        Some("json") => from_json_str,
        _ => {
            return Err(DarsError::UnknownManifestFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let source = fs::read_to_string(path).map_err(|e| DarsError::io(path, e))?;
    let mut app = parse(&source)?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for script in &mut app.scripts {
        script.resolve_against(base);
    }
    log::debug!(
        "Loaded manifest {} ({} scripts)",
        path.display(),
        app.scripts.len()
    );
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;
    use crate::script::Script;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_manifest() {
        let app = from_yaml_str(
            r#"
title: Hello
global_styles:
  .fade-in:
    opacity: "0"
root:
  type: Container
  children:
    - type: Text
      text: Hi
"#,
        )
        .unwrap();
        assert_eq!(app.title, "Hello");
        assert_eq!(app.global_styles.get(".fade-in").unwrap().to_inline_css(), "opacity: 0;");
        let root = app.root.unwrap();
        assert_eq!(root.kind, ComponentKind::Container);
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_json_manifest() {
        let app = from_json_str(
            r#"{
  "title": "Json",
  "root": { "type": "Card", "title": "Box", "children": [{ "type": "Slider", "value": 10 }] }
}"#,
        )
        .unwrap();
        let root = app.root.unwrap();
        assert_eq!(root.kind.type_name(), "Card");
        assert_eq!(root.children[0].kind.type_name(), "Slider");
    }

    #[test]
    fn test_bad_manifest_reports_format() {
        match from_yaml_str("title: [unclosed") {
            Err(DarsError::Manifest { format, .. }) => assert_eq!(format, "YAML"),
            other => panic!("Expected Manifest error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_resolves_script_paths() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("app.yml");
        fs::write(
            &manifest,
            "title: Files\nscripts:\n  - type: file\n    path: js/main.js\n",
        )
        .unwrap();

        let app = load(&manifest).unwrap();
        assert_eq!(app.scripts, vec![Script::file(dir.path().join("js/main.js"))]);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("app.toml");
        fs::write(&manifest, "title = 'x'").unwrap();
        assert!(matches!(
            load(&manifest),
            Err(DarsError::UnknownManifestFormat { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load(dir.path().join("absent.yaml")),
            Err(DarsError::Io { .. })
        ));
    }
}
