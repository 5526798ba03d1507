use crate::app::App;
use crate::error::DarsResult;

/// Runtime prelude: a DOM-ready hook plus the `initializeEvents` extension point.
pub const RUNTIME_BOOTSTRAP: &str = r#"// Dars Runtime
document.addEventListener('DOMContentLoaded', function() {
    console.log('Dars App loaded');

    // Component event wiring
    initializeEvents();
});

function initializeEvents() {
    // App scripts may redefine this
}

"#;

/// Bootstrap, then every script in registration order, each under a label comment.
///
/// Script code is copied verbatim. Fails if a file script cannot be read.
pub fn generate(app: &App) -> DarsResult<String> {
    let mut js = String::from(RUNTIME_BOOTSTRAP);
    for script in &app.scripts {
        let code = script.code()?;
        js.push_str(&format!("// Script: {}\n", script.label()));
        js.push_str(&code);
        js.push_str("\n\n");
    }
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DarsError;
    use crate::script::Script;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scripts_follow_bootstrap_in_order() {
        let mut app = App::default();
        app.add_script(Script::inline("console.log(1)"));
        app.add_script(Script::inline("let a = '<b>';"));

        let js = generate(&app).unwrap();
        assert_eq!(
            &js[RUNTIME_BOOTSTRAP.len()..],
            "// Script: InlineScript\nconsole.log(1)\n\n// Script: InlineScript\nlet a = '<b>';\n\n"
        );
    }

    #[test]
    fn test_file_script_is_inlined() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.js");
        std::fs::write(&path, "window.extra = true;").unwrap();

        let mut app = App::default();
        app.add_script(Script::file(&path));
        let js = generate(&app).unwrap();
        assert!(js.ends_with("// Script: FileScript\nwindow.extra = true;\n\n"));
    }

    #[test]
    fn test_unreadable_script_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::default();
        app.add_script(Script::file(dir.path().join("nope.js")));
        assert!(matches!(generate(&app), Err(DarsError::Script { .. })));
    }

    #[test]
    fn test_bootstrap_only() {
        let js = generate(&App::default()).unwrap();
        assert_eq!(js, RUNTIME_BOOTSTRAP);
        assert!(js.contains("DOMContentLoaded"));
    }
}
