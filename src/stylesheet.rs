use crate::app::App;

/// Base rules for every component family, emitted ahead of the app's own rules.
pub const BASE_STYLES: &str = r#"/* Dars base styles */
* {
    box-sizing: border-box;
}

body {
    margin: 0;
    padding: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif;
}

/* Components */
.dars-container {
    display: block;
}

.dars-text {
    display: inline-block;
}

.dars-button {
    display: inline-block;
    padding: 8px 16px;
    border: 1px solid #ccc;
    background-color: #f8f9fa;
    color: #333;
    cursor: pointer;
    border-radius: 4px;
    font-size: 14px;
}

.dars-button:hover {
    background-color: #e9ecef;
}

.dars-button:disabled {
    opacity: 0.6;
    cursor: not-allowed;
}

.dars-input {
    display: inline-block;
    padding: 8px 12px;
    border: 1px solid #ccc;
    border-radius: 4px;
    font-size: 14px;
}

.dars-input:focus {
    outline: none;
    border-color: #007bff;
    box-shadow: 0 0 0 2px rgba(0, 123, 255, 0.25);
}

.dars-image {
    max-width: 100%;
    height: auto;
}

.dars-link {
    color: #007bff;
    text-decoration: none;
}

.dars-link:hover {
    text-decoration: underline;
}

.dars-textarea {
    width: 100%;
    padding: 8px 12px;
    border: 1px solid #ccc;
    border-radius: 4px;
    font-size: 14px;
}

.dars-textarea:focus {
    outline: none;
    border-color: #007bff;
    box-shadow: 0 0 0 2px rgba(0, 123, 255, 0.25);
}

.dars-checkbox-wrapper,
.dars-radio-wrapper {
    display: inline-flex;
    align-items: center;
    gap: 6px;
}

.dars-checkbox,
.dars-radio {
    width: 16px;
    height: 16px;
    margin: 0;
    cursor: pointer;
}

.dars-checkbox:disabled,
.dars-radio:disabled {
    cursor: not-allowed;
}

.dars-checkbox-wrapper label,
.dars-radio-wrapper label {
    cursor: pointer;
    user-select: none;
}

.dars-select {
    display: inline-block;
    padding: 8px 12px;
    border: 1px solid #ccc;
    border-radius: 4px;
    background-color: #fff;
    font-size: 14px;
}

.dars-select:focus {
    outline: none;
    border-color: #007bff;
    box-shadow: 0 0 0 2px rgba(0, 123, 255, 0.25);
}

.dars-select:disabled {
    opacity: 0.6;
    cursor: not-allowed;
}

.dars-slider-wrapper {
    display: flex;
    align-items: center;
    gap: 8px;
}

.dars-slider-vertical {
    flex-direction: column;
}

.dars-slider-vertical .dars-slider {
    writing-mode: vertical-lr;
    direction: rtl;
}

.dars-slider {
    cursor: pointer;
}

.dars-slider:disabled {
    cursor: not-allowed;
}

.dars-slider-value {
    min-width: 2em;
    font-size: 14px;
    text-align: right;
}

.dars-datepicker {
    display: inline-block;
    padding: 8px 12px;
    border: 1px solid #ccc;
    border-radius: 4px;
    font-size: 14px;
}

.dars-datepicker:focus {
    outline: none;
    border-color: #007bff;
    box-shadow: 0 0 0 2px rgba(0, 123, 255, 0.25);
}

.dars-datepicker-inline {
    display: inline-block;
    padding: 12px;
    border: 1px solid #dee2e6;
    border-radius: 8px;
    background-color: #fff;
}

.dars-card {
    background-color: white;
    border-radius: 8px;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    padding: 20px;
    margin-bottom: 20px;
}

.dars-card h2 {
    margin-top: 0;
    margin-bottom: 15px;
    font-size: 24px;
    color: #333;
}

.dars-modal {
    position: fixed;
    z-index: 1000;
    left: 0;
    top: 0;
    width: 100%;
    height: 100%;
    overflow: auto;
    background-color: rgba(0,0,0,0.4);
    justify-content: center;
    align-items: center;
}

.dars-modal-content {
    background-color: #fefefe;
    margin: auto;
    padding: 20px;
    border: 1px solid #888;
    width: 80%;
    max-width: 500px;
    border-radius: 8px;
    box-shadow: 0 4px 8px 0 rgba(0,0,0,0.2), 0 6px 20px 0 rgba(0,0,0,0.19);
}

.dars-navbar {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 1rem;
    background-color: #f8f9fa;
    border-bottom: 1px solid #dee2e6;
}

.dars-navbar-brand {
    font-weight: bold;
    font-size: 1.25rem;
    color: #333;
}

.dars-navbar-nav {
    display: flex;
    gap: 1rem;
}

.dars-navbar-nav a {
    color: #007bff;
    text-decoration: none;
    padding: 0.5rem 1rem;
}

.dars-navbar-nav a:hover {
    background-color: #e9ecef;
    border-radius: 4px;
}

"#;

/// Base stylesheet followed by one rule per global style, in registration order.
pub fn generate(app: &App) -> String {
    let mut css = String::from(BASE_STYLES);
    for (selector, style) in app.global_styles.iter() {
        css.push_str(&format!("{} {{ {} }}\n", selector, style.to_inline_css()));
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_covers_every_family() {
        for class in [
            ".dars-container", ".dars-text", ".dars-button", ".dars-input", ".dars-image",
            ".dars-link", ".dars-textarea", ".dars-checkbox", ".dars-radio", ".dars-select",
            ".dars-slider", ".dars-datepicker", ".dars-card", ".dars-modal", ".dars-navbar",
        ] {
            assert!(BASE_STYLES.contains(class), "missing {}", class);
        }
    }

    #[test]
    fn test_global_rules_follow_base_in_order() {
        let mut app = App::default();
        app.add_global_style(".fade-in", Style::new().with("opacity", "0"));
        app.add_global_style("h1", Style::new().with("color", "navy").with("margin", 0));

        let css = generate(&app);
        assert!(css.starts_with(BASE_STYLES));
        assert_eq!(
            &css[BASE_STYLES.len()..],
            ".fade-in { opacity: 0; }\nh1 { color: navy; margin: 0; }\n"
        );
    }

    #[test]
    fn test_no_global_styles_is_base_only() {
        assert_eq!(generate(&App::default()), BASE_STYLES);
    }
}
