use std::fmt::Write;

use crate::app::App;
use crate::attributes::{escape_html, AttributeList};
use crate::exporter::{SCRIPT_FILE, STYLES_FILE};
use crate::renderer;

/// Full `index.html` for an app.
///
/// Head order is fixed: charset, name metas, canonical and icon links,
/// Open Graph, Twitter, title, then the stylesheet link.
pub fn generate(app: &App) -> Result<String, std::fmt::Error> {
    let body = match &app.root {
        Some(root) => renderer::render(root)?,
        None => String::new(),
    };

    let mut out = String::new();
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html {}>", AttributeList::new().value("lang", &app.language))?;
    writeln!(out, "<head>")?;
    writeln!(out, "    <meta {}>", AttributeList::new().value("charset", &app.config.charset))?;

    for (name, content) in app.meta_tags() {
        let attrs = AttributeList::new().value("name", name).value("content", content);
        writeln!(out, "    <meta {}>", attrs)?;
    }

    let links = [
        ("canonical", None, app.canonical_url.as_str()),
        ("icon", None, app.favicon.as_str()),
        ("icon", Some("image/png"), app.icon.as_str()),
        ("apple-touch-icon", None, app.apple_touch_icon.as_str()),
        ("manifest", None, app.manifest.as_str()),
    ];
    for (rel, link_type, href) in links {
        if href.is_empty() {
            continue;
        }
        let attrs = AttributeList::new()
            .value("rel", rel)
            .opt("type", link_type)
            .value("href", href);
        writeln!(out, "    <link {}>", attrs)?;
    }

    for (property, content) in app.open_graph_tags() {
        let attrs = AttributeList::new()
            .value("property", property)
            .value("content", content);
        writeln!(out, "    <meta {}>", attrs)?;
    }
    for (name, content) in app.twitter_tags() {
        let attrs = AttributeList::new().value("name", name).value("content", content);
        writeln!(out, "    <meta {}>", attrs)?;
    }

    writeln!(out, "    <title>{}</title>", escape_html(&app.title))?;
    writeln!(out, "    <link rel=\"stylesheet\" href=\"{}\">", STYLES_FILE)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    if !body.is_empty() {
        writeln!(out, "    {}", body)?;
    }
    writeln!(out, "    <script src=\"{}\"></script>", SCRIPT_FILE)?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}
