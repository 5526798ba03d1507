//! Component tree to HTML fragment.
//!
//! Rendering is an explicit-stack walk: each container pushes its closing
//! markup and then its children, so nesting depth is bounded by heap memory
//! rather than by the call stack.

use std::collections::HashSet;
use std::fmt::{self, Write};

use crate::attributes::{escape_html, AttributeList};
use crate::components::*;

/// Fixed base class for each variant. Generic nodes have none.
pub fn base_class(kind: &ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Text(_) => "dars-text",
        ComponentKind::Button(_) => "dars-button",
        ComponentKind::Input(_) => "dars-input",
        ComponentKind::Container => "dars-container",
        ComponentKind::Image(_) => "dars-image",
        ComponentKind::Link(_) => "dars-link",
        ComponentKind::Textarea(_) => "dars-textarea",
        ComponentKind::Checkbox(_) => "dars-checkbox",
        ComponentKind::RadioButton(_) => "dars-radio",
        ComponentKind::Select(_) => "dars-select",
        ComponentKind::Slider(_) => "dars-slider",
        ComponentKind::DatePicker(_) => "dars-datepicker",
        ComponentKind::Card(_) => "dars-card",
        ComponentKind::Modal(_) => "dars-modal",
        ComponentKind::Navbar(_) => "dars-navbar",
        ComponentKind::Generic(_) => "",
    }
}

/// Render a whole tree with a fresh id pass.
pub fn render(root: &Component) -> Result<String, fmt::Error> {
    let mut out = String::new();
    Renderer::for_tree(root).render_into(root, &mut out)?;
    Ok(out)
}

enum Frame<'a> {
    Open(&'a Component),
    Close(&'static str),
}

/// State for one render pass: the DOM ids handed out so far.
///
/// Nodes without an explicit id get `dars-<variant>-<n>` with `n` counting up
/// from 1 across the pass, skipping any value already taken by an explicit id.
/// The same tree always renders to the same bytes.
pub struct Renderer<'t> {
    taken: HashSet<&'t str>,
    next_id: usize,
}

impl<'t> Renderer<'t> {
    pub fn for_tree(root: &'t Component) -> Self {
        let taken = root.descendants().filter_map(|c| c.id.as_deref()).collect();
        Self { taken, next_id: 0 }
    }

    pub fn render_into(&mut self, root: &Component, out: &mut String) -> fmt::Result {
        let mut stack = vec![Frame::Open(root)];
        let mut rendered = 0usize;

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Close(markup) => out.push_str(markup),
                Frame::Open(node) => {
                    rendered += 1;
                    let id = self.dom_id(node);
                    match self.open(node, &id, out)? {
                        Some(close) => {
                            stack.push(Frame::Close(close));
                            stack.extend(node.children.iter().rev().map(Frame::Open));
                        }
                        None => {
                            if !node.children.is_empty() {
                                log::debug!(
                                    "{} '{}' has children that are not rendered",
                                    node.kind.variant_name(),
                                    id
                                );
                            }
                        }
                    }
                }
            }
        }

        log::trace!("Rendered {} component(s)", rendered);
        Ok(())
    }

    fn dom_id(&mut self, node: &Component) -> String {
        if let Some(id) = node.id.as_deref().filter(|id| !id.is_empty()) {
            return id.to_string();
        }
        let slug = match base_class(&node.kind).strip_prefix("dars-") {
            Some(slug) => slug,
            None => "component",
        };
        loop {
            self.next_id += 1;
            let candidate = format!("dars-{}-{}", slug, self.next_id);
            if !self.taken.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }

    /// Write a node's opening markup. Returns the closing markup for
    /// variants whose children follow, `None` for self-contained ones.
    fn open(&self, node: &Component, id: &str, out: &mut String) -> Result<Option<&'static str>, fmt::Error> {
        let class_name = node.class_name.as_deref();
        let common = || {
            AttributeList::new()
                .value("id", id)
                .class(base_class(&node.kind), class_name)
                .style(&node.style)
        };

        match &node.kind {
            ComponentKind::Text(t) => {
                write!(out, "<span {}>{}</span>", common(), escape_html(&t.text))?;
                Ok(None)
            }
            ComponentKind::Button(b) => {
                let attrs = common()
                    .value("type", b.button_type.as_str())
                    .flag("disabled", b.disabled);
                write!(out, "<button {}>{}</button>", attrs, escape_html(&b.text))?;
                Ok(None)
            }
            ComponentKind::Input(i) => {
                let attrs = common()
                    .value("type", &i.input_type)
                    .scalar("value", i.value.as_ref())
                    .opt("placeholder", i.placeholder.as_deref())
                    .flag("disabled", i.disabled)
                    .flag("readonly", i.readonly)
                    .flag("required", i.required)
                    .opt("maxlength", i.max_length.map(|n| n.to_string()).as_deref())
                    .present("min", i.min.as_ref())
                    .present("max", i.max.as_ref())
                    .present("step", i.step.as_ref());
                write!(out, "<input {} />", attrs)?;
                Ok(None)
            }
            ComponentKind::Image(img) => {
                let attrs = common()
                    .value("src", &img.src)
                    .value("alt", &img.alt)
                    .present("width", img.width.as_ref())
                    .present("height", img.height.as_ref());
                write!(out, "<img {} />", attrs)?;
                Ok(None)
            }
            ComponentKind::Link(l) => {
                let attrs = common().value("href", &l.href).value("target", &l.target);
                write!(out, "<a {}>{}</a>", attrs, escape_html(&l.text))?;
                Ok(None)
            }
            ComponentKind::Textarea(t) => {
                let attrs = common()
                    .value("rows", t.rows)
                    .value("cols", t.cols)
                    .opt("placeholder", t.placeholder.as_deref())
                    .flag("disabled", t.disabled)
                    .flag("readonly", t.readonly)
                    .flag("required", t.required)
                    .opt("maxlength", t.max_length.map(|n| n.to_string()).as_deref());
                write!(out, "<textarea {}>{}</textarea>", attrs, escape_html(&t.value))?;
                Ok(None)
            }
            ComponentKind::Checkbox(c) => {
                let toggle = Toggle {
                    input_type: "checkbox",
                    label: c.label.as_deref(),
                    name: c.name.as_deref(),
                    value: c.value.as_deref(),
                    checked: c.checked,
                    disabled: c.disabled,
                    required: c.required,
                };
                write_toggle(out, common(), id, &toggle)?;
                Ok(None)
            }
            ComponentKind::RadioButton(r) => {
                let toggle = Toggle {
                    input_type: "radio",
                    label: r.label.as_deref(),
                    name: r.name.as_deref(),
                    value: r.value.as_deref(),
                    checked: r.checked,
                    disabled: r.disabled,
                    required: r.required,
                };
                write_toggle(out, common(), id, &toggle)?;
                Ok(None)
            }
            ComponentKind::Select(s) => {
                write_select(out, common(), s)?;
                Ok(None)
            }
            ComponentKind::Slider(s) => {
                write!(
                    out,
                    "<div class=\"dars-slider-wrapper dars-slider-{}\">",
                    s.orientation.as_str()
                )?;
                if let Some(label) = s.label.as_deref().filter(|l| !l.is_empty()) {
                    write!(
                        out,
                        "<label for=\"{}\">{}</label>",
                        escape_html(id),
                        escape_html(label)
                    )?;
                }
                let attrs = common()
                    .value("type", "range")
                    .value("min", &s.min)
                    .value("max", &s.max)
                    .value("step", &s.step)
                    .value("value", &s.value)
                    .flag("disabled", s.disabled);
                write!(out, "<input {} />", attrs)?;
                if s.show_value {
                    write!(
                        out,
                        "<span class=\"dars-slider-value\" id=\"{}-value\">{}</span>",
                        escape_html(id),
                        escape_html(&s.value.to_string())
                    )?;
                }
                out.push_str("</div>");
                Ok(None)
            }
            ComponentKind::DatePicker(d) => {
                let input_type = if d.include_time { "datetime-local" } else { "date" };
                let attrs = common()
                    .value("type", input_type)
                    .opt("value", d.value.as_deref())
                    .opt("min", d.min.as_deref())
                    .opt("max", d.max.as_deref())
                    .opt("placeholder", d.placeholder.as_deref())
                    .flag("disabled", d.disabled)
                    .flag("readonly", d.readonly)
                    .flag("required", d.required);
                if d.inline {
                    write!(out, "<div class=\"dars-datepicker-inline\"><input {} /></div>", attrs)?;
                } else {
                    write!(out, "<input {} />", attrs)?;
                }
                Ok(None)
            }
            ComponentKind::Container | ComponentKind::Generic(_) => {
                write!(out, "<div {}>", common())?;
                Ok(Some("</div>"))
            }
            ComponentKind::Card(c) => {
                write!(out, "<div {}>", common())?;
                write_heading(out, c.title.as_deref())?;
                Ok(Some("</div>"))
            }
            ComponentKind::Modal(m) => {
                let display = if m.is_open { "display: flex;" } else { "display: none;" };
                let css = node.style.to_inline_css();
                let style = if css.is_empty() {
                    display.to_string()
                } else {
                    format!("{} {}", display, css)
                };
                let attrs = AttributeList::new()
                    .value("id", id)
                    .class("dars-modal", class_name)
                    .value("style", style);
                write!(out, "<div {}><div class=\"dars-modal-content\">", attrs)?;
                write_heading(out, m.title.as_deref())?;
                Ok(Some("</div></div>"))
            }
            ComponentKind::Navbar(n) => {
                write!(out, "<nav {}>", common())?;
                if let Some(brand) = n.brand.as_deref().filter(|b| !b.is_empty()) {
                    write!(out, "<div class=\"dars-navbar-brand\">{}</div>", escape_html(brand))?;
                }
                out.push_str("<div class=\"dars-navbar-nav\">");
                Ok(Some("</div></nav>"))
            }
        }
    }
}

fn write_heading(out: &mut String, title: Option<&str>) -> fmt::Result {
    match title.filter(|t| !t.is_empty()) {
        Some(title) => write!(out, "<h2>{}</h2>", escape_html(title)),
        None => Ok(()),
    }
}

/// Shared shape of checkboxes and radio buttons.
struct Toggle<'a> {
    input_type: &'static str,
    label: Option<&'a str>,
    name: Option<&'a str>,
    value: Option<&'a str>,
    checked: bool,
    disabled: bool,
    required: bool,
}

fn write_toggle(out: &mut String, common: AttributeList, id: &str, t: &Toggle<'_>) -> fmt::Result {
    let wrapper = match t.input_type {
        "radio" => "dars-radio-wrapper",
        _ => "dars-checkbox-wrapper",
    };
    let attrs = common
        .value("type", t.input_type)
        .opt("name", t.name)
        .opt("value", t.value)
        .flag("checked", t.checked)
        .flag("disabled", t.disabled)
        .flag("required", t.required);
    write!(out, "<div class=\"{}\"><input {} />", wrapper, attrs)?;
    if let Some(label) = t.label.filter(|l| !l.is_empty()) {
        write!(
            out,
            "<label for=\"{}\">{}</label>",
            escape_html(id),
            escape_html(label)
        )?;
    }
    out.push_str("</div>");
    Ok(())
}

fn write_select(out: &mut String, common: AttributeList, s: &Select) -> fmt::Result {
    let attrs = common
        .flag("multiple", s.multiple)
        .flag("disabled", s.disabled)
        .flag("required", s.required)
        .opt("size", s.size.map(|n| n.to_string()).as_deref());
    write!(out, "<select {}>", attrs)?;

    if let Some(placeholder) = s.placeholder.as_deref().filter(|p| !p.is_empty()) {
        if !s.multiple {
            let option = AttributeList::new()
                .value("value", "")
                .flag("disabled", true)
                .flag("selected", s.value.as_deref().map_or(true, str::is_empty));
            write!(out, "<option {}>{}</option>", option, escape_html(placeholder))?;
        }
    }

    for opt in &s.options {
        let selected = opt.selected || s.value.as_deref() == Some(opt.value.as_str());
        let option = AttributeList::new()
            .value("value", &opt.value)
            .flag("selected", selected)
            .flag("disabled", opt.disabled);
        write!(out, "<option {}>{}</option>", option, escape_html(&opt.label))?;
    }
    out.push_str("</select>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Scalar, Style};
    use pretty_assertions::assert_eq;

    fn html(node: Component) -> String {
        render(&node).unwrap()
    }

    #[test]
    fn test_text_and_container() {
        let tree = Component::container()
            .with_id("main")
            .child(Component::text("Hi").with_id("t"));
        assert_eq!(
            html(tree),
            "<div id=\"main\" class=\"dars-container\"><span id=\"t\" class=\"dars-text\">Hi</span></div>"
        );
    }

    #[test]
    fn test_generated_ids_are_deterministic() {
        let tree = Component::container()
            .child(Component::text("a"))
            .child(Component::button("b"));
        let first = html(tree.clone());
        assert_eq!(first, html(tree));
        assert_eq!(
            first,
            "<div id=\"dars-container-1\" class=\"dars-container\">\
             <span id=\"dars-text-2\" class=\"dars-text\">a</span>\
             <button id=\"dars-button-3\" class=\"dars-button\" type=\"button\">b</button></div>"
        );
    }

    #[test]
    fn test_generated_ids_skip_explicit_ones() {
        let tree = Component::container()
            .with_id("dars-text-2")
            .child(Component::text("a"))
            .child(Component::text("b"));
        let out = html(tree);
        assert!(out.contains("<span id=\"dars-text-1\""));
        assert!(out.contains("<span id=\"dars-text-3\""));
        assert_eq!(out.matches("id=\"dars-text-2\"").count(), 1);
    }

    #[test]
    fn test_class_and_style_attributes() {
        let node = Component::button("Save")
            .with_id("save")
            .with_class("primary")
            .with_style(Style::new().with("color", "red"));
        assert_eq!(
            html(node),
            "<button id=\"save\" class=\"dars-button primary\" style=\"color: red;\" type=\"button\">Save</button>"
        );
    }

    #[test]
    fn test_disabled_submit_button() {
        let node = Component::new(Button {
            text: "Send".to_string(),
            button_type: ButtonType::Submit,
            disabled: true,
        })
        .with_id("b");
        assert_eq!(
            html(node),
            "<button id=\"b\" class=\"dars-button\" type=\"submit\" disabled>Send</button>"
        );
    }

    #[test]
    fn test_input_value_truthiness() {
        let numeric_zero = Component::new(Input {
            value: Some(Scalar::Int(0)),
            ..Default::default()
        })
        .with_id("n");
        assert_eq!(html(numeric_zero), "<input id=\"n\" class=\"dars-input\" type=\"text\" />");

        let string_zero = Component::new(Input {
            value: Some(Scalar::from("0")),
            required: true,
            max_length: Some(3),
            ..Default::default()
        })
        .with_id("s");
        assert_eq!(
            html(string_zero),
            "<input id=\"s\" class=\"dars-input\" type=\"text\" value=\"0\" required maxlength=\"3\" />"
        );
    }

    #[test]
    fn test_numeric_bounds_keep_zero() {
        let node = Component::new(Input {
            input_type: "number".to_string(),
            value: Some(Scalar::Int(0)),
            min: Some(Scalar::Int(0)),
            max: Some(Scalar::Int(10)),
            step: Some(Scalar::Float(0.0)),
            ..Default::default()
        })
        .with_id("qty");
        assert_eq!(
            html(node),
            "<input id=\"qty\" class=\"dars-input\" type=\"number\" min=\"0\" max=\"10\" step=\"0.0\" />"
        );

        let img = Component::new(Image {
            src: "/dot.png".to_string(),
            width: Some(Scalar::Int(0)),
            height: Some(Scalar::Int(0)),
            ..Default::default()
        })
        .with_id("dot");
        assert_eq!(
            html(img),
            "<img id=\"dot\" class=\"dars-image\" src=\"/dot.png\" alt=\"\" width=\"0\" height=\"0\" />"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let node = Component::text("<b>\"x\" & y</b>").with_id("t");
        assert_eq!(
            html(node),
            "<span id=\"t\" class=\"dars-text\">&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;</span>"
        );
    }

    #[test]
    fn test_image_and_link() {
        let img = Component::new(Image {
            src: "/logo.png".to_string(),
            alt: "Logo".to_string(),
            width: Some(Scalar::Int(120)),
            height: None,
        })
        .with_id("logo");
        assert_eq!(
            html(img),
            "<img id=\"logo\" class=\"dars-image\" src=\"/logo.png\" alt=\"Logo\" width=\"120\" />"
        );

        let link = Component::new(Link {
            href: "/about".to_string(),
            text: "About".to_string(),
            ..Default::default()
        })
        .with_id("l");
        assert_eq!(
            html(link),
            "<a id=\"l\" class=\"dars-link\" href=\"/about\" target=\"_self\">About</a>"
        );
    }

    #[test]
    fn test_textarea_defaults() {
        let node = Component::new(Textarea {
            value: "notes".to_string(),
            ..Default::default()
        })
        .with_id("ta");
        assert_eq!(
            html(node),
            "<textarea id=\"ta\" class=\"dars-textarea\" rows=\"4\" cols=\"50\">notes</textarea>"
        );
    }

    #[test]
    fn test_checkbox_and_radio() {
        let checkbox = Component::new(Checkbox {
            label: Some("Agree".to_string()),
            name: Some("terms".to_string()),
            checked: true,
            ..Default::default()
        })
        .with_id("agree");
        assert_eq!(
            html(checkbox),
            "<div class=\"dars-checkbox-wrapper\">\
             <input id=\"agree\" class=\"dars-checkbox\" type=\"checkbox\" name=\"terms\" checked />\
             <label for=\"agree\">Agree</label></div>"
        );

        let radio = Component::new(RadioButton {
            name: Some("size".to_string()),
            value: Some("m".to_string()),
            ..Default::default()
        })
        .with_id("m");
        assert_eq!(
            html(radio),
            "<div class=\"dars-radio-wrapper\">\
             <input id=\"m\" class=\"dars-radio\" type=\"radio\" name=\"size\" value=\"m\" /></div>"
        );
    }

    #[test]
    fn test_select_with_value() {
        let mut select = Select {
            value: Some("b".to_string()),
            placeholder: Some("Pick".to_string()),
            ..Default::default()
        };
        select.add_option(SelectOption::new("a", "A"));
        select.add_option(SelectOption::new("b", "B"));
        assert_eq!(
            html(Component::new(select).with_id("s")),
            "<select id=\"s\" class=\"dars-select\">\
             <option value=\"\" disabled>Pick</option>\
             <option value=\"a\">A</option>\
             <option value=\"b\" selected>B</option></select>"
        );
    }

    #[test]
    fn test_empty_select_value_selects_placeholder() {
        let mut select = Select {
            value: Some(String::new()),
            placeholder: Some("Pick".to_string()),
            ..Default::default()
        };
        select.add_option(SelectOption::new("a", "A"));
        assert_eq!(
            html(Component::new(select).with_id("s")),
            "<select id=\"s\" class=\"dars-select\">\
             <option value=\"\" disabled selected>Pick</option>\
             <option value=\"a\">A</option></select>"
        );
    }

    #[test]
    fn test_multiple_select_has_no_placeholder() {
        let mut select = Select {
            placeholder: Some("Pick".to_string()),
            multiple: true,
            size: Some(3),
            ..Default::default()
        };
        select.add_option(SelectOption {
            disabled: true,
            ..SelectOption::new("x", "X")
        });
        assert_eq!(
            html(Component::new(select).with_id("s")),
            "<select id=\"s\" class=\"dars-select\" multiple size=\"3\">\
             <option value=\"x\" disabled>X</option></select>"
        );
    }

    #[test]
    fn test_slider() {
        let node = Component::new(Slider {
            label: Some("Volume".to_string()),
            show_value: true,
            orientation: Orientation::Vertical,
            ..Default::default()
        })
        .with_id("vol");
        assert_eq!(
            html(node),
            "<div class=\"dars-slider-wrapper dars-slider-vertical\">\
             <label for=\"vol\">Volume</label>\
             <input id=\"vol\" class=\"dars-slider\" type=\"range\" min=\"0\" max=\"100\" step=\"1\" value=\"50\" />\
             <span class=\"dars-slider-value\" id=\"vol-value\">50</span></div>"
        );
    }

    #[test]
    fn test_datepicker_variants() {
        let plain = Component::new(DatePicker {
            value: Some("2024-01-31".to_string()),
            ..Default::default()
        })
        .with_id("d");
        assert_eq!(
            html(plain),
            "<input id=\"d\" class=\"dars-datepicker\" type=\"date\" value=\"2024-01-31\" />"
        );

        let inline = Component::new(DatePicker {
            include_time: true,
            inline: true,
            ..Default::default()
        })
        .with_id("dt");
        assert_eq!(
            html(inline),
            "<div class=\"dars-datepicker-inline\">\
             <input id=\"dt\" class=\"dars-datepicker\" type=\"datetime-local\" /></div>"
        );
    }

    #[test]
    fn test_card_and_navbar() {
        let card = Component::card("Stats").with_id("c").child(Component::text("1").with_id("one"));
        assert_eq!(
            html(card),
            "<div id=\"c\" class=\"dars-card\"><h2>Stats</h2>\
             <span id=\"one\" class=\"dars-text\">1</span></div>"
        );

        let navbar = Component::new(Navbar {
            brand: Some("Dars".to_string()),
        })
        .with_id("nav")
        .child(Component::text("Home").with_id("home"));
        assert_eq!(
            html(navbar),
            "<nav id=\"nav\" class=\"dars-navbar\"><div class=\"dars-navbar-brand\">Dars</div>\
             <div class=\"dars-navbar-nav\"><span id=\"home\" class=\"dars-text\">Home</span></div></nav>"
        );
    }

    #[test]
    fn test_modal_display_and_user_style() {
        let open = Component::new(Modal {
            title: Some("Hello".to_string()),
            is_open: true,
        })
        .with_id("m")
        .style_prop("z-index", 10);
        assert_eq!(
            html(open),
            "<div id=\"m\" class=\"dars-modal\" style=\"display: flex; z-index: 10;\">\
             <div class=\"dars-modal-content\"><h2>Hello</h2></div></div>"
        );
    }

    #[test]
    fn test_generic_renders_bare_div_with_children() {
        let node = Component::generic("Tabs")
            .with_class("tabs")
            .child(Component::text("t").with_id("t"));
        assert_eq!(
            html(node),
            "<div id=\"dars-component-1\" class=\"tabs\"><span id=\"t\" class=\"dars-text\">t</span></div>"
        );
        assert_eq!(
            html(Component::generic("Empty").with_id("e")),
            "<div id=\"e\"></div>"
        );
    }

    #[test]
    fn test_leaf_children_are_not_rendered() {
        let mut text = Component::text("leaf").with_id("t");
        text.add_child(Component::text("hidden"));
        assert_eq!(html(text), "<span id=\"t\" class=\"dars-text\">leaf</span>");
    }

    #[test]
    fn test_deep_tree_renders_iteratively() {
        let depth = 20_000;
        let mut tree = Component::text("core").with_id("core");
        for _ in 0..depth {
            tree = Component::container().child(tree);
        }
        let out = render(&tree).unwrap();
        assert_eq!(out.matches("<div ").count(), depth);
        assert!(out.ends_with(&"</div>".repeat(depth)));
    }
}
