//! Attribute assembly and escaping for generated markup.

use std::fmt;

use crate::style::{Scalar, Style};

/// Escape text for use in HTML content or inside a double-quoted attribute.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[derive(Debug, Clone, PartialEq)]
enum AttrValue {
    Text(String),
    Flag,
}

/// Ordered attribute list for one tag.
///
/// Candidates that are absent, empty or `false` are dropped when pushed, so
/// the output holds only present attributes, in push order, separated by a
/// single space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeList {
    attrs: Vec<(&'static str, AttrValue)>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always-present `name="value"` attribute.
    pub fn value(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.attrs.push((name, AttrValue::Text(value.to_string())));
        self
    }

    /// `name="value"` when the value is present and non-empty.
    pub fn opt(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.value(name, v),
            _ => self,
        }
    }

    /// `name="value"` when the value is present and truthy.
    pub fn scalar(self, name: &'static str, value: Option<&Scalar>) -> Self {
        match value {
            Some(v) if v.is_truthy() => self.value(name, v),
            _ => self,
        }
    }

    /// `name="value"` whenever the value is present, zero included.
    pub fn present(self, name: &'static str, value: Option<&Scalar>) -> Self {
        match value {
            Some(v) => self.value(name, v),
            None => self,
        }
    }

    /// Bare `name` when `on` is true.
    pub fn flag(mut self, name: &'static str, on: bool) -> Self {
        if on {
            self.attrs.push((name, AttrValue::Flag));
        }
        self
    }

    /// `class="base extra"`; the base class may be empty (generic nodes).
    pub fn class(self, base: &str, extra: Option<&str>) -> Self {
        let extra = extra.map(str::trim).filter(|c| !c.is_empty());
        let class = match extra {
            Some(extra) if base.is_empty() => extra.to_string(),
            Some(extra) => format!("{} {}", base, extra),
            None => base.to_string(),
        };
        self.opt("class", Some(&class))
    }

    /// `style="..."`, omitted entirely for an empty style.
    pub fn style(self, style: &Style) -> Self {
        let css = style.to_inline_css();
        self.opt("style", Some(&css))
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl fmt::Display for AttributeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.attrs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match value {
                AttrValue::Text(v) => write!(f, "{}=\"{}\"", name, escape_html(v))?,
                AttrValue::Flag => f.write_str(name)?,
            }
        }
        Ok(())
    }
}
