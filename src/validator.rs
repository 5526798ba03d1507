use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::app::App;
use crate::components::Component;
use crate::error::ValidationError;

/// Check an app before export. Every problem is reported, nothing is mutated.
pub fn validate(app: &App) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if app.root.is_none() {
        errors.push(ValidationError::MissingRoot);
    }
    if app.title.trim().is_empty() {
        errors.push(ValidationError::EmptyTitle);
    }
    if let Some(root) = &app.root {
        validate_tree(root, &mut errors);
    }
    if app.global_styles.iter().any(|(selector, _)| selector.trim().is_empty()) {
        errors.push(ValidationError::EmptySelector);
    }
    for (selector, style) in app.global_styles.iter() {
        for (property, _) in style.iter() {
            if !is_valid_property(property) {
                errors.push(ValidationError::InvalidStyleProperty {
                    property: property.to_string(),
                    path: selector.to_string(),
                });
            }
        }
    }

    for error in &errors {
        log::warn!("{}", error);
    }
    errors
}

/// Structural checks over the whole tree, in pre-order.
pub fn validate_tree(root: &Component, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for (path, node) in root.walk() {
        if let Some(id) = node.id.as_deref() {
            if !is_valid_id(id) {
                errors.push(ValidationError::InvalidId {
                    id: id.to_string(),
                    path: path.to_string(),
                });
            }
            if !seen.insert(id) && reported.insert(id) {
                errors.push(ValidationError::DuplicateId { id: id.to_string() });
            }
        }

        for (property, _) in node.style.iter() {
            if !is_valid_property(property) {
                errors.push(ValidationError::InvalidStyleProperty {
                    property: property.to_string(),
                    path: path.to_string(),
                });
            }
        }

        if !node.children.is_empty() && !node.kind.renders_children() {
            errors.push(ValidationError::ChildrenOnLeaf {
                kind: node.kind.variant_name(),
                path: path.to_string(),
            });
        }
    }
}

/// HTML ids: non-empty, no whitespace. A leading digit is allowed.
fn is_valid_id(id: &str) -> bool {
    static ID_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = ID_REGEX.get_or_init(|| Regex::new(r"^\S+$").unwrap());
    re.is_match(id)
}

/// Hyphenated CSS property names, including vendor prefixes and custom properties.
fn is_valid_property(property: &str) -> bool {
    static PROPERTY_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = PROPERTY_REGEX
        .get_or_init(|| Regex::new(r"^(--[A-Za-z0-9_\-]+|-?[A-Za-z][A-Za-z0-9\-]*)$").unwrap());
    re.is_match(property)
}
