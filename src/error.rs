use std::path::PathBuf;

use thiserror::Error;

pub type DarsResult<T> = Result<T, DarsError>;

#[derive(Error, Debug)]
pub enum DarsError {
    #[error("App validation failed with {} error(s): {}", .0.len(), join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render markup: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("Script '{name}' could not be loaded: {source}")]
    Script {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {format} app manifest: {message}")]
    Manifest { format: &'static str, message: String },

    #[error("Unknown app manifest format for '{}': expected .yaml, .yml or .json", path.display())]
    UnknownManifestFormat { path: PathBuf },
}

impl DarsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DarsError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A single problem found by [`crate::validator::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No root component has been set")]
    MissingRoot,

    #[error("The app title must not be empty")]
    EmptyTitle,

    #[error("Duplicate id '{id}': component ids must be unique within the tree")]
    DuplicateId { id: String },

    #[error("Invalid id '{id}' at {path}: ids must be non-empty and contain no whitespace")]
    InvalidId { id: String, path: String },

    #[error("Invalid style property '{property}' at {path}")]
    InvalidStyleProperty { property: String, path: String },

    #[error("{kind} at {path} has children, but {kind} components never render children")]
    ChildrenOnLeaf { kind: &'static str, path: String },

    #[error("Global style selectors must not be empty")]
    EmptySelector,
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
