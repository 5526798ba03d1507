//! # Dars static exporter
//!
//! Declarative UI component trees rendered to a static `index.html`,
//! `styles.css` and `script.js` bundle.
//!
//! ## Features
//! - Typed component tree (text, buttons, form controls, cards, modals, navbars)
//!   with a generic fallback for unknown component types
//! - Document metadata: SEO metas, Open Graph, Twitter Cards, PWA tags
//! - Global CSS rules and inline or file-backed scripts
//! - Accumulating validation before anything is written
//! - Apps authored in Rust or loaded from YAML/JSON manifests
//!
//! ## Example
//! ```ignore
//! use dars_export::{export, App, Component, Script, Style};
//!
//! let mut app = App::new("Hello");
//! app.set_root(
//!     Component::container()
//!         .with_class("fade-in")
//!         .child(Component::text("Hi")),
//! );
//! app.add_global_style(".fade-in", Style::new().with("opacity", "0"));
//! app.add_script(Script::inline("console.log(1)"));
//!
//! assert!(export(&app, "build"));
//! ```

pub mod app;
pub mod attributes;
pub mod bundle;
pub mod components;
pub mod document;
pub mod error;
pub mod exporter;
pub mod manifest;
pub mod renderer;
pub mod script;
pub mod style;
pub mod stylesheet;
pub mod validator;

// --- Core types ---
pub use app::{App, AppConfig, AppStats, OpenGraph, Pwa, TwitterCard, Viewport};
pub use components::{Component, ComponentKind};
pub use error::{DarsError, DarsResult, ValidationError};
pub use script::Script;
pub use style::{GlobalStyles, Scalar, Style};

// --- Export ---
pub use exporter::{
    export, generate_css, generate_html, generate_javascript, try_export, ExportReport,
    INDEX_FILE, SCRIPT_FILE, STYLES_FILE,
};
pub use validator::validate;
