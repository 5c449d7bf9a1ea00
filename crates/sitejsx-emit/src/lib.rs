//! Page emitter for sitejsx.
//!
//! Renders converted documents as React page modules with their
//! custom-property stylesheets, and builds a whole directory of captured
//! HTML pages into a project tree.

pub mod assets;
pub mod builder;
pub mod component;
pub mod error;
pub mod templates;
pub mod validate;

pub use assets::{load_asset_map, minify_css};
pub use builder::{BuildResult, ManifestEntry, PageFailure, ProjectBuilder, ProjectConfig};
pub use component::{component_name, render_page_component};
pub use error::EmitError;
pub use validate::validate_jsx_module;
