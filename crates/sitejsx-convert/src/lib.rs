//! HTML to JSX conversion core.
//!
//! This crate turns a captured HTML document into a JSX fragment in one
//! streaming pass, collecting the image imports and custom-property CSS
//! classes the fragment depends on in per-call side tables.

pub mod attributes;
pub mod context;
pub mod converter;
pub mod images;
pub mod names;
pub mod normalize;
pub mod style;
pub mod tables;

pub use attributes::{AttributeTransformer, JsxValue};
pub use context::{AssetMap, Conversion, ConvertError, ConvertOptions, Diagnostic, Markup};
pub use converter::{convert_html_to_jsx, Converter};
pub use images::{identifier_for, resolve_image, ImageRef};
pub use normalize::normalize_jsx;
pub use style::{decompose_style, DecomposedStyle};
pub use tables::{CssVarTable, ImageImports, SideTables};
