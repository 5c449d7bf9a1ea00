//! Inputs, options, results and errors for a conversion.

use std::collections::HashMap;

use serde::Deserialize;

use crate::tables::{CssVarTable, ImageImports};

/// Mapping from an original resource reference to the sanitized filename
/// the asset pipeline stored it under.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AssetMap {
    entries: HashMap<String, String>,
}

impl AssetMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the sanitized filename for an original reference.
    pub fn insert(&mut self, original: impl Into<String>, sanitized: impl Into<String>) {
        self.entries.insert(original.into(), sanitized.into());
    }

    /// Look up a reference exactly as written, then without its leading slash.
    pub fn resolve(&self, reference: &str) -> Option<&str> {
        self.entries
            .get(reference)
            .or_else(|| {
                reference
                    .strip_prefix('/')
                    .and_then(|stripped| self.entries.get(stripped))
            })
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssetMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Knobs for a conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Element that carries the body attributes (e.g. "div")
    pub wrapper_tag: String,

    /// Flat directory images are imported from (e.g. "images-flat")
    pub images_dir: String,

    /// Prefix for synthesized custom-property classes (e.g. "custom-var")
    pub custom_var_prefix: String,

    /// Emit HTML comments as JSX comments instead of dropping them
    pub keep_comments: bool,

    /// Run the regex post-pass over the finished output
    pub normalize_output: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            wrapper_tag: "div".to_string(),
            images_dir: "images-flat".to_string(),
            custom_var_prefix: "custom-var".to_string(),
            keep_comments: false,
            normalize_output: false,
        }
    }
}

impl ConvertOptions {
    /// Reject option values that would make every conversion emit broken output.
    pub fn validate(&self) -> Result<(), ConvertError> {
        let tag = &self.wrapper_tag;
        let valid_tag = tag
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase())
            && tag
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid_tag {
            return Err(ConvertError::InvalidWrapperTag(tag.clone()));
        }

        if self.images_dir.trim_matches('/').is_empty() {
            return Err(ConvertError::EmptyImagesDir);
        }

        let prefix = &self.custom_var_prefix;
        let valid_prefix = prefix
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_prefix {
            return Err(ConvertError::InvalidClassPrefix(prefix.clone()));
        }

        Ok(())
    }
}

/// A structural anomaly met while converting. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A close tag closed elements that were still open above it
    MismatchedClose { expected: String, found: String },

    /// A close tag matched nothing on the stack and was dropped
    StrayClose(String),

    /// An element was still open at end of input and was force-closed
    Unclosed(String),

    /// A second body tag was ignored
    DuplicateBody,

    /// The document had no body; the pre-body content became the output
    MissingBody,
}

/// Output of a conversion whose side tables are owned by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Markup {
    pub jsx: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Output of one conversion.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    /// The JSX fragment or wrapper element
    pub jsx: String,

    /// Images referenced by the fragment, in first-seen order
    pub images: ImageImports,

    /// Classes synthesized for inline custom properties
    pub css_vars: CssVarTable,

    /// Structural anomalies encountered
    pub diagnostics: Vec<Diagnostic>,

    /// Flat image directory the imports point into
    pub images_dir: String,
}

impl Conversion {
    /// `import` lines for every referenced image.
    pub fn import_statements(&self) -> String {
        self.images.to_import_statements(&self.images_dir)
    }

    /// CSS rule blocks for every synthesized custom-property class.
    pub fn css(&self) -> String {
        self.css_vars.to_css()
    }
}

/// Caller contract violations. Malformed HTML never produces one of these.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid wrapper tag: {0:?}")]
    InvalidWrapperTag(String),

    #[error("Images directory must not be empty")]
    EmptyImagesDir,

    #[error("Invalid custom property class prefix: {0:?}")]
    InvalidClassPrefix(String),
}
