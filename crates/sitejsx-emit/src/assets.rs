//! Stylesheet post-processing and asset map loading.

use std::fs;
use std::path::Path;

use sitejsx_convert::AssetMap;

use crate::error::EmitError;

/// Minify CSS using lightningcss.
pub fn minify_css(css: &str) -> Result<String, EmitError> {
    use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

    let stylesheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| EmitError::CssError(format!("parse error: {}", e)))?;

    let minified = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| EmitError::CssError(format!("minify error: {}", e)))?;

    Ok(minified.code)
}

/// Read a sanitized filename map from a JSON object file.
pub fn load_asset_map(path: &Path) -> Result<AssetMap, EmitError> {
    let content = fs::read_to_string(path).map_err(|e| EmitError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let map: AssetMap = serde_json::from_str(&content).map_err(|e| EmitError::AssetMapError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!(entries = map.len(), "loaded asset map from {}", path.display());
    Ok(map)
}
