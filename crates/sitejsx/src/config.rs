//! Project configuration file (sitejsx.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use sitejsx_convert::ConvertOptions;
use sitejsx_emit::ProjectConfig;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub pages: PagesConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct PagesConfig {
    #[serde(default = "default_pages_dir")]
    pub dir: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_wrapper_tag")]
    pub wrapper_tag: String,
    #[serde(default)]
    pub keep_comments: bool,
}

#[derive(Debug, Deserialize)]
pub struct AssetsConfig {
    /// Sanitized filename map (JSON)
    pub map: Option<String>,
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
    #[serde(default = "default_custom_var_prefix")]
    pub custom_var_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default)]
    pub minify: bool,
    #[serde(default = "default_validate")]
    pub validate: bool,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dir: default_pages_dir(),
            output: default_output(),
            wrapper_tag: default_wrapper_tag(),
            keep_comments: false,
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            map: None,
            images_dir: default_images_dir(),
            custom_var_prefix: default_custom_var_prefix(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: false,
            validate: default_validate(),
        }
    }
}

fn default_pages_dir() -> String {
    "pages".to_string()
}
fn default_output() -> String {
    "out".to_string()
}
fn default_wrapper_tag() -> String {
    "div".to_string()
}
fn default_images_dir() -> String {
    "images-flat".to_string()
}
fn default_custom_var_prefix() -> String {
    "custom-var".to_string()
}
fn default_validate() -> bool {
    true
}

impl ConfigFile {
    /// Load the config file if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            wrapper_tag: self.pages.wrapper_tag.clone(),
            images_dir: self.assets.images_dir.clone(),
            custom_var_prefix: self.assets.custom_var_prefix.clone(),
            keep_comments: self.pages.keep_comments,
            normalize_output: false,
        }
    }

    pub fn project_config(&self) -> ProjectConfig {
        ProjectConfig {
            pages_dir: PathBuf::from(&self.pages.dir),
            output_dir: PathBuf::from(&self.pages.output),
            asset_map: self.assets.map.as_ref().map(PathBuf::from),
            images_dir: self.assets.images_dir.clone(),
            wrapper_tag: self.pages.wrapper_tag.clone(),
            custom_var_prefix: self.assets.custom_var_prefix.clone(),
            keep_comments: self.pages.keep_comments,
            minify: self.build.minify,
            validate: self.build.validate,
        }
    }
}
