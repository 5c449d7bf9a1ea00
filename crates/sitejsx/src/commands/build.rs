//! Project build command.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use sitejsx_emit::ProjectBuilder;

use crate::config::ConfigFile;

/// Run the build command.
pub fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    minify: Option<bool>,
    validate: Option<bool>,
) -> Result<()> {
    tracing::info!("Building pages...");

    let file_config = ConfigFile::load(config_path)?;

    let mut config = file_config.project_config();
    if let Some(output) = output {
        config.output_dir = output;
    }
    config.minify = minify.unwrap_or(config.minify);
    config.validate = validate.unwrap_or(config.validate);

    let result = ProjectBuilder::new(config)?.build()?;

    tracing::info!(
        "Built {} pages with {} images and {} custom-property classes in {}ms",
        result.pages,
        result.images,
        result.css_classes,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    if !result.failures.is_empty() {
        for failure in &result.failures {
            tracing::error!("{}: {}", failure.source.display(), failure.error);
        }
        bail!("{} pages failed", result.failures.len());
    }

    Ok(())
}
