//! Initialize a sitejsx project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing sitejsx...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    let base = config_path.parent().unwrap_or(Path::new(""));
    let pages_dir = base.join("pages");
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir).context("Failed to create pages directory")?;
        tracing::info!("Created {}/", pages_dir.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Put captured .html files in pages/ and run 'sitejsx build'.");

    Ok(())
}

pub const DEFAULT_CONFIG: &str = r#"# sitejsx configuration

[pages]
# Directory of captured HTML snapshots
dir = "pages"

# Output project root; page modules are written to <output>/src/pages
output = "out"

# Element that carries <body> attributes
wrapper_tag = "div"

# Keep HTML comments as JSX comments
keep_comments = false

[assets]
# JSON object mapping original asset references to sanitized filenames
# map = "assets.json"

# Flat image directory, relative to the page modules
images_dir = "images-flat"

# Prefix for classes holding inline CSS custom properties
custom_var_prefix = "custom-var"

[build]
# Minify generated CSS
minify = false

# Parse every generated module before writing it
validate = true
"#;
