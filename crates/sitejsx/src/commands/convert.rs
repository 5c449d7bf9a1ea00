//! Single-file conversion command.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sitejsx_convert::{AssetMap, Converter};
use sitejsx_emit::{component_name, load_asset_map, render_page_component, validate_jsx_module};

use crate::config::ConfigFile;

pub struct ConvertArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub assets: Option<PathBuf>,
    pub component: bool,
    pub name: Option<String>,
}

/// Run the convert command.
pub fn run(config_path: &Path, args: ConvertArgs) -> Result<()> {
    let file_config = ConfigFile::load(config_path)?;

    let assets = match args
        .assets
        .or_else(|| file_config.assets.map.as_ref().map(PathBuf::from))
    {
        Some(path) => load_asset_map(&path)?,
        None => AssetMap::new(),
    };

    let html = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let converter = Converter::new(file_config.convert_options())?;
    let conversion = converter.convert(&html, &assets);

    if !conversion.diagnostics.is_empty() {
        tracing::info!(
            "{} structural issues in {}",
            conversion.diagnostics.len(),
            args.input.display()
        );
    }

    let name = args.name.unwrap_or_else(|| {
        let stem = args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("page");
        component_name(stem)
    });

    // The stylesheet can only sit next to output written to disk.
    let css_file = match &args.output {
        Some(output) if !conversion.css_vars.is_empty() => {
            let css_name = stylesheet_name(output, &name, args.component);
            let css_path = output.with_file_name(&css_name);
            fs::write(&css_path, conversion.css())
                .with_context(|| format!("Failed to write {}", css_path.display()))?;
            tracing::info!("Wrote {}", css_path.display());
            Some(css_name)
        }
        _ => None,
    };

    let rendered = if args.component {
        let module = render_page_component(&name, &conversion, css_file.as_deref())?;
        if file_config.build.validate {
            validate_jsx_module(&module)?;
        }
        module
    } else {
        let mut jsx = conversion.jsx.clone();
        jsx.push('\n');
        jsx
    };

    match &args.output {
        Some(output) => {
            fs::write(output, rendered)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Wrote {}", output.display());
        }
        None => {
            std::io::stdout()
                .write_all(rendered.as_bytes())
                .context("Failed to write to stdout")?;
            if !conversion.css_vars.is_empty() {
                tracing::warn!(
                    "{} custom-property classes are not written when printing to stdout",
                    conversion.css_vars.len()
                );
            }
        }
    }

    Ok(())
}

/// Page modules import `<Name>.css`; bare JSX gets a stylesheet named after
/// the output file.
fn stylesheet_name(output: &Path, name: &str, component: bool) -> String {
    let stem = output.file_stem().and_then(|s| s.to_str());
    match stem {
        Some(stem) if !component => format!("{stem}.css"),
        _ => format!("{name}.css"),
    }
}
