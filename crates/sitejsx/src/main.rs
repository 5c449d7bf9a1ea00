//! sitejsx CLI - convert captured website HTML into React page components.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "sitejsx")]
#[command(about = "Convert captured website HTML into React page components")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to sitejsx.toml config file
    #[arg(short, long, default_value = "sitejsx.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default sitejsx.toml and pages directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Convert a single HTML file
    Convert {
        /// HTML file to convert
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sanitized filename map (JSON), overrides the config file
        #[arg(short, long)]
        assets: Option<PathBuf>,

        /// Emit a complete page component module instead of bare JSX
        #[arg(long)]
        component: bool,

        /// Component name (defaults to the input file name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Convert every page in the pages directory
    Build {
        /// Output directory (defaults to config or "out")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minify generated CSS
        #[arg(long)]
        minify: bool,

        /// Skip parsing generated modules
        #[arg(long)]
        no_validate: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Convert {
            input,
            output,
            assets,
            component,
            name,
        } => {
            let args = commands::convert::ConvertArgs {
                input,
                output,
                assets,
                component,
                name,
            };
            commands::convert::run(&cli.config, args)?;
        }
        Commands::Build {
            output,
            minify,
            no_validate,
        } => {
            let minify = if minify { Some(true) } else { None };
            let validate = if no_validate { Some(false) } else { None };
            commands::build::run(&cli.config, output, minify, validate)?;
        }
    }

    Ok(())
}
