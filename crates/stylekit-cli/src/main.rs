//! stylekit CLI tool.
//!
//! Usage:
//! ```bash
//! stylekit codegen [--clean] [--ids css-fn,recipes]
//! stylekit cssgen [--outfile PATH] [--type KIND] [--minimal] [--minify]
//! stylekit build
//! stylekit init
//! stylekit list-artifacts
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use stylekit::{BuildContext, Config};

mod commands;
mod config_resolver;

/// Style extraction and artifact codegen for CSS-in-JS projects
#[derive(Parser)]
#[command(name = "stylekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project directory (default: current directory)
    #[arg(long, global = true, env = "STYLEKIT_CWD")]
    cwd: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the JS runtime, types and root CSS artifacts
    Codegen {
        /// Empty the output directory first
        #[arg(long)]
        clean: bool,

        /// Only emit these artifacts (comma-separated ids)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
    },

    /// Extract CSS from tracked files
    Cssgen {
        /// Write a single stylesheet here instead of chunks
        #[arg(short, long)]
        outfile: Option<PathBuf>,

        /// Only generate one root artifact
        /// (preflight, tokens, static, global, keyframes)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Only write the extracted CSS, without root artifacts
        #[arg(long)]
        minimal: bool,

        /// Minify the output
        #[arg(long)]
        minify: bool,
    },

    /// Generate artifacts, then write and bundle CSS chunks
    Build,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// List the artifact catalog
    ListArtifacts,
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let current = std::env::current_dir().context("Failed to read current directory")?;
    let project_dir = match cli.cwd {
        Some(dir) => current.join(dir),
        None => current,
    };
    let explicit = cli.config.as_deref();
    let format = cli.format;

    match cli.command {
        Commands::Init { force } => commands::init::run(&project_dir, force),
        Commands::Codegen { clean, ids } => {
            let mut config = load_config(&project_dir, explicit)?;
            config.clean |= clean;
            commands::codegen::run(context(config)?, &ids, format).await
        }
        Commands::Cssgen {
            outfile,
            kind,
            minimal,
            minify,
        } => {
            let mut config = load_config(&project_dir, explicit)?;
            config.minify |= minify;
            let args = commands::cssgen::Args {
                outfile,
                kind,
                minimal,
            };
            commands::cssgen::run(context(config)?, args, format).await
        }
        Commands::Build => {
            let config = load_config(&project_dir, explicit)?;
            commands::build::run(context(config)?, format).await
        }
        Commands::ListArtifacts => {
            let config = load_config(&project_dir, explicit)?;
            commands::list_artifacts::run(&context(config)?, format)
        }
    }
}

/// Resolves and loads the config; its `cwd` is taken relative to `project_dir`.
fn load_config(project_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    let source = config_resolver::ConfigResolver::new(project_dir).resolve(explicit);
    let mut config = source.load()?;
    config.cwd = project_dir.join(&config.cwd);
    Ok(config)
}

fn context(config: Config) -> Result<BuildContext> {
    BuildContext::builder()
        .config(config)
        .build()
        .context("Invalid configuration")
}
