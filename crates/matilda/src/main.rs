//! Matilda CLI - minimal static site generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "matilda")]
#[command(about = "Minimal static site generator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to matilda.toml config file
    #[arg(short, long, default_value = "matilda.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new site in the current directory
    Init {
        /// Overwrite files that already exist
        #[arg(short, long)]
        force: bool,
    },

    /// Build the site
    Build {
        /// Output directory (defaults to config or "public")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worker threads for page rendering (defaults to one per core)
        #[arg(short, long)]
        jobs: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { force } => {
            commands::init::run(force).await?;
        }
        Commands::Build { output, jobs } => {
            commands::build::run(&cli.config, output, jobs).await?;
        }
    }

    Ok(())
}
