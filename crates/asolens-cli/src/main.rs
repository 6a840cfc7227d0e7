//! Command line interface for asolens.
//!
//! Configuration comes from the environment (and `.env`); subcommands cover
//! one-off listing extraction, full report generation, suggestion runs, and
//! API key checks.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use asolens_core::Platform;

#[derive(Debug, Parser)]
#[command(name = "asolens")]
#[command(about = "ASO report generator for mobile app store listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract listing metadata from a single store page
    Extract {
        /// Store page URL
        #[arg(long)]
        url: String,

        /// Store platform: ios or android
        #[arg(long)]
        platform: Platform,
    },
    /// Generate a full ASO report for an app profile
    Report {
        /// App profile YAML file
        #[arg(long)]
        profile: PathBuf,

        /// Write the report bundle to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Fill report image slots from Pexels after generation
        #[arg(long)]
        enrich: bool,
    },
    /// Suggest keywords, competitors, and markets for an app profile
    Suggest {
        /// App profile YAML file
        #[arg(long)]
        profile: PathBuf,
    },
    /// Check configured API keys against their services
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = asolens_core::load_app_config()?;
    init_tracing(&config.log_level);

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract { url, platform } => commands::extract(&config, &url, platform).await,
        Commands::Report {
            profile,
            output,
            enrich,
        } => commands::report(&config, &profile, output.as_deref(), enrich).await,
        Commands::Suggest { profile } => commands::suggest(&config, &profile).await,
        Commands::Status => commands::status(&config).await,
    }
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
