//! sitedeck - OAuth-gated dashboard for managing hosted sites
//!
//! Main entry point for the sitedeck CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{config, install_url, start};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// sitedeck - OAuth-gated dashboard for managing hosted sites
#[derive(Parser)]
#[command(name = "sitedeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard server
    Start(start::StartArgs),

    /// Print the OAuth authorization URL
    InstallUrl(install_url::InstallUrlArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "sitedeck=debug,sitedeck_server=debug,sitedeck_oauth=debug,sitedeck_client=debug,sitedeck_config=debug,tower_http=debug,info"
    } else {
        "sitedeck=info,sitedeck_server=info,sitedeck_oauth=info,sitedeck_client=info,warn"
    };

    let log_dir = sitedeck_config::xdg_config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "sitedeck.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "sitedeck=trace,sitedeck_server=trace,sitedeck_oauth=trace,sitedeck_client=trace,sitedeck_config=trace,info",
                )),
        )
        .init();

    let ctx = commands::Context {
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Start(args) => start::run(args, &ctx).await,
        Commands::InstallUrl(args) => install_url::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}
