mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sheetcal_core::SheetCalConfig;
use sheetcal_core::config::DEFAULT_CONFIG_PATH;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetcal")]
#[command(about = "Regenerate a published .ics calendar from a spreadsheet schedule")]
#[command(version)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the sheet and rewrite the calendar if it changed (default)
    Generate {
        /// Report whether the calendar would change without writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show which events would change in the published calendar
    Status,
    /// Render the calendar to stdout
    Print,
    /// Write an example config file
    Init,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Generate { dry_run: false });

    match command {
        Commands::Init => commands::init::run(&cli.config),
        Commands::Generate { dry_run } => commands::generate::run(load_config(&cli.config)?, dry_run).await,
        Commands::Status => commands::status::run(load_config(&cli.config)?).await,
        Commands::Print => commands::print::run(load_config(&cli.config)?).await,
    }
}

/// Logs go to stderr so `sheetcal print` output stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: &std::path::Path) -> Result<SheetCalConfig> {
    SheetCalConfig::load(path).with_context(|| {
        format!(
            "Could not load config from {}\n\n\
            Create one with:\n  \
            sheetcal init",
            path.display()
        )
    })
}
