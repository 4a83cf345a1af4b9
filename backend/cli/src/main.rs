mod check_cmd;
mod imports_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use plugbase_config::{config_dir, config_file_path, load_config};
use plugbase_logging::init_logger;

use imports_cmd::ImportsCommands;

#[derive(Parser)]
#[command(name = "plugbase")]
#[command(about = "Plugbase — pluggable runtime utilities")]
#[command(version)]
struct Cli {
    /// Path to the runtime config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the runtime configuration
    Check,
    /// Inspect the named-import registry
    Imports {
        #[command(subcommand)]
        command: ImportsCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = cli
        .config
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let config = load_config(&path)?;

    init_logger(&config.logging.level, config.logging.dir.as_deref());

    match cli.command {
        Commands::Check => check_cmd::run(&path, &config),
        Commands::Imports { command } => imports_cmd::run(&config, command),
    }
}
