//! CLI Imports Commands
//!
//! Builds the import registry from the configured directories and lets the
//! user list or fetch individual names.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value;

use plugbase_config::RuntimeConfig;
use plugbase_imports::ImportRegistry;

#[derive(Subcommand)]
pub enum ImportsCommands {
    /// List every imported name
    List,
    /// Print one imported value
    Get {
        name: String,
        /// Fallback JSON value when the name is absent
        #[arg(long)]
        default: Option<String>,
    },
}

pub fn run(config: &RuntimeConfig, command: ImportsCommands) -> Result<()> {
    let mut registry = ImportRegistry::new(config.imports.clone());
    registry.import_all()?;

    match command {
        ImportsCommands::List => {
            let mut names: Vec<&str> = registry.names().collect();
            names.sort_unstable();
            println!("{} name(s) imported", names.len());
            for name in names {
                println!("  {name}");
            }
        }
        ImportsCommands::Get { name, default } => {
            let value = match default {
                Some(raw) => {
                    let fallback: Value =
                        serde_json::from_str(&raw).context("--default is not valid JSON")?;
                    registry.get_or(&name, fallback)
                }
                None => registry.get(&name)?.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
