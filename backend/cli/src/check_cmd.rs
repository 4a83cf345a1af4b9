//! CLI Check Command
//!
//! Loads the config, validates it, and reports findings.

use std::path::Path;

use anyhow::{bail, Result};

use plugbase_config::{validate, RuntimeConfig};

pub fn run(path: &Path, config: &RuntimeConfig) -> Result<()> {
    println!("Checking config: {}\n", path.display());

    let report = validate(config);
    for warning in &report.warnings {
        println!("  warning [{}]: {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("  error   [{}]: {}", error.path, error.message);
    }

    if report.is_valid() {
        println!("\nConfig OK ({} warning(s)).", report.warnings.len());
        Ok(())
    } else {
        bail!("config has {} error(s)", report.errors.len());
    }
}
