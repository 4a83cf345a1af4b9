//! Config file resolution and loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::schema::RuntimeConfig;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the Plugbase config directory.
/// Priority: `PLUGBASE_CONFIG_DIR` env > `~/.plugbase`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PLUGBASE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".plugbase");
    }
    PathBuf::from(".plugbase")
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns defaults when the file does not exist (first run).
pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config file does not exist; using defaults");
        return Ok(RuntimeConfig::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: RuntimeConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn loads_a_written_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "runtime:\n  startupEvent: Boot\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.runtime.startup_event, "Boot");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "logging: [not a mapping").unwrap();

        assert!(load_config(&path).is_err());
    }
}
