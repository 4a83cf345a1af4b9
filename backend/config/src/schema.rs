//! Runtime configuration schema, typed for serde YAML/JSON deserialization.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the Plugbase runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    #[serde(default)]
    pub runtime: RuntimeSection,

    #[serde(default)]
    pub logging: LoggingSection,

    #[serde(default)]
    pub imports: ImportsConfig,
}

/// Orchestrator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSection {
    /// The well-known event fired once the whole batch is up.
    #[serde(default = "default_startup_event")]
    pub startup_event: String,
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            startup_event: default_startup_event(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingSection {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for rolling JSON log files; console-only when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
        }
    }
}

/// Where and how the named-import registry discovers its sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportsConfig {
    /// Primary source directories, imported last (their names win).
    #[serde(default)]
    pub dirs: Vec<PathBuf>,

    /// Default-set directories, imported first.
    #[serde(default)]
    pub default_dirs: Vec<PathBuf>,

    /// By-file mode scans for prefixed files; otherwise each subdirectory
    /// is expected to carry a `<dirFileName>.json`.
    #[serde(default = "default_true")]
    pub by_file: bool,

    /// Filename prefix recognized in by-file mode.
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Per-directory file stem recognized in by-dir mode.
    #[serde(default = "default_dir_file_name")]
    pub dir_file_name: String,
}

impl Default for ImportsConfig {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            default_dirs: Vec::new(),
            by_file: true,
            file_prefix: default_file_prefix(),
            dir_file_name: default_dir_file_name(),
        }
    }
}

fn default_startup_event() -> String {
    "SystemInit".to_owned()
}

fn default_level() -> String {
    "info".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_file_prefix() -> String {
    "imports_".to_owned()
}

fn default_dir_file_name() -> String {
    "main".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_populated() {
        let config = RuntimeConfig::default();
        assert_eq!(config.runtime.startup_event, "SystemInit");
        assert_eq!(config.logging.level, "info");
        assert!(config.imports.by_file);
        assert_eq!(config.imports.file_prefix, "imports_");
        assert_eq!(config.imports.dir_file_name, "main");
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let yaml = r#"
logging:
  level: debug
imports:
  dirs:
    - /opt/plugbase/imports
  byFile: false
"#;
        let config: RuntimeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.runtime.startup_event, "SystemInit");
        assert!(!config.imports.by_file);
        assert_eq!(config.imports.dirs.len(), 1);
        assert_eq!(config.imports.file_prefix, "imports_");
    }

    #[test]
    fn round_trips_through_yaml() {
        let mut config = RuntimeConfig::default();
        config.runtime.startup_event = "Boot".to_owned();
        config.imports.default_dirs.push(PathBuf::from("/srv/defaults"));

        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: RuntimeConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.runtime.startup_event, "Boot");
        assert_eq!(back.imports.default_dirs, config.imports.default_dirs);
    }
}
