//! Config validation: structural errors and advisory warnings.

use crate::schema::RuntimeConfig;

const KNOWN_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// One finding, pointing at the config path that produced it.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

/// Everything a validation pass found.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            path: path.to_owned(),
            message: message.into(),
        });
    }

    fn warning(&mut self, path: &str, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            path: path.to_owned(),
            message: message.into(),
        });
    }
}

/// Validate a loaded config.
pub fn validate(config: &RuntimeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !KNOWN_LEVELS.contains(&config.logging.level.as_str()) {
        report.error(
            "logging.level",
            format!(
                "unknown level '{}'; expected one of {:?}",
                config.logging.level, KNOWN_LEVELS
            ),
        );
    }

    if config.runtime.startup_event.trim().is_empty() {
        report.error("runtime.startupEvent", "startup event name must not be blank");
    }

    if config.imports.by_file && config.imports.file_prefix.is_empty() {
        report.error(
            "imports.filePrefix",
            "by-file imports need a non-empty file prefix",
        );
    }

    if !config.imports.by_file && config.imports.dir_file_name.is_empty() {
        report.error(
            "imports.dirFileName",
            "by-dir imports need a non-empty file stem",
        );
    }

    for dir in config.imports.default_dirs.iter().chain(&config.imports.dirs) {
        if !dir.is_dir() {
            report.warning(
                "imports",
                format!("import directory does not exist: {}", dir.display()),
            );
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let report = validate(&RuntimeConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn unknown_level_is_an_error() {
        let mut config = RuntimeConfig::default();
        config.logging.level = "chatty".to_owned();
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "logging.level");
    }

    #[test]
    fn empty_prefix_in_by_file_mode_is_an_error() {
        let mut config = RuntimeConfig::default();
        config.imports.file_prefix = String::new();
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "imports.filePrefix");
    }

    #[test]
    fn blank_startup_event_is_an_error() {
        let mut config = RuntimeConfig::default();
        config.runtime.startup_event = "  ".to_owned();
        let report = validate(&config);
        assert!(!report.is_valid());
    }

    #[test]
    fn missing_import_dir_is_only_a_warning() {
        let mut config = RuntimeConfig::default();
        config.imports.dirs.push("/definitely/not/here".into());
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }
}
