//! Plugbase runtime configuration: typed schema, YAML loading, validation.

pub mod io;
pub mod schema;
pub mod validation;

pub use io::{config_dir, config_file_path, load_config};
pub use schema::{ImportsConfig, LoggingSection, RuntimeConfig, RuntimeSection};
pub use validation::{validate, ValidationIssue, ValidationReport};
