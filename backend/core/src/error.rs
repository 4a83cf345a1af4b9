use thiserror::Error;

/// Top-level error type for the Plugbase runtime.
///
/// Only a handful of failures are allowed to abort the surrounding
/// operation; everything else in the runtime is a logged soft failure
/// reported as a boolean return.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A critical plugin has no dependency group whose every member is
    /// registered. Aborts startup for the whole batch.
    #[error("critical plugin '{plugin}' cannot be loaded; missing dependencies: {missing:?}")]
    DependencyUnsatisfied {
        plugin: String,
        missing: Vec<String>,
    },

    /// A plugin's dependency declarations loop back onto themselves.
    #[error("dependency cycle detected at plugin '{0}'")]
    DependencyCycle(String),

    /// The given path cannot be used as a plugin/import source.
    #[error("{0} is not usable as an import source")]
    NotADiscoverySource(String),

    /// `get` on the import registry found nothing and no default was given.
    #[error("'{0}' is not imported")]
    NameNotImported(String),

    /// `System::start` was called a second time.
    #[error("system has already been started")]
    AlreadyStarted,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience result type used throughout the runtime.
pub type Result<T> = std::result::Result<T, CoreError>;
