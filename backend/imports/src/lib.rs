//! Named-object import registry.
//!
//! A flat name→value lookup table filled by bulk-importing JSON sources
//! from directories. Shares no logic with the plugin resolver; the only
//! overlap is the error taxonomy.

pub mod registry;

pub use registry::ImportRegistry;
