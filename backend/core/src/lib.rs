//! Shared contract for the Plugbase runtime.
//!
//! Everything a pluggable unit and the runtime need to agree on lives here:
//! the [`Plugin`] trait, the [`PluginHost`] seam through which plugins talk
//! back to the runtime, the fixed-shape [`SignalArgs`] broadcast payload,
//! event payload/outcome types, and the error taxonomy.

pub mod error;
pub mod event;
pub mod signal;
pub mod traits;

pub use error::{CoreError, Result};
pub use event::{EventPayload, FireOutcome};
pub use signal::SignalArgs;
pub use traits::{Plugin, PluginHandle, PluginHost};
