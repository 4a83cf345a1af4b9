//! The Plugbase runtime core.
//!
//! Discovery yields plugin descriptors; the resolver turns their OR-grouped
//! dependency declarations into one global load order; the lifecycle manager
//! drives each plugin through load → active/inactive → unload; the event bus
//! routes named events between active plugins. [`System`] ties the pieces
//! together around one cohesive shared state.

pub mod discovery;
pub mod event_bus;
pub mod lifecycle;
pub mod resolver;
pub mod state;
pub mod system;

pub use discovery::{DiscoverySource, StaticSource};
pub use event_bus::EventManager;
pub use lifecycle::PluginManager;
pub use resolver::resolve_order;
pub use state::{PluginNode, RegistryState, SharedState, Subscription};
pub use system::{System, SYSTEM_UNIQUENAME};

#[cfg(test)]
pub(crate) mod testutil;
