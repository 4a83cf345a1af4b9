//! The plugin contract and the seam back into the runtime.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::event::{EventPayload, FireOutcome};
use crate::signal::SignalArgs;

/// Shared handle to a pluggable unit.
pub type PluginHandle = Arc<dyn Plugin>;

/// Capability set every pluggable unit must implement.
///
/// Plugins keep their own interior state; every hook takes `&self` so a
/// handle can live in several registries at once. Lifecycle hooks report
/// soft failure by returning `false` rather than erroring.
pub trait Plugin: Send + Sync {
    /// Display name.
    fn name(&self) -> &str;

    /// Stable identifier, unique across the whole registry. The only valid
    /// map key for a plugin.
    fn uniquename(&self) -> &str;

    /// Ordered alternative dependency groups: OR across groups, AND within
    /// a group, each member a uniquename. Empty means no dependencies.
    fn dependency(&self) -> Vec<Vec<String>> {
        Vec::new()
    }

    /// Critical plugins abort startup when no dependency group can be
    /// satisfied; non-critical ones are silently dropped.
    fn critical(&self) -> bool {
        false
    }

    /// Perform setup. Returning `false` parks the plugin inactive rather
    /// than failing hard.
    fn load(&self, host: &dyn PluginHost) -> bool {
        let _ = host;
        true
    }

    /// Perform teardown. Returning `false` vetoes the unload and the plugin
    /// stays active.
    fn unload(&self, host: &dyn PluginHost) -> bool {
        let _ = host;
        true
    }

    /// Called once, immediately after a successful `load`. The canonical
    /// place to subscribe to events; its result is reported as the overall
    /// result of the load operation.
    fn prepare(&self, host: &dyn PluginHost) -> bool {
        let _ = host;
        true
    }

    /// Receives lifecycle/broadcast notifications. No return value is
    /// consumed.
    fn signal(&self, args: &SignalArgs<'_>) {
        let _ = args;
    }

    /// Event dispatch entry: the bus calls this with the method name the
    /// plugin subscribed. Unrecognized methods should return `false`.
    fn invoke(&self, method: &str, payload: &EventPayload) -> bool {
        let _ = (method, payload);
        false
    }
}

impl std::fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("uniquename", &self.uniquename())
            .finish()
    }
}

/// Runtime operations available to plugins from within their hooks.
///
/// All identifiers are uniquenames; unknown names resolve to a `false` or
/// absent result rather than erroring.
pub trait PluginHost: Send + Sync {
    fn is_active(&self, uniquename: &str) -> bool;
    fn is_inactive(&self, uniquename: &str) -> bool;
    fn is_registered(&self, uniquename: &str) -> bool;

    /// Register a named event. `false` if it already exists.
    fn register_event(&self, event: &str) -> bool;

    /// Remove a named event. `false` if it was never registered.
    fn unregister_event(&self, event: &str) -> bool;

    /// Subscribe an *active* plugin's method to an event.
    fn subscribe(&self, uniquename: &str, event: &str, method: &str) -> bool;

    /// Remove every subscription the plugin holds under the event.
    fn unsubscribe(&self, uniquename: &str, event: &str) -> bool;

    /// Fire an event. `None` when the event was never registered, which is
    /// distinct from firing with zero subscribers.
    fn fire(&self, event: &str, broadcast_after: bool, data: Map<String, Value>)
        -> Option<FireOutcome>;
}
