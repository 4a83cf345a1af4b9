//! The broadcast signal payload.
//!
//! Signals are a channel distinct from event subscription: they reach every
//! known plugin through its `signal` hook, regardless of what the plugin
//! subscribed to.

use crate::traits::PluginHost;

/// Fixed-shape payload delivered to a plugin's `signal` hook.
///
/// Every field defaults to absent, so receivers can rely on the shape
/// without probing for keys.
#[derive(Default, Clone, Copy)]
pub struct SignalArgs<'a> {
    /// Uniquename of a plugin that was just loaded.
    pub loaded: Option<&'a str>,
    /// Uniquename of a plugin that was just unloaded.
    pub unloaded: Option<&'a str>,
    /// Name of the event whose firing triggered this signal.
    pub event: Option<&'a str>,
    /// Canonical identifier of whoever requested the broadcast.
    pub signaller: Option<&'a str>,
    /// Handle back into the runtime, when one is available.
    pub system: Option<&'a dyn PluginHost>,
}

impl<'a> SignalArgs<'a> {
    /// Signal announcing a successful plugin load.
    pub fn for_loaded(uniquename: &'a str, signaller: &'a str, system: &'a dyn PluginHost) -> Self {
        Self {
            loaded: Some(uniquename),
            signaller: Some(signaller),
            system: Some(system),
            ..Self::default()
        }
    }

    /// Signal announcing that an event was fired.
    pub fn for_event(event: &'a str, signaller: Option<&'a str>, system: &'a dyn PluginHost) -> Self {
        Self {
            event: Some(event),
            signaller,
            system: Some(system),
            ..Self::default()
        }
    }
}
