//! The event bus: named, explicitly registered channels with ordered
//! subscriber lists.
//!
//! Subscribers are invoked in subscription order with no short-circuit;
//! inactive plugins are skipped. Broadcast-after signalling is a separate
//! channel that reaches every plugin regardless of subscription.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use plugbase_core::{EventPayload, FireOutcome, PluginHost, SignalArgs};

use crate::lifecycle::PluginManager;
use crate::state::{lock, SharedState, Subscription};

/// Routes named events between plugins.
#[derive(Clone)]
pub struct EventManager {
    state: SharedState,
    plugins: PluginManager,
}

impl EventManager {
    pub(crate) fn new(state: SharedState) -> Self {
        let plugins = PluginManager::new(SharedState::clone(&state));
        Self { state, plugins }
    }

    /// Register a new event. `false` if the name is already taken.
    pub fn register_event(&self, event: &str) -> bool {
        let mut state = lock(&self.state);
        if state.events.contains_key(event) {
            return false;
        }
        state.events.insert(event.to_owned(), Vec::new());
        drop(state);
        info!(event, "event registered");
        true
    }

    /// Remove an event and all its subscriptions. `false` if unknown.
    pub fn unregister_event(&self, event: &str) -> bool {
        let removed = lock(&self.state).events.remove(event).is_some();
        if removed {
            info!(event, "event unregistered");
        }
        removed
    }

    /// Subscribe an active plugin's method to an event.
    ///
    /// Inactive plugins cannot subscribe. Re-subscribing the same
    /// (plugin, method) pair is idempotent; the same plugin may subscribe
    /// several different methods under one event.
    pub fn subscribe(&self, uniquename: &str, event: &str, method: &str) -> bool {
        let mut guard = lock(&self.state);
        let state = &mut *guard;
        if !state.active.contains_key(uniquename) {
            drop(guard);
            warn!(plugin = uniquename, event, "subscription rejected; plugin not active");
            return false;
        }
        let Some(subscribers) = state.events.get_mut(event) else {
            drop(guard);
            warn!(plugin = uniquename, event, "subscription rejected; unknown event");
            return false;
        };
        if subscribers
            .iter()
            .any(|sub| sub.uniquename == uniquename && sub.method == method)
        {
            drop(guard);
            warn!(plugin = uniquename, event, method, "already subscribed");
            return true;
        }
        subscribers.push(Subscription {
            uniquename: uniquename.to_owned(),
            method: method.to_owned(),
        });
        drop(guard);
        info!(plugin = uniquename, event, method, "subscribed");
        true
    }

    /// Remove every (plugin, method) pair the plugin holds under the event.
    ///
    /// `true` when both the plugin (as active) and the event resolve, even
    /// if no pairs were left to remove.
    pub fn unsubscribe(&self, uniquename: &str, event: &str) -> bool {
        let mut guard = lock(&self.state);
        let state = &mut *guard;
        if !state.active.contains_key(uniquename) {
            drop(guard);
            warn!(plugin = uniquename, event, "unsubscribe rejected; plugin not active");
            return false;
        }
        let Some(subscribers) = state.events.get_mut(event) else {
            drop(guard);
            warn!(plugin = uniquename, event, "unsubscribe rejected; unknown event");
            return false;
        };
        let before = subscribers.len();
        subscribers.retain(|sub| sub.uniquename != uniquename);
        let removed = before - subscribers.len();
        drop(guard);
        info!(plugin = uniquename, event, removed, "unsubscribed");
        true
    }

    /// Subscriptions currently held under an event, in firing order.
    pub fn subscriptions(&self, event: &str) -> Option<Vec<Subscription>> {
        lock(&self.state).events.get(event).cloned()
    }

    /// Fire an event.
    ///
    /// `None` when the event was never registered — distinct from firing
    /// with zero subscribers, which yields a vacuously successful outcome.
    /// Every subscriber still resolvable as active is invoked in
    /// subscription order, with no short-circuit on failure. The payload
    /// always carries the event name. With `broadcast_after`, a signal is
    /// additionally sent to every active then inactive plugin.
    pub fn fire(
        &self,
        host: &dyn PluginHost,
        event: &str,
        broadcast_after: bool,
        data: Map<String, Value>,
    ) -> Option<FireOutcome> {
        let Some(subscribers) = self.subscriptions(event) else {
            debug!(event, "fired event does not exist");
            return None;
        };

        info!(
            event,
            broadcast_after,
            subscribers = subscribers.len(),
            "firing event"
        );
        let payload = EventPayload::with_data(event, data);
        let mut outcome = FireOutcome::empty();
        for sub in &subscribers {
            // Inactive (or no longer registered) subscribers are skipped.
            let Some(plugin) = self.plugins.get(&sub.uniquename) else {
                continue;
            };
            let status = plugin.invoke(&sub.method, &payload);
            outcome.record(sub.uniquename.clone(), status);
        }

        if broadcast_after {
            let args = SignalArgs::for_event(event, payload.signaller(), host);
            self.plugins.signal_all(&args, true);
        }

        info!(event, success = outcome.success, "event fired");
        Some(outcome)
    }
}
