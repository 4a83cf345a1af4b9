//! The orchestrator.
//!
//! [`System`] owns the cohesive registry state, hands the lifecycle manager
//! and event bus facades over it, and drives startup: discovery → preload →
//! resolve → load in order → fire the startup event. The system is itself a
//! plugin — uniquename `"core"` — and it can never be unloaded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use plugbase_core::{CoreError, FireOutcome, Plugin, PluginHandle, PluginHost, Result};

use crate::discovery::DiscoverySource;
use crate::event_bus::EventManager;
use crate::lifecycle::PluginManager;
use crate::state::{new_shared_state, SharedState};

/// The system's own registry key.
pub const SYSTEM_UNIQUENAME: &str = "core";

const SYSTEM_NAME: &str = "Core System";
const DEFAULT_STARTUP_EVENT: &str = "SystemInit";

/// Cheap-to-clone handle over the whole runtime.
#[derive(Clone)]
pub struct System {
    plugins: PluginManager,
    events: EventManager,
    startup_event: Arc<str>,
    started: Arc<AtomicBool>,
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

impl System {
    pub fn new() -> Self {
        Self::with_startup_event(DEFAULT_STARTUP_EVENT)
    }

    /// Build a system that fires a custom well-known event at startup.
    pub fn with_startup_event(event: &str) -> Self {
        let state = new_shared_state();
        let plugins = PluginManager::new(SharedState::clone(&state));
        let events = EventManager::new(state);
        Self {
            plugins,
            events,
            startup_event: Arc::from(event),
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    pub fn events(&self) -> &EventManager {
        &self.events
    }

    pub fn started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn startup_event(&self) -> &str {
        &self.startup_event
    }

    /// Start the system: register the startup event, load the system's own
    /// plugin identity, run discovery, bring the batch up in resolved
    /// order, and fire the startup event.
    ///
    /// Only a critical plugin with unsatisfiable dependencies (or a cyclic
    /// declaration) aborts startup; individual load failures do not.
    pub fn start(&self, sources: &[Box<dyn DiscoverySource>]) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(CoreError::AlreadyStarted);
        }
        info!(event = %self.startup_event, "starting system");

        self.events.register_event(&self.startup_event);
        let this: PluginHandle = Arc::new(self.clone());
        self.plugins.load(self, &this);

        for source in sources {
            for plugin in source.discover()? {
                self.plugins.preload(plugin);
            }
        }

        let order = self.plugins.resolve_order()?;
        self.plugins.load_in_order(self, &order);
        let _ = self.events.fire(self, &self.startup_event, false, Map::new());
        info!("system started");
        Ok(())
    }
}

impl Plugin for System {
    fn name(&self) -> &str {
        SYSTEM_NAME
    }

    fn uniquename(&self) -> &str {
        SYSTEM_UNIQUENAME
    }

    // The core regulates everything else; it never unloads.
    fn unload(&self, _host: &dyn PluginHost) -> bool {
        false
    }
}

impl PluginHost for System {
    fn is_active(&self, uniquename: &str) -> bool {
        self.plugins.is_active(uniquename)
    }

    fn is_inactive(&self, uniquename: &str) -> bool {
        self.plugins.is_inactive(uniquename)
    }

    fn is_registered(&self, uniquename: &str) -> bool {
        self.plugins.is_registered(uniquename)
    }

    fn register_event(&self, event: &str) -> bool {
        self.events.register_event(event)
    }

    fn unregister_event(&self, event: &str) -> bool {
        self.events.unregister_event(event)
    }

    fn subscribe(&self, uniquename: &str, event: &str, method: &str) -> bool {
        self.events.subscribe(uniquename, event, method)
    }

    fn unsubscribe(&self, uniquename: &str, event: &str) -> bool {
        self.events.unsubscribe(uniquename, event)
    }

    fn fire(
        &self,
        event: &str,
        broadcast_after: bool,
        data: Map<String, Value>,
    ) -> Option<FireOutcome> {
        self.events.fire(self, event, broadcast_after, data)
    }
}
