//! Plugin lifecycle: load, unload, lookup, and broadcast signals.
//!
//! Handles are snapshotted out of the shared state before any hook runs, so
//! no lock is ever held while plugin code executes and hooks are free to
//! call back into the runtime.

use tracing::{debug, info, warn};

use plugbase_core::{PluginHandle, PluginHost, Result, SignalArgs};

use crate::resolver;
use crate::state::{lock, PluginNode, SharedState};
use crate::system::SYSTEM_UNIQUENAME;

/// Drives plugins through load → active/inactive → unload and owns the
/// lookup and broadcast-signal primitives.
#[derive(Clone)]
pub struct PluginManager {
    state: SharedState,
}

impl PluginManager {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Register a descriptor into the preloaded partition, resolving its
    /// dependency declaration once.
    pub fn preload(&self, plugin: PluginHandle) {
        let uniquename = plugin.uniquename().to_owned();
        let node = PluginNode::new(plugin);
        debug!(plugin = %uniquename, "preloaded");
        lock(&self.state).preloaded.insert(uniquename, node);
    }

    /// Compute the load order for everything preloaded so far.
    pub fn resolve_order(&self) -> Result<Vec<PluginHandle>> {
        let state = lock(&self.state);
        resolver::resolve_order(&state.preloaded)
    }

    /// Look up an active plugin by uniquename.
    pub fn get(&self, uniquename: &str) -> Option<PluginHandle> {
        lock(&self.state).active.get(uniquename).cloned()
    }

    /// Look up an inactive plugin by uniquename.
    pub fn get_inactive(&self, uniquename: &str) -> Option<PluginHandle> {
        lock(&self.state).inactive.get(uniquename).cloned()
    }

    pub fn is_active(&self, uniquename: &str) -> bool {
        lock(&self.state).active.contains_key(uniquename)
    }

    pub fn is_inactive(&self, uniquename: &str) -> bool {
        lock(&self.state).inactive.contains_key(uniquename)
    }

    pub fn is_registered(&self, uniquename: &str) -> bool {
        let state = lock(&self.state);
        state.active.contains_key(uniquename) || state.inactive.contains_key(uniquename)
    }

    /// Load a plugin.
    ///
    /// No-op returning `true` when already active. A successful `load` hook
    /// moves the plugin into the active partition, broadcasts a lifecycle
    /// signal to every registered plugin, then runs `prepare`; the prepare
    /// result is the overall outcome. A declined `load` parks the plugin
    /// inactive — inactive is not terminal, a later call retries the hook.
    pub fn load(&self, host: &dyn PluginHost, plugin: &PluginHandle) -> bool {
        let uniquename = plugin.uniquename().to_owned();
        if lock(&self.state).active.contains_key(&uniquename) {
            return true;
        }

        if plugin.load(host) {
            {
                let mut state = lock(&self.state);
                state.inactive.remove(&uniquename);
                state
                    .active
                    .insert(uniquename.clone(), PluginHandle::clone(plugin));
            }
            debug!(plugin = %uniquename, "loaded");
            let args = SignalArgs::for_loaded(&uniquename, SYSTEM_UNIQUENAME, host);
            self.signal_all(&args, true);
            plugin.prepare(host)
        } else {
            let mut state = lock(&self.state);
            state
                .inactive
                .entry(uniquename.clone())
                .or_insert_with(|| PluginHandle::clone(plugin));
            drop(state);
            debug!(plugin = %uniquename, "declined to load; parked inactive");
            false
        }
    }

    /// Unload a plugin by uniquename.
    ///
    /// Active plugins get their `unload` hook and may veto by returning
    /// `false`; on success they move to the inactive partition. Inactive
    /// plugins are dropped silently without the hook — they were never
    /// running. Unknown names return `false`.
    pub fn unload(&self, host: &dyn PluginHost, uniquename: &str) -> bool {
        let active = lock(&self.state).active.get(uniquename).cloned();
        if let Some(plugin) = active {
            if !plugin.unload(host) {
                debug!(plugin = %uniquename, "unload vetoed; staying active");
                return false;
            }
            let mut state = lock(&self.state);
            state.active.remove(uniquename);
            state.inactive.insert(uniquename.to_owned(), plugin);
            drop(state);
            debug!(plugin = %uniquename, "unloaded");
            return true;
        }

        if lock(&self.state).inactive.remove(uniquename).is_some() {
            debug!(plugin = %uniquename, "dropped from inactive");
            return true;
        }
        false
    }

    /// Send a signal to one plugin, in whichever partition it lives.
    pub fn signal(&self, uniquename: &str, args: &SignalArgs<'_>) {
        let plugin = {
            let state = lock(&self.state);
            state
                .active
                .get(uniquename)
                .or_else(|| state.inactive.get(uniquename))
                .cloned()
        };
        if let Some(plugin) = plugin {
            plugin.signal(args);
        }
    }

    /// Broadcast a signal to all active plugins, then (optionally) all
    /// inactive ones, each partition in its enumeration order.
    pub fn signal_all(&self, args: &SignalArgs<'_>, include_inactive: bool) {
        let (active, inactive) = {
            let state = lock(&self.state);
            (
                state.active.values().cloned().collect::<Vec<_>>(),
                state.inactive.values().cloned().collect::<Vec<_>>(),
            )
        };
        for plugin in &active {
            plugin.signal(args);
        }
        if include_inactive {
            for plugin in &inactive {
                plugin.signal(args);
            }
        }
        debug!(
            loaded = ?args.loaded,
            unloaded = ?args.unloaded,
            event = ?args.event,
            "signalled all plugins"
        );
    }

    /// Startup driver: load every plugin in resolver order. A plugin that
    /// fails to load does not block the ones after it.
    pub fn load_in_order(&self, host: &dyn PluginHost, order: &[PluginHandle]) {
        info!(plugins = order.len(), "loading plugins in resolved order");
        for plugin in order {
            if !self.load(host, plugin) {
                warn!(plugin = %plugin.uniquename(), "plugin did not come up active");
            }
        }
    }
}
