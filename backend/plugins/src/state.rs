//! Cohesive registry state shared by the lifecycle manager and event bus.
//!
//! Three plugin partitions keyed by uniquename — *preloaded* (resolution
//! bookkeeping), *active*, *inactive* — plus the event subscription table.
//! A uniquename appears in at most one of active/inactive at any time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use plugbase_core::PluginHandle;

/// A plugin wrapped with its normalized dependency groups.
///
/// Exists only between preload and resolution; owned exclusively by the
/// preloaded partition.
pub struct PluginNode {
    pub plugin: PluginHandle,
    pub groups: Vec<Vec<String>>,
}

impl PluginNode {
    /// Reads the dependency declaration once, at registration time. An
    /// absent declaration normalizes to a single empty group.
    pub fn new(plugin: PluginHandle) -> Self {
        let mut groups = plugin.dependency();
        if groups.is_empty() {
            groups.push(Vec::new());
        }
        Self { plugin, groups }
    }
}

/// One event subscription: which plugin, which method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub uniquename: String,
    pub method: String,
}

/// The registries and the subscription table, mutated only behind the
/// single mutex in [`SharedState`].
#[derive(Default)]
pub struct RegistryState {
    pub preloaded: HashMap<String, PluginNode>,
    pub active: HashMap<String, PluginHandle>,
    pub inactive: HashMap<String, PluginHandle>,
    pub events: HashMap<String, Vec<Subscription>>,
}

pub type SharedState = Arc<Mutex<RegistryState>>;

pub fn new_shared_state() -> SharedState {
    Arc::new(Mutex::new(RegistryState::default()))
}

/// No lock is ever held across a plugin hook, so a poisoned mutex only
/// means a panic during bookkeeping; the state itself is still consistent.
pub(crate) fn lock(state: &SharedState) -> MutexGuard<'_, RegistryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
