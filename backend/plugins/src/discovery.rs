//! The discovery seam.
//!
//! The runtime never inspects how a plugin was constructed — it only
//! requires that discovery yields values satisfying the plugin contract.
//! Filesystem scanners, build-time codegen, or anything else can sit behind
//! this trait; [`StaticSource`] covers the common static-registration case.

use plugbase_core::{PluginHandle, Result};

/// Produces a batch of plugin descriptors.
pub trait DiscoverySource: Send + Sync {
    fn discover(&self) -> Result<Vec<PluginHandle>>;
}

/// A static registration table.
#[derive(Default)]
pub struct StaticSource {
    plugins: Vec<PluginHandle>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugins(plugins: Vec<PluginHandle>) -> Self {
        Self { plugins }
    }

    pub fn register(&mut self, plugin: PluginHandle) -> &mut Self {
        self.plugins.push(plugin);
        self
    }
}

impl DiscoverySource for StaticSource {
    fn discover(&self) -> Result<Vec<PluginHandle>> {
        Ok(self.plugins.clone())
    }
}
