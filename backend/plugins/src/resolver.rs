//! Dependency resolution.
//!
//! Turns the preloaded partition into a single global load order in which
//! every plugin appears after all members of its chosen dependency group.
//! The order is total but not necessarily unique; it is stable only insofar
//! as the registry's own enumeration order is stable.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::warn;

use plugbase_core::{CoreError, PluginHandle, Result};

use crate::state::PluginNode;

/// Compute the load order for a whole preloaded batch.
///
/// Each node's resolved sequence is merged into one global order with a
/// first-occurrence-wins dedup rule. A critical plugin with no satisfiable
/// dependency group fails the entire batch; a non-critical one is dropped
/// with a warning and contributes nothing.
pub fn resolve_order(preloaded: &HashMap<String, PluginNode>) -> Result<Vec<PluginHandle>> {
    let mut order: Vec<PluginHandle> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for node in preloaded.values() {
        let mut path = Vec::new();
        for plugin in resolve_node(preloaded, node, &mut path)? {
            if seen.insert(plugin.uniquename().to_owned()) {
                order.push(plugin);
            }
        }
    }

    Ok(order)
}

fn resolve_node(
    preloaded: &HashMap<String, PluginNode>,
    node: &PluginNode,
    path: &mut Vec<String>,
) -> Result<Vec<PluginHandle>> {
    let uniquename = node.plugin.uniquename().to_owned();
    if path.iter().any(|visiting| *visiting == uniquename) {
        return Err(CoreError::DependencyCycle(uniquename));
    }

    // The first group whose every member exists in the preloaded partition
    // wins. Existence only: whether a member later resolves or loads
    // successfully is never re-checked.
    let mut chosen: Option<&Vec<String>> = None;
    let mut missing: Vec<String> = Vec::new();
    for group in &node.groups {
        let mut satisfied = true;
        for name in group {
            if !preloaded.contains_key(name) {
                satisfied = false;
                missing.push(name.clone());
            }
        }
        if satisfied {
            chosen = Some(group);
            break;
        }
    }

    let Some(group) = chosen else {
        if node.plugin.critical() {
            return Err(CoreError::DependencyUnsatisfied {
                plugin: uniquename,
                missing,
            });
        }
        warn!(
            plugin = %uniquename,
            missing = ?missing,
            "plugin dropped from load order; dependencies not available"
        );
        return Ok(Vec::new());
    };

    if group.is_empty() {
        return Ok(vec![Arc::clone(&node.plugin)]);
    }

    path.push(uniquename.clone());
    let mut resolved: Vec<PluginHandle> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for name in group {
        // Membership was verified above; the lookup can only miss if the
        // map changed, in which case the dependency simply contributes
        // nothing.
        let Some(dependency) = preloaded.get(name) else {
            continue;
        };
        for plugin in resolve_node(preloaded, dependency, path)? {
            if seen.insert(plugin.uniquename().to_owned()) {
                resolved.push(plugin);
            }
        }
    }
    path.pop();

    if seen.insert(uniquename) {
        resolved.push(Arc::clone(&node.plugin));
    }
    Ok(resolved)
}
