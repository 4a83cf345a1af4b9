//! The import registry and its directory scanner.
//!
//! Two discovery modes, mirroring the plugin side: by-file (every
//! `<prefix>*.json` in the directory) and by-dir (every subdirectory's
//! `<stem>.json`). Each source file is either a bare JSON object of
//! name→value imports, or a `{ "flags": ..., "imports": ... }` wrapper
//! where flags support list-based auto-naming and key prefixing.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use plugbase_config::ImportsConfig;
use plugbase_core::{CoreError, Result};

/// Per-file import options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportFlags {
    /// Imports are a list; each item must be an object carrying a string
    /// `"name"` used as its registry key.
    #[serde(default)]
    list_based: bool,

    /// Prepended to every key from this file.
    #[serde(default)]
    prefix: Option<String>,
}

/// Flat name→value registry with default-value lookup semantics.
pub struct ImportRegistry {
    config: ImportsConfig,
    imports: Map<String, Value>,
}

impl ImportRegistry {
    pub fn new(config: ImportsConfig) -> Self {
        Self {
            config,
            imports: Map::new(),
        }
    }

    /// Rebuild the table from scratch: default-set directories first, then
    /// the primary directories, later names winning.
    pub fn import_all(&mut self) -> Result<()> {
        self.imports.clear();
        let defaults = self.config.default_dirs.clone();
        let dirs = self.config.dirs.clone();
        for dir in defaults.iter().chain(&dirs) {
            let found = self.import_dir(dir)?;
            self.update(found);
        }
        Ok(())
    }

    /// Import one directory according to the configured discovery mode.
    pub fn import_dir(&self, dir: &Path) -> Result<Map<String, Value>> {
        if !dir.is_dir() {
            return Err(CoreError::NotADiscoverySource(dir.display().to_string()));
        }
        info!(dir = %dir.display(), "importing directory");

        let mut entries: Vec<_> = fs::read_dir(dir)
            .with_context(|| format!("failed to list import dir {}", dir.display()))?
            .collect::<std::io::Result<Vec<_>>>()
            .with_context(|| format!("failed to read entries of {}", dir.display()))?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut imports = Map::new();
        for entry in entries {
            let path = entry.path();
            let source = if self.config.by_file {
                let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if !path.is_file()
                    || !file_name.starts_with(&self.config.file_prefix)
                    || !file_name.ends_with(".json")
                {
                    continue;
                }
                path
            } else {
                if !path.is_dir() {
                    continue;
                }
                let candidate = path.join(format!("{}.json", self.config.dir_file_name));
                if !candidate.is_file() {
                    continue;
                }
                candidate
            };

            let found = parse_import_file(&source)?;
            debug!(source = %source.display(), names = found.len(), "imported file");
            imports.extend(found);
        }

        info!(dir = %dir.display(), names = imports.len(), "imported");
        Ok(imports)
    }

    /// Look up a name. Errors with `NameNotImported` when absent — use
    /// [`get_or`](Self::get_or) when a fallback exists.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.imports
            .get(name)
            .ok_or_else(|| CoreError::NameNotImported(name.to_owned()))
    }

    /// Look up a name, falling back to the given default.
    pub fn get_or(&self, name: &str, default: Value) -> Value {
        self.imports.get(name).cloned().unwrap_or(default)
    }

    /// Merge additional imports into the table, later names winning.
    pub fn update(&mut self, imports: Map<String, Value>) {
        self.imports.extend(imports);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.imports.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.imports.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }
}

fn parse_import_file(path: &Path) -> Result<Map<String, Value>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read import file {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse import file {}", path.display()))?;

    // A top-level "imports" key marks the wrapped form; anything else is a
    // bare object of imports.
    let (flags, body) = match value {
        Value::Object(mut object) if object.contains_key("imports") => {
            let flags = match object.remove("flags") {
                Some(raw_flags) => serde_json::from_value::<ImportFlags>(raw_flags)
                    .with_context(|| format!("bad flags in {}", path.display()))?,
                None => ImportFlags::default(),
            };
            let body = object
                .remove("imports")
                .ok_or_else(|| anyhow!("missing imports in {}", path.display()))?;
            (flags, body)
        }
        other => (ImportFlags::default(), other),
    };

    let mut imports = if flags.list_based {
        let Value::Array(items) = body else {
            return Err(anyhow!(
                "{} declares list-based imports but carries no list",
                path.display()
            )
            .into());
        };
        let mut named = Map::new();
        for item in items {
            let name = item
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    anyhow!(
                        "an item in {} has no 'name' field for list-based imports",
                        path.display()
                    )
                })?
                .to_owned();
            named.insert(name, item);
        }
        named
    } else {
        let Value::Object(object) = body else {
            return Err(anyhow!("{} is not an object of imports", path.display()).into());
        };
        object
    };

    if let Some(prefix) = flags.prefix {
        imports = imports
            .into_iter()
            .map(|(key, value)| (format!("{prefix}{key}"), value))
            .collect();
    }

    Ok(imports)
}
