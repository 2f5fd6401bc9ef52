//! In-memory host and store.
//!
//! Both keep a flat, insertion-ordered key table and emit the same events a
//! typical application object does: `set`(key, value) and `del`(key) on
//! mutation, `option`(key, value) for options, `define`(key, value) and
//! `data`(value).

use crate::emitter::{Emitter, EventBus, Listener};
use crate::host::{Host, HostPlugin, Store, Target};
use confmap_types::{ConfigMap, ConfigValue, ValueExt};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::debug;

/// Flat key table with events, shared by [`MemoryHost`] and [`MemoryStore`].
#[derive(Debug, Default)]
struct Table {
    values: RwLock<ConfigMap>,
    events: EventBus,
}

impl Table {
    fn insert(&self, key: &str, value: ConfigValue) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn lookup(&self, key: &str) -> Option<ConfigValue> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .shift_remove(key);
    }

    fn snapshot(&self) -> ConfigMap {
        self.values.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// In-memory [`Host`].
#[derive(Debug, Default)]
pub struct MemoryHost {
    table: Table,
    store: Option<Arc<MemoryStore>>,
    capabilities: RwLock<HashSet<String>>,
    markers: Mutex<HashSet<String>>,
    plugins: RwLock<Vec<String>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host that owns a store named `store_name`.
    pub fn with_store(store_name: impl Into<String>) -> Self {
        Self {
            store: Some(Arc::new(MemoryStore::new(store_name))),
            ..Self::default()
        }
    }

    /// Advertises a capability checked by [`Host::has_capability`].
    pub fn with_capability(self, name: impl Into<String>) -> Self {
        self.capabilities
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into());
        self
    }

    /// The concrete store, if any.
    pub fn memory_store(&self) -> Option<&Arc<MemoryStore>> {
        self.store.as_ref()
    }

    /// Names of plugins applied through [`Host::use_plugin`], in order.
    pub fn plugins(&self) -> Vec<String> {
        self.plugins.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Copy of every key currently set.
    pub fn snapshot(&self) -> ConfigMap {
        self.table.snapshot()
    }
}

impl Emitter for MemoryHost {
    fn on(&self, event: &str, listener: Listener) {
        self.table.events.on(event, listener);
    }

    fn emit(&self, event: &str, args: &[ConfigValue]) {
        self.table.events.emit(event, args);
    }

    fn listener_count(&self, event: &str) -> usize {
        self.table.events.listener_count(event)
    }
}

impl Target for MemoryHost {
    fn set(&self, key: &str, value: ConfigValue) {
        self.table.insert(key, value.clone());
        self.emit("set", &[ConfigValue::String(key.to_string()), value]);
    }

    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.table.lookup(key)
    }

    fn has(&self, key: &str) -> bool {
        self.table.contains(key)
    }

    fn del(&self, key: &str) {
        self.table.remove(key);
        self.emit("del", &[ConfigValue::String(key.to_string())]);
    }
}

impl Host for MemoryHost {
    fn option(&self, key: &str, value: ConfigValue) {
        self.table.insert(&format!("options.{key}"), value.clone());
        self.emit("option", &[ConfigValue::String(key.to_string()), value]);
    }

    fn data(&self, value: &ConfigValue) {
        match value {
            ConfigValue::Object(map) => {
                for (key, val) in map {
                    self.table.insert(&format!("data.{key}"), val.clone());
                }
            }
            other => self.table.insert("data", other.clone()),
        }
        self.emit("data", std::slice::from_ref(value));
    }

    fn define(&self, key: &str, value: ConfigValue) {
        self.table.insert(key, value.clone());
        self.emit("define", &[ConfigValue::String(key.to_string()), value]);
    }

    fn use_plugin(&self, plugin: &dyn HostPlugin) -> anyhow::Result<()> {
        plugin.apply(self)?;
        debug!(plugin = plugin.name(), "Plugin applied to memory host");
        self.plugins
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(plugin.name().to_string());
        Ok(())
    }

    fn store(&self) -> Option<Arc<dyn Store>> {
        self.store.as_ref().map(|store| Arc::clone(store) as Arc<dyn Store>)
    }

    fn has_capability(&self, name: &str) -> bool {
        self.capabilities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
            || self.get(name).is_some_and(|value| value.is_truthy())
    }

    fn mark(&self, marker: &str) -> bool {
        self.markers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(marker.to_string())
    }
}

/// In-memory [`Store`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    name: String,
    table: Table,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: Table::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn snapshot(&self) -> ConfigMap {
        self.table.snapshot()
    }
}

impl Emitter for MemoryStore {
    fn on(&self, event: &str, listener: Listener) {
        self.table.events.on(event, listener);
    }

    fn emit(&self, event: &str, args: &[ConfigValue]) {
        self.table.events.emit(event, args);
    }

    fn listener_count(&self, event: &str) -> usize {
        self.table.events.listener_count(event)
    }
}

impl Target for MemoryStore {
    fn set(&self, key: &str, value: ConfigValue) {
        self.table.insert(key, value.clone());
        self.emit("set", &[ConfigValue::String(key.to_string()), value]);
    }

    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.table.lookup(key)
    }

    fn has(&self, key: &str) -> bool {
        self.table.contains(key)
    }

    fn del(&self, key: &str) {
        self.table.remove(key);
        self.emit("del", &[ConfigValue::String(key.to_string())]);
    }
}

impl Store for MemoryStore {
    fn clear(&self) {
        let keys: Vec<String> = self.table.snapshot().keys().cloned().collect();
        for key in keys {
            self.del(&key);
        }
    }
}
