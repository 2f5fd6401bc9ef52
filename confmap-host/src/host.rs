//! Host, store and plugin traits.

use crate::emitter::Emitter;
use confmap_types::{ConfigValue, ValueExt};
use std::path::PathBuf;

/// The key/value surface shared by hosts and their stores.
pub trait Target: Emitter {
    fn set(&self, key: &str, value: ConfigValue);

    fn get(&self, key: &str) -> Option<ConfigValue>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn del(&self, key: &str);
}

/// A persistent store owned by a host.
///
/// Stores have their own event channels, independent of the host's.
pub trait Store: Target {
    /// Whether `key` is set on the store itself, ignoring any defaults or
    /// fallbacks the store may layer underneath.
    fn has_own(&self, key: &str) -> bool {
        self.has(key)
    }

    /// Removes every key.
    fn clear(&self);
}

/// The application object configuration actions are mapped onto.
///
/// Only the key/value surface, [`Host::use_plugin`] and [`Host::mark`] are
/// required; the remaining methods have defaults expressed in terms of them.
pub trait Host: Target {
    /// Sets an option. Defaults to `set("options.<key>", value)`.
    fn option(&self, key: &str, value: ConfigValue) {
        self.set(&format!("options.{key}"), value);
    }

    /// Reads an option set through [`Host::option`].
    fn get_option(&self, key: &str) -> Option<ConfigValue> {
        self.get(&format!("options.{key}"))
    }

    fn enable(&self, key: &str) {
        self.option(key, ConfigValue::Bool(true));
    }

    fn disable(&self, key: &str) {
        self.option(key, ConfigValue::Bool(false));
    }

    /// Merges a data payload. Maps are stored under `data.<key>`; any other
    /// payload replaces `data`.
    fn data(&self, value: &ConfigValue) {
        match value {
            ConfigValue::Object(map) => {
                for (key, val) in map {
                    self.set(&format!("data.{key}"), val.clone());
                }
            }
            other => self.set("data", other.clone()),
        }
    }

    /// Defines a named value on the host.
    fn define(&self, key: &str, value: ConfigValue) {
        self.set(key, value);
    }

    /// Calls a host method that has no dedicated trait method.
    ///
    /// Hosts that expose extra actions override this; the default rejects
    /// every name.
    fn invoke(&self, method: &str, value: &ConfigValue) -> anyhow::Result<()> {
        let _ = value;
        anyhow::bail!("host has no method named '{method}'")
    }

    /// Applies a plugin to this host.
    fn use_plugin(&self, plugin: &dyn HostPlugin) -> anyhow::Result<()>;

    /// The host's persistent store, if it has one.
    fn store(&self) -> Option<std::sync::Arc<dyn Store>> {
        None
    }

    /// Working directory configured on the host: `options.cwd`, then `cwd`.
    fn cwd(&self) -> Option<PathBuf> {
        self.get_option("cwd")
            .or_else(|| self.get("cwd"))
            .and_then(|value| value.as_str().map(PathBuf::from))
    }

    /// Whether the host advertises a capability. Defaults to the truthiness
    /// of the key of the same name.
    fn has_capability(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| value.is_truthy())
    }

    /// Sets a one-time marker. Returns `true` if the marker was not set before.
    fn mark(&self, marker: &str) -> bool;
}

/// Something a host can apply to itself.
pub trait HostPlugin: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, host: &dyn Host) -> anyhow::Result<()>;
}

/// [`HostPlugin`] backed by a closure.
pub struct FnPlugin<F> {
    name: String,
    apply: F,
}

impl<F> FnPlugin<F>
where
    F: Fn(&dyn Host) -> anyhow::Result<()> + Send + Sync,
{
    pub fn new(name: impl Into<String>, apply: F) -> Self {
        Self {
            name: name.into(),
            apply,
        }
    }
}

impl<F> HostPlugin for FnPlugin<F>
where
    F: Fn(&dyn Host) -> anyhow::Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, host: &dyn Host) -> anyhow::Result<()> {
        (self.apply)(host)
    }
}
