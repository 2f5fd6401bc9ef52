//! Callable facade over a [`ConfigObject`].
//!
//! [`Facade::call`] is the `config(key, value)` sugar: a name with an alias
//! target defines an alias, a name with a handler (or nothing) maps it, and a
//! table applies the same rule to each entry. Everything else forwards to the
//! wrapped object; the facade keeps no state of its own.

use crate::error::{ConfigError, Result};
use crate::object::ConfigObject;
use crate::registry::Handler;
use confmap_host::{Host, Store};
use confmap_types::{ConfigSpec, ConfigValue};
use std::ops::Deref;
use std::sync::Arc;

/// What to register for a name passed to [`Facade::call`].
pub enum MapValue<T: ?Sized> {
    /// The target's default handler.
    Default,
    /// Alias of another action name.
    Alias(String),
    Handler(Handler<T>),
}

impl<T: ?Sized> MapValue<T> {
    pub fn alias(target: impl Into<String>) -> Self {
        Self::Alias(target.into())
    }

    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(&T, &ConfigValue) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::Handler(Arc::new(f))
    }
}

impl<T: ?Sized> From<&str> for MapValue<T> {
    fn from(target: &str) -> Self {
        Self::Alias(target.to_string())
    }
}

impl<T: ?Sized> From<String> for MapValue<T> {
    fn from(target: String) -> Self {
        Self::Alias(target)
    }
}

impl<T: ?Sized> From<Handler<T>> for MapValue<T> {
    fn from(handler: Handler<T>) -> Self {
        Self::Handler(handler)
    }
}

/// Key argument of [`Facade::call`].
pub enum MapKey<T: ?Sized> {
    Name(String),
    Table(Vec<(String, MapValue<T>)>),
    /// Untyped key, checked at call time: strings act as names, objects as
    /// tables whose string values are aliases.
    Value(ConfigValue),
}

impl<T: ?Sized> From<&str> for MapKey<T> {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl<T: ?Sized> From<String> for MapKey<T> {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl<T: ?Sized> From<ConfigValue> for MapKey<T> {
    fn from(value: ConfigValue) -> Self {
        Self::Value(value)
    }
}

impl<T: ?Sized, S: Into<String>> From<Vec<(S, MapValue<T>)>> for MapKey<T> {
    fn from(entries: Vec<(S, MapValue<T>)>) -> Self {
        Self::Table(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

pub struct Facade<T: ?Sized> {
    object: Arc<ConfigObject<T>>,
}

impl<T: ?Sized> Clone for Facade<T> {
    fn clone(&self) -> Self {
        Self {
            object: Arc::clone(&self.object),
        }
    }
}

impl<T: ?Sized + 'static> Facade<T> {
    pub fn new(object: Arc<ConfigObject<T>>) -> Self {
        Self { object }
    }

    /// The wrapped config object.
    pub fn config(&self) -> &Arc<ConfigObject<T>> {
        &self.object
    }

    pub fn target(&self) -> &Arc<T> {
        self.object.target()
    }

    pub fn call(&self, key: impl Into<MapKey<T>>, value: impl Into<MapValue<T>>) -> Result<&Self> {
        match key.into() {
            MapKey::Name(name) => self.apply(&name, value.into()),
            MapKey::Table(entries) => {
                for (name, value) in entries {
                    self.apply(&name, value);
                }
            }
            MapKey::Value(ConfigValue::String(name)) => self.apply(&name, value.into()),
            MapKey::Value(ConfigValue::Object(entries)) => {
                for (name, value) in entries {
                    let value = match value {
                        ConfigValue::String(target) => MapValue::Alias(target),
                        _ => MapValue::Default,
                    };
                    self.apply(&name, value);
                }
            }
            MapKey::Value(_) => return Err(ConfigError::invalid_key()),
        }
        Ok(self)
    }

    fn apply(&self, name: &str, value: MapValue<T>) {
        match value {
            MapValue::Default => self.object.map(name),
            MapValue::Alias(target) => self.object.alias(name, &target),
            MapValue::Handler(handler) => self.object.map_with(name, handler),
        };
    }

    pub fn map(&self, name: &str) -> &Self {
        self.object.map(name);
        self
    }

    pub fn map_with<F>(&self, name: &str, f: F) -> &Self
    where
        F: Fn(&T, &ConfigValue) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.object.map_with(name, Arc::new(f));
        self
    }

    pub fn alias(&self, name: &str, target: &str) -> &Self {
        self.object.alias(name, target);
        self
    }

    pub fn dispatch(&self, name: &str, value: &ConfigValue) -> Result<()> {
        self.object.dispatch(name, value)
    }

    pub fn process(&self, spec: &ConfigSpec) -> Result<()> {
        self.object.process(spec)
    }

    pub fn process_all<'a, I>(&self, specs: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a ConfigSpec>,
    {
        self.object.process_all(specs)
    }

    pub fn process_value(&self, value: &ConfigValue) -> Result<()> {
        self.object.process_value(value)
    }

    pub fn process_with<'a, I, F>(&self, specs: I, callback: F) -> Result<()>
    where
        I: IntoIterator<Item = &'a ConfigSpec>,
        F: FnOnce(Option<&ConfigError>),
    {
        self.object.process_with(specs, callback)
    }
}

/// Facade over a store's config object.
pub type StoreConfig = Facade<dyn Store>;

/// The `config` namespace produced by installing the plugin on a host.
///
/// Derefs to the host facade; [`Config::store`] exposes the store's facade
/// when the host has a store.
pub struct Config {
    host: Facade<dyn Host>,
    store: Option<StoreConfig>,
    method: String,
}

impl Config {
    pub(crate) fn new(host: Facade<dyn Host>, store: Option<StoreConfig>, method: String) -> Self {
        Self {
            host,
            store,
            method,
        }
    }

    pub fn store(&self) -> Option<&StoreConfig> {
        self.store.as_ref()
    }

    /// Namespace name the plugin was installed under.
    pub fn method(&self) -> &str {
        &self.method
    }
}

impl Deref for Config {
    type Target = Facade<dyn Host>;

    fn deref(&self) -> &Self::Target {
        &self.host
    }
}
