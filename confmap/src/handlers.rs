//! Built-in host handlers.
//!
//! Payload shapes follow [`ValueExt::keys`] wherever an action takes a list of
//! keys, so `"a,b"` and `["a", "b"]` are interchangeable.

use crate::error::ConfigError;
use crate::object::ConfigObject;
use crate::plugins::{PluginRegistry, expand_home};
use crate::registry::{Defaults, Handler, handler, noop};
use confmap_host::{Host, Store, Target};
use confmap_types::{ConfigValue, ValueExt};
use std::sync::Arc;
use tracing::info;

/// Default handlers for a host installation.
///
/// Names without a built-in forward to [`Host::invoke`].
pub(crate) fn host_defaults(
    plugins: Arc<PluginRegistry>,
    store: Option<Arc<ConfigObject<dyn Store>>>,
) -> Defaults<dyn Host> {
    Arc::new(move |name: &str| -> Option<Handler<dyn Host>> {
        let mapped = match name {
            "set" => handler(set::<dyn Host>),
            "get" => handler(get::<dyn Host>),
            "has" => handler(has::<dyn Host>),
            "del" => handler(del::<dyn Host>),
            "option" => handler(option::<dyn Host>),
            "enable" => handler::<dyn Host, _>(|host, value| {
                value.keys().iter().for_each(|key| host.enable(key));
                Ok(())
            }),
            "disable" => handler::<dyn Host, _>(|host, value| {
                value.keys().iter().for_each(|key| host.disable(key));
                Ok(())
            }),
            "define" => handler(define::<dyn Host>),
            "data" => handler::<dyn Host, _>(|host, value| {
                host.data(value);
                Ok(())
            }),
            "cwd" => handler(cwd::<dyn Host>),
            "use" => {
                let plugins = Arc::clone(&plugins);
                handler::<dyn Host, _>(move |host, value| use_plugins(&plugins, host, value))
            }
            "store" => match &store {
                Some(store) => {
                    let store = Arc::clone(store);
                    handler::<dyn Host, _>(move |_, value| match value {
                        ConfigValue::Object(spec) => Ok(store.process(spec)?),
                        other => Err(ConfigError::invalid_payload("store", "an object", other).into()),
                    })
                }
                None => noop(),
            },
            other => {
                let method = other.to_string();
                handler::<dyn Host, _>(move |host, value| host.invoke(&method, value))
            }
        };
        Some(mapped)
    })
}

// ================================================================
// Key/value actions shared with stores
// ================================================================

/// Maps set each entry; key lists set each key to `null`.
pub(crate) fn set<T: Target + ?Sized>(target: &T, value: &ConfigValue) -> anyhow::Result<()> {
    match value {
        ConfigValue::Object(entries) => {
            for (key, val) in entries {
                target.set(key, val.clone());
            }
        }
        other => {
            for key in other.keys() {
                target.set(&key, ConfigValue::Null);
            }
        }
    }
    Ok(())
}

/// Emits `get`(key, value) per key.
pub(crate) fn get<T: Target + ?Sized>(target: &T, value: &ConfigValue) -> anyhow::Result<()> {
    for key in value.keys() {
        let found = target.get(&key).unwrap_or(ConfigValue::Null);
        target.emit("get", &[ConfigValue::String(key), found]);
    }
    Ok(())
}

/// Emits `has`(key, bool) per key.
pub(crate) fn has<T: Target + ?Sized>(target: &T, value: &ConfigValue) -> anyhow::Result<()> {
    for key in value.keys() {
        let found = target.has(&key);
        target.emit("has", &[ConfigValue::String(key), ConfigValue::Bool(found)]);
    }
    Ok(())
}

pub(crate) fn del<T: Target + ?Sized>(target: &T, value: &ConfigValue) -> anyhow::Result<()> {
    for key in value.keys() {
        target.del(&key);
    }
    Ok(())
}

// ================================================================
// Host-only actions
// ================================================================

/// Maps set each option; key lists set each option to `true`.
fn option<H: Host + ?Sized>(host: &H, value: &ConfigValue) -> anyhow::Result<()> {
    match value {
        ConfigValue::Object(entries) => {
            for (key, val) in entries {
                host.option(key, val.clone());
            }
        }
        other => {
            for key in other.keys() {
                host.option(&key, ConfigValue::Bool(true));
            }
        }
    }
    Ok(())
}

fn define<H: Host + ?Sized>(host: &H, value: &ConfigValue) -> anyhow::Result<()> {
    let ConfigValue::Object(entries) = value else {
        return Err(ConfigError::invalid_payload("define", "an object", value).into());
    };
    for (key, val) in entries {
        host.define(key, val.clone());
    }
    Ok(())
}

fn cwd<H: Host + ?Sized>(host: &H, value: &ConfigValue) -> anyhow::Result<()> {
    let Some(dir) = value.as_str() else {
        return Err(ConfigError::invalid_payload("cwd", "a path string", value).into());
    };
    let dir = expand_home(dir);
    host.option("cwd", ConfigValue::String(dir.display().to_string()));
    Ok(())
}

/// Resolves, applies and announces each plugin identifier in order.
fn use_plugins(
    plugins: &PluginRegistry,
    host: &dyn Host,
    value: &ConfigValue,
) -> anyhow::Result<()> {
    let cwd = host.cwd();
    for id in value.keys() {
        let plugin = plugins.resolve(&id, cwd.as_deref())?;
        host.use_plugin(plugin.as_ref())?;
        info!(plugin = %id, name = plugin.name(), "Plugin loaded");
        host.emit("use", &[ConfigValue::String(id)]);
    }
    Ok(())
}
