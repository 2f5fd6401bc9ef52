//! Config object scoped to a host's persistent store.

use crate::handlers::{get, has, set};
use crate::object::ConfigObject;
use crate::options::ProcessMode;
use crate::registry::{Defaults, STORE_ACTIONS, handler};
use confmap_host::Store;
use confmap_types::{ConfigValue, ValueExt};
use std::sync::Arc;

/// Default handlers for a store: the key/value actions plus `has_own`.
pub(crate) fn store_defaults() -> Defaults<dyn Store> {
    Arc::new(|name: &str| match name {
        "set" => Some(handler(set::<dyn Store>)),
        "get" => Some(handler(get::<dyn Store>)),
        "has" => Some(handler(has::<dyn Store>)),
        "has_own" => Some(handler(has_own::<dyn Store>)),
        "del" => Some(handler(del::<dyn Store>)),
        _ => None,
    })
}

/// Builds the store's config object with every store action mapped and
/// `show` aliased to `get`.
pub(crate) fn store_config(store: Arc<dyn Store>, mode: ProcessMode) -> ConfigObject<dyn Store> {
    let config = ConfigObject::new(store, store_defaults()).with_mode(mode);
    config.alias("show", "get");
    for name in STORE_ACTIONS {
        config.map(name);
    }
    config
}

/// Emits `has_own`(key, bool) per key.
fn has_own<S: Store + ?Sized>(store: &S, value: &ConfigValue) -> anyhow::Result<()> {
    for key in value.keys() {
        let found = store.has_own(&key);
        store.emit("has_own", &[ConfigValue::String(key), ConfigValue::Bool(found)]);
    }
    Ok(())
}

/// Deletes keys. A map payload carrying a truthy `force` clears the store.
fn del<S: Store + ?Sized>(store: &S, value: &ConfigValue) -> anyhow::Result<()> {
    if let ConfigValue::Object(flags) = value
        && flags.get("force").is_some_and(ValueExt::is_truthy)
    {
        store.clear();
        return Ok(());
    }
    for key in value.keys() {
        store.del(&key);
    }
    Ok(())
}
