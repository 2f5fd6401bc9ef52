//! Handler registry.

use confmap_types::ConfigValue;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Built-in action names mapped on every host installation.
pub const HOST_ACTIONS: [&str; 12] = [
    "set", "get", "has", "del", "option", "data", "store", "enable", "disable", "define", "cwd",
    "use",
];

/// Built-in action names mapped on a host's store.
pub const STORE_ACTIONS: [&str; 5] = ["set", "get", "has", "has_own", "del"];

/// Callback invoked with the scoped target and the payload of one action.
pub type Handler<T> = Arc<dyn Fn(&T, &ConfigValue) -> anyhow::Result<()> + Send + Sync>;

/// Produces the default handler for an action name, if the target has one.
pub type Defaults<T> = Arc<dyn Fn(&str) -> Option<Handler<T>> + Send + Sync>;

/// Wraps a closure as a [`Handler`].
pub fn handler<T, F>(f: F) -> Handler<T>
where
    T: ?Sized,
    F: Fn(&T, &ConfigValue) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Handler that accepts any payload and does nothing.
pub fn noop<T: ?Sized + 'static>() -> Handler<T> {
    handler(|_: &T, _: &ConfigValue| Ok(()))
}

/// Canonical name → handler. Registration replaces any previous handler.
pub(crate) struct HandlerRegistry<T: ?Sized> {
    handlers: BTreeMap<String, Handler<T>>,
}

impl<T: ?Sized> HandlerRegistry<T> {
    pub(crate) fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: String, handler: Handler<T>) -> bool {
        self.handlers.insert(name, handler).is_some()
    }

    pub(crate) fn get(&self, name: &str) -> Option<Handler<T>> {
        self.handlers.get(name).cloned()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }
}
