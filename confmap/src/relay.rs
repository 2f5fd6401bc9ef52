//! Wildcard relay: re-emits tracked events on the host's `*` channel as
//! `(name, args...)`.

use confmap_host::{Host, Store, listener};
use confmap_types::{ConfigValue, WILDCARD};
use std::sync::{Arc, Weak};

/// Host marker recording that the relay has been subscribed.
pub const WILDCARD_MARKER: &str = "_wildCardEmitter";

/// Subscribes to each of `names` on the host.
///
/// Listeners hold the host weakly so the host's own listener table does not
/// keep it alive.
pub(crate) fn relay_host_events(host: &Arc<dyn Host>, names: &[String]) {
    for name in names.iter().filter(|name| name.as_str() != WILDCARD) {
        let weak = Arc::downgrade(host);
        let event = name.clone();
        host.on(name, listener(move |args| forward(&weak, &event, args)));
    }
}

/// Subscribes to each of `names` on the store, relaying them to the host as
/// `store.<name>`.
pub(crate) fn relay_store_events(host: &Arc<dyn Host>, store: &dyn Store, names: &[String]) {
    for name in names {
        let weak = Arc::downgrade(host);
        let event = format!("store.{name}");
        store.on(name, listener(move |args| forward(&weak, &event, args)));
    }
}

fn forward(host: &Weak<dyn Host>, event: &str, args: &[ConfigValue]) {
    let Some(host) = host.upgrade() else {
        return;
    };
    let mut relayed = Vec::with_capacity(args.len() + 1);
    relayed.push(ConfigValue::String(event.to_string()));
    relayed.extend_from_slice(args);
    host.emit(WILDCARD, &relayed);
}
