//! Named event channels.

use confmap_types::ConfigValue;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Callback subscribed to an event channel.
pub type Listener = Arc<dyn Fn(&[ConfigValue]) + Send + Sync>;

/// Wraps a closure as a [`Listener`].
pub fn listener(f: impl Fn(&[ConfigValue]) + Send + Sync + 'static) -> Listener {
    Arc::new(f)
}

/// Anything that exposes named event channels.
pub trait Emitter: Send + Sync {
    /// Subscribes `listener` to `event`. Listeners run in subscription order.
    fn on(&self, event: &str, listener: Listener);

    /// Delivers `args` to every listener of `event`, synchronously.
    fn emit(&self, event: &str, args: &[ConfigValue]);

    /// Number of listeners currently subscribed to `event`.
    fn listener_count(&self, event: &str) -> usize;
}

/// Default [`Emitter`] backed by a listener table.
///
/// Listeners are cloned out of the table before they run, so a listener may
/// subscribe or emit without deadlocking.
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<HashMap<String, Vec<Listener>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all channels with at least one listener.
    pub fn event_names(&self) -> Vec<String> {
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = listeners.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Emitter for EventBus {
    fn on(&self, event: &str, listener: Listener) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    fn emit(&self, event: &str, args: &[ConfigValue]) {
        let snapshot: Vec<Listener> = {
            let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
            match listeners.get(event) {
                Some(list) => list.clone(),
                None => return,
            }
        };
        for listener in snapshot {
            listener(args);
        }
    }

    fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.event_names())
            .finish()
    }
}
