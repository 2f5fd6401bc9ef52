//! Event capture.

use crate::emitter::{Emitter, listener};
use confmap_types::EventRecord;
use std::sync::{Arc, Mutex, PoisonError};

/// Records every event emitted on the channels it is attached to.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Arc<Mutex<Vec<EventRecord>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log subscribed to each of `events` on `emitter`.
    pub fn attach(emitter: &dyn Emitter, events: &[&str]) -> Self {
        let log = Self::new();
        for event in events {
            log.subscribe(emitter, event);
        }
        log
    }

    /// Subscribes this log to one more channel.
    pub fn subscribe(&self, emitter: &dyn Emitter, event: &str) {
        let records = Arc::clone(&self.records);
        let name = event.to_string();
        emitter.on(
            event,
            listener(move |args| {
                records
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(EventRecord::new(name.clone(), args.to_vec()));
            }),
        );
    }

    /// Everything recorded so far, in emission order.
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Records emitted on `event` only.
    pub fn named(&self, event: &str) -> Vec<EventRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.name == event)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
