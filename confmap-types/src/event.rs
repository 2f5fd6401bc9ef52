//! Captured host events.

use crate::ConfigValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the umbrella channel every tracked event is re-emitted on.
pub const WILDCARD: &str = "*";

/// One emitted event: its channel name and the arguments it carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    #[serde(default)]
    pub args: Vec<ConfigValue>,
}

impl EventRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<ConfigValue>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Returns `true` if this event was emitted on the wildcard channel.
    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD
    }

    /// For wildcard events, the name of the original event.
    pub fn relayed_name(&self) -> Option<&str> {
        if !self.is_wildcard() {
            return None;
        }
        self.args.first().and_then(ConfigValue::as_str)
    }

    /// First argument as a string, typically the key the event refers to.
    pub fn key(&self) -> Option<&str> {
        let index = usize::from(self.is_wildcard());
        self.args.get(index).and_then(ConfigValue::as_str)
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}
