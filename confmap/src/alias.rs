//! Alias table: action name → another action name.

use crate::error::{ConfigError, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` as an alias of `target`. The last registration wins.
    ///
    /// Aliasing a name to itself removes any alias for it.
    pub fn alias(&mut self, name: impl Into<String>, target: impl Into<String>) -> &mut Self {
        let (name, target) = (name.into(), target.into());
        if name == target {
            self.aliases.remove(&name);
        } else {
            self.aliases.insert(name, target);
        }
        self
    }

    /// Direct target of `name`, without following the chain.
    pub fn target(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    /// Follows the alias chain from `name` to a name with no further alias.
    ///
    /// A chain can take at most one step per registered alias; exceeding that
    /// means the chain loops.
    pub fn resolve(&self, name: &str) -> Result<String> {
        let mut current = name;
        let mut steps = 0;
        while let Some(next) = self.aliases.get(current) {
            steps += 1;
            if steps > self.aliases.len() {
                return Err(ConfigError::AliasCycle(name.to_string()));
            }
            current = next;
        }
        Ok(current.to_string())
    }

    /// Alias names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.aliases.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
