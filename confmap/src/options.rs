//! Install options, optionally loaded from a TOML file.
//!
//! ```toml
//! method = "config"
//! is = "isApp"
//! process_mode = "throw"
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// How `process_with` reports the first handler error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessMode {
    #[default]
    /// The callback receives the error and `process_with` returns `Ok`.
    Callback,
    /// The error is returned; the callback only runs on success.
    Throw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallOptions {
    /// Name of the config namespace on the host.
    #[serde(default = "default_method")]
    pub method: String,
    /// Capability the host must advertise for the plugin to install.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is: Option<String>,
    #[serde(default)]
    pub process_mode: ProcessMode,
}

fn default_method() -> String {
    "config".to_string()
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            method: default_method(),
            is: None,
            process_mode: ProcessMode::default(),
        }
    }
}

impl InstallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from TOML. Missing fields take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads options from `path`, falling back to defaults when the file is
    /// missing or cannot be parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No install options at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(options) => {
                    info!("Loaded install options from {:?}", path);
                    options
                }
                Err(e) => {
                    warn!("Failed to parse install options {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read install options {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Only install on hosts advertising `capability`.
    pub fn requiring(mut self, capability: impl Into<String>) -> Self {
        self.is = Some(capability.into());
        self
    }

    pub fn with_process_mode(mut self, mode: ProcessMode) -> Self {
        self.process_mode = mode;
        self
    }
}
