//! Error types for config dispatch.

use thiserror::Error;

/// Result type for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The facade was called with a key it cannot interpret.
    #[error("{0}")]
    Argument(String),

    /// A `use` identifier matched no registered plugin.
    #[error("cannot find plugin at: \n{}", format_attempts(.attempts))]
    PluginNotFound { attempts: Vec<String> },

    /// A handler failed. The handler's own error is kept as the source.
    #[error("handler '{action}' failed: {source}")]
    Handler {
        action: String,
        #[source]
        source: anyhow::Error,
    },

    /// A built-in handler received a payload shape it cannot use.
    #[error("invalid payload for '{action}': expected {expected}, got {found}")]
    InvalidPayload {
        action: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("alias cycle detected while resolving '{0}'")]
    AliasCycle(String),

    #[error("invalid install options: {0}")]
    Options(#[from] toml::de::Error),

    #[error("invalid config spec: {0}")]
    Spec(#[from] confmap_types::Error),
}

impl ConfigError {
    pub(crate) fn invalid_key() -> Self {
        Self::Argument("expected key to be a string or object".to_string())
    }

    pub(crate) fn invalid_payload(
        action: &str,
        expected: &'static str,
        found: &confmap_types::ConfigValue,
    ) -> Self {
        use confmap_types::ValueExt;
        Self::InvalidPayload {
            action: action.to_string(),
            expected,
            found: found.kind(),
        }
    }
}

fn format_attempts(attempts: &[String]) -> String {
    attempts
        .iter()
        .map(|attempt| format!(" ✖ '{attempt}'\n"))
        .collect()
}
