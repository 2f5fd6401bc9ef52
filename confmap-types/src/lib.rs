//! Core type definitions for confmap.
//!
//! This crate defines the plain data that flows between a caller, the
//! config dispatcher and the host application:
//! - [`ConfigValue`] payloads and [`ConfigSpec`] action tables
//! - key-list interpretation of payloads ([`ValueExt`])
//! - [`EventRecord`], a captured host event
//!
//! Nothing here knows about handlers or hosts.

mod event;
mod value;

pub use event::{EventRecord, WILDCARD};
pub use value::{ConfigMap, ConfigSpec, ConfigValue, ValueExt, spec_from_str, specs_from_value};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building specs from raw data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("expected a config object or a list of config objects, got {0}")]
    NotASpec(&'static str),
}
