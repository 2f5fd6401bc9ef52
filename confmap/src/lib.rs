//! Named configuration actions for a host application.
//!
//! Installing the plugin on a [`Host`] produces a [`Config`] facade. A caller
//! describes what to configure as a plain table of action names to payloads
//! and processes it; each key is resolved through the alias table and
//! dispatched to its handler, which forwards to the host.
//!
//! ```ignore
//! let host = Arc::new(MemoryHost::with_store("app"));
//! let config = confmap::install(host.clone()).unwrap();
//! config.process(&spec_from_str(r#"{"set": {"a": "b"}, "show": "a"}"#)?)?;
//! ```
//!
//! Every handler name is relayed onto the host's `*` channel once per host,
//! so a single listener can observe all configuration activity.

mod alias;
mod error;
mod facade;
mod handlers;
mod install;
mod object;
mod options;
mod plugins;
mod registry;
mod relay;
mod store;

pub use alias::AliasTable;
pub use confmap_host::{Host, HostPlugin, Store};
pub use error::{ConfigError, Result};
pub use facade::{Config, Facade, MapKey, MapValue, StoreConfig};
pub use install::{ConfigPlugin, install};
pub use object::ConfigObject;
pub use options::{InstallOptions, ProcessMode};
pub use plugins::PluginRegistry;
pub use registry::{Defaults, HOST_ACTIONS, Handler, STORE_ACTIONS, handler, noop};
pub use relay::WILDCARD_MARKER;
