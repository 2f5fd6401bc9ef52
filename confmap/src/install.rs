//! Plugin installation.

use crate::facade::{Config, Facade};
use crate::handlers::host_defaults;
use crate::object::ConfigObject;
use crate::options::InstallOptions;
use crate::plugins::PluginRegistry;
use crate::registry::HOST_ACTIONS;
use crate::relay::{WILDCARD_MARKER, relay_host_events, relay_store_events};
use crate::store::store_config;
use confmap_host::Host;
use std::sync::Arc;
use tracing::{debug, info};

/// Installs the `config` namespace on hosts.
#[derive(Debug, Clone, Default)]
pub struct ConfigPlugin {
    options: InstallOptions,
    plugins: Arc<PluginRegistry>,
}

impl ConfigPlugin {
    pub fn new(options: InstallOptions) -> Self {
        Self {
            options,
            plugins: Arc::new(PluginRegistry::new()),
        }
    }

    /// Plugins the `use` action may load.
    pub fn with_plugins(mut self, plugins: PluginRegistry) -> Self {
        self.plugins = Arc::new(plugins);
        self
    }

    pub fn options(&self) -> &InstallOptions {
        &self.options
    }

    /// Builds the host's config object (and the store's, if the host has a
    /// store) and returns the facade.
    ///
    /// Returns `None` when the options require a capability the host lacks.
    /// The wildcard relay is subscribed only on the first installation on a
    /// given host.
    pub fn install(&self, host: Arc<dyn Host>) -> Option<Config> {
        if let Some(capability) = &self.options.is
            && !host.has_capability(capability)
        {
            debug!(
                method = %self.options.method,
                capability = %capability,
                "Host lacks required capability, skipping install"
            );
            return None;
        }

        let mode = self.options.process_mode;
        let store = host
            .store()
            .map(|store| Arc::new(store_config(store, mode)));

        let object = Arc::new(
            ConfigObject::new(
                Arc::clone(&host),
                host_defaults(Arc::clone(&self.plugins), store.clone()),
            )
            .with_mode(mode),
        );
        object.alias("show", "get");
        for name in HOST_ACTIONS {
            object.map(name);
        }

        if host.mark(WILDCARD_MARKER) {
            relay_host_events(&host, &object.names());
            if let Some(store) = &store {
                relay_store_events(&host, store.target().as_ref(), &store.names());
            }
        }

        info!(
            method = %self.options.method,
            actions = object.names().len(),
            store = store.is_some(),
            "Config installed"
        );
        Some(Config::new(
            Facade::new(object),
            store.map(Facade::new),
            self.options.method.clone(),
        ))
    }
}

/// Installs with default options and an empty plugin registry.
pub fn install(host: Arc<dyn Host>) -> Option<Config> {
    ConfigPlugin::default().install(host)
}
