//! The assembled config object: alias table, handler registry and the
//! target both operate on.
//!
//! Dispatch resolves an action name through the alias table, looks the
//! canonical name up in the registry and runs the handler against the target.
//! Names without a handler are ignored so a spec may carry keys meant for
//! someone else.

use crate::alias::AliasTable;
use crate::error::{ConfigError, Result};
use crate::options::ProcessMode;
use crate::registry::{Defaults, Handler, HandlerRegistry, noop};
use confmap_types::{ConfigSpec, ConfigValue, ValueExt};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

pub struct ConfigObject<T: ?Sized> {
    target: Arc<T>,
    aliases: RwLock<AliasTable>,
    handlers: RwLock<HandlerRegistry<T>>,
    defaults: Defaults<T>,
    mode: ProcessMode,
}

impl<T: ?Sized + 'static> ConfigObject<T> {
    /// Creates an empty config object for `target`.
    ///
    /// `defaults` supplies the handler registered by [`ConfigObject::map`]
    /// when no custom handler is given.
    pub fn new(target: Arc<T>, defaults: Defaults<T>) -> Self {
        Self {
            target,
            aliases: RwLock::new(AliasTable::new()),
            handlers: RwLock::new(HandlerRegistry::new()),
            defaults,
            mode: ProcessMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ProcessMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn target(&self) -> &Arc<T> {
        &self.target
    }

    pub fn mode(&self) -> ProcessMode {
        self.mode
    }

    // ================================================================
    // Registration
    // ================================================================

    /// Maps `name` to its default handler.
    ///
    /// Names the target has no default for are registered as no-ops.
    pub fn map(&self, name: &str) -> &Self {
        let handler = (self.defaults)(name).unwrap_or_else(|| {
            warn!(action = name, "No default handler for action, mapping as no-op");
            noop()
        });
        self.map_with(name, handler)
    }

    /// Maps `name` to a custom handler, replacing any previous one.
    pub fn map_with(&self, name: &str, handler: Handler<T>) -> &Self {
        let replaced = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), handler);
        debug!(action = name, replaced, "Handler mapped");
        self
    }

    /// Registers `name` as an alias of `target`.
    pub fn alias(&self, name: &str, target: &str) -> &Self {
        self.aliases
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .alias(name, target);
        debug!(alias = name, to = target, "Alias registered");
        self
    }

    // ================================================================
    // Lookup
    // ================================================================

    /// Canonical name `name` resolves to.
    pub fn resolve(&self, name: &str) -> Result<String> {
        self.aliases
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .resolve(name)
    }

    /// Handler `name` resolves to, if any.
    pub fn handler(&self, name: &str) -> Result<Option<Handler<T>>> {
        let canonical = self.resolve(name)?;
        Ok(self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&canonical))
    }

    /// Whether `name` resolves to a registered handler.
    pub fn has_handler(&self, name: &str) -> bool {
        self.resolve(name).is_ok_and(|canonical| {
            self.handlers
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(&canonical)
        })
    }

    /// Registered handler names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .names()
    }

    /// Registered alias names, sorted.
    pub fn alias_names(&self) -> Vec<String> {
        self.aliases
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .names()
    }

    // ================================================================
    // Dispatch / Process
    // ================================================================

    /// Runs the handler `name` resolves to with `value`.
    ///
    /// Unknown names succeed without doing anything. Handler errors that are
    /// themselves a [`ConfigError`] are returned as is; anything else is
    /// wrapped in [`ConfigError::Handler`].
    pub fn dispatch(&self, name: &str, value: &ConfigValue) -> Result<()> {
        let canonical = self.resolve(name)?;
        let handler = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&canonical);

        let Some(handler) = handler else {
            debug!(action = name, "No handler registered, ignoring key");
            return Ok(());
        };

        debug!(action = name, canonical = %canonical, "Dispatching");
        handler(self.target.as_ref(), value).map_err(|source| {
            match source.downcast::<ConfigError>() {
                Ok(err) => err,
                Err(source) => ConfigError::Handler {
                    action: canonical,
                    source,
                },
            }
        })
    }

    /// Dispatches every key of `spec` in order. The first error aborts.
    pub fn process(&self, spec: &ConfigSpec) -> Result<()> {
        for (name, value) in spec {
            self.dispatch(name, value)?;
        }
        Ok(())
    }

    /// Processes a sequence of specs in order. The first error aborts.
    pub fn process_all<'a, I>(&self, specs: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a ConfigSpec>,
    {
        for spec in specs {
            self.process(spec)?;
        }
        Ok(())
    }

    /// Processes a raw value: one object, or a list of objects.
    pub fn process_value(&self, value: &ConfigValue) -> Result<()> {
        match value {
            ConfigValue::Object(spec) => self.process(spec),
            ConfigValue::Array(items) => {
                for item in items {
                    match item {
                        ConfigValue::Object(spec) => self.process(spec)?,
                        other => {
                            return Err(ConfigError::Spec(confmap_types::Error::NotASpec(
                                other.kind(),
                            )));
                        }
                    }
                }
                Ok(())
            }
            other => Err(ConfigError::Spec(confmap_types::Error::NotASpec(other.kind()))),
        }
    }

    /// Processes `specs` and reports completion to `callback`.
    ///
    /// With [`ProcessMode::Callback`] the callback receives the first error
    /// (or `None`) and this returns `Ok(())`. With [`ProcessMode::Throw`] an
    /// error is returned instead and the callback only runs on success.
    pub fn process_with<'a, I, F>(&self, specs: I, callback: F) -> Result<()>
    where
        I: IntoIterator<Item = &'a ConfigSpec>,
        F: FnOnce(Option<&ConfigError>),
    {
        let outcome = self.process_all(specs);
        match (self.mode, outcome) {
            (_, Ok(())) => {
                callback(None);
                Ok(())
            }
            (ProcessMode::Callback, Err(err)) => {
                callback(Some(&err));
                Ok(())
            }
            (ProcessMode::Throw, Err(err)) => Err(err),
        }
    }
}
