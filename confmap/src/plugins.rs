//! Plugin registry consulted by the `use` action.
//!
//! Plugins are registered by the embedding application, either under a bare
//! identifier (a package name) or under a filesystem path. Resolution tries,
//! in order:
//! 1. the identifier itself, with `~` expanded
//! 2. the identifier as a path relative to the process working directory
//! 3. the identifier as a path relative to the host's configured cwd

use crate::error::{ConfigError, Result};
use confmap_host::{FnPlugin, Host, HostPlugin};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn HostPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `plugin` under a bare identifier.
    pub fn register(&mut self, id: impl Into<String>, plugin: Arc<dyn HostPlugin>) -> &mut Self {
        self.plugins.insert(id.into(), plugin);
        self
    }

    /// Registers a closure plugin named after its identifier.
    pub fn register_fn<F>(&mut self, id: impl Into<String>, apply: F) -> &mut Self
    where
        F: Fn(&dyn Host) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = id.into();
        let plugin = Arc::new(FnPlugin::new(id.clone(), apply));
        self.register(id, plugin)
    }

    /// Registers `plugin` under the absolute form of `path`.
    pub fn register_path(&mut self, path: impl AsRef<Path>, plugin: Arc<dyn HostPlugin>) -> &mut Self {
        let key = absolutize(&expand_home(&path.as_ref().to_string_lossy()));
        self.register(key.display().to_string(), plugin)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Finds the plugin for `id`, trying each location in turn.
    ///
    /// `cwd` defaults to the process working directory. On failure the error
    /// lists every location tried.
    pub fn resolve(&self, id: &str, cwd: Option<&Path>) -> Result<Arc<dyn HostPlugin>> {
        let name = expand_home(id);
        let base = cwd.map_or_else(process_cwd, |dir| absolutize(&expand_home(&dir.to_string_lossy())));
        let candidates = [
            name.clone(),
            absolutize(&name),
            normalize(&base.join(&name)),
        ];

        let mut attempts = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let key = candidate.display().to_string();
            if let Some(plugin) = self.plugins.get(&key) {
                debug!(id, resolved = %key, "Plugin resolved");
                return Ok(Arc::clone(plugin));
            }
            attempts.push(key);
        }
        Err(ConfigError::PluginNotFound { attempts })
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&String> = self.plugins.keys().collect();
        ids.sort();
        f.debug_struct("PluginRegistry").field("plugins", &ids).finish()
    }
}

/// Expands a leading `~` to the user's home directory.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_default();
    if path == "~" {
        home()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home().join(rest)
    } else {
        PathBuf::from(path)
    }
}

fn process_cwd() -> PathBuf {
    std::env::current_dir().unwrap_or_default()
}

/// Joins relative paths onto the process working directory, then normalizes.
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&process_cwd().join(path))
    }
}

/// Lexically removes `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_dot_segments() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
    }

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        assert_eq!(expand_home("plugins/~x"), PathBuf::from("plugins/~x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/p"), home.join("p"));
        }
    }

    #[test]
    fn relative_cwd_is_taken_from_process_dir() {
        let mut registry = PluginRegistry::new();
        registry.register_fn("x", |_| Ok(()));
        registry.register_path("fixtures/plugins/a", Arc::new(FnPlugin::new("a", |_: &dyn Host| Ok(()))));
        assert!(registry.resolve("a", Some(Path::new("fixtures/plugins"))).is_ok());
        assert!(registry.resolve("x", None).is_ok());
    }
}
