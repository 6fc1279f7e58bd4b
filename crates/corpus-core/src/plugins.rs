//! Plugin handles and the loading seam.
//!
//! The registry only names plugins and hands out handles; how code becomes a
//! handle (dynamic loading, linking, an in-process table) is a collaborator
//! concern behind [`PluginLoader`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::Result;

/// Capability surface of a loaded plugin.
pub trait Plugin: Send + Sync {
    /// The name the plugin was requested under.
    fn name(&self) -> &str;
}

impl fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Plugin").field(&self.name()).finish()
    }
}

/// Collaborator that turns a plugin name into a live handle.
///
/// Implementations report failures as [`crate::Error::PluginLoad`].
pub trait PluginLoader: Send + Sync {
    fn load(&self, name: &str) -> Result<Arc<dyn Plugin>>;
}

/// Name-keyed memoizing cache over a [`PluginLoader`].
///
/// Each name is loaded at most once per process lifetime; subsequent
/// lookups return the cached handle.
pub struct PluginCache {
    loader: Box<dyn PluginLoader>,
    loaded: Mutex<HashMap<String, Arc<dyn Plugin>>>,
}

impl fmt::Debug for PluginCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginCache").finish_non_exhaustive()
    }
}

impl PluginCache {
    pub fn new(loader: Box<dyn PluginLoader>) -> Self {
        Self {
            loader,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a plugin, loading it on first use.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Plugin>> {
        let mut loaded = self.loaded.lock().expect("plugin cache poisoned");
        if let Some(plugin) = loaded.get(name) {
            return Ok(Arc::clone(plugin));
        }

        tracing::debug!(plugin = %name, "Loading plugin");
        let plugin = self.loader.load(name)?;
        loaded.insert(name.to_string(), Arc::clone(&plugin));
        Ok(plugin)
    }
}
