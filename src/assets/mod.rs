//! Prefab loading for window views
//!
//! The window manager looks views up by logical name through the
//! [`ResourceLoader`] seam. The production implementation is an in-memory
//! [`PrefabCatalog`]: registered prefab definitions instantiated into the
//! scene on demand, with a name-keyed definition cache in front of the
//! catalog lookup.

use log::debug;
use std::collections::HashMap;
use thiserror::Error;

use crate::scene::Scene;
use crate::window::WindowViewSpec;

/// Resource category for window prefabs
pub const UI_WINDOW_CATEGORY: &str = "ui/window";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("prefab '{category}/{name}' is already registered")]
    DuplicatePrefab { category: String, name: String },
}

/// Blueprint for an instantiable view
#[derive(Debug, Clone)]
pub struct PrefabDef {
    /// Window-view capability carried by instances of this prefab.
    /// Prefabs without one cannot be opened as windows.
    pub window_view: Option<WindowViewSpec>,
}

/// Loader seam consumed by the window manager:
/// instantiate the named resource into the scene, or yield nothing
pub trait ResourceLoader {
    fn load(&mut self, scene: &mut Scene, category: &str, name: &str) -> Option<u64>;
}

/// In-memory prefab registry with a name-keyed definition cache
pub struct PrefabCatalog {
    prefabs: HashMap<(String, String), PrefabDef>,
    cache: HashMap<String, PrefabDef>,
    cache_hits: u64,
    catalog_lookups: u64,
}

impl PrefabCatalog {
    pub fn new() -> Self {
        Self {
            prefabs: HashMap::new(),
            cache: HashMap::new(),
            cache_hits: 0,
            catalog_lookups: 0,
        }
    }

    /// Register a prefab definition under a category and name
    pub fn register(
        &mut self,
        category: &str,
        name: &str,
        def: PrefabDef,
    ) -> Result<(), AssetError> {
        let key = (category.to_string(), name.to_string());
        if self.prefabs.contains_key(&key) {
            return Err(AssetError::DuplicatePrefab {
                category: category.to_string(),
                name: name.to_string(),
            });
        }
        self.prefabs.insert(key, def);
        Ok(())
    }

    /// Loads served from the cache without a catalog lookup
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Loads that went through to the backing catalog
    pub fn catalog_lookups(&self) -> u64 {
        self.catalog_lookups
    }
}

impl Default for PrefabCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLoader for PrefabCatalog {
    fn load(&mut self, scene: &mut Scene, category: &str, name: &str) -> Option<u64> {
        let def = if let Some(def) = self.cache.get(name) {
            self.cache_hits += 1;
            def.clone()
        } else {
            self.catalog_lookups += 1;
            let def = self
                .prefabs
                .get(&(category.to_string(), name.to_string()))?
                .clone();
            self.cache.insert(name.to_string(), def.clone());
            def
        };

        debug!("Loaded prefab '{}/{}'", category, name);
        Some(scene.spawn(name, def.window_view))
    }
}
