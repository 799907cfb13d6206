//! Texture preloading and lookup by name
//!
//! Textures are loaded up front (by path or glob) and later resolved by their
//! file name, so a spritesheet can be built from `"hero.png"` without knowing
//! where the file lived.

use glob::glob;
use log::debug;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::SheetError;
use crate::texture::Texture;

/// Resolves texture names to loaded textures.
pub trait TextureProvider {
    /// Look up a texture by name.
    ///
    /// Returns [`SheetError::TextureNotFound`] when no texture has that name.
    fn texture(&self, name: &str) -> Result<Arc<Texture>, SheetError>;
}

/// Store of preloaded textures keyed by name.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    textures: HashMap<String, Arc<Texture>>,
}

impl AssetStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self { textures: HashMap::new() }
    }

    /// Load an image file and register it under its file name.
    ///
    /// If a texture with the same name already exists, it is replaced.
    pub fn add(&mut self, path: &Path) -> Result<Arc<Texture>, SheetError> {
        let texture = Arc::new(Texture::open(path)?);
        Ok(self.insert_shared(texture))
    }

    /// Load every image matching a glob pattern.
    ///
    /// Returns the number of textures loaded. A malformed pattern fails with
    /// [`SheetError::InvalidPattern`]; a match that cannot be read or decoded
    /// aborts the load with its error, keeping textures loaded before it.
    pub fn add_glob(&mut self, pattern: &str) -> Result<usize, SheetError> {
        let paths = glob(pattern).map_err(|source| SheetError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut loaded = 0;
        for entry in paths {
            let path = entry.map_err(glob::GlobError::into_error)?;
            if path.is_file() {
                self.add(&path)?;
                loaded += 1;
            }
        }
        debug!("preloaded {} textures from '{}'", loaded, pattern);
        Ok(loaded)
    }

    /// Register an in-memory texture under its own name.
    pub fn insert(&mut self, texture: Texture) -> Arc<Texture> {
        self.insert_shared(Arc::new(texture))
    }

    fn insert_shared(&mut self, texture: Arc<Texture>) -> Arc<Texture> {
        self.textures.insert(texture.name().to_string(), Arc::clone(&texture));
        texture
    }

    /// Get a texture by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Texture>> {
        self.textures.get(name)
    }

    /// Check if a texture with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Texture names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.textures.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TextureProvider for AssetStore {
    fn texture(&self, name: &str) -> Result<Arc<Texture>, SheetError> {
        self.get(name).cloned().ok_or_else(|| SheetError::TextureNotFound(name.to_string()))
    }
}
