//! Spritesheets - a texture partitioned into a fixed grid of cells
//!
//! Cells are addressed by a zero-based row-major index. Each cell's
//! [`Region`] is computed the first time it is requested and cached for the
//! lifetime of the sheet, so every caller asking for the same index gets the
//! same `Arc<Region>`.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::assets::TextureProvider;
use crate::cache::{CacheStats, CellCache};
use crate::error::SheetError;
use crate::region::{Rect, Region};
use crate::renderable::Renderable;
use crate::texture::Texture;

/// What [`Spritesheet::cell`] does with an index past the last complete cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Fail with [`SheetError::IndexOutOfRange`]
    #[default]
    Strict,
    /// Keep counting rows past the texture and return the extrapolated rectangle
    Extrapolate,
}

impl BoundsPolicy {
    /// Name as written in `sheets.toml`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Extrapolate => "extrapolate",
        }
    }
}

impl fmt::Display for BoundsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A texture sliced into equally sized cells.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use spritegrid::spritesheet::Spritesheet;
/// use spritegrid::texture::Texture;
///
/// let texture = Arc::new(Texture::blank("tiles", 40, 30));
/// let sheet = Spritesheet::new(texture, 10, 10).unwrap();
///
/// assert_eq!(sheet.cell_count(), 12);
/// let cell = sheet.cell(4).unwrap();
/// assert_eq!((cell.x(), cell.y()), (0, 10));
/// ```
#[derive(Debug)]
pub struct Spritesheet {
    texture: Arc<Texture>,
    cell_width: u32,
    cell_height: u32,
    policy: BoundsPolicy,
    cache: CellCache<usize, Region>,
}

impl Spritesheet {
    /// Build a spritesheet over an already loaded texture.
    ///
    /// Fails with [`SheetError::InvalidDimension`] if either cell dimension is
    /// zero. The texture size does not have to be a multiple of the cell size;
    /// trailing partial cells are simply not counted.
    pub fn new(
        texture: Arc<Texture>,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, SheetError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(SheetError::InvalidDimension { cell_width, cell_height });
        }

        if texture.width() % cell_width != 0 || texture.height() % cell_height != 0 {
            warn!(
                "texture '{}' ({}x{}) is not a multiple of the {}x{} cell size",
                texture.name(),
                texture.width(),
                texture.height(),
                cell_width,
                cell_height
            );
        }

        Ok(Self {
            texture,
            cell_width,
            cell_height,
            policy: BoundsPolicy::default(),
            cache: CellCache::new(),
        })
    }

    /// Resolve `name` through a texture provider, then build the sheet.
    ///
    /// Provider errors are returned unchanged.
    pub fn from_provider<P>(
        provider: &P,
        name: &str,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, SheetError>
    where
        P: TextureProvider + ?Sized,
    {
        let texture = provider.texture(name)?;
        Self::new(texture, cell_width, cell_height)
    }

    /// Set the out-of-range lookup policy.
    pub fn with_policy(mut self, policy: BoundsPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    pub fn policy(&self) -> BoundsPolicy {
        self.policy
    }

    /// Number of cells along the x-axis. Fractional when the texture width is
    /// not a multiple of the cell width.
    pub fn width(&self) -> f32 {
        self.texture.width() as f32 / self.cell_width as f32
    }

    /// Number of cells along the y-axis. Fractional when the texture height is
    /// not a multiple of the cell height.
    pub fn height(&self) -> f32 {
        self.texture.height() as f32 / self.cell_height as f32
    }

    /// Complete cells per row.
    pub fn columns(&self) -> usize {
        (self.texture.width() / self.cell_width) as usize
    }

    /// Complete cells per column.
    pub fn rows(&self) -> usize {
        (self.texture.height() / self.cell_height) as usize
    }

    /// Number of complete cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.columns() * self.rows()
    }

    /// Get the region of cell `index`, computing and caching it on first use.
    pub fn cell(&self, index: usize) -> Result<Arc<Region>, SheetError> {
        if self.policy == BoundsPolicy::Strict {
            let cell_count = self.cell_count();
            if index >= cell_count {
                return Err(SheetError::IndexOutOfRange { index, cell_count });
            }
        }
        Ok(self.lookup(index))
    }

    /// All complete cells in ascending index order.
    pub fn cells(&self) -> Vec<Arc<Region>> {
        (0..self.cell_count()).map(|index| self.lookup(index)).collect()
    }

    /// Same as [`cell`](Self::cell), behind the [`Renderable`] capability.
    pub fn renderable(&self, index: usize) -> Result<Arc<dyn Renderable>, SheetError> {
        let region: Arc<dyn Renderable> = self.cell(index)?;
        Ok(region)
    }

    /// Same as [`cells`](Self::cells), behind the [`Renderable`] capability.
    pub fn renderables(&self) -> Vec<Arc<dyn Renderable>> {
        self.cells().into_iter().map(|region| region as Arc<dyn Renderable>).collect()
    }

    /// Number of distinct cells materialized so far.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn lookup(&self, index: usize) -> Arc<Region> {
        let (region, hit) = self.cache.get_or_insert_with_hit(index, || {
            let rect = self.cell_rect(index);
            debug!("computed cell {} of '{}': {}", index, self.texture.name(), rect);
            Region::new(Arc::clone(&self.texture), rect)
        });
        if hit {
            trace!("cell {} of '{}' served from cache", index, self.texture.name());
        }
        region
    }

    /// Pixel rectangle of cell `index` in row-major order.
    ///
    /// A texture narrower than one cell has no complete columns; each index
    /// then gets its own row.
    fn cell_rect(&self, index: usize) -> Rect {
        let columns = self.columns().max(1);
        let row = u32::try_from(index / columns).unwrap_or(u32::MAX);
        let col = (index % columns) as u32;

        Rect::new(
            col.saturating_mul(self.cell_width),
            row.saturating_mul(self.cell_height),
            self.cell_width,
            self.cell_height,
        )
    }
}

/// The whole sheet renders as its full texture.
impl Renderable for Spritesheet {
    fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    fn rect(&self) -> Rect {
        Rect::new(0, 0, self.texture.width(), self.texture.height())
    }
}
