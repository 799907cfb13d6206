//! The capability a renderer needs to draw something from a texture

use std::sync::Arc;

use crate::region::{Rect, Region};
use crate::texture::Texture;

/// Anything that can report a drawable rectangle of a backing texture.
///
/// Renderers take `&dyn Renderable` or `Arc<dyn Renderable>` and never need
/// to know whether they were handed a single cell or a whole sheet.
pub trait Renderable: Send + Sync {
    /// The texture the rectangle refers to.
    fn texture(&self) -> &Arc<Texture>;

    /// The drawable rectangle in texture pixel space.
    fn rect(&self) -> Rect;

    fn width(&self) -> u32 {
        self.rect().width
    }

    fn height(&self) -> u32 {
        self.rect().height
    }
}

impl Renderable for Region {
    fn texture(&self) -> &Arc<Texture> {
        Region::texture(self)
    }

    fn rect(&self) -> Rect {
        Region::rect(self)
    }
}
