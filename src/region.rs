//! Rectangular sub-views of a texture

use image::imageops;
use image::RgbaImage;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::texture::Texture;

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Intersect with `[0, 0]..[width, height]`. Empty when fully outside.
    pub fn clip_to(&self, width: u32, height: u32) -> Rect {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Rect {
            x,
            y,
            width: self.right().min(width) - x,
            height: self.bottom().min(height) - y,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]-[{},{}]", self.x, self.y, self.right(), self.bottom())
    }
}

/// An immutable view of a rectangle inside a texture.
///
/// The region shares the texture with its spritesheet and stays valid for as
/// long as any handle to that texture is alive.
#[derive(Debug, Clone)]
pub struct Region {
    texture: Arc<Texture>,
    rect: Rect,
}

impl Region {
    pub fn new(texture: Arc<Texture>, rect: Rect) -> Self {
        Self { texture, rect }
    }

    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn x(&self) -> u32 {
        self.rect.x
    }

    pub fn y(&self) -> u32 {
        self.rect.y
    }

    pub fn width(&self) -> u32 {
        self.rect.width
    }

    pub fn height(&self) -> u32 {
        self.rect.height
    }

    /// Normalized texture coordinates `[u, v, u2, v2]`, top-left then bottom-right.
    pub fn uvs(&self) -> [f32; 4] {
        let tw = self.texture.width() as f32;
        let th = self.texture.height() as f32;
        [
            self.rect.x as f32 / tw,
            self.rect.y as f32 / th,
            self.rect.right() as f32 / tw,
            self.rect.bottom() as f32 / th,
        ]
    }

    /// Whether the whole rectangle lies inside the texture.
    pub fn contains_texture(&self) -> bool {
        self.rect.right() <= self.texture.width() && self.rect.bottom() <= self.texture.height()
    }

    /// Copy the region's pixels out of the texture.
    ///
    /// Parts of the rectangle past the texture edge are dropped, so a trailing
    /// partial cell yields a smaller image and a cell entirely outside the
    /// texture yields an empty one.
    pub fn to_image(&self) -> RgbaImage {
        let clipped = self.rect.clip_to(self.texture.width(), self.texture.height());
        imageops::crop_imm(
            self.texture.image(),
            clipped.x,
            clipped.y,
            clipped.width,
            clipped.height,
        )
        .to_image()
    }
}

/// Two regions are equal when they cover the same rectangle of the same texture.
impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.rect == other.rect
            && (Arc::ptr_eq(&self.texture, &other.texture) || self.texture == other.texture)
    }
}
