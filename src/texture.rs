//! Immutable textures shared between spritesheets

use image::{Rgba, RgbaImage};
use log::debug;
use std::path::Path;

use crate::error::SheetError;

/// A decoded RGBA image with a name.
///
/// Textures never change after construction. They are handed around as
/// `Arc<Texture>` so that several spritesheets can slice the same image.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    name: String,
    image: RgbaImage,
}

impl Texture {
    /// Wrap an already decoded image.
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self { name: name.into(), image }
    }

    /// Create a fully transparent texture of the given size.
    pub fn blank(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self::new(name, RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])))
    }

    /// Load a texture from an image file. The texture is named after the file name.
    pub fn open(path: &Path) -> Result<Self, SheetError> {
        let image = image::open(path)
            .map_err(|source| SheetError::Image { path: path.to_path_buf(), source })?
            .to_rgba8();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!("loaded texture '{}' ({}x{})", name, image.width(), image.height());
        Ok(Self::new(name, image))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Underlying pixel data.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}
