//! Spritegrid - spritesheets sliced into lazily cached grid cells
//!
//! This library provides functionality to:
//! - Load textures and resolve them by name through a [`TextureProvider`]
//! - Partition a texture into a fixed grid of cells addressed by row-major index
//! - Compute each cell's [`Region`] once and share it for the sheet's lifetime
//! - Hand cells and whole sheets to renderers through the [`Renderable`] capability
//! - Crop cells into standalone images and save them as PNG

pub mod assets;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod region;
pub mod renderable;
pub mod spritesheet;
pub mod texture;

pub use assets::{AssetStore, TextureProvider};
pub use error::SheetError;
pub use region::{Rect, Region};
pub use renderable::Renderable;
pub use spritesheet::{BoundsPolicy, Spritesheet};
pub use texture::Texture;
