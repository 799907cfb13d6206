//! Error types for spritesheet construction, lookup, and texture loading

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised by spritesheets, regions, and texture providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SheetError {
    /// A cell dimension was zero at construction time
    #[error("Invalid cell size {cell_width}x{cell_height}: both dimensions must be positive")]
    InvalidDimension { cell_width: u32, cell_height: u32 },
    /// Cell lookup past the last complete cell under the strict bounds policy
    #[error("Cell index {index} out of range (sheet has {cell_count} cells)")]
    IndexOutOfRange { index: usize, cell_count: usize },
    /// Texture provider has no texture with this name
    #[error("Texture '{0}' not found")]
    TextureNotFound(String),
    /// Image file could not be opened or decoded
    #[error("Failed to load image '{}': {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Texture glob could not be parsed
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SheetError {
    /// Short machine-readable name for the error kind, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            SheetError::InvalidDimension { .. } => "invalid_dimension",
            SheetError::IndexOutOfRange { .. } => "index_out_of_range",
            SheetError::TextureNotFound(_) => "texture_not_found",
            SheetError::Image { .. } => "image_error",
            SheetError::InvalidPattern { .. } => "invalid_pattern",
            SheetError::Io(_) => "io_error",
        }
    }
}
