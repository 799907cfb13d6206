//! PNG output and file path generation for sliced cells

use image::imageops::FilterType;
use image::RgbaImage;
use log::debug;
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::SheetError;
use crate::spritesheet::Spritesheet;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Cell lookup failed
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This preserves crisp pixel edges for pixel art.
pub fn scale_image(image: RgbaImage, factor: u8) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor as u32, h * factor as u32, FilterType::Nearest)
}

/// Output path for one cell of a sliced texture.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{texture_dir}/{stem}_{index}.png` |
/// | With `-o dir` | `dir/{stem}_{index}.png` |
pub fn cell_output_path(texture: &Path, index: usize, output_dir: Option<&Path>) -> PathBuf {
    let stem = texture.file_stem().and_then(|s| s.to_str()).unwrap_or("cell");
    let file_name = format!("{}_{}.png", stem, index);

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => match texture.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
            _ => PathBuf::from(file_name),
        },
    }
}

/// Write every complete cell of `sheet` as its own PNG.
///
/// Cells are cropped and encoded in parallel; all workers share the sheet's
/// cell cache. Returns the written paths in cell order.
pub fn save_cells(
    sheet: &Spritesheet,
    texture_path: &Path,
    output_dir: Option<&Path>,
    scale: u8,
) -> Result<Vec<PathBuf>, OutputError> {
    let paths: Vec<PathBuf> = (0..sheet.cell_count())
        .map(|index| cell_output_path(texture_path, index, output_dir))
        .collect();

    paths.par_iter().enumerate().try_for_each(|(index, path)| -> Result<(), OutputError> {
        let region = sheet.cell(index)?;
        save_png(&scale_image(region.to_image(), scale), path)?;
        debug!("wrote cell {} to {}", index, path.display());
        Ok(())
    })?;

    Ok(paths)
}
