//! Slice command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::output::save_cells;
use crate::spritesheet::BoundsPolicy;

use super::{open_sheet, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the slice command - write every cell of a texture as its own PNG
pub fn run_slice(texture: &Path, cell: (u32, u32), output: Option<&Path>, scale: u8) -> ExitCode {
    let sheet = match open_sheet(texture, cell, BoundsPolicy::Strict) {
        Ok(sheet) => sheet,
        Err(code) => return code,
    };

    if sheet.cell_count() == 0 {
        eprintln!(
            "Warning: {} is smaller than one {}x{} cell, nothing to slice",
            texture.display(),
            cell.0,
            cell.1
        );
        return ExitCode::from(EXIT_SUCCESS);
    }

    match save_cells(&sheet, texture, output, scale) {
        Ok(paths) => {
            for path in &paths {
                println!("Saved: {}", path.display());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: Failed to save cells: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
