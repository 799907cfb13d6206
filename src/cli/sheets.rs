//! Sheets command implementation (list sheets from sheets.toml)

use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::assets::AssetStore;
use crate::config::{build_sheet, load_config, project_root, ConfigError};
use crate::spritesheet::BoundsPolicy;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

#[derive(Debug, Serialize)]
struct SheetSummary {
    name: String,
    texture: String,
    cell_width: u32,
    cell_height: u32,
    bounds: BoundsPolicy,
    cell_count: usize,
}

/// Execute the sheets command
pub fn run_sheets(config_path: Option<&Path>, json: bool) -> ExitCode {
    let (path, config) = match load_config(config_path) {
        Ok(loaded) => loaded,
        Err(ConfigError::Io(e)) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let Some(path) = path else {
        eprintln!("Error: No sheets.toml found (use --config to point at one)");
        return ExitCode::from(EXIT_INVALID_ARGS);
    };
    let root = project_root(&path).unwrap_or(Path::new(""));

    let mut store = AssetStore::new();
    let mut summaries = Vec::with_capacity(config.sheets.len());
    for (name, sheet_config) in &config.sheets {
        let sheet = match build_sheet(&config, root, name, &mut store) {
            Ok(sheet) => sheet,
            Err(e) => {
                eprintln!("Error: sheet '{}': {}", name, e);
                return ExitCode::from(EXIT_ERROR);
            }
        };

        summaries.push(SheetSummary {
            name: name.clone(),
            texture: sheet_config.texture.display().to_string(),
            cell_width: sheet.cell_width(),
            cell_height: sheet.cell_height(),
            bounds: sheet.policy(),
            cell_count: sheet.cell_count(),
        });
    }

    if json {
        return match serde_json::to_string_pretty(&summaries) {
            Ok(out) => {
                println!("{}", out);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: Failed to serialize output: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    if summaries.is_empty() {
        println!("No sheets defined in {}", path.display());
    }
    for s in &summaries {
        println!(
            "{}: {} ({}x{}, {} cells, {})",
            s.name, s.texture, s.cell_width, s.cell_height, s.cell_count, s.bounds
        );
    }
    ExitCode::from(EXIT_SUCCESS)
}
