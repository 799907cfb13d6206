//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod grid;
mod sheets;
mod slice;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::error::SheetError;
use crate::spritesheet::{BoundsPolicy, Spritesheet};
use crate::texture::Texture;

/// Exit codes for the sgrid binary
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Parse a cell size given as `WxH` or a single `N` meaning `NxN`.
pub fn parse_cell_size(s: &str) -> Result<(u32, u32), String> {
    let parse = |part: &str| {
        part.trim().parse::<u32>().map_err(|_| format!("invalid cell size '{}': expected WxH or N", s))
    };

    match s.split_once(['x', 'X']) {
        Some((w, h)) => Ok((parse(w)?, parse(h)?)),
        None => {
            let n = parse(s)?;
            Ok((n, n))
        }
    }
}

/// Spritegrid - slice textures into cached grid cells
#[derive(Parser)]
#[command(name = "sgrid")]
#[command(about = "Spritegrid - inspect and slice spritesheet textures by grid cell")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the grid geometry of a texture
    Info {
        /// Texture image file
        texture: PathBuf,

        /// Cell size as WxH (e.g. 16x16) or N for NxN
        #[arg(long, value_parser = parse_cell_size)]
        cell: (u32, u32),

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single cell's rectangle
    Cell {
        /// Texture image file
        texture: PathBuf,

        /// Zero-based row-major cell index
        index: usize,

        /// Cell size as WxH (e.g. 16x16) or N for NxN
        #[arg(long, value_parser = parse_cell_size)]
        cell: (u32, u32),

        /// Allow indices past the last cell instead of failing
        #[arg(long)]
        extrapolate: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every cell in index order
    Cells {
        /// Texture image file
        texture: PathBuf,

        /// Cell size as WxH (e.g. 16x16) or N for NxN
        #[arg(long, value_parser = parse_cell_size)]
        cell: (u32, u32),

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write each cell of a texture to its own PNG
    Slice {
        /// Texture image file
        texture: PathBuf,

        /// Cell size as WxH (e.g. 16x16) or N for NxN
        #[arg(long, value_parser = parse_cell_size)]
        cell: (u32, u32),

        /// Output directory (default: next to the texture)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale output by integer factor (1-16, default: 1)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: u8,
    },
    /// List the sheets defined in sheets.toml
    Sheets {
        /// Path to sheets.toml (default: search upward from the current directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Initialize env_logger. RUST_LOG overrides the default filter.
fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

/// Load a texture file and slice it, reporting failures on stderr.
pub(crate) fn open_sheet(
    texture: &Path,
    cell: (u32, u32),
    policy: BoundsPolicy,
) -> Result<Spritesheet, ExitCode> {
    let texture = match Texture::open(texture) {
        Ok(t) => Arc::new(t),
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };

    match Spritesheet::new(texture, cell.0, cell.1) {
        Ok(sheet) => Ok(sheet.with_policy(policy)),
        Err(e @ SheetError::InvalidDimension { .. }) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_INVALID_ARGS))
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Info { texture, cell, json } => grid::run_info(&texture, cell, json),
        Commands::Cell { texture, index, cell, extrapolate, json } => {
            grid::run_cell(&texture, index, cell, extrapolate, json)
        }
        Commands::Cells { texture, cell, json } => grid::run_cells(&texture, cell, json),
        Commands::Slice { texture, cell, output, scale } => {
            slice::run_slice(&texture, cell, output.as_deref(), scale)
        }
        Commands::Sheets { config, json } => sheets::run_sheets(config.as_deref(), json),
    }
}
