//! Configuration loading and discovery for `sheets.toml`
//!
//! Provides functions to find, load, and turn configured sheets into
//! [`Spritesheet`]s.

use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::schema::SheetsConfig;
use crate::assets::AssetStore;
use crate::error::SheetError;
use crate::spritesheet::Spritesheet;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "sheets.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse sheets.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
    /// No sheet with that name is configured
    #[error("Sheet '{0}' is not defined in sheets.toml")]
    UnknownSheet(String),
    /// Texture loading or sheet construction failed
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

/// Find sheets.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find sheets.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Reached root, no config found
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a sheets.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`]. Returns the path actually loaded (so relative texture
/// paths can be resolved) together with the config, or `None` for the path
/// and an empty config when nothing was found.
pub fn load_config(path: Option<&Path>) -> Result<(Option<PathBuf>, SheetsConfig), ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            let config = load_config_file(&p)?;
            Ok((Some(p), config))
        }
        None => Ok((None, SheetsConfig::default())),
    }
}

/// Load and validate configuration from a specific file path.
pub fn load_config_file(path: &Path) -> Result<SheetsConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SheetsConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    debug!("loaded {} sheet definitions from {}", config.sheets.len(), path.display());
    Ok(config)
}

/// Get the project root directory from a config file path.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

/// Build the configured sheet `name`.
///
/// The sheet's texture is loaded into `store` (relative to `root`) and the
/// spritesheet gets the configured bounds policy.
pub fn build_sheet(
    config: &SheetsConfig,
    root: &Path,
    name: &str,
    store: &mut AssetStore,
) -> Result<Spritesheet, ConfigError> {
    let sheet = config.sheets.get(name).ok_or_else(|| ConfigError::UnknownSheet(name.to_string()))?;

    let texture = store.add(&resolve_path(root, &sheet.texture))?;
    let spritesheet = Spritesheet::new(texture, sheet.cell_width, sheet.cell_height)?
        .with_policy(config.bounds_for(sheet));
    Ok(spritesheet)
}
