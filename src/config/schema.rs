//! Configuration schema types for `sheets.toml`
//!
//! Defines the named spritesheets a project slices and their validation rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::spritesheet::BoundsPolicy;

/// Default settings applied to every sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Out-of-range lookup policy for sheets that don't set their own
    #[serde(default)]
    pub bounds: BoundsPolicy,
}

/// One named spritesheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Texture image path, relative to the config file's directory
    pub texture: PathBuf,
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
    /// Overrides `defaults.bounds`
    #[serde(default)]
    pub bounds: Option<BoundsPolicy>,
}

/// Root of `sheets.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetsConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Sheets by name, kept sorted for stable listing
    #[serde(default)]
    pub sheets: BTreeMap<String, SheetConfig>,
}

/// A single config validation problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl SheetsConfig {
    /// Bounds policy that applies to `sheet`.
    pub fn bounds_for(&self, sheet: &SheetConfig) -> BoundsPolicy {
        sheet.bounds.unwrap_or(self.defaults.bounds)
    }

    /// Check every sheet and return all problems found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        for (name, sheet) in &self.sheets {
            if sheet.texture.as_os_str().is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("sheets.{}.texture", name),
                    message: "must be a non-empty path".to_string(),
                });
            }

            if sheet.cell_width == 0 {
                errors.push(ConfigValidationError {
                    field: format!("sheets.{}.cell_width", name),
                    message: "must be a positive integer".to_string(),
                });
            }

            if sheet.cell_height == 0 {
                errors.push(ConfigValidationError {
                    field: format!("sheets.{}.cell_height", name),
                    message: "must be a positive integer".to_string(),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [defaults]
            bounds = "extrapolate"

            [sheets.hero]
            texture = "assets/hero.png"
            cell_width = 16
            cell_height = 24

            [sheets.tiles]
            texture = "assets/tiles.png"
            cell_width = 8
            cell_height = 8
            bounds = "strict"
        "#;

        let config: SheetsConfig = toml::from_str(toml).expect("should parse");
        assert_eq!(config.defaults.bounds, BoundsPolicy::Extrapolate);
        assert_eq!(config.sheets.len(), 2);

        let hero = &config.sheets["hero"];
        assert_eq!(hero.texture, PathBuf::from("assets/hero.png"));
        assert_eq!((hero.cell_width, hero.cell_height), (16, 24));
        assert_eq!(config.bounds_for(hero), BoundsPolicy::Extrapolate);
        assert_eq!(config.bounds_for(&config.sheets["tiles"]), BoundsPolicy::Strict);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: SheetsConfig = toml::from_str("").expect("should parse");
        assert_eq!(config.defaults.bounds, BoundsPolicy::Strict);
        assert!(config.sheets.is_empty());
    }

    #[test]
    fn test_missing_cell_size_is_parse_error() {
        let toml = "[sheets.hero]\ntexture = \"hero.png\"\n";
        assert!(toml::from_str::<SheetsConfig>(toml).is_err());
    }

    #[test]
    fn test_validate_reports_all_problems() {
        let toml = r#"
            [sheets.broken]
            texture = ""
            cell_width = 0
            cell_height = 0
        "#;
        let config: SheetsConfig = toml::from_str(toml).expect("should parse");
        let errors = config.validate();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["sheets.broken.texture", "sheets.broken.cell_width", "sheets.broken.cell_height"]
        );
        assert_eq!(errors[1].to_string(), "sheets.broken.cell_width: must be a positive integer");
    }
}
