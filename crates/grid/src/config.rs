//! Rasterization configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
}

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("cell_size must be a positive finite number, got {0}")]
    InvalidCellSize(f64),

    #[error("leaf_size must be a positive finite number, got {0}")]
    InvalidLeafSize(f64),
}

impl Config {
    /// Load configuration from a TOML file, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                let config: Self = toml::from_str(&contents)
                    .with_context(|| format!("failed to parse config {}", path.display()))?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            None => {
                debug!("No configuration file given, using defaults");
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that sizes are usable for building a grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = &self.grid;
        if !(grid.cell_size.is_finite() && grid.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(grid.cell_size));
        }
        if !(grid.leaf_size.is_finite() && grid.leaf_size > 0.0) {
            return Err(ConfigError::InvalidLeafSize(grid.leaf_size));
        }
        Ok(())
    }
}

/// Output grid and index settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GridConfig {
    /// Side length of an output cell, in source units.
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
    /// Index nodes with both sides below this stop subdividing.
    #[serde(default = "default_leaf_size")]
    pub leaf_size: f64,
    /// Value written for cells without samples.
    #[serde(default = "default_nodata_value")]
    pub nodata_value: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            leaf_size: default_leaf_size(),
            nodata_value: default_nodata_value(),
        }
    }
}

fn default_cell_size() -> f64 {
    1.0
}
fn default_leaf_size() -> f64 {
    10.0
}
fn default_nodata_value() -> f64 {
    -9999.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.grid.cell_size, 1.0);
        assert_eq!(config.grid.leaf_size, 10.0);
        assert_eq!(config.grid.nodata_value, -9999.0);
        assert!(config.validate().is_ok());
        assert_eq!(Config::load(None).unwrap(), config);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str("[grid]\ncell_size = 2.5\n").unwrap();
        assert_eq!(config.grid.cell_size, 2.5);
        assert_eq!(config.grid.leaf_size, 10.0);

        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.grid.nodata_value = -1.0;
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        config.grid.cell_size = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidCellSize(0.0)));

        let mut config = Config::default();
        config.grid.leaf_size = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLeafSize(_))));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load(Some(Path::new("/nonexistent/pointgrid.toml"))).is_err());
    }
}
