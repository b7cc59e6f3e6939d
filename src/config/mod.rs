use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    domain::FabricOption,
    errors::{BookingError, Result},
    utils::paths::{ensure_dir, write_atomic, PathResolver},
};

pub const DEFAULT_BASE_PRICE: f64 = 150.0;
pub const DEFAULT_URGENT_FEE: f64 = 50.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub currency: String,
    #[serde(default = "default_base_price")]
    pub base_price: f64,
    #[serde(default = "default_urgent_fee")]
    pub urgent_fee: f64,
    #[serde(default = "FabricOption::default_catalog")]
    pub fabrics: Vec<FabricOption>,
}

fn default_base_price() -> f64 {
    DEFAULT_BASE_PRICE
}

fn default_urgent_fee() -> f64 {
    DEFAULT_URGENT_FEE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            base_price: DEFAULT_BASE_PRICE,
            urgent_fee: DEFAULT_URGENT_FEE,
            fabrics: FabricOption::default_catalog(),
        }
    }
}

impl Config {
    /// Rejects prices the price breakdown cannot sensibly display.
    pub fn validate(&self) -> Result<()> {
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(BookingError::ConfigError(format!(
                "base_price must be a non-negative number, got {}",
                self.base_price
            )));
        }
        if !self.urgent_fee.is_finite() || self.urgent_fee < 0.0 {
            return Err(BookingError::ConfigError(format!(
                "urgent_fee must be a non-negative number, got {}",
                self.urgent_fee
            )));
        }
        if let Some(fabric) = self
            .fabrics
            .iter()
            .find(|f| !f.price.is_finite() || f.price < 0.0)
        {
            return Err(BookingError::ConfigError(format!(
                "fabric `{}` has an invalid price",
                fabric.id
            )));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Loads the stored configuration, falling back to defaults when none exists.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| BookingError::ConfigError(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
