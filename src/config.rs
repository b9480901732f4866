//! Configuration file support
//!
//! Settings live in `<config_home>/acordos/config.toml`. A missing file means
//! defaults; a malformed one is an error so typos are not silently ignored.

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::AcordosError;
use crate::installments::ParseMode;
use crate::reconcile::DEFAULT_TOLERANCE;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserSection,
    pub reconcile: ReconcileSection,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSection {
    pub mode: ParseMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileSection {
    /// Maximum absolute difference still counted as a match
    pub tolerance: Decimal,
}

impl Default for ReconcileSection {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub color: bool,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("parse config.toml")?;
        if config.reconcile.tolerance < Decimal::ZERO {
            return Err(AcordosError::Config(format!(
                "reconcile.tolerance must not be negative (got {})",
                config.reconcile.tolerance
            ))
            .into());
        }
        Ok(config)
    }
}

/// Default config file location
pub fn config_path() -> Result<PathBuf> {
    let base = dir_spec::config_home().ok_or_else(|| anyhow!("Could not determine config directory"))?;
    Ok(base.join("acordos").join("config.toml"))
}

/// Load config from `path`, or from the default location when `None`.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };

    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    Config::from_toml_str(&s).with_context(|| format!("load {}", path.display()))
}
