//! Category savings configuration
//!
//! Maps a user category label to the monthly amount that category is
//! expected to save.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/nest/config/categories.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/categories.toml");

/// Resolves the monthly savings amount configured for a category
pub trait CategoryAmounts: Send + Sync {
    /// Monthly amount for `category`, or `None` when unconfigured
    fn monthly_savings_for(&self, category: &str) -> Option<f64>;
}

/// Category -> monthly savings amount table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryConfig {
    amounts: BTreeMap<String, f64>,
    source: Option<PathBuf>,
}

impl CategoryConfig {
    /// Load from the default override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load from an explicit path if given and present, otherwise as `load()`
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(default_config_path)
            .filter(|p| p.exists());

        match path {
            Some(path) => {
                debug!("Loading category config from {}", path.display());
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                let mut config = parse_config(&content)?;
                config.source = Some(path);
                Ok(config)
            }
            None => parse_config(DEFAULT_CONFIG),
        }
    }

    /// Build a config from explicit pairs (for testing and embedding)
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            amounts: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            source: None,
        }
    }

    /// File the config was read from; `None` for embedded defaults
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// All configured categories in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.amounts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl CategoryAmounts for CategoryConfig {
    fn monthly_savings_for(&self, category: &str) -> Option<f64> {
        self.amounts.get(category).copied()
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("nest").join("config").join("categories.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    categories: Option<BTreeMap<String, f64>>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<CategoryConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let amounts = raw.categories.unwrap_or_default();
    if let Some((name, amount)) = amounts
        .iter()
        .find(|(_, amount)| !amount.is_finite() || **amount < 0.0)
    {
        return Err(Error::Config(format!(
            "Category '{}' has invalid monthly amount {}",
            name, amount
        )));
    }

    Ok(CategoryConfig {
        amounts,
        source: None,
    })
}
