//! Search configuration
//!
//! Optional JSON file that tunes the tables' synonyms, field weights and
//! query limits on top of the built-in defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::records::Entity;
use crate::search::{RankOptions, SynonymMap, Weights};

/// Top-level representation of `search.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Extra synonyms, merged into the defaults
    pub synonyms: BTreeMap<String, Vec<String>>,
    /// Use `synonyms` alone instead of extending the defaults
    pub replace_default_synonyms: bool,
    /// Per-table weight overrides
    pub weights: WeightOverrides,
    /// Override for the field holding the row status
    pub status_field_key: Option<String>,
    pub max_query_tokens: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightOverrides {
    pub invoices: BTreeMap<String, f64>,
    pub transactions: BTreeMap<String, f64>,
}

impl WeightOverrides {
    fn for_entity(&self, entity: Entity) -> &BTreeMap<String, f64> {
        match entity {
            Entity::Invoices => &self.invoices,
            Entity::Transactions => &self.transactions,
        }
    }
}

impl SearchConfig {
    /// Ranking options for a table: entity defaults overlaid with this config
    pub fn rank_options(&self, entity: Entity) -> RankOptions {
        let mut options = entity.default_options();

        let synonyms: SynonymMap = self.synonyms.iter().collect();
        if self.replace_default_synonyms {
            options.synonyms = synonyms;
        } else {
            options.synonyms.extend(&synonyms);
        }

        let mut overrides = Weights::new();
        for (field, weight) in self.weights.for_entity(entity) {
            if !overrides.set(field, *weight) {
                warn!("Ignoring non-positive weight {} for {}.{}", weight, entity.as_str(), field);
            }
        }
        options.weights.merge(&overrides);

        if let Some(key) = &self.status_field_key {
            options.status_field_key = Some(key.clone());
        }
        if let Some(max) = self.max_query_tokens {
            if max == 0 {
                warn!("Ignoring max_query_tokens = 0");
            } else {
                options.max_query_tokens = Some(max);
            }
        }

        options
    }
}

/// Get the path to the default search configuration file
pub fn config_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("maglo").join("search.json"))
}

/// Load the search configuration
///
/// An explicit path must exist. Without one, the default location is used and
/// a missing file yields the default config.
pub fn load_config(explicit: Option<&Path>) -> Result<SearchConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::InvalidInput(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match config_path() {
            Ok(path) if path.exists() => path,
            Ok(path) => {
                debug!("No search config at {}, using defaults", path.display());
                return Ok(SearchConfig::default());
            }
            Err(e) => {
                debug!("{}, using default search config", e);
                return Ok(SearchConfig::default());
            }
        },
    };

    read_config(&path)
}

fn read_config(path: &Path) -> Result<SearchConfig, AppError> {
    let data = fs::read_to_string(path)?;
    let config: SearchConfig = serde_json::from_str(&data).map_err(|e| {
        AppError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    debug!("Loaded search config from {}", path.display());
    Ok(config)
}
