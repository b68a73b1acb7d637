//! Asset catalog
//!
//! The read-only, ordered set of archived assets. Loaded once at startup from
//! the built-in fixture or from a YAML file, validated, and shared behind an
//! `Arc` for the rest of the process.

use crate::config::Config;
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use volo_common::AssetRecord;

/// Built-in archive shipped with the binary
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.yml");

/// On-disk catalog layout
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    assets: Vec<AssetRecord>,
}

/// Immutable collection of asset records in authored order
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    assets: Vec<AssetRecord>,
}

impl Catalog {
    /// Build a catalog, checking every record and id uniqueness
    pub fn new(assets: Vec<AssetRecord>) -> Result<Self> {
        let mut ids = HashSet::new();

        for asset in &assets {
            asset
                .validate()
                .map_err(|e| CliError::invalid_catalog(e.to_string()))?;

            if !ids.insert(asset.id.as_str()) {
                return Err(CliError::invalid_catalog(format!(
                    "duplicate asset id '{}'",
                    asset.id
                )));
            }
        }

        Ok(Self { assets })
    }

    /// The built-in sample archive
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::new(file.assets)
    }

    /// Load a catalog from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&content)?;
        debug!(path = %path.display(), assets = catalog.len(), "Loaded catalog file");
        Ok(catalog)
    }

    /// Catalog selected by configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.catalog_path() {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn assets(&self) -> &[AssetRecord] {
        &self.assets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetRecord> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Find an asset by id
    pub fn get(&self, id: &str) -> Option<&AssetRecord> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Position of an asset in catalog order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.assets.iter().position(|a| a.id == id)
    }

    /// Ids close to `id`, for "did you mean" hints
    pub fn similar_ids(&self, id: &str) -> Vec<&str> {
        let needle = id.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .assets
            .iter()
            .map(|a| {
                let by_id = strsim::jaro_winkler(&needle, &a.id.to_lowercase());
                let by_title = strsim::jaro_winkler(&needle, &a.title.to_lowercase());
                (by_id.max(by_title), a.id.as_str())
            })
            .filter(|(score, _)| *score >= 0.8)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, id)| id).take(3).collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a AssetRecord;
    type IntoIter = std::slice::Iter<'a, AssetRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
