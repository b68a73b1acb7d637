//! Asset model shared across Volo3D

use crate::error::{Result, VoloError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Format used for period labels ("May 2024"); chrono month names are always English
pub const PERIOD_LABEL_FORMAT: &str = "%B %Y";

/// Closed classification of an archived asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Personal,
    Object,
    Environment,
    Art,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 4] = [
        Category::Object,
        Category::Environment,
        Category::Personal,
        Category::Art,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Object => "Object",
            Category::Environment => "Environment",
            Category::Art => "Art",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = VoloError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(Category::Personal),
            "object" => Ok(Category::Object),
            "environment" => Ok(Category::Environment),
            "art" => Ok(Category::Art),
            _ => Err(VoloError::UnknownCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creator credited on an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: String,
}

/// One point in an asset's evolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetVersion {
    pub date: NaiveDate,
    pub model_url: String,
    pub label: String,
}

/// One archived 3D reconstruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Stable, catalog-unique identifier
    pub id: String,

    pub title: String,

    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    /// Display label only, e.g. "45k" or "2.4M"
    pub poly_count: String,

    /// Display label only, e.g. "2.5MB"
    pub file_size: String,

    pub thumbnail: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,

    /// Capture date, also the grouping key
    pub date: NaiveDate,

    #[serde(default)]
    pub is_highlighted: bool,

    /// Version history in authored order. Never re-sorted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<AssetVersion>>,
}

impl AssetRecord {
    /// Create a record with the required fields; display labels start empty
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        let id = id.into();
        Self {
            thumbnail: format!("thumbnails/{}.png", id),
            id,
            title: title.into(),
            category,
            description: None,
            tags: Vec::new(),
            author: None,
            poly_count: String::new(),
            file_size: String::new(),
            model_url: None,
            date,
            is_highlighted: false,
            versions: None,
        }
    }

    /// Attach a version history
    pub fn with_versions(mut self, versions: Vec<AssetVersion>) -> Self {
        self.versions = Some(versions);
        self
    }

    /// Attach a primary model reference
    pub fn with_model(mut self, model_url: impl Into<String>) -> Self {
        self.model_url = Some(model_url.into());
        self
    }

    /// Mark as featured
    pub fn highlighted(mut self) -> Self {
        self.is_highlighted = true;
        self
    }

    /// Version history, empty when the asset has none
    pub fn versions(&self) -> &[AssetVersion] {
        self.versions.as_deref().unwrap_or_default()
    }

    pub fn has_versions(&self) -> bool {
        !self.versions().is_empty()
    }

    /// "Month Year" label of the capture date
    pub fn period_label(&self) -> String {
        period_label(self.date)
    }

    /// Check the per-record invariants
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(VoloError::invalid_asset(
                self.title.clone(),
                "id must not be empty",
            ));
        }

        if self.title.trim().is_empty() {
            return Err(VoloError::invalid_asset(&self.id, "title must not be empty"));
        }

        if self.thumbnail.trim().is_empty() {
            return Err(VoloError::invalid_asset(
                &self.id,
                "thumbnail must not be empty",
            ));
        }

        let mut seen = HashSet::new();
        for tag in &self.tags {
            if !seen.insert(tag.as_str()) {
                return Err(VoloError::invalid_asset(
                    &self.id,
                    format!("duplicate tag '{}'", tag),
                ));
            }
        }

        if matches!(self.versions.as_deref(), Some([])) {
            return Err(VoloError::invalid_asset(
                &self.id,
                "versions must contain at least one entry when present",
            ));
        }

        Ok(())
    }
}

/// Format a date at month granularity
pub fn period_label(date: NaiveDate) -> String {
    date.format(PERIOD_LABEL_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| VoloError::InvalidDate(s.to_string()))
}
