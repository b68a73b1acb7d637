//! Version timeline
//!
//! Tracks which version of a multi-version asset is being viewed. Assets
//! without a version history get an inert timeline that always points at the
//! primary model.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use volo_common::{AssetRecord, AssetVersion};

/// Active-version state for one asset
#[derive(Debug, Clone, PartialEq)]
pub struct VersionTimeline {
    versions: Vec<AssetVersion>,
    primary_model: Option<String>,
    active: Option<usize>,
}

impl VersionTimeline {
    /// Timeline for `asset`, starting at its latest version
    pub fn for_asset(asset: &AssetRecord) -> Self {
        let versions = asset.versions().to_vec();
        let active = versions.len().checked_sub(1);
        Self {
            versions,
            primary_model: asset.model_url.clone(),
            active,
        }
    }

    /// Replace the tracked asset, resetting to its latest version
    pub fn load(&mut self, asset: &AssetRecord) {
        *self = Self::for_asset(asset);
    }

    /// Select version `index`; out-of-range or inert selections are ignored
    pub fn select_version(&mut self, index: usize) -> bool {
        if index >= self.versions.len() {
            debug!(index, versions = self.versions.len(), "Ignoring version selection");
            return false;
        }
        self.active = Some(index);
        true
    }

    /// Move one version back, if possible
    pub fn step_back(&mut self) -> bool {
        match self.active {
            Some(i) if i > 0 => self.select_version(i - 1),
            _ => false,
        }
    }

    /// Move one version forward, if possible
    pub fn step_forward(&mut self) -> bool {
        match self.active {
            Some(i) => self.select_version(i + 1),
            None => false,
        }
    }

    pub fn versions(&self) -> &[AssetVersion] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// True when the asset has no version history
    pub fn is_inert(&self) -> bool {
        self.versions.is_empty()
    }

    /// More than one version to move between
    pub fn is_multi_version(&self) -> bool {
        self.versions.len() > 1
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_version(&self) -> Option<&AssetVersion> {
        self.active.and_then(|i| self.versions.get(i))
    }

    /// Model to render: the active version's, else the primary model
    pub fn active_model(&self) -> Option<&str> {
        match self.active_version() {
            Some(version) => Some(version.model_url.as_str()),
            None => self.primary_model.as_deref(),
        }
    }

    pub fn active_label(&self) -> Option<&str> {
        self.active_version().map(|v| v.label.as_str())
    }

    pub fn active_date(&self) -> Option<NaiveDate> {
        self.active_version().map(|v| v.date)
    }

    /// Progress along the timeline in `[0, 1]`; absent below two versions
    pub fn position(&self) -> Option<f64> {
        let last = self.versions.len().checked_sub(1).filter(|&last| last > 0)?;
        self.active.map(|i| i as f64 / last as f64)
    }

    pub fn first_label(&self) -> Option<&str> {
        self.versions.first().map(|v| v.label.as_str())
    }

    pub fn last_label(&self) -> Option<&str> {
        self.versions.last().map(|v| v.label.as_str())
    }

    /// Serializable snapshot of the derived values
    pub fn snapshot(&self) -> TimelineSnapshot<'_> {
        TimelineSnapshot {
            active_index: self.active,
            version_count: self.versions.len(),
            active_model: self.active_model(),
            active_label: self.active_label(),
            active_date: self.active_date(),
            position: self.position(),
        }
    }
}

/// Derived timeline values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSnapshot<'a> {
    pub active_index: Option<usize>,
    pub version_count: usize,
    pub active_model: Option<&'a str>,
    pub active_label: Option<&'a str>,
    pub active_date: Option<NaiveDate>,
    pub position: Option<f64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use volo_common::types::parse_date;
    use volo_common::Category;

    fn version(date: &str, model: &str, label: &str) -> AssetVersion {
        AssetVersion {
            date: parse_date(date).unwrap(),
            model_url: model.to_string(),
            label: label.to_string(),
        }
    }

    fn three_versions() -> AssetRecord {
        AssetRecord::new("1", "Astronaut", Category::Object, parse_date("2024-05-12").unwrap())
            .with_model("primary.glb")
            .with_versions(vec![
                version("2024-01-01", "alpha.glb", "Alpha Capture"),
                version("2024-03-15", "fidelity.glb", "Fidelity Pass"),
                version("2024-05-12", "final.glb", "Final Archive"),
            ])
    }

    #[test]
    fn test_starts_at_latest_version() {
        let timeline = VersionTimeline::for_asset(&three_versions());
        assert_eq!(timeline.active_index(), Some(2));
        assert_eq!(timeline.active_model(), Some("final.glb"));
        assert_eq!(timeline.active_label(), Some("Final Archive"));
        assert_eq!(timeline.position(), Some(1.0));
    }

    #[test]
    fn test_select_version() {
        let mut timeline = VersionTimeline::for_asset(&three_versions());
        assert!(timeline.select_version(0));
        assert_eq!(timeline.active_index(), Some(0));
        assert_eq!(timeline.active_model(), Some("alpha.glb"));
        assert_eq!(timeline.active_date(), Some(parse_date("2024-01-01").unwrap()));
        assert_eq!(timeline.position(), Some(0.0));

        assert!(timeline.select_version(1));
        assert_eq!(timeline.position(), Some(0.5));
    }

    #[test]
    fn test_out_of_range_selection_is_ignored() {
        let mut timeline = VersionTimeline::for_asset(&three_versions());
        let before = timeline.clone();
        assert!(!timeline.select_version(5));
        assert_eq!(timeline, before);
    }

    #[test]
    fn test_inert_timeline_uses_primary_model() {
        let asset = AssetRecord::new("5", "Horse", Category::Environment, parse_date("2024-04-28").unwrap())
            .with_model("horse.glb");
        let mut timeline = VersionTimeline::for_asset(&asset);

        assert!(timeline.is_inert());
        assert_eq!(timeline.active_index(), None);
        assert_eq!(timeline.active_model(), Some("horse.glb"));
        assert!(!timeline.select_version(0));
        assert!(!timeline.step_forward());
        assert_eq!(timeline.position(), None);
    }

    #[test]
    fn test_single_version_has_no_position() {
        let asset = AssetRecord::new("s", "Single", Category::Art, parse_date("2024-02-02").unwrap())
            .with_versions(vec![version("2024-02-02", "only.glb", "Only")]);
        let timeline = VersionTimeline::for_asset(&asset);
        assert_eq!(timeline.active_index(), Some(0));
        assert_eq!(timeline.active_model(), Some("only.glb"));
        assert!(!timeline.is_multi_version());
        assert_eq!(timeline.position(), None);
    }

    #[test]
    fn test_stepping_is_clamped() {
        let mut timeline = VersionTimeline::for_asset(&three_versions());
        assert!(!timeline.step_forward());
        assert!(timeline.step_back());
        assert!(timeline.step_back());
        assert!(!timeline.step_back());
        assert_eq!(timeline.active_index(), Some(0));
        assert!(timeline.step_forward());
        assert_eq!(timeline.active_index(), Some(1));
    }

    #[test]
    fn test_load_resets_to_latest() {
        let mut timeline = VersionTimeline::for_asset(&three_versions());
        timeline.select_version(0);
        timeline.load(&three_versions());
        assert_eq!(timeline.active_index(), Some(2));
    }

    #[test]
    fn test_end_labels() {
        let timeline = VersionTimeline::for_asset(&three_versions());
        assert_eq!(timeline.first_label(), Some("Alpha Capture"));
        assert_eq!(timeline.last_label(), Some("Final Archive"));
    }
}
