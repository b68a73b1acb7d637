//! Browsing session
//!
//! Holds the state one viewer has over the shared catalog: the category
//! filter, the title query, and the asset currently open with its timeline and
//! narrative. Derived views are recomputed from that state on every read.
//!
//! Narrative text arrives asynchronously. Every change of the open asset bumps
//! a generation counter; a fetch is tagged with the generation it was started
//! under and its answer is dropped if the session has moved on since.

use crate::catalog::Catalog;
use crate::error::{CliError, Result};
use crate::filter::{self, CategoryFilter};
use crate::grouping::{self, PeriodGroup};
use crate::timeline::{TimelineSnapshot, VersionTimeline};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use volo_common::AssetRecord;

/// Identifies the narrative request started for one asset selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeTicket {
    generation: u64,
    asset_id: String,
}

impl NarrativeTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }
}

/// Narrative text of the open asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum NarrativeState {
    Loading,
    Ready(String),
}

impl NarrativeState {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Loading => None,
            Self::Ready(text) => Some(text),
        }
    }
}

#[derive(Debug, Clone)]
struct Selection {
    index: usize,
    timeline: VersionTimeline,
    narrative: NarrativeState,
}

/// Everything needed to render the open asset
#[derive(Debug, Clone, Serialize)]
pub struct ActiveView<'a> {
    pub asset: &'a AssetRecord,
    pub timeline: TimelineSnapshot<'a>,
    pub narrative: &'a NarrativeState,
}

/// Per-viewer state over a shared catalog
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    category: CategoryFilter,
    query: String,
    selection: Option<Selection>,
    generation: u64,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            category: CategoryFilter::All,
            query: String::new(),
            selection: None,
            generation: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn category_filter(&self) -> CategoryFilter {
        self.category
    }

    pub fn search_query(&self) -> &str {
        &self.query
    }

    /// Current generation of the asset selection
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        debug!(%category, "Category filter changed");
        self.category = category;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        debug!(query = %self.query, "Search query changed");
    }

    /// Assets passing the current filter, in catalog order
    pub fn filtered_assets(&self) -> Vec<&AssetRecord> {
        filter::filter(self.catalog.iter(), self.category, &self.query)
    }

    /// Filtered assets grouped by month
    pub fn current_filtered_grouped_view(&self) -> Vec<PeriodGroup<&AssetRecord>> {
        grouping::group(self.filtered_assets())
    }

    /// Open an asset, resetting its timeline and starting a narrative fetch
    ///
    /// The returned ticket must accompany the narrative text handed to
    /// [`Session::resolve_narrative`].
    pub fn select_asset(&mut self, id: &str) -> Result<NarrativeTicket> {
        let index = self
            .catalog
            .position(id)
            .ok_or_else(|| CliError::asset_not_found(id))?;
        let asset = &self.catalog.assets()[index];

        self.generation += 1;
        self.selection = Some(Selection {
            index,
            timeline: VersionTimeline::for_asset(asset),
            narrative: NarrativeState::Loading,
        });

        debug!(id, generation = self.generation, "Asset selected");

        Ok(NarrativeTicket {
            generation: self.generation,
            asset_id: asset.id.clone(),
        })
    }

    /// Close the open asset; pending narrative answers become stale
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.generation += 1;
            debug!(generation = self.generation, "Selection cleared");
        }
    }

    pub fn selected_asset(&self) -> Option<&AssetRecord> {
        self.selection
            .as_ref()
            .and_then(|s| self.catalog.assets().get(s.index))
    }

    pub fn timeline(&self) -> Option<&VersionTimeline> {
        self.selection.as_ref().map(|s| &s.timeline)
    }

    /// Select a version of the open asset; ignored when nothing is open
    pub fn select_version(&mut self, index: usize) -> bool {
        self.selection
            .as_mut()
            .is_some_and(|s| s.timeline.select_version(index))
    }

    pub fn step_version_back(&mut self) -> bool {
        self.selection
            .as_mut()
            .is_some_and(|s| s.timeline.step_back())
    }

    pub fn step_version_forward(&mut self) -> bool {
        self.selection
            .as_mut()
            .is_some_and(|s| s.timeline.step_forward())
    }

    /// Apply narrative text if its ticket is still current
    ///
    /// Returns `false` when the answer is stale and was discarded.
    pub fn resolve_narrative(&mut self, ticket: &NarrativeTicket, text: impl Into<String>) -> bool {
        let current = ticket.generation == self.generation;
        match self.selection.as_mut() {
            Some(selection) if current => {
                selection.narrative = NarrativeState::Ready(text.into());
                true
            },
            _ => {
                debug!(
                    asset = %ticket.asset_id,
                    ticket = ticket.generation,
                    current = self.generation,
                    "Discarding stale narrative"
                );
                false
            },
        }
    }

    pub fn narrative(&self) -> Option<&NarrativeState> {
        self.selection.as_ref().map(|s| &s.narrative)
    }

    /// Render state of the open asset, if any
    pub fn active_view_state(&self) -> Option<ActiveView<'_>> {
        let selection = self.selection.as_ref()?;
        let asset = self.catalog.assets().get(selection.index)?;
        Some(ActiveView {
            asset,
            timeline: selection.timeline.snapshot(),
            narrative: &selection.narrative,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use volo_common::types::parse_date;
    use volo_common::Category;

    fn asset(id: &str, title: &str, category: Category, date: &str) -> AssetRecord {
        AssetRecord::new(id, title, category, parse_date(date).unwrap())
    }

    fn small_catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(vec![
                asset("a", "Astronaut Suit", Category::Object, "2024-05-12"),
                asset("b", "Mural", Category::Art, "2024-05-08"),
                asset("c", "Compass", Category::Object, "2024-04-28"),
            ])
            .unwrap(),
        )
    }

    fn ids<'a>(assets: impl IntoIterator<Item = &'a AssetRecord>) -> Vec<&'a str> {
        assets.into_iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_end_to_end_view() {
        let mut session = Session::new(small_catalog());
        session.set_category_filter(CategoryFilter::Only(Category::Object));
        session.set_search_query("");

        assert_eq!(ids(session.filtered_assets()), vec!["a", "c"]);

        let view = session.current_filtered_grouped_view();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].label, "May 2024");
        assert_eq!(ids(view[0].items.iter().copied()), vec!["a"]);
        assert_eq!(view[1].label, "April 2024");
        assert_eq!(ids(view[1].items.iter().copied()), vec!["c"]);
    }

    #[test]
    fn test_search_narrows_view() {
        let mut session = Session::new(small_catalog());
        session.set_search_query("COMP");
        assert_eq!(ids(session.filtered_assets()), vec!["c"]);

        session.set_search_query("nothing matches");
        assert!(session.current_filtered_grouped_view().is_empty());
    }

    #[test]
    fn test_select_unknown_asset() {
        let mut session = Session::new(small_catalog());
        let err = session.select_asset("zzz").unwrap_err();
        assert!(matches!(err, CliError::AssetNotFound(ref id) if id == "zzz"));
        assert_eq!(session.generation(), 0);
        assert!(session.active_view_state().is_none());
    }

    #[test]
    fn test_narrative_applies_for_current_ticket() {
        let mut session = Session::new(small_catalog());
        let ticket = session.select_asset("b").unwrap();
        assert_eq!(ticket.asset_id(), "b");
        assert_eq!(session.narrative(), Some(&NarrativeState::Loading));

        assert!(session.resolve_narrative(&ticket, "Paint remembered."));
        let view = session.active_view_state().unwrap();
        assert_eq!(view.asset.id, "b");
        assert_eq!(view.narrative.text(), Some("Paint remembered."));
    }

    #[test]
    fn test_stale_narrative_is_discarded() {
        let mut session = Session::new(small_catalog());
        let first = session.select_asset("a").unwrap();
        let second = session.select_asset("c").unwrap();

        assert!(!session.resolve_narrative(&first, "About the astronaut"));
        assert_eq!(session.narrative(), Some(&NarrativeState::Loading));

        assert!(session.resolve_narrative(&second, "About the compass"));
        assert_eq!(
            session.narrative().and_then(NarrativeState::text),
            Some("About the compass")
        );
    }

    #[test]
    fn test_reselecting_same_asset_invalidates_old_ticket() {
        let mut session = Session::new(small_catalog());
        let old = session.select_asset("a").unwrap();
        let new = session.select_asset("a").unwrap();
        assert_ne!(old, new);
        assert!(!session.resolve_narrative(&old, "late"));
        assert!(session.resolve_narrative(&new, "fresh"));
    }

    #[test]
    fn test_clear_selection_makes_pending_stale() {
        let mut session = Session::new(small_catalog());
        let ticket = session.select_asset("a").unwrap();
        session.clear_selection();

        assert!(!session.resolve_narrative(&ticket, "too late"));
        assert!(session.selected_asset().is_none());
        assert!(!session.select_version(0));
    }

    #[test]
    fn test_version_selection_through_session() {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let mut session = Session::new(catalog);
        session.select_asset("1").unwrap();

        let latest = session.active_view_state().unwrap().timeline;
        assert_eq!(latest.active_index, Some(2));

        assert!(session.select_version(0));
        assert!(!session.select_version(7));
        let view = session.active_view_state().unwrap();
        assert_eq!(view.timeline.active_index, Some(0));
        assert_eq!(view.timeline.position, Some(0.0));

        assert!(session.step_version_forward());
        assert_eq!(session.timeline().unwrap().active_index(), Some(1));
        assert!(session.step_version_back());

        session.select_asset("2").unwrap();
        session.select_asset("1").unwrap();
        assert_eq!(session.timeline().unwrap().active_index(), Some(2));
    }

    #[test]
    fn test_filter_change_keeps_selection() {
        let mut session = Session::new(small_catalog());
        let ticket = session.select_asset("b").unwrap();
        session.set_category_filter(CategoryFilter::Only(Category::Object));
        assert_eq!(session.selected_asset().map(|a| a.id.as_str()), Some("b"));
        assert!(session.resolve_narrative(&ticket, "still current"));
    }

    #[test]
    fn test_active_view_serializes() {
        let mut session = Session::new(small_catalog());
        let ticket = session.select_asset("a").unwrap();
        session.resolve_narrative(&ticket, "Kept.");

        let json = serde_json::to_value(session.active_view_state().unwrap()).unwrap();
        assert_eq!(json["asset"]["id"], "a");
        assert_eq!(json["narrative"]["status"], "ready");
        assert_eq!(json["narrative"]["text"], "Kept.");
        assert_eq!(json["timeline"]["version_count"], 0);
    }
}
