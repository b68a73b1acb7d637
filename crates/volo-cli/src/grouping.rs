//! Grouping by capture period
//!
//! Partitions an already filtered, ordered asset sequence into "Month Year"
//! groups. Groups are emitted in order of first appearance of their label,
//! and assets keep their input order inside each group.

use serde::Serialize;
use std::collections::HashMap;
use volo_common::AssetRecord;

/// One period and the assets captured in it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodGroup<T> {
    pub label: String,
    pub items: Vec<T>,
}

impl<T> PeriodGroup<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map every item, keeping labels and order
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PeriodGroup<U> {
        PeriodGroup {
            label: self.label,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Stable partition of `items` by `label_of`, groups in first-seen order
pub fn group_by_label<T, F>(items: impl IntoIterator<Item = T>, mut label_of: F) -> Vec<PeriodGroup<T>>
where
    F: FnMut(&T) -> String,
{
    let mut groups: Vec<PeriodGroup<T>> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for item in items {
        let label = label_of(&item);
        match slots.get(&label) {
            Some(&slot) => groups[slot].items.push(item),
            None => {
                slots.insert(label.clone(), groups.len());
                groups.push(PeriodGroup {
                    label,
                    items: vec![item],
                });
            },
        }
    }

    groups
}

/// Group assets by the month and year of their capture date
pub fn group<'a>(assets: impl IntoIterator<Item = &'a AssetRecord>) -> Vec<PeriodGroup<&'a AssetRecord>> {
    group_by_label(assets, |asset| asset.period_label())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::filter::{filter, CategoryFilter};
    use proptest::prelude::*;
    use volo_common::types::parse_date;
    use volo_common::Category;

    fn asset(id: &str, category: Category, date: &str) -> AssetRecord {
        AssetRecord::new(id, format!("Asset {}", id), category, parse_date(date).unwrap())
    }

    fn shape(groups: &[PeriodGroup<&AssetRecord>]) -> Vec<(String, Vec<String>)> {
        groups
            .iter()
            .map(|g| (g.label.clone(), g.items.iter().map(|a| a.id.clone()).collect()))
            .collect()
    }

    #[test]
    fn test_filter_then_group_scenario() {
        let assets = vec![
            asset("A", Category::Object, "2024-05-12"),
            asset("B", Category::Art, "2024-05-08"),
            asset("C", Category::Object, "2024-04-28"),
        ];

        let filtered = filter(&assets, CategoryFilter::Only(Category::Object), "");
        let groups = group(filtered);

        assert_eq!(
            shape(&groups),
            vec![
                ("May 2024".to_string(), vec!["A".to_string()]),
                ("April 2024".to_string(), vec!["C".to_string()]),
            ]
        );
    }

    #[test]
    fn test_groups_follow_first_appearance() {
        let assets = vec![
            asset("1", Category::Art, "2024-04-02"),
            asset("2", Category::Art, "2024-06-10"),
            asset("3", Category::Art, "2024-04-20"),
            asset("4", Category::Art, "2024-05-01"),
        ];

        let groups = group(&assets);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["April 2024", "June 2024", "May 2024"]);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_month_boundaries() {
        let assets = vec![
            asset("first", Category::Object, "2024-05-01"),
            asset("last", Category::Object, "2024-05-31"),
            asset("next", Category::Object, "2024-06-01"),
        ];

        let groups = group(&assets);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[1].label, "June 2024");
    }

    #[test]
    fn test_empty_input() {
        let assets: Vec<AssetRecord> = Vec::new();
        assert!(group(&assets).is_empty());
    }

    #[test]
    fn test_map_keeps_labels() {
        let assets = vec![asset("x", Category::Personal, "2023-12-24")];
        let groups: Vec<PeriodGroup<String>> = group(&assets)
            .into_iter()
            .map(|g| g.map(|a| a.title.clone()))
            .collect();
        assert_eq!(groups[0].label, "December 2023");
        assert_eq!(groups[0].items, vec!["Asset x".to_string()]);
    }

    proptest! {
        #[test]
        fn prop_grouping_is_a_stable_partition(
            dates in prop::collection::vec((2022i32..2025, 1u32..=12, 1u32..=28), 0..20)
        ) {
            let assets: Vec<AssetRecord> = dates
                .iter()
                .enumerate()
                .map(|(i, (y, m, d))| {
                    asset(&i.to_string(), Category::Object, &format!("{:04}-{:02}-{:02}", y, m, d))
                })
                .collect();

            let groups = group(&assets);

            // Nothing lost or duplicated
            let mut flattened: Vec<&AssetRecord> =
                groups.iter().flat_map(|g| g.items.iter().copied()).collect();
            flattened.sort_by_key(|a| a.id.parse::<usize>().unwrap());
            let input: Vec<&AssetRecord> = assets.iter().collect();
            prop_assert_eq!(flattened, input);

            // Every element sits in exactly one group, and each group is homogeneous
            let total: usize = groups.iter().map(|g| g.len()).sum();
            prop_assert_eq!(total, assets.len());
            for g in &groups {
                prop_assert!(g.items.iter().all(|a| a.period_label() == g.label));
                let mut ids: Vec<usize> = g.items.iter().map(|a| a.id.parse().unwrap()).collect();
                let sorted = { let mut s = ids.clone(); s.sort(); s };
                prop_assert_eq!(&ids, &sorted);
                ids.dedup();
                prop_assert_eq!(ids.len(), g.len());
            }

            // Labels are unique
            let mut labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
            labels.sort();
            labels.dedup();
            prop_assert_eq!(labels.len(), groups.len());
        }

        #[test]
        fn prop_concatenation_reproduces_date_ordered_input(
            dates in prop::collection::vec((2022i32..2025, 1u32..=12, 1u32..=28), 0..20)
        ) {
            let mut dates = dates;
            dates.sort_by(|a, b| b.cmp(a));
            let assets: Vec<AssetRecord> = dates
                .iter()
                .enumerate()
                .map(|(i, (y, m, d))| {
                    asset(&i.to_string(), Category::Object, &format!("{:04}-{:02}-{:02}", y, m, d))
                })
                .collect();

            let concatenated: Vec<&AssetRecord> = group(&assets)
                .into_iter()
                .flat_map(|g| g.items)
                .collect();
            let input: Vec<&AssetRecord> = assets.iter().collect();
            prop_assert_eq!(concatenated, input);
        }
    }
}
