//! Category and title filtering
//!
//! Pure, order-preserving selection over the catalog.

use crate::error::{CliError, Result};
use serde::{Serialize, Serializer};
use volo_common::{AssetRecord, Category};

/// Category filter: everything, or one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Filter followed by every concrete category, in menu order
    pub fn choices() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    /// Whether an asset of `category` passes
    pub fn admits(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }

        s.parse::<Category>().map(CategoryFilter::Only).map_err(|_| {
            CliError::config(format!(
                "Unknown category '{}'. Valid values: All, Object, Environment, Personal, Art",
                s
            ))
        })
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Case-folded title query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TitleQuery {
    folded: String,
}

impl TitleQuery {
    pub fn new(query: &str) -> Self {
        Self {
            folded: query.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Case-insensitive substring match on the title
    pub fn matches(&self, title: &str) -> bool {
        self.is_empty() || title.to_lowercase().contains(&self.folded)
    }
}

/// Whether an asset passes both the category and the title query
pub fn admits(asset: &AssetRecord, category: CategoryFilter, query: &TitleQuery) -> bool {
    category.admits(asset.category) && query.matches(&asset.title)
}

/// Assets passing `category` AND a title substring match on `query`,
/// in input order
pub fn filter<'a, I>(assets: I, category: CategoryFilter, query: &str) -> Vec<&'a AssetRecord>
where
    I: IntoIterator<Item = &'a AssetRecord>,
{
    let query = TitleQuery::new(query);
    assets
        .into_iter()
        .filter(|asset| admits(asset, category, &query))
        .collect()
}

/// Highlighted assets, in input order
pub fn featured<'a, I>(assets: I) -> Vec<&'a AssetRecord>
where
    I: IntoIterator<Item = &'a AssetRecord>,
{
    assets.into_iter().filter(|a| a.is_highlighted).collect()
}
