//! Volo Common Library
//!
//! Shared types, error handling and logging for the Volo3D archive.
//!
//! # Overview
//!
//! - **Types**: the archived asset model (`AssetRecord`, `AssetVersion`, `Category`)
//! - **Error Handling**: `VoloError` and the crate `Result` alias
//! - **Logging**: `tracing` subscriber setup shared by every binary
//!
//! # Example
//!
//! ```no_run
//! use volo_common::types::AssetRecord;
//!
//! fn describe(asset: &AssetRecord) -> String {
//!     format!("{} ({}) - {}", asset.title, asset.category, asset.period_label())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, VoloError};
pub use types::{AssetRecord, AssetVersion, Author, Category};
