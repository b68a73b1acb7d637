//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod browse;
pub mod config;
pub mod featured;
pub mod gallery;
pub mod remix;
pub mod show;
