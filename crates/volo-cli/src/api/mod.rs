//! Generative text service client
//!
//! HTTP client for the external `generateContent` API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GenerativeClient;
pub use types::*;
