//! Shared utilities.
//!
//! - [`collate`] - Pluggable collation and transliteration providers
//! - [`config`] - Index configuration (`config.json`)

pub mod collate;
pub mod config;

pub use collate::*;
pub use config::*;
