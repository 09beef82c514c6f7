//! Index digestion.
//!
//! Entries collected in an [`IndexBuilder`] are sorted ([`compare`]), merged
//! into a tree ([`digest`]), grouped by leading letter ([`group`]) and split
//! into columns ([`columns`]). [`IndexEngine`] runs the whole pipeline.

pub mod builder;
pub mod columns;
pub mod compare;
pub mod digest;
pub mod engine;
pub mod group;
pub mod types;

pub use builder::IndexBuilder;
pub use columns::split_columns;
pub use compare::{EntrySortKey, compare_entries, sort_entries};
pub use digest::merge_entries;
pub use engine::{DigestedIndex, IndexEngine, IndexKind};
pub use group::{group_label, group_nodes};
pub use types::*;
