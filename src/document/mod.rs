//! Host document model.
//!
//! The index core only needs a small slice of a document engine: rendered
//! content ([`Fragment`]), destinations that entries point at
//! ([`Destination`]) and a way to expand tokens ([`Expand`]).
//!
//! - [`fragment`] - Rendered inline content and the page-number placeholder
//! - [`destination`] - Index targets and the [`PageDestination`] capability
//! - [`expand`] - Token expansion, with a small built-in [`MacroExpander`]

pub mod destination;
pub mod expand;
pub mod fragment;

pub use destination::*;
pub use expand::*;
pub use fragment::*;
