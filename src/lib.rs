//! # texindex - document index compiler
//!
//! texindex turns the index entries of a document (`\index{sort@key!sub|fmt}`)
//! into a finished index: entries are sorted with pluggable collation,
//! merged into a tree that shares common ancestors, grouped by leading
//! letter and split into balanced columns.
//!
//! ## Architecture
//!
//! - [`entry`] - Tokens and the entry grammar
//! - [`document`] - Rendered fragments, destinations and token expansion
//! - [`index`] - Sorting, tree merging, grouping and column balancing
//! - [`scan`] - Collects `\index` commands from TeX-like source
//! - [`output`] - Serializable views, JSON and terminal rendering
//! - [`utils`] - Collation providers and configuration
//!
//! ## Quick Start
//!
//! ```
//! use texindex::document::{Destination, MacroExpander};
//! use texindex::index::{IndexBuilder, IndexEngine, IndexKind};
//! use texindex::entry::tokenize;
//!
//! let expander = MacroExpander::default();
//! let mut builder = IndexBuilder::new();
//! for (i, entry) in ["Fruit!Pear", "Fruit!Apple|textbf", "Banana"].iter().enumerate() {
//!     let node = Destination::new(format!("idx-{i}")).into_ref();
//!     builder.add_tokens(&tokenize(entry), &expander, node);
//! }
//!
//! let engine = IndexEngine::default();
//! let index = engine.digest(&mut builder, IndexKind::Command);
//! let groups = engine.groups(&index);
//! assert_eq!(groups[0].title, "B");
//! assert_eq!(index.roots[1].children.len(), 2);
//! ```

pub mod build;
pub mod document;
pub mod entry;
pub mod index;
pub mod output;
pub mod scan;
pub mod utils;
