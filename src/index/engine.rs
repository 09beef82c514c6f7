use super::builder::IndexBuilder;
use super::digest::merge_entries;
use super::group::group_nodes;
use super::types::{IndexGroup, IndexNode};
use crate::utils::collate::Collation;
use crate::utils::config::IndexConfig;
use serde::Serialize;
use tracing::debug;

/// Document construct that asked for the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// `\begin{theindex}...\end{theindex}`; the body is discarded
    Environment,
    /// `\printindex`
    #[default]
    Command,
}

impl IndexKind {
    pub fn macro_name(self) -> &'static str {
        match self {
            IndexKind::Environment => "theindex",
            IndexKind::Command => "printindex",
        }
    }

    pub fn from_macro_name(name: &str) -> Option<Self> {
        match name {
            "theindex" => Some(IndexKind::Environment),
            "printindex" => Some(IndexKind::Command),
            _ => None,
        }
    }
}

/// The digested index of one document
#[derive(Debug, Clone)]
pub struct DigestedIndex {
    pub kind: IndexKind,
    pub title: String,
    pub roots: Vec<IndexNode>,
    /// Number of entries that went into the tree
    pub entry_count: usize,
}

/// Runs digestion: sort, merge, group and split.
/// Both index constructs go through the same engine.
#[derive(Debug)]
pub struct IndexEngine {
    config: IndexConfig,
    collation: Collation,
}

impl IndexEngine {
    pub fn new(config: IndexConfig, collation: Collation) -> Self {
        Self { config, collation }
    }

    /// Engine using the built-in providers named by the config
    pub fn from_config(config: IndexConfig) -> Self {
        let collation = config.collation();
        Self::new(config, collation)
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn collation(&self) -> &Collation {
        &self.collation
    }

    /// Drain the builder and merge its entries into a tree.
    /// Must run after every entry of the document has been added.
    pub fn digest(&self, builder: &mut IndexBuilder, kind: IndexKind) -> DigestedIndex {
        let entries = builder.drain_sorted(&self.collation);
        let roots = merge_entries(&entries);
        debug!(
            kind = kind.macro_name(),
            entries = entries.len(),
            roots = roots.len(),
            "digested index"
        );

        DigestedIndex {
            kind,
            title: self.config.title.clone(),
            roots,
            entry_count: entries.len(),
        }
    }

    /// Letter groups of a digested index, each split into columns
    pub fn groups<'a>(&self, index: &'a DigestedIndex) -> Vec<IndexGroup<'a>> {
        group_nodes(&index.roots, &self.config, &self.collation)
    }
}

impl Default for IndexEngine {
    fn default() -> Self {
        Self::from_config(IndexConfig::default())
    }
}
