use crate::document::{DestinationRef, Fragment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of index reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[default]
    Normal,
    See,
    SeeAlso,
}

impl EntryType {
    /// Entry type selected by a format macro name
    pub fn from_macro(name: &str) -> Self {
        match name {
            "see" => EntryType::See,
            "seealso" => EntryType::SeeAlso,
            _ => EntryType::Normal,
        }
    }

    pub fn is_cross_reference(self) -> bool {
        self != EntryType::Normal
    }
}

/// One occurrence of an index entry in a document
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Rendered key, one fragment per level
    pub key: Vec<Fragment>,
    /// Ordering string for each level
    pub sort_key: Vec<String>,
    /// Page formatting with a page-number placeholder
    pub format: Option<Fragment>,
    pub entry_type: EntryType,
    pub node: DestinationRef,
}

impl IndexEntry {
    /// Build an entry, resolving the sort key against the key.
    ///
    /// Levels without a resolved sort key use the text of their key segment.
    /// Sort keys beyond the last key level are dropped.
    pub fn new(
        key: Vec<Fragment>,
        node: DestinationRef,
        sort_key: Vec<Option<String>>,
        format: Option<Fragment>,
        entry_type: EntryType,
    ) -> Self {
        let mut explicit = sort_key.into_iter();
        let sort_key = key
            .iter()
            .map(|segment| {
                explicit
                    .next()
                    .flatten()
                    .unwrap_or_else(|| segment.text_content())
            })
            .collect();

        Self {
            key,
            sort_key,
            format,
            entry_type,
            node,
        }
    }

    /// Number of hierarchy levels
    pub fn depth(&self) -> usize {
        self.key.len()
    }

    pub fn see(&self) -> bool {
        self.entry_type == EntryType::See
    }

    pub fn seealso(&self) -> bool {
        self.entry_type == EntryType::SeeAlso
    }

    pub fn normal(&self) -> bool {
        !self.see() && !self.seealso()
    }
}

impl fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.key.iter().map(Fragment::source).collect();
        write!(f, "{} {}", self.sort_key.join("@"), keys.join("!"))?;
        if let Some(format) = &self.format {
            write!(f, " {}", format.source())?;
        }
        Ok(())
    }
}
