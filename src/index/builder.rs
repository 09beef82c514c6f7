use super::compare::sort_entries;
use crate::document::{DestinationRef, Expand};
use crate::entry::{IndexEntry, Token, parse_entry};
use crate::utils::collate::Collation;
use std::mem;

/// Entries collected for one document.
///
/// Entries are added while the document is parsed and drained once, when
/// the index is digested. Each document owns its own builder.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    entries: Vec<IndexEntry>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: IndexEntry) {
        self.entries.push(entry);
    }

    /// Parse an entry specification and add it
    pub fn add_tokens<E: Expand + ?Sized>(
        &mut self,
        tokens: &[Token],
        expander: &E,
        node: DestinationRef,
    ) -> &IndexEntry {
        self.entries.push(parse_entry(tokens, expander, node));
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take every collected entry, sorted for digestion
    pub fn drain_sorted(&mut self, collation: &Collation) -> Vec<IndexEntry> {
        let mut entries = mem::take(&mut self.entries);
        sort_entries(&mut entries, collation);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Destination, MacroExpander};
    use crate::entry::tokenize;

    #[test]
    fn test_drain_sorted_empties_builder() {
        let expander = MacroExpander::default();
        let mut builder = IndexBuilder::new();
        for (i, src) in ["pear", "apple", "fig"].iter().enumerate() {
            let node = Destination::new(i.to_string()).into_ref();
            builder.add_tokens(&tokenize(src), &expander, node);
        }
        assert_eq!(builder.len(), 3);

        let sorted = builder.drain_sorted(&Collation::fallback());
        let keys: Vec<&str> = sorted.iter().map(|e| e.sort_key[0].as_str()).collect();
        assert_eq!(keys, vec!["apple", "fig", "pear"]);
        assert!(builder.is_empty());
    }
}
