use crate::entry::IndexEntry;
use crate::utils::collate::{Collation, CollationKey};
use std::cmp::Ordering;

/// Ordering key of one entry level
pub type LevelKey = (CollationKey, CollationKey, String);

/// Sort key of a whole entry.
///
/// Levels compare as `(collated sort key, collated key text, key source)`.
/// Vec ordering is lexicographic, so when every shared level is equal the
/// entry with fewer levels comes first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntrySortKey(Vec<LevelKey>);

impl EntrySortKey {
    pub fn new(entry: &IndexEntry, collation: &Collation) -> Self {
        let levels = entry
            .sort_key
            .iter()
            .zip(&entry.key)
            .map(|(sort_key, key)| {
                (
                    collation.key(sort_key),
                    collation.key(&key.text_content()),
                    key.source(),
                )
            })
            .collect();
        Self(levels)
    }
}

pub fn compare_entries(a: &IndexEntry, b: &IndexEntry, collation: &Collation) -> Ordering {
    EntrySortKey::new(a, collation).cmp(&EntrySortKey::new(b, collation))
}

/// Stable sort; equal entries keep their document order
pub fn sort_entries(entries: &mut [IndexEntry], collation: &Collation) {
    entries.sort_by_cached_key(|entry| EntrySortKey::new(entry, collation));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Destination, MacroExpander, PageDestination};
    use crate::entry::parse_entry_str;

    fn entry(source: &str, id: &str) -> IndexEntry {
        parse_entry_str(
            source,
            &MacroExpander::default(),
            Destination::new(id).into_ref(),
        )
    }

    fn sorted_ids(sources: &[&str], collation: &Collation) -> Vec<String> {
        let mut entries: Vec<_> = sources
            .iter()
            .enumerate()
            .map(|(i, s)| entry(s, &i.to_string()))
            .collect();
        sort_entries(&mut entries, collation);
        entries.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_parent_before_children() {
        let collation = Collation::fallback();
        let a = entry("Fruit", "1");
        let b = entry("Fruit!Apple", "2");
        assert_eq!(compare_entries(&a, &b, &collation), Ordering::Less);
        assert_eq!(compare_entries(&b, &a, &collation), Ordering::Greater);
    }

    #[test]
    fn test_sort_key_takes_precedence() {
        let collation = Collation::fallback();
        let sorted = sorted_ids(&["zebra", "zz top@aardvark", "mango"], &collation);
        assert_eq!(sorted, vec!["mango mango", "zebra zebra", "zz top aardvark"]);
    }

    #[test]
    fn test_case_collates_then_literal_tiebreak() {
        let collation = Collation::fallback();
        let sorted = sorted_ids(&["apple", "Apple", "banana"], &collation);
        // Equal collation keys; the literal source breaks the tie
        assert_eq!(sorted, vec!["Apple Apple", "apple apple", "banana banana"]);
    }

    #[test]
    fn test_equal_entries_keep_document_order() {
        let collation = Collation::fallback();
        let mut entries = vec![entry("same", "first"), entry("same", "second")];
        sort_entries(&mut entries, &collation);
        assert_eq!(entries[0].node.id(), "first");
        assert_eq!(entries[1].node.id(), "second");
    }
}
