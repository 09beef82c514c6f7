use super::types::{IndexDestination, IndexNode};
use crate::document::Fragment;
use crate::entry::IndexEntry;
use std::mem;
use tracing::debug;

/// Merge sorted entries into an index tree.
///
/// Consecutive entries that share leading `(sort key, key)` levels share
/// the corresponding nodes; the comparison is exact, not collated. Each
/// entry adds one destination to its deepest node and receives the 1-based
/// position of that destination as its page number, substituted into the
/// placeholder of its format or attached as plain text when there is none.
pub fn merge_entries(entries: &[IndexEntry]) -> Vec<IndexNode> {
    let mut root = IndexNode::default();
    // Child indices from the root to the current node
    let mut path: Vec<usize> = Vec::new();
    let mut previous: Option<&IndexEntry> = None;
    let mut created = 0usize;

    for entry in entries {
        let common = previous.map_or(0, |prev| common_levels(prev, entry));
        path.truncate(common);

        for level in common..entry.depth() {
            let current = node_at_mut(&mut root, &path);
            current.children.push(IndexNode::new(
                entry.key[level].clone(),
                entry.sort_key[level].clone(),
            ));
            path.push(current.children.len() - 1);
            created += 1;
        }

        let current = node_at_mut(&mut root, &path);
        current
            .pages
            .push(IndexDestination::new(entry.entry_type, entry.node.clone()));
        attach_page_number(entry, current.pages.len());

        previous = Some(entry);
    }

    debug!(
        entries = entries.len(),
        nodes = created,
        "merged index entries"
    );
    mem::take(&mut root.children)
}

/// Number of leading levels two entries have in common
fn common_levels(a: &IndexEntry, b: &IndexEntry) -> usize {
    a.sort_key
        .iter()
        .zip(&a.key)
        .zip(b.sort_key.iter().zip(&b.key))
        .take_while(|(x, y)| x == y)
        .count()
}

fn node_at_mut<'a>(root: &'a mut IndexNode, path: &[usize]) -> &'a mut IndexNode {
    path.iter().fold(root, |node, &i| &mut node.children[i])
}

fn attach_page_number(entry: &IndexEntry, ordinal: usize) {
    let number = ordinal.to_string();
    match &entry.format {
        Some(format) if format.contains_page_number() => {
            let mut format = format.clone();
            format.replace_page_number(&number);
            entry.node.append(format);
        }
        _ => entry.node.append(Fragment::text(number)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Destination, MacroExpander};
    use crate::entry::parse_entry_str;
    use crate::index::compare::sort_entries;
    use crate::utils::collate::Collation;

    fn entries(sources: &[&str]) -> Vec<IndexEntry> {
        let expander = MacroExpander::default();
        let mut entries: Vec<_> = sources
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let node = Destination::new(format!("idx-{}", i + 1)).into_ref();
                parse_entry_str(s, &expander, node)
            })
            .collect();
        sort_entries(&mut entries, &Collation::fallback());
        entries
    }

    fn keys(nodes: &[IndexNode]) -> Vec<String> {
        nodes.iter().map(|n| n.key.text_content()).collect()
    }

    #[test]
    fn test_shared_ancestors() {
        let entries = entries(&["A!X", "A!Y", "B"]);
        let roots = merge_entries(&entries);

        assert_eq!(keys(&roots), vec!["A", "B"]);
        assert_eq!(keys(&roots[0].children), vec!["X", "Y"]);
        assert!(roots[0].pages.is_empty());
        for leaf in roots[0].children.iter().chain(&roots[1..]) {
            assert_eq!(leaf.pages.len(), 1);
        }
        for entry in &entries {
            assert_eq!(entry.node.content()[0].text_content(), "1");
        }
    }

    #[test]
    fn test_repeated_entry_numbers_pages() {
        let entries = entries(&["apple", "apple|textbf", "apple"]);
        let roots = merge_entries(&entries);

        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].pages.len(), 3);
        let rendered: Vec<String> = entries
            .iter()
            .map(|e| e.node.content()[0].source())
            .collect();
        assert_eq!(rendered, vec!["1", r"\textbf{2}", "3"]);
    }

    #[test]
    fn test_parent_entry_gets_pages_on_shared_node() {
        let entries = entries(&["Fruit!Apple", "Fruit", "Fruit!Pear"]);
        let roots = merge_entries(&entries);

        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].pages.len(), 1);
        assert_eq!(keys(&roots[0].children), vec!["Apple", "Pear"]);
    }

    #[test]
    fn test_collation_equal_keys_do_not_share_nodes() {
        let entries = entries(&["apple", "Apple"]);
        let roots = merge_entries(&entries);
        assert_eq!(keys(&roots), vec!["Apple", "apple"]);
    }

    #[test]
    fn test_ascends_multiple_levels() {
        let entries = entries(&["a!b!c", "a!d", "e!f!g", "e!f!h"]);
        let roots = merge_entries(&entries);

        assert_eq!(keys(&roots), vec!["a", "e"]);
        assert_eq!(keys(&roots[0].children), vec!["b", "d"]);
        assert_eq!(keys(&roots[0].children[0].children), vec!["c"]);
        assert_eq!(keys(&roots[1].children[0].children), vec!["g", "h"]);
        assert_eq!(roots.iter().map(IndexNode::total_len).sum::<usize>(), 8);
    }

    #[test]
    fn test_format_without_placeholder_gets_plain_number() {
        use crate::entry::EntryType;

        let node = Destination::new("idx-1").into_ref();
        let entry = IndexEntry::new(
            vec![Fragment::text("apple")],
            node,
            Vec::new(),
            Some(Fragment::text("bold")),
            EntryType::Normal,
        );
        merge_entries(std::slice::from_ref(&entry));
        assert_eq!(entry.node.content()[0].source(), "1");
    }

    #[test]
    fn test_see_entry_formats_cross_reference() {
        let entries = entries(&["banana|see{Fruit}"]);
        merge_entries(&entries);
        assert_eq!(entries[0].node.content()[0].source(), r"\see{Fruit}{1}");
    }
}
