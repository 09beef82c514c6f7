use super::columns::split_columns;
use super::types::{IndexGroup, IndexNode, SYMBOLS, UNDERSCORE_TITLE};
use crate::utils::collate::Collation;
use crate::utils::config::IndexConfig;

/// Group title and id for a top-level sort key
pub fn group_label(sort_key: &str, config: &IndexConfig, collation: &Collation) -> (String, String) {
    let folded = collation.transliterate(sort_key);
    let Some(first) = folded.chars().next() else {
        return (SYMBOLS.to_string(), SYMBOLS.to_string());
    };
    let letter: String = first.to_uppercase().collect();

    if config.is_group_letter(&letter) {
        (letter.clone(), letter)
    } else if letter == "_" {
        (UNDERSCORE_TITLE.to_string(), letter)
    } else {
        (SYMBOLS.to_string(), SYMBOLS.to_string())
    }
}

/// Batch top-level nodes by leading letter and split each batch into
/// `config.index_columns` columns.
///
/// A new group starts whenever the title changes from the previous node,
/// so a title can appear more than once if its nodes are not contiguous.
pub fn group_nodes<'a>(
    nodes: &'a [IndexNode],
    config: &IndexConfig,
    collation: &Collation,
) -> Vec<IndexGroup<'a>> {
    let mut batches: Vec<(String, String, Vec<&'a IndexNode>)> = Vec::new();

    for node in nodes {
        let (title, id) = group_label(&node.sort_key, config, collation);
        match batches.last_mut() {
            Some((current, _, members)) if *current == title => members.push(node),
            _ => batches.push((title, id, vec![node])),
        }
    }

    batches
        .into_iter()
        .map(|(title, id, members)| IndexGroup {
            title,
            id,
            columns: split_columns(members, config.index_columns, |n| n.total_len()),
        })
        .collect()
}
