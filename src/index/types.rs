use crate::document::{DestinationRef, Fragment, PageDestination};
use crate::entry::EntryType;
use std::fmt;
use std::mem;

/// Title and id of the bucket for non-letter entries
pub const SYMBOLS: &str = "Symbols";
/// Title of the bucket for entries starting with an underscore
pub const UNDERSCORE_TITLE: &str = "_ (Underscore)";

/// One page reference of an index node
#[derive(Debug, Clone)]
pub struct IndexDestination {
    entry_type: EntryType,
    node: DestinationRef,
}

impl IndexDestination {
    pub fn new(entry_type: EntryType, node: DestinationRef) -> Self {
        Self { entry_type, node }
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

    /// The underlying document destination
    pub fn node(&self) -> &DestinationRef {
        &self.node
    }
}

impl PageDestination for IndexDestination {
    fn id(&self) -> &str {
        self.node.id()
    }

    fn label(&self) -> Option<&str> {
        self.node.label()
    }

    /// Cross references are not linkable
    fn url(&self) -> Option<&str> {
        if self.entry_type.is_cross_reference() {
            None
        } else {
            self.node.url()
        }
    }
}

/// One level of the merged index tree
#[derive(Debug, Clone, Default)]
pub struct IndexNode {
    pub key: Fragment,
    pub sort_key: String,
    pub pages: Vec<IndexDestination>,
    pub children: Vec<IndexNode>,
}

impl IndexNode {
    pub fn new(key: Fragment, sort_key: String) -> Self {
        Self {
            key,
            sort_key,
            pages: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Number of entries in this subtree, including this one
    pub fn total_len(&self) -> usize {
        let mut stack = vec![self];
        let mut total = 0;
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(&node.children);
        }
        total
    }

    /// Tree shape and keys, ignoring destinations
    pub fn same_shape(&self, other: &IndexNode) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.key != b.key
                || a.sort_key != b.sort_key
                || a.pages.len() != b.pages.len()
                || a.children.len() != b.children.len()
            {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

// Subtrees are flattened first so dropping a deep tree does not recurse
impl Drop for IndexNode {
    fn drop(&mut self) {
        let mut stack = mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl fmt::Display for IndexNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pages: Vec<&str> = self.pages.iter().map(|p| p.id()).collect();
        write!(f, "{} --> [{}]", self.key.source(), pages.join(", "))
    }
}

/// Top-level index nodes sharing a leading letter, split into columns
#[derive(Debug, Clone)]
pub struct IndexGroup<'a> {
    pub title: String,
    pub id: String,
    pub columns: Vec<Vec<&'a IndexNode>>,
}

impl<'a> IndexGroup<'a> {
    /// Members in index order, across all columns
    pub fn nodes(&self) -> impl Iterator<Item = &'a IndexNode> + '_ {
        self.columns.iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
