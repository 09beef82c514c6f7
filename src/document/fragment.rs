use serde::Serialize;

/// Rendered inline content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    Command { name: String, args: Vec<Fragment> },
    Group { body: Fragment },
    /// Placeholder for the page number of an index destination
    PageNumber,
}

/// An ordered sequence of rendered nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fragment {
    nodes: Vec<Inline>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fragment holding a single text node
    pub fn text(text: impl Into<String>) -> Self {
        let mut fragment = Self::new();
        fragment.push_text(&text.into());
        fragment
    }

    pub fn nodes(&self) -> &[Inline] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node, merging adjacent text
    pub fn push(&mut self, node: Inline) {
        match node {
            Inline::Text { text } => self.push_text(&text),
            other => self.nodes.push(other),
        }
    }

    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Inline::Text { text: last }) = self.nodes.last_mut() {
            last.push_str(text);
        } else {
            self.nodes.push(Inline::Text {
                text: text.to_string(),
            });
        }
    }

    /// Concatenated text of every text node, depth first
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.nodes {
            match node {
                Inline::Text { text } => out.push_str(text),
                Inline::Command { args, .. } => args.iter().for_each(|a| a.collect_text(out)),
                Inline::Group { body } => body.collect_text(out),
                Inline::PageNumber => {}
            }
        }
    }

    /// Markup form of the fragment, used as a deterministic tiebreak key
    pub fn source(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Inline::Text { text } => out.push_str(text),
                Inline::Command { name, args } => {
                    out.push('\\');
                    out.push_str(name);
                    for arg in args {
                        out.push('{');
                        out.push_str(&arg.source());
                        out.push('}');
                    }
                }
                Inline::Group { body } => {
                    out.push('{');
                    out.push_str(&body.source());
                    out.push('}');
                }
                Inline::PageNumber => {
                    out.push('\\');
                    out.push_str(crate::entry::PAGE_NUMBER_MACRO);
                }
            }
        }
        out
    }

    pub fn contains_page_number(&self) -> bool {
        self.nodes.iter().any(|node| match node {
            Inline::PageNumber => true,
            Inline::Command { args, .. } => args.iter().any(Fragment::contains_page_number),
            Inline::Group { body } => body.contains_page_number(),
            Inline::Text { .. } => false,
        })
    }

    /// Replace the first page-number placeholder with a text node.
    /// Returns false if the fragment has no placeholder.
    pub fn replace_page_number(&mut self, number: &str) -> bool {
        for node in self.nodes.iter_mut() {
            if matches!(node, Inline::PageNumber) {
                *node = Inline::Text {
                    text: number.to_string(),
                };
                return true;
            }
            let replaced = match node {
                Inline::Command { args, .. } => {
                    args.iter_mut().any(|arg| arg.replace_page_number(number))
                }
                Inline::Group { body } => body.replace_page_number(number),
                Inline::Text { .. } | Inline::PageNumber => false,
            };
            if replaced {
                return true;
            }
        }
        false
    }
}

impl From<Vec<Inline>> for Fragment {
    fn from(nodes: Vec<Inline>) -> Self {
        let mut fragment = Fragment::new();
        for node in nodes {
            fragment.push(node);
        }
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold_placeholder() -> Fragment {
        Fragment::from(vec![Inline::Command {
            name: "textbf".to_string(),
            args: vec![Fragment::from(vec![Inline::PageNumber])],
        }])
    }

    #[test]
    fn test_push_merges_text() {
        let mut fragment = Fragment::text("ab");
        fragment.push(Inline::Text {
            text: "c".to_string(),
        });
        assert_eq!(fragment.nodes().len(), 1);
        assert_eq!(fragment.text_content(), "abc");
    }

    #[test]
    fn test_replace_nested_placeholder() {
        let mut fragment = bold_placeholder();
        assert!(fragment.contains_page_number());
        assert!(fragment.replace_page_number("3"));
        assert!(!fragment.contains_page_number());
        assert_eq!(fragment.source(), r"\textbf{3}");
        assert!(!fragment.replace_page_number("4"));
    }

    #[test]
    fn test_text_content_skips_placeholder() {
        assert_eq!(bold_placeholder().text_content(), "");
        assert_eq!(
            bold_placeholder().source(),
            r"\textbf{\index-page-number}"
        );
    }
}
