//! Index entry collection from TeX-like source.
//!
//! A small stand-in for a document engine: it finds `\index{...}` commands,
//! gives each one a destination labelled with the enclosing section, and
//! notes which index construct the document uses.

use crate::document::{Destination, DestinationRef, Expand};
use crate::entry::{CatCode, Token, tokenize, tokens_to_source};
use crate::index::{IndexBuilder, IndexKind};
use tracing::debug;

const SECTIONING: [&str; 5] = ["part", "chapter", "section", "subsection", "subsubsection"];

/// Result of scanning one document
#[derive(Debug, Default)]
pub struct ScannedDocument {
    pub builder: IndexBuilder,
    /// One destination per `\index` occurrence, in document order
    pub destinations: Vec<DestinationRef>,
    pub kind: IndexKind,
}

pub fn scan_document<E: Expand + ?Sized>(source: &str, expander: &E) -> ScannedDocument {
    let tokens = tokenize(source);
    let mut scanned = ScannedDocument::default();
    let mut section: Option<String> = None;
    let mut pos = 0;

    while let Some(tok) = tokens.get(pos) {
        pos += 1;
        let Token::ControlSequence(name) = tok else {
            continue;
        };

        match name.as_str() {
            "index" => {
                let Some(entry) = read_group(&tokens, &mut pos) else {
                    debug!(offset = pos, "\\index without an argument");
                    continue;
                };
                let n = scanned.destinations.len() + 1;
                let mut destination =
                    Destination::new(format!("idx-{n}")).with_url(format!("#idx-{n}"));
                if let Some(title) = &section {
                    destination = destination.with_label(title.clone());
                }
                let destination = destination.into_ref();
                scanned
                    .builder
                    .add_tokens(entry, expander, destination.clone());
                scanned.destinations.push(destination);
            }
            name if SECTIONING.contains(&name) => {
                if tokens.get(pos).is_some_and(|t| t.is_char('*')) {
                    pos += 1;
                }
                if let Some(title) = read_group(&tokens, &mut pos) {
                    section = Some(expander.expand_to_text(title).trim().to_string());
                }
            }
            "printindex" => scanned.kind = IndexKind::Command,
            "begin" => {
                if let Some(env) = read_group(&tokens, &mut pos) {
                    if let Some(kind) = IndexKind::from_macro_name(&tokens_to_source(env)) {
                        scanned.kind = kind;
                    }
                }
            }
            _ => {}
        }
    }

    debug!(
        entries = scanned.builder.len(),
        kind = scanned.kind.macro_name(),
        "scanned document"
    );
    scanned
}

/// Read a brace-delimited argument, returning its contents.
/// An unclosed group runs to the end of input.
fn read_group<'a>(tokens: &'a [Token], pos: &mut usize) -> Option<&'a [Token]> {
    while tokens
        .get(*pos)
        .is_some_and(|t| t.catcode() == Some(CatCode::Space))
    {
        *pos += 1;
    }
    if tokens.get(*pos)?.catcode() != Some(CatCode::BeginGroup) {
        return None;
    }
    *pos += 1;

    let start = *pos;
    let mut depth = 0usize;
    while let Some(tok) = tokens.get(*pos) {
        *pos += 1;
        match tok.catcode() {
            Some(CatCode::BeginGroup) => depth += 1,
            Some(CatCode::EndGroup) if depth == 0 => return Some(&tokens[start..*pos - 1]),
            Some(CatCode::EndGroup) => depth -= 1,
            _ => {}
        }
    }
    Some(&tokens[start..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MacroExpander, PageDestination};
    use crate::entry::IndexEntry;

    const SOURCE: &str = r"
\section{Introduction}
Apples\index{Fruit!Apple} and pears\index{Fruit!Pear|textbf}.
% \index{commented out}
\section*{Methods \& Tools}
\index{banana|see{Fruit}}\index{x{y}z}
\printindex
";

    fn keys(entry: &IndexEntry) -> Vec<String> {
        entry.key.iter().map(|k| k.text_content()).collect()
    }

    #[test]
    fn test_collects_index_commands() {
        let scanned = scan_document(SOURCE, &MacroExpander::default());
        let entries = scanned.builder.entries();

        assert_eq!(entries.len(), 4);
        assert_eq!(keys(&entries[0]), vec!["Fruit", "Apple"]);
        assert_eq!(keys(&entries[3]), vec!["xyz"]);
        assert!(entries[2].see());
        assert_eq!(scanned.kind, IndexKind::Command);
    }

    #[test]
    fn test_destinations_carry_section_labels() {
        let scanned = scan_document(SOURCE, &MacroExpander::default());
        let labels: Vec<Option<&str>> = scanned.destinations.iter().map(|d| d.label()).collect();
        assert_eq!(
            labels,
            vec![
                Some("Introduction"),
                Some("Introduction"),
                Some("Methods & Tools"),
                Some("Methods & Tools"),
            ]
        );
        assert_eq!(scanned.destinations[1].id(), "idx-2");
        assert_eq!(scanned.destinations[1].url(), Some("#idx-2"));
    }

    #[test]
    fn test_environment_kind_and_missing_argument() {
        let scanned = scan_document(
            r"\index \begin{theindex}\end{theindex}",
            &MacroExpander::default(),
        );
        assert!(scanned.builder.is_empty());
        assert_eq!(scanned.kind, IndexKind::Environment);
    }

    #[test]
    fn test_unclosed_argument_runs_to_end() {
        let scanned = scan_document(r"\index{open", &MacroExpander::default());
        assert_eq!(keys(&scanned.builder.entries()[0]), vec!["open"]);
    }
}
