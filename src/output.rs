//! Output of digested indexes: serializable views, JSON and terminal text

use crate::document::{Fragment, Inline, PageDestination};
use crate::index::{DigestedIndex, IndexDestination, IndexEngine, IndexGroup, IndexKind, IndexNode};
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Owned, renderer-facing form of a digested index
#[derive(Debug, Clone, Serialize)]
pub struct IndexView {
    pub title: String,
    pub kind: IndexKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub entries: usize,
    pub groups: Vec<GroupView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupView {
    pub title: String,
    pub id: String,
    pub columns: Vec<Vec<NodeView>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub key: String,
    pub markup: Fragment,
    pub sort_key: String,
    pub pages: Vec<PageView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub id: String,
    pub label: Option<String>,
    pub url: Option<String>,
    pub see: bool,
    pub seealso: bool,
    pub normal: bool,
    /// Rendered page reference, e.g. `2` or `see Fruit`
    pub text: String,
}

impl IndexView {
    pub fn new(index: &DigestedIndex, engine: &IndexEngine) -> Self {
        Self {
            title: index.title.clone(),
            kind: index.kind,
            source: None,
            entries: index.entry_count,
            groups: engine.groups(index).iter().map(GroupView::new).collect(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl GroupView {
    fn new(group: &IndexGroup<'_>) -> Self {
        Self {
            title: group.title.clone(),
            id: group.id.clone(),
            columns: group
                .columns
                .iter()
                .map(|column| column.iter().map(|node| NodeView::new(node)).collect())
                .collect(),
        }
    }
}

impl NodeView {
    fn new(node: &IndexNode) -> Self {
        Self {
            key: render_text(&node.key),
            markup: node.key.clone(),
            sort_key: node.sort_key.clone(),
            pages: node.pages.iter().map(PageView::new).collect(),
            children: node.children.iter().map(NodeView::new).collect(),
        }
    }
}

impl PageView {
    fn new(page: &IndexDestination) -> Self {
        let text = page
            .node()
            .content()
            .last()
            .map(render_text)
            .unwrap_or_default();
        Self {
            id: page.id().to_string(),
            label: page.label().map(str::to_string),
            url: page.url().map(str::to_string),
            see: page.see(),
            seealso: page.seealso(),
            normal: page.normal(),
            text,
        }
    }
}

/// Plain-text rendering of a fragment
pub fn render_text(fragment: &Fragment) -> String {
    let mut out = String::new();
    for node in fragment.nodes() {
        match node {
            Inline::Text { text } => out.push_str(text),
            Inline::Group { body } => out.push_str(&render_text(body)),
            Inline::Command { name, args } => {
                let prefix = match name.as_str() {
                    "see" => Some("see "),
                    "seealso" => Some("see also "),
                    _ => None,
                };
                match prefix {
                    // Cross references ignore their page argument
                    Some(prefix) => {
                        out.push_str(prefix);
                        if let Some(target) = args.first() {
                            out.push_str(&render_text(target));
                        }
                    }
                    None => args.iter().for_each(|arg| out.push_str(&render_text(arg))),
                }
            }
            Inline::PageNumber => {}
        }
    }
    out
}

pub fn print_json(views: &[IndexView]) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    if let [view] = views {
        serde_json::to_writer_pretty(&mut lock, view)?;
    } else {
        serde_json::to_writer_pretty(&mut lock, views)?;
    }
    writeln!(lock)?;
    Ok(())
}

/// Print indexes to stdout as indented text
pub fn print_indexes(views: &[IndexView], choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);

    for (i, view) in views.iter().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }
        write_index(&mut stdout, view)?;
    }
    Ok(())
}

pub fn write_index<W: WriteColor>(out: &mut W, view: &IndexView) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    match &view.source {
        Some(source) => writeln!(out, "{} ({})", view.title, source)?,
        None => writeln!(out, "{}", view.title)?,
    }
    out.reset()?;

    for group in &view.groups {
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        writeln!(out, "{}", group.title)?;
        out.reset()?;

        let mut first = true;
        for column in group.columns.iter().filter(|c| !c.is_empty()) {
            if !first {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
                writeln!(out, "--")?;
                out.reset()?;
            }
            first = false;
            for node in column {
                write_node(out, node, 1)?;
            }
        }
    }
    Ok(())
}

fn write_node<W: WriteColor>(out: &mut W, node: &NodeView, depth: usize) -> io::Result<()> {
    write!(out, "{:indent$}{}", "", node.key, indent = depth * 2)?;

    for (i, page) in node.pages.iter().enumerate() {
        write!(out, "{}", if i == 0 { "  " } else { ", " })?;
        if page.normal {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, "{}", page.text)?;
            out.reset()?;
            if let Some(label) = &page.label {
                write!(out, " ({})", label)?;
            }
        } else {
            out.set_color(ColorSpec::new().set_italic(true))?;
            write!(out, "{}", page.text)?;
            out.reset()?;
        }
    }
    writeln!(out)?;

    for child in &node.children {
        write_node(out, child, depth + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Expand, MacroExpander};
    use crate::entry::tokenize;
    use crate::scan::scan_document;
    use crate::utils::config::IndexConfig;
    use termcolor::Buffer;

    fn view(source: &str) -> IndexView {
        let engine = IndexEngine::from_config(IndexConfig {
            index_columns: 1,
            ..IndexConfig::default()
        });
        let mut scanned = scan_document(source, &MacroExpander::default());
        let index = engine.digest(&mut scanned.builder, scanned.kind);
        IndexView::new(&index, &engine)
    }

    #[test]
    fn test_render_text() {
        let expander = MacroExpander::default();
        let see = expander.expand(&tokenize(r"\see{Fruit}{1}"));
        assert_eq!(render_text(&see), "see Fruit");
        let bold = expander.expand(&tokenize(r"\textbf{2}"));
        assert_eq!(render_text(&bold), "2");
    }

    #[test]
    fn test_view_pages() {
        let view = view(r"\section{Intro}\index{apple}\index{apple|see{pear}}");
        let apple = &view.groups[0].columns[0][0];
        assert_eq!(apple.key, "apple");
        assert_eq!(apple.pages.len(), 2);
        assert_eq!(apple.pages[0].text, "1");
        assert_eq!(apple.pages[0].url.as_deref(), Some("#idx-1"));
        assert!(apple.pages[1].see);
        assert_eq!(apple.pages[1].url, None);
        assert_eq!(apple.pages[1].text, "see pear");
    }

    #[test]
    fn test_write_index_plain() {
        let view = view(r"\section{Intro}\index{Fruit!Apple}\index{banana}");
        let mut buffer = Buffer::no_color();
        write_index(&mut buffer, &view).unwrap();
        let text = String::from_utf8(buffer.into_inner()).unwrap();
        assert_eq!(
            text,
            "Index\n\nB\n  banana  1 (Intro)\n\nF\n  Fruit\n    Apple  1 (Intro)\n"
        );
    }

    #[test]
    fn test_json_shape() {
        let view = view(r"\index{apple}").with_source("doc.tex");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["source"], "doc.tex");
        assert_eq!(json["kind"], "command");
        assert_eq!(json["groups"][0]["id"], "A");
        assert_eq!(json["groups"][0]["columns"][0][0]["pages"][0]["text"], "1");
        assert!(json["groups"][0]["columns"][0][0].get("children").is_none());
    }
}
