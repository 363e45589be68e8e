//! Top-level content nodes: paragraphs, tables and standalone runs
//!
//! A document body, header or footer is an ordered list of [`Node`]s.

use serde::{Deserialize, Serialize};

use crate::inline::{Image, Inline, Link, StyledText};
use crate::style::Style;

/// A top-level content node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum Node {
    /// Bare string, rendered as its own paragraph
    PlainText(String),
    /// Styled text, rendered as its own paragraph
    Text(StyledText),
    /// Hyperlink, rendered as its own paragraph
    Link(Link),
    /// Image, rendered in its own (optionally aligned) paragraph
    Image(Image),
    Paragraph(Paragraph),
    Table(Table),
}

impl Node {
    /// Unstyled text paragraph
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText(text.into())
    }

    /// Styled text paragraph
    pub fn text(text: impl Into<String>, style: Style) -> Self {
        Self::Text(StyledText::new(text).with_style(style))
    }

    /// Hyperlink paragraph
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link(Link::new(text, url))
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::PlainText(text.to_string())
    }
}

impl From<Paragraph> for Node {
    fn from(paragraph: Paragraph) -> Self {
        Self::Paragraph(paragraph)
    }
}

impl From<Table> for Node {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<Image> for Node {
    fn from(image: Image) -> Self {
        Self::Image(image)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawNode {
    Plain(String),
    Tagged(TaggedNode),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedNode {
    Text(StyledText),
    Link(Link),
    Image(Image),
    Paragraph(Paragraph),
    Table(Table),
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        match raw {
            RawNode::Plain(text) => Node::PlainText(text),
            RawNode::Tagged(TaggedNode::Text(text)) => Node::Text(text),
            RawNode::Tagged(TaggedNode::Link(link)) => Node::Link(link),
            RawNode::Tagged(TaggedNode::Image(image)) => Node::Image(image),
            RawNode::Tagged(TaggedNode::Paragraph(para)) => Node::Paragraph(para),
            RawNode::Tagged(TaggedNode::Table(table)) => Node::Table(table),
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        match node {
            Node::PlainText(text) => RawNode::Plain(text),
            Node::Text(text) => RawNode::Tagged(TaggedNode::Text(text)),
            Node::Link(link) => RawNode::Tagged(TaggedNode::Link(link)),
            Node::Image(image) => RawNode::Tagged(TaggedNode::Image(image)),
            Node::Paragraph(para) => RawNode::Tagged(TaggedNode::Paragraph(para)),
            Node::Table(table) => RawNode::Tagged(TaggedNode::Table(table)),
        }
    }
}

/// A paragraph of inline content
///
/// The paragraph style is passed down as the default style of unstyled
/// text children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub content: Vec<Inline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl Paragraph {
    pub fn new(content: Vec<Inline>) -> Self {
        Self {
            content,
            style: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn push(&mut self, inline: impl Into<Inline>) {
        self.content.push(inline.into());
    }
}

/// A table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Grid column widths, written verbatim (no unit conversion)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            column_widths: None,
            style: None,
        }
    }

    pub fn with_column_widths(mut self, widths: Vec<u32>) -> Self {
        self.column_widths = Some(widths);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Number of grid columns: the widest row or the supplied widths
    pub fn column_count(&self) -> usize {
        let widest = self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
        let declared = self.column_widths.as_ref().map_or(0, Vec::len);
        widest.max(declared)
    }
}

/// A table row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

/// A table cell
///
/// Cell content accepts the same inline nodes as a paragraph, images included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub content: Vec<Inline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl Cell {
    pub fn new(content: Vec<Inline>) -> Self {
        Self {
            content,
            style: None,
        }
    }

    /// Cell holding a single unstyled string
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Inline::PlainText(text.into())])
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Alignment;

    #[test]
    fn test_paragraph_node() {
        let node: Node = serde_json::from_str(
            r#"{"type": "paragraph", "content": ["a", {"type": "text", "text": "b"}], "style": {"align": "center"}}"#,
        )
        .unwrap();

        let Node::Paragraph(para) = node else {
            panic!("Expected paragraph");
        };
        assert_eq!(para.content.len(), 2);
        assert_eq!(para.style.unwrap().align, Some(Alignment::Center));
    }

    #[test]
    fn test_table_node() {
        let node: Node = serde_json::from_str(
            r#"{"type": "table", "columnWidths": [2000, 3000],
                "rows": [{"cells": [{"content": ["A1"]}, {"content": ["B1"], "style": {"width": 3000}}]}]}"#,
        )
        .unwrap();

        let Node::Table(table) = node else {
            panic!("Expected table");
        };
        assert_eq!(table.column_widths, Some(vec![2000, 3000]));
        assert_eq!(table.rows[0].cells.len(), 2);
        assert_eq!(table.rows[0].cells[1].style.as_ref().unwrap().width, Some(3000));
    }

    #[test]
    fn test_table_inside_paragraph_rejected() {
        let result: Result<Node, _> = serde_json::from_str(
            r#"{"type": "paragraph", "content": [{"type": "table", "rows": []}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_column_count() {
        let table = Table::new(vec![
            Row::new(vec![Cell::text("a")]),
            Row::new(vec![Cell::text("b"), Cell::text("c")]),
        ]);
        assert_eq!(table.column_count(), 2);

        let table = table.with_column_widths(vec![100, 200, 300]);
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_paragraph_push() {
        let mut para = Paragraph::default();
        para.push("hello");
        assert_eq!(para.content, vec![Inline::PlainText("hello".to_string())]);
    }
}
