//! WordprocessingML emitters
//!
//! A [`PartWriter`] accumulates the body markup of one part. Every content
//! node maps to exactly one emitter; images and hyperlinks obtain their ids
//! from the media and relationship registries handed to the writer.

mod drawing;
mod paragraph;
mod run;
mod table;

use jsondocx_model::{Alignment, Node, VerticalAlignment};

use crate::error::Result;
use crate::media::MediaRegistry;
use crate::options::GeneratorOptions;
use crate::relationships::RelationshipRegistry;

/// Line units per single-spaced line
pub const LINE_UNITS: f64 = 240.0;

/// Builds the markup of one part
pub struct PartWriter<'a> {
    output: String,
    media: &'a mut MediaRegistry,
    rels: &'a mut RelationshipRegistry,
    options: &'a GeneratorOptions,
}

impl<'a> PartWriter<'a> {
    pub fn new(
        media: &'a mut MediaRegistry,
        rels: &'a mut RelationshipRegistry,
        options: &'a GeneratorOptions,
    ) -> Self {
        Self {
            output: String::new(),
            media,
            rels,
            options,
        }
    }

    /// Emit a sequence of top-level nodes
    pub fn write_nodes(&mut self, nodes: &[Node]) -> Result<()> {
        for node in nodes {
            self.write_node(node)?;
        }
        Ok(())
    }

    /// Emit one top-level node
    ///
    /// Bare runs (text, links, images) get a paragraph of their own.
    pub fn write_node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::PlainText(text) => {
                self.output.push_str("<w:p>");
                self.write_text_run(text, None);
                self.output.push_str("</w:p>\n");
            }
            Node::Text(styled) => {
                self.output.push_str("<w:p>");
                self.write_text_run(&styled.text, styled.style.as_ref());
                self.output.push_str("</w:p>\n");
            }
            Node::Link(link) => {
                self.output.push_str("<w:p>");
                self.write_hyperlink(link);
                self.output.push_str("</w:p>\n");
            }
            Node::Image(image) => self.write_image_paragraph(image)?,
            Node::Paragraph(paragraph) => self.write_paragraph(paragraph)?,
            Node::Table(table) => self.write_table(table)?,
        }
        Ok(())
    }

    /// Markup written so far
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Consume the writer and return its markup
    pub fn finish(self) -> String {
        self.output
    }
}

/// OOXML keyword for a horizontal alignment
pub fn alignment_value(align: Alignment) -> &'static str {
    match align {
        Alignment::Left => "left",
        Alignment::Right => "right",
        Alignment::Center => "center",
        Alignment::Justify => "both",
    }
}

/// OOXML keyword for a vertical alignment
pub fn vertical_alignment_value(align: VerticalAlignment) -> &'static str {
    match align {
        VerticalAlignment::Top => "top",
        VerticalAlignment::Middle => "center",
        VerticalAlignment::Bottom => "bottom",
    }
}

/// Points to half-points
pub fn half_points(points: f64) -> i64 {
    (points * 2.0).round() as i64
}

/// Line spacing multiplier to line units
pub fn line_units(multiplier: f64) -> i64 {
    (multiplier * LINE_UNITS).round() as i64
}

pub(crate) fn escape_text(text: &str) -> std::borrow::Cow<'_, str> {
    quick_xml::escape::escape(text)
}

#[cfg(test)]
mod tests {
    use jsondocx_model::{Image, Link, Style, StyledText};

    use super::*;

    fn render(nodes: &[Node]) -> (String, RelationshipRegistry, MediaRegistry) {
        let mut media = MediaRegistry::new();
        let mut rels = RelationshipRegistry::new();
        let options = GeneratorOptions::default();
        let mut writer = PartWriter::new(&mut media, &mut rels, &options);
        writer.write_nodes(nodes).unwrap();
        let xml = writer.finish();
        (xml, rels, media)
    }

    #[test]
    fn test_alignment_values() {
        assert_eq!(alignment_value(Alignment::Justify), "both");
        assert_eq!(alignment_value(Alignment::Center), "center");
        assert_eq!(alignment_value(Alignment::Left), "left");
        assert_eq!(vertical_alignment_value(VerticalAlignment::Middle), "center");
        assert_eq!(vertical_alignment_value(VerticalAlignment::Bottom), "bottom");
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(half_points(12.0), 24);
        assert_eq!(half_points(10.5), 21);
        assert_eq!(line_units(1.5), 360);
        assert_eq!(line_units(1.0), 240);
        assert_eq!(line_units(1.15), 276);
    }

    #[test]
    fn test_plain_text_gets_own_paragraph() {
        let (xml, rels, _) = render(&[Node::plain("Hello"), Node::plain("World")]);
        assert_eq!(xml.matches("<w:p>").count(), 2);
        assert!(xml.contains(r#"<w:t xml:space="preserve">Hello</w:t>"#));
        assert!(!rels.has_any());
    }

    #[test]
    fn test_styled_text_node() {
        let style = Style::new().bold().font_size(12.0);
        let (xml, _, _) = render(&[Node::Text(StyledText::new("Big").with_style(style))]);
        assert!(xml.contains(r#"<w:rPr><w:b/><w:sz w:val="24"/><w:szCs w:val="24"/></w:rPr>"#));
    }

    #[test]
    fn test_top_level_link_gets_paragraph() {
        let (xml, rels, _) = render(&[Node::Link(Link::new("Site", "https://example.com"))]);
        assert!(xml.starts_with(r#"<w:p><w:hyperlink r:id="rId1">"#));
        assert_eq!(rels.len(), 1);
    }

    #[test]
    fn test_top_level_image() {
        let image = Image::from_bytes(vec![0x89, 0x50, 0x4E, 0x47]);
        let (xml, rels, media) = render(&[image.into()]);
        assert!(xml.contains(r#"<a:blip r:embed="rId1"/>"#));
        assert_eq!(media.images()[0].filename, "image1.png");
        assert_eq!(rels.iter().next().unwrap().target, "media/image1.png");
    }
}
