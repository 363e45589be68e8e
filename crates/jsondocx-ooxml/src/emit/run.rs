//! Text runs and hyperlinks

use jsondocx_model::{Inline, Link, Style};

use super::{escape_text, half_points, PartWriter};
use crate::error::Result;

impl PartWriter<'_> {
    /// Emit one inline node inside an open paragraph
    ///
    /// Unstyled text takes `default_style` wholesale; links and images
    /// ignore it.
    pub(crate) fn write_inline(&mut self, inline: &Inline, default_style: Option<&Style>) -> Result<()> {
        match inline {
            Inline::PlainText(text) => self.write_text_run(text, default_style),
            Inline::Text(styled) => {
                self.write_text_run(&styled.text, styled.style.as_ref().or(default_style))
            }
            Inline::Link(link) => self.write_hyperlink(link),
            Inline::Image(image) => self.write_image_run(image)?,
        }
        Ok(())
    }

    /// Emit a `<w:r>` holding `text`
    pub(crate) fn write_text_run(&mut self, text: &str, style: Option<&Style>) {
        self.output.push_str("<w:r>");
        if let Some(style) = style {
            push_run_properties(&mut self.output, style, true);
        }
        push_text(&mut self.output, text);
        self.output.push_str("</w:r>");
    }

    /// Emit a `<w:hyperlink>` with a fresh relationship
    ///
    /// Links are always underlined and fall back to the configured
    /// hyperlink colour.
    pub(crate) fn write_hyperlink(&mut self, link: &Link) {
        let rel_id = self.rels.add_hyperlink(&link.url);
        let style = link.style.as_ref();

        self.output
            .push_str(&format!(r#"<w:hyperlink r:id="{}">"#, rel_id));
        self.output.push_str("<w:r><w:rPr>");

        if style.and_then(|s| s.bold) == Some(true) {
            self.output.push_str("<w:b/>");
        }
        if style.and_then(|s| s.italic) == Some(true) {
            self.output.push_str("<w:i/>");
        }
        let color = style
            .and_then(|s| s.color.as_deref())
            .unwrap_or(self.options.hyperlink_color.as_str());
        self.output
            .push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_text(color)));
        if let Some(size) = style.and_then(|s| s.font_size) {
            push_size(&mut self.output, size);
        }
        self.output.push_str(r#"<w:u w:val="single"/>"#);

        self.output.push_str("</w:rPr>");
        push_text(&mut self.output, &link.text);
        self.output.push_str("</w:r></w:hyperlink>");
    }
}

/// Append a `<w:rPr>` block for `style`
///
/// Only the fields present in the style produce an instruction. Paragraph
/// marks carry no size, so `with_size` is false there.
pub(super) fn push_run_properties(out: &mut String, style: &Style, with_size: bool) {
    // CT_RPr sequence order: b, i, color, sz, u
    out.push_str("<w:rPr>");
    if style.bold == Some(true) {
        out.push_str("<w:b/>");
    }
    if style.italic == Some(true) {
        out.push_str("<w:i/>");
    }
    if let Some(color) = &style.color {
        out.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_text(color)));
    }
    if with_size {
        if let Some(size) = style.font_size {
            push_size(out, size);
        }
    }
    if style.underline == Some(true) {
        out.push_str(r#"<w:u w:val="single"/>"#);
    }
    out.push_str("</w:rPr>");
}

fn push_size(out: &mut String, points: f64) {
    let half = half_points(points);
    out.push_str(&format!(
        r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/>"#,
        half, half
    ));
}

fn push_text(out: &mut String, text: &str) {
    out.push_str(&format!(
        r#"<w:t xml:space="preserve">{}</w:t>"#,
        escape_text(text)
    ));
}
