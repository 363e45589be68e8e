//! Paragraph emission

use jsondocx_model::{Paragraph, Style};

use super::run::push_run_properties;
use super::{alignment_value, line_units, PartWriter};
use crate::error::Result;

impl PartWriter<'_> {
    /// Emit a `<w:p>` with its inline children
    pub(crate) fn write_paragraph(&mut self, paragraph: &Paragraph) -> Result<()> {
        let style = paragraph.style.as_ref();

        self.output.push_str("<w:p>");
        if let Some(style) = style {
            push_paragraph_properties(&mut self.output, style);
        }
        for inline in &paragraph.content {
            self.write_inline(inline, style)?;
        }
        self.output.push_str("</w:p>\n");
        Ok(())
    }
}

/// Append `<w:pPr>`: spacing, justification, then the paragraph mark formatting
fn push_paragraph_properties(out: &mut String, style: &Style) {
    out.push_str("<w:pPr>");
    if let Some(spacing) = style.line_spacing {
        out.push_str(&format!(
            r#"<w:spacing w:line="{}" w:lineRule="auto"/>"#,
            line_units(spacing)
        ));
    }
    if let Some(align) = style.align {
        out.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment_value(align)));
    }
    if has_mark_formatting(style) {
        push_run_properties(out, style, false);
    }
    out.push_str("</w:pPr>");
}

fn has_mark_formatting(style: &Style) -> bool {
    style.color.is_some()
        || style.bold == Some(true)
        || style.italic == Some(true)
        || style.underline == Some(true)
}
