//! Table emission
//!
//! Tables get single-line borders on every edge, a column grid, and one
//! paragraph per cell. Column and cell widths are written exactly as given.

use jsondocx_model::{Cell, Style, Table};

use super::{alignment_value, escape_text, vertical_alignment_value, PartWriter};
use crate::error::Result;

const BORDER_EDGES: [&str; 6] = ["top", "left", "bottom", "right", "insideH", "insideV"];

impl PartWriter<'_> {
    /// Emit a `<w:tbl>`
    pub(crate) fn write_table(&mut self, table: &Table) -> Result<()> {
        let table_style = table.style.as_ref();

        self.output.push_str("<w:tbl>");
        self.write_table_properties(table_style);
        self.write_table_grid(table);

        for row in &table.rows {
            self.output.push_str("<w:tr>");
            for cell in &row.cells {
                self.write_cell(cell, table_style)?;
            }
            self.output.push_str("</w:tr>");
        }

        self.output.push_str("</w:tbl>\n");
        Ok(())
    }

    fn write_table_properties(&mut self, style: Option<&Style>) {
        self.output.push_str("<w:tblPr>");
        self.output.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
        if let Some(align) = style.and_then(|s| s.align) {
            self.output
                .push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment_value(align)));
        }

        self.output.push_str("<w:tblBorders>");
        for edge in BORDER_EDGES {
            self.output.push_str(&format!(
                r#"<w:{} w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
                edge
            ));
        }
        self.output.push_str("</w:tblBorders>");
        self.output.push_str("</w:tblPr>");
    }

    fn write_table_grid(&mut self, table: &Table) {
        self.output.push_str("<w:tblGrid>");
        for col in 0..table.column_count() {
            match table.column_widths.as_ref().and_then(|w| w.get(col)) {
                Some(width) => self
                    .output
                    .push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, width)),
                None => self.output.push_str("<w:gridCol/>"),
            }
        }
        self.output.push_str("</w:tblGrid>");
    }

    /// Emit one `<w:tc>`
    ///
    /// The cell style wins over the table style for shading, vertical
    /// alignment, justification and the default text style.
    fn write_cell(&mut self, cell: &Cell, table_style: Option<&Style>) -> Result<()> {
        let style = cell.style.as_ref().or(table_style);

        self.output.push_str("<w:tc>");
        self.output.push_str("<w:tcPr>");
        if let Some(width) = cell.style.as_ref().and_then(|s| s.width) {
            self.output
                .push_str(&format!(r#"<w:tcW w:w="{}" w:type="dxa"/>"#, width));
        }
        if let Some(fill) = style.and_then(|s| s.background_color.as_deref()) {
            self.output.push_str(&format!(
                r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
                escape_text(fill)
            ));
        }
        if let Some(valign) = style.and_then(|s| s.vertical_align) {
            self.output.push_str(&format!(
                r#"<w:vAlign w:val="{}"/>"#,
                vertical_alignment_value(valign)
            ));
        }
        self.output.push_str("</w:tcPr>");

        // Every cell needs a paragraph, even an empty one
        self.output.push_str("<w:p>");
        if let Some(align) = style.and_then(|s| s.align) {
            self.output.push_str(&format!(
                r#"<w:pPr><w:jc w:val="{}"/></w:pPr>"#,
                alignment_value(align)
            ));
        }
        for inline in &cell.content {
            self.write_inline(inline, style)?;
        }
        self.output.push_str("</w:p>");

        self.output.push_str("</w:tc>");
        Ok(())
    }
}
