//! Inline pictures
//!
//! Each image becomes a `<w:drawing>` run with a `wp:inline` frame. The
//! bytes are registered as media and referenced through an image
//! relationship of the current part.

use jsondocx_model::Image;

use super::{alignment_value, escape_text, PartWriter};
use crate::error::Result;
use crate::image::{decode_source, pixels_to_emu};

impl PartWriter<'_> {
    /// Emit a top-level image in its own paragraph
    ///
    /// The image alignment becomes the paragraph justification.
    pub(crate) fn write_image_paragraph(&mut self, image: &Image) -> Result<()> {
        self.output.push_str("<w:p>");
        if let Some(align) = image.align {
            self.output.push_str(&format!(
                r#"<w:pPr><w:jc w:val="{}"/></w:pPr>"#,
                alignment_value(align)
            ));
        }
        self.write_image_run(image)?;
        self.output.push_str("</w:p>\n");
        Ok(())
    }

    /// Emit the drawing run of an image inside an open paragraph
    pub(crate) fn write_image_run(&mut self, image: &Image) -> Result<()> {
        let decoded = decode_source(&image.source)?;
        let filename = self.media.register(decoded.bytes, &decoded.extension);
        let rel_id = self.rels.add_image(&filename);

        // Drawing ids follow the media sequence, unique across the session
        let drawing_id = self.media.len();
        let name = format!("Picture {}", drawing_id);
        let alt_text = image.alt_text.as_deref().unwrap_or_default();

        let width_emu = pixels_to_emu(image.width.unwrap_or(self.options.default_image_width));
        let height_emu =
            pixels_to_emu(image.height.unwrap_or(self.options.default_image_height));

        self.output.push_str("<w:r><w:drawing>");
        self.output
            .push_str(r#"<wp:inline distT="0" distB="0" distL="0" distR="0">"#);

        // Extent (dimensions in EMUs)
        self.output.push_str(&format!(
            r#"<wp:extent cx="{}" cy="{}"/>"#,
            width_emu, height_emu
        ));
        self.output
            .push_str(r#"<wp:effectExtent l="0" t="0" r="0" b="0"/>"#);

        self.output.push_str(&format!(
            r#"<wp:docPr id="{}" name="{}" descr="{}"/>"#,
            drawing_id,
            escape_text(&name),
            escape_text(alt_text)
        ));
        self.output.push_str(
            r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
        );

        self.output.push_str("<a:graphic>");
        self.output.push_str(
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
        );
        self.output.push_str("<pic:pic>");

        self.output.push_str("<pic:nvPicPr>");
        self.output.push_str(&format!(
            r#"<pic:cNvPr id="{}" name="{}" descr="{}"/>"#,
            drawing_id,
            escape_text(&filename),
            escape_text(alt_text)
        ));
        self.output.push_str("<pic:cNvPicPr/>");
        self.output.push_str("</pic:nvPicPr>");

        self.output.push_str("<pic:blipFill>");
        self.output
            .push_str(&format!(r#"<a:blip r:embed="{}"/>"#, rel_id));
        self.output.push_str("<a:stretch><a:fillRect/></a:stretch>");
        self.output.push_str("</pic:blipFill>");

        self.output.push_str("<pic:spPr>");
        self.output.push_str(&format!(
            r#"<a:xfrm><a:off x="0" y="0"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
            width_emu, height_emu
        ));
        self.output
            .push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
        self.output.push_str("</pic:spPr>");

        self.output.push_str("</pic:pic></a:graphicData></a:graphic>");
        self.output.push_str("</wp:inline></w:drawing></w:r>");
        Ok(())
    }
}
