//! Part generators
//!
//! Wraps emitted body markup into complete parts (`document.xml`,
//! `header1.xml`, `footer1.xml`) and renders `[Content_Types].xml`.

use std::collections::BTreeSet;

use crate::image::content_type_for_extension;
use crate::options::PageLayout;

/// Path of the content types manifest
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
/// Path of the package relationships
pub const PACKAGE_RELS_PATH: &str = "_rels/.rels";
/// Path of the main document part
pub const DOCUMENT_PATH: &str = "word/document.xml";
/// Path of the main document relationships
pub const DOCUMENT_RELS_PATH: &str = "word/_rels/document.xml.rels";
/// Path of the header part
pub const HEADER_PATH: &str = "word/header1.xml";
/// Path of the header relationships
pub const HEADER_RELS_PATH: &str = "word/_rels/header1.xml.rels";
/// Path of the footer part
pub const FOOTER_PATH: &str = "word/footer1.xml";
/// Path of the footer relationships
pub const FOOTER_RELS_PATH: &str = "word/_rels/footer1.xml.rels";

/// Header part name relative to `word/`
pub const HEADER_PART_NAME: &str = "header1.xml";
/// Footer part name relative to `word/`
pub const FOOTER_PART_NAME: &str = "footer1.xml";

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const DOCUMENT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const HEADER_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml";
const FOOTER_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";

/// Image extensions declared in every manifest
const DEFAULT_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Header/footer relationship ids referenced from the section properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionReferences {
    pub header: Option<String>,
    pub footer: Option<String>,
}

/// Namespace declarations shared by document, header and footer roots
fn namespace_attributes() -> &'static str {
    concat!(
        r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
        r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
        r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture""#
    )
}

fn xml_declaration() -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml
}

/// Render `word/document.xml`
pub fn document_part(body: &str, references: &SectionReferences, page: &PageLayout) -> String {
    let mut xml = xml_declaration();
    xml.push_str(&format!("<w:document {}>\n", namespace_attributes()));
    xml.push_str("<w:body>\n");
    xml.push_str(body);

    xml.push_str("<w:sectPr>");
    if let Some(id) = &references.header {
        xml.push_str(&format!(
            r#"<w:headerReference w:type="default" r:id="{}"/>"#,
            id
        ));
    }
    if let Some(id) = &references.footer {
        xml.push_str(&format!(
            r#"<w:footerReference w:type="default" r:id="{}"/>"#,
            id
        ));
    }
    xml.push_str(&format!(
        r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
        page.width, page.height
    ));
    xml.push_str(&format!(
        r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/>"#,
        m = page.margin
    ));
    xml.push_str("</w:sectPr>\n");

    xml.push_str("</w:body>\n");
    xml.push_str("</w:document>");
    xml
}

/// Render `word/header1.xml`
pub fn header_part(body: &str) -> String {
    story_part("w:hdr", body)
}

/// Render `word/footer1.xml`
pub fn footer_part(body: &str) -> String {
    story_part("w:ftr", body)
}

fn story_part(root: &str, body: &str) -> String {
    let mut xml = xml_declaration();
    xml.push_str(&format!("<{} {}>\n", root, namespace_attributes()));
    if body.is_empty() {
        // A header or footer must hold at least one paragraph
        xml.push_str("<w:p/>\n");
    } else {
        xml.push_str(body);
    }
    xml.push_str(&format!("</{}>", root));
    xml
}

/// Render `[Content_Types].xml`
///
/// `media_extensions` adds a `Default` entry for any image extension not
/// already declared.
pub fn content_types<'e>(
    has_header: bool,
    has_footer: bool,
    media_extensions: impl IntoIterator<Item = &'e str>,
) -> String {
    let mut xml = xml_declaration();
    xml.push_str(&format!(r#"<Types xmlns="{}">"#, CONTENT_TYPES_NS));
    xml.push('\n');
    xml.push_str(
        r#"  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    xml.push('\n');
    xml.push_str(r#"  <Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push('\n');

    let extras: BTreeSet<String> = media_extensions
        .into_iter()
        .map(str::to_ascii_lowercase)
        .filter(|ext| !DEFAULT_IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .collect();

    let image_extensions = DEFAULT_IMAGE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .chain(extras);
    for ext in image_extensions {
        xml.push_str(&format!(
            r#"  <Default Extension="{}" ContentType="{}"/>"#,
            ext,
            content_type_for_extension(&ext)
        ));
        xml.push('\n');
    }

    push_override(&mut xml, DOCUMENT_PATH, DOCUMENT_CONTENT_TYPE);
    if has_header {
        push_override(&mut xml, HEADER_PATH, HEADER_CONTENT_TYPE);
    }
    if has_footer {
        push_override(&mut xml, FOOTER_PATH, FOOTER_CONTENT_TYPE);
    }

    xml.push_str("</Types>");
    xml
}

fn push_override(xml: &mut String, path: &str, content_type: &str) {
    xml.push_str(&format!(
        r#"  <Override PartName="/{}" ContentType="{}"/>"#,
        path, content_type
    ));
    xml.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_declares_namespaces() {
        let xml = document_part("", &SectionReferences::default(), &PageLayout::default());
        for prefix in ["w", "r", "wp", "a", "pic"] {
            assert!(xml.contains(&format!("xmlns:{}=", prefix)), "missing {}", prefix);
        }
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.ends_with("</w:document>"));
    }

    #[test]
    fn test_section_without_references() {
        let xml = document_part("<w:p/>", &SectionReferences::default(), &PageLayout::default());
        assert!(xml.contains(r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(!xml.contains("headerReference"));
        assert!(!xml.contains("footerReference"));
    }

    #[test]
    fn test_section_references_and_page() {
        let refs = SectionReferences {
            header: Some("rId1".to_string()),
            footer: Some("rId2".to_string()),
        };
        let page = PageLayout {
            width: 11906,
            height: 16838,
            margin: 720,
        };
        let xml = document_part("", &refs, &page);
        assert!(xml.contains(concat!(
            r#"<w:sectPr><w:headerReference w:type="default" r:id="rId1"/>"#,
            r#"<w:footerReference w:type="default" r:id="rId2"/>"#,
            r#"<w:pgSz w:w="11906" w:h="16838"/>"#
        )));
        assert!(xml.contains(r#"w:top="720" w:right="720" w:bottom="720" w:left="720""#));
    }

    #[test]
    fn test_header_and_footer_roots() {
        let header = header_part("<w:p/>\n");
        assert!(header.contains("<w:hdr xmlns:w="));
        assert!(header.ends_with("</w:hdr>"));
        assert!(!header.contains("sectPr"));

        let footer = footer_part("");
        assert!(footer.contains("<w:ftr xmlns:w="));
        assert!(footer.contains("<w:p/>"));
    }

    #[test]
    fn test_content_types_minimal() {
        let xml = content_types(false, false, []);
        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert!(xml.contains(r#"<Default Extension="xml" ContentType="application/xml"/>"#));
        for ext in DEFAULT_IMAGE_EXTENSIONS {
            assert!(xml.contains(&format!(r#"<Default Extension="{}""#, ext)));
        }
        assert!(xml.contains(&format!(
            r#"<Override PartName="/word/document.xml" ContentType="{}"/>"#,
            DOCUMENT_CONTENT_TYPE
        )));
        assert!(!xml.contains("header1.xml"));
        assert!(!xml.contains("footer1.xml"));
    }

    #[test]
    fn test_content_types_with_header_footer() {
        let xml = content_types(true, true, []);
        assert!(xml.contains(r#"PartName="/word/header1.xml""#));
        assert!(xml.contains(r#"PartName="/word/footer1.xml""#));
    }

    #[test]
    fn test_content_types_extra_extensions() {
        let xml = content_types(false, false, ["png", "webp", "WEBP"]);
        assert!(xml.contains(r#"<Default Extension="webp" ContentType="image/webp"/>"#));
        assert_eq!(xml.matches(r#"Extension="png""#).count(), 1);
        assert_eq!(xml.matches(r#"Extension="webp""#).count(), 1);
    }
}
