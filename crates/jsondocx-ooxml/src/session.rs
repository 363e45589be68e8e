//! One generation run
//!
//! A [`Session`] owns the media registry and the relationship registry of
//! every emitted part. The generator builds a fresh session per call, so no
//! id or image outlives the run that created it.

use jsondocx_model::{DocumentDefinition, Node};
use tracing::debug;

use crate::emit::PartWriter;
use crate::error::Result;
use crate::media::MediaRegistry;
use crate::options::GeneratorOptions;
use crate::package::Package;
use crate::parts::{
    self, SectionReferences, CONTENT_TYPES_PATH, DOCUMENT_PATH, DOCUMENT_RELS_PATH,
    FOOTER_PART_NAME, FOOTER_PATH, FOOTER_RELS_PATH, HEADER_PART_NAME, HEADER_PATH,
    HEADER_RELS_PATH, PACKAGE_RELS_PATH,
};
use crate::relationships::RelationshipRegistry;

/// Registries of one generation run
#[derive(Debug)]
pub struct Session<'o> {
    options: &'o GeneratorOptions,
    media: MediaRegistry,
    document_rels: RelationshipRegistry,
    header_rels: RelationshipRegistry,
    footer_rels: RelationshipRegistry,
}

impl<'o> Session<'o> {
    pub fn new(options: &'o GeneratorOptions) -> Self {
        let registry = || {
            if options.dedupe_hyperlinks {
                RelationshipRegistry::with_hyperlink_dedup()
            } else {
                RelationshipRegistry::new()
            }
        };

        Self {
            options,
            media: MediaRegistry::new(),
            document_rels: registry(),
            header_rels: registry(),
            footer_rels: registry(),
        }
    }

    /// Clear every registry
    pub fn reset(&mut self) {
        self.media.reset();
        self.document_rels.reset();
        self.header_rels.reset();
        self.footer_rels.reset();
    }

    pub fn media(&self) -> &MediaRegistry {
        &self.media
    }

    pub fn document_relationships(&self) -> &RelationshipRegistry {
        &self.document_rels
    }

    /// Emit all parts of a resolved definition into a package
    ///
    /// Header and footer go first so their relationship ids exist when the
    /// section properties of the main part are written.
    pub fn assemble(&mut self, definition: &DocumentDefinition) -> Result<Package> {
        let mut references = SectionReferences::default();

        let header_xml = match &definition.header {
            Some(header) => {
                let body = self.emit_body(&header.content, PartKind::Header)?;
                references.header = Some(self.document_rels.add_header_part(HEADER_PART_NAME));
                Some(parts::header_part(&body))
            }
            None => None,
        };

        let footer_xml = match &definition.footer {
            Some(footer) => {
                let body = self.emit_body(&footer.content, PartKind::Footer)?;
                references.footer = Some(self.document_rels.add_footer_part(FOOTER_PART_NAME));
                Some(parts::footer_part(&body))
            }
            None => None,
        };

        let body = self.emit_body(&definition.content, PartKind::Document)?;
        let document_xml = parts::document_part(&body, &references, &self.options.page);

        let extensions = self.media.extensions();
        let mut package =
            Package::new().with_compression_level(self.options.effective_compression_level());

        package.add_string(
            CONTENT_TYPES_PATH,
            parts::content_types(
                header_xml.is_some(),
                footer_xml.is_some(),
                extensions.iter().map(String::as_str),
            ),
        );
        package.add_string(
            PACKAGE_RELS_PATH,
            RelationshipRegistry::render_package_relationships(),
        );
        package.add_string(DOCUMENT_PATH, document_xml);
        if let Some(xml) = header_xml {
            package.add_string(HEADER_PATH, xml);
        }
        if let Some(xml) = footer_xml {
            package.add_string(FOOTER_PATH, xml);
        }

        if self.document_rels.has_any() {
            package.add_string(
                DOCUMENT_RELS_PATH,
                self.document_rels.render_part_relationships(),
            );
        }
        if self.header_rels.has_any() {
            package.add_string(HEADER_RELS_PATH, self.header_rels.render_part_relationships());
        }
        if self.footer_rels.has_any() {
            package.add_string(FOOTER_RELS_PATH, self.footer_rels.render_part_relationships());
        }

        for (path, bytes) in self.media.export_all() {
            package.add(path, bytes.to_vec());
        }

        debug!(
            "Assembled {} parts ({} images, {} document relationships)",
            package.len(),
            self.media.len(),
            self.document_rels.len()
        );
        Ok(package)
    }

    fn emit_body(&mut self, nodes: &[Node], kind: PartKind) -> Result<String> {
        let rels = match kind {
            PartKind::Document => &mut self.document_rels,
            PartKind::Header => &mut self.header_rels,
            PartKind::Footer => &mut self.footer_rels,
        };
        let mut writer = PartWriter::new(&mut self.media, rels, self.options);
        writer.write_nodes(nodes)?;
        Ok(writer.finish())
    }
}

#[derive(Debug, Clone, Copy)]
enum PartKind {
    Document,
    Header,
    Footer,
}

#[cfg(test)]
mod tests {
    use jsondocx_model::{Image, Link};

    use super::*;

    const PNG: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

    #[test]
    fn test_body_only_package() {
        let options = GeneratorOptions::default();
        let mut session = Session::new(&options);
        let package = session
            .assemble(&DocumentDefinition::new(vec![Node::plain("Hello")]))
            .unwrap();

        assert_eq!(
            package.paths().collect::<Vec<_>>(),
            vec![CONTENT_TYPES_PATH, PACKAGE_RELS_PATH, DOCUMENT_PATH]
        );
    }

    #[test]
    fn test_header_footer_wiring() {
        let options = GeneratorOptions::default();
        let mut session = Session::new(&options);
        let definition = DocumentDefinition::new(vec![Node::plain("Body")])
            .with_header(vec![Node::plain("Top")])
            .with_footer(vec![Node::plain("Bottom")]);

        let package = session.assemble(&definition).unwrap();

        let rels = package.get_string(DOCUMENT_RELS_PATH).unwrap();
        assert!(rels.contains(r#"Id="rId1""#) && rels.contains(r#"Target="header1.xml""#));
        assert!(rels.contains(r#"Id="rId2""#) && rels.contains(r#"Target="footer1.xml""#));

        let document = package.get_string(DOCUMENT_PATH).unwrap();
        assert!(document.contains(r#"<w:headerReference w:type="default" r:id="rId1"/>"#));
        assert!(document.contains(r#"<w:footerReference w:type="default" r:id="rId2"/>"#));

        let types = package.get_string(CONTENT_TYPES_PATH).unwrap();
        assert!(types.contains("/word/header1.xml"));
        assert!(types.contains("/word/footer1.xml"));

        assert!(package.get_string(HEADER_PATH).unwrap().contains("Top"));
        assert!(package.get_string(FOOTER_PATH).unwrap().contains("Bottom"));
        assert!(!package.contains(HEADER_RELS_PATH));
        assert!(!package.contains(FOOTER_RELS_PATH));
    }

    #[test]
    fn test_header_link_uses_header_rels() {
        let options = GeneratorOptions::default();
        let mut session = Session::new(&options);
        let definition = DocumentDefinition::new(vec![Node::link("Body", "https://body.example")])
            .with_header(vec![
                Node::link("Home", "https://example.com"),
                Image::from_bytes(PNG.to_vec()).into(),
            ]);

        let package = session.assemble(&definition).unwrap();

        let header_rels = package.get_string(HEADER_RELS_PATH).unwrap();
        assert!(header_rels.contains("https://example.com"));
        assert!(header_rels.contains("media/image1.png"));

        let header = package.get_string(HEADER_PATH).unwrap();
        assert!(header.contains(r#"<w:hyperlink r:id="rId1">"#));
        assert!(header.contains(r#"<a:blip r:embed="rId2"/>"#));

        // Header part relationship first, then the body link
        let document_rels = package.get_string(DOCUMENT_RELS_PATH).unwrap();
        assert!(document_rels.contains(r#"Id="rId1""#));
        assert!(document_rels.contains(r#"Id="rId2""#));
        assert!(document_rels.contains("https://body.example"));
        assert!(!document_rels.contains("media/image1.png"));

        assert!(package.contains("word/media/image1.png"));
    }

    #[test]
    fn test_media_names_unique_across_parts() {
        let options = GeneratorOptions::default();
        let mut session = Session::new(&options);
        let definition = DocumentDefinition::new(vec![Image::from_bytes(PNG.to_vec()).into()])
            .with_footer(vec![Image::from_bytes(PNG.to_vec()).into()]);

        let package = session.assemble(&definition).unwrap();
        assert!(package.contains("word/media/image1.png"));
        assert!(package.contains("word/media/image2.png"));
        assert_eq!(session.media().len(), 2);
    }

    #[test]
    fn test_dedupe_option() {
        let options = GeneratorOptions {
            dedupe_hyperlinks: true,
            ..Default::default()
        };
        let mut session = Session::new(&options);
        let definition = DocumentDefinition::new(vec![
            Node::Link(Link::new("a", "https://example.com")),
            Node::Link(Link::new("b", "https://example.com")),
        ]);

        session.assemble(&definition).unwrap();
        assert_eq!(session.document_relationships().len(), 1);
    }

    #[test]
    fn test_reset_clears_registries() {
        let options = GeneratorOptions::default();
        let mut session = Session::new(&options);
        session
            .assemble(&DocumentDefinition::new(vec![
                Image::from_bytes(PNG.to_vec()).into(),
                Node::link("x", "https://example.com"),
            ]))
            .unwrap();
        assert!(session.document_relationships().has_any());

        session.reset();
        assert!(session.media().is_empty());
        assert!(!session.document_relationships().has_any());

        let package = session
            .assemble(&DocumentDefinition::new(vec![Node::plain("text")]))
            .unwrap();
        assert!(!package.contains(DOCUMENT_RELS_PATH));
        assert!(!package.paths().any(|p| p.starts_with("word/media/")));
    }
}
