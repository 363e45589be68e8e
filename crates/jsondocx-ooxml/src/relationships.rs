//! Relationship registry for generated parts
//!
//! Every part that references hyperlinks, images, or other parts owns one
//! registry. Ids are minted as `rId1`, `rId2`, ... in insertion order and
//! rendered into that part's `_rels/*.rels` file.
//!
//! # Example
//!
//! ```
//! use jsondocx_ooxml::relationships::RelationshipRegistry;
//!
//! let mut rels = RelationshipRegistry::new();
//! let link = rels.add_hyperlink("https://example.com");
//! let image = rels.add_image("image1.png");
//! assert_eq!((link.as_str(), image.as_str()), ("rId1", "rId2"));
//!
//! let xml = rels.render_part_relationships();
//! assert!(xml.contains(r#"Target="media/image1.png""#));
//! ```

use std::collections::HashMap;

use quick_xml::escape::escape;
use tracing::debug;

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Relationship type of the main document part, declared in `_rels/.rels`
pub const TYPE_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// Kinds of relationship a generated part can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Hyperlink,
    Image,
    Header,
    Footer,
}

impl RelationshipKind {
    /// Relationship type URI
    pub fn type_uri(self) -> &'static str {
        match self {
            Self::Hyperlink => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink"
            }
            Self::Image => "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image",
            Self::Header => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header"
            }
            Self::Footer => {
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer"
            }
        }
    }
}

/// One relationship record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub kind: RelationshipKind,
    /// URL for hyperlinks, part-relative path otherwise
    pub target: String,
    /// Rendered with `TargetMode="External"`
    pub external: bool,
}

/// Ordered relationship records of one part
#[derive(Debug, Clone)]
pub struct RelationshipRegistry {
    records: Vec<Relationship>,
    /// Counter for generating unique IDs (starts at 1)
    next_id: u32,
    /// URL -> id cache, present only when de-duplication is enabled
    hyperlink_cache: Option<HashMap<String, String>>,
}

impl Default for RelationshipRegistry {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            hyperlink_cache: None,
        }
    }
}

impl RelationshipRegistry {
    /// Create an empty registry that mints one id per hyperlink
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that reuses the id of an already registered URL
    pub fn with_hyperlink_dedup() -> Self {
        Self {
            hyperlink_cache: Some(HashMap::new()),
            ..Self::default()
        }
    }

    fn push(&mut self, kind: RelationshipKind, target: String, external: bool) -> String {
        let id = format!("rId{}", self.next_id);
        self.next_id += 1;

        debug!("Registered relationship {} ({:?} -> {})", id, kind, target);
        self.records.push(Relationship {
            id: id.clone(),
            kind,
            target,
            external,
        });

        id
    }

    /// Register an external hyperlink
    pub fn add_hyperlink(&mut self, url: &str) -> String {
        if let Some(id) = self
            .hyperlink_cache
            .as_ref()
            .and_then(|cache| cache.get(url))
        {
            return id.clone();
        }

        let id = self.push(RelationshipKind::Hyperlink, url.to_string(), true);
        if let Some(cache) = self.hyperlink_cache.as_mut() {
            cache.insert(url.to_string(), id.clone());
        }
        id
    }

    /// Register an image stored under `word/media/<filename>`
    pub fn add_image(&mut self, filename: &str) -> String {
        self.push(RelationshipKind::Image, format!("media/{}", filename), false)
    }

    /// Register a header part (e.g. `header1.xml`)
    pub fn add_header_part(&mut self, part_name: &str) -> String {
        self.push(RelationshipKind::Header, part_name.to_string(), false)
    }

    /// Register a footer part (e.g. `footer1.xml`)
    pub fn add_footer_part(&mut self, part_name: &str) -> String {
        self.push(RelationshipKind::Footer, part_name.to_string(), false)
    }

    pub fn has_any(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.records.iter()
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.records.iter().find(|rel| rel.id == id)
    }

    /// Clear all records and restart ids at `rId1`
    pub fn reset(&mut self) {
        self.records.clear();
        self.next_id = 1;
        if let Some(cache) = self.hyperlink_cache.as_mut() {
            cache.clear();
        }
    }

    /// Serialize the records of this part
    pub fn render_part_relationships(&self) -> String {
        let mut xml = rels_prologue();

        for rel in &self.records {
            xml.push_str("  <Relationship");
            xml.push_str(&format!(r#" Id="{}""#, escape(&rel.id)));
            xml.push_str(&format!(r#" Type="{}""#, rel.kind.type_uri()));
            xml.push_str(&format!(r#" Target="{}""#, escape(&rel.target)));
            if rel.external {
                xml.push_str(r#" TargetMode="External""#);
            }
            xml.push_str("/>\n");
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// The fixed `_rels/.rels` content pointing at the main document part
    pub fn render_package_relationships() -> String {
        let mut xml = rels_prologue();
        xml.push_str(&format!(
            r#"  <Relationship Id="rId1" Type="{}" Target="word/document.xml"/>"#,
            TYPE_OFFICE_DOCUMENT
        ));
        xml.push('\n');
        xml.push_str("</Relationships>");
        xml
    }
}

fn rels_prologue() -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));
    xml.push('\n');
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut rels = RelationshipRegistry::new();
        assert_eq!(rels.add_header_part("header1.xml"), "rId1");
        assert_eq!(rels.add_footer_part("footer1.xml"), "rId2");
        assert_eq!(rels.add_hyperlink("https://example.com"), "rId3");
        assert_eq!(rels.add_image("image1.png"), "rId4");
        assert_eq!(rels.len(), 4);
        assert!(rels.has_any());
    }

    #[test]
    fn test_repeated_url_gets_new_id() {
        let mut rels = RelationshipRegistry::new();
        let first = rels.add_hyperlink("https://example.com");
        let second = rels.add_hyperlink("https://example.com");
        assert_ne!(first, second);
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_dedup_reuses_id() {
        let mut rels = RelationshipRegistry::with_hyperlink_dedup();
        let first = rels.add_hyperlink("https://example.com");
        let other = rels.add_hyperlink("https://rust-lang.org");
        let again = rels.add_hyperlink("https://example.com");
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_external_only_on_hyperlinks() {
        let mut rels = RelationshipRegistry::new();
        rels.add_hyperlink("https://example.com/?a=1&b=2");
        rels.add_image("image1.png");

        let xml = rels.render_part_relationships();
        assert!(xml.contains(
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>"#
        ));
        assert!(xml.contains(
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>"#
        ));
        assert_eq!(xml.matches("TargetMode").count(), 1);
        assert!(xml.ends_with("</Relationships>"));
    }

    #[test]
    fn test_render_preserves_insertion_order() {
        let mut rels = RelationshipRegistry::new();
        rels.add_image("image1.png");
        rels.add_hyperlink("https://a.example");
        rels.add_image("image2.png");

        let xml = rels.render_part_relationships();
        let first = xml.find("rId1").unwrap();
        let second = xml.find("rId2").unwrap();
        let third = xml.find("rId3").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_reset() {
        let mut rels = RelationshipRegistry::with_hyperlink_dedup();
        rels.add_hyperlink("https://example.com");
        rels.add_image("image1.png");
        rels.reset();

        assert!(!rels.has_any());
        assert_eq!(rels.add_hyperlink("https://example.com"), "rId1");
        assert_eq!(rels.len(), 1);
    }

    #[test]
    fn test_package_relationships_are_fixed() {
        let xml = RelationshipRegistry::render_package_relationships();
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains(TYPE_OFFICE_DOCUMENT));
        assert!(xml.contains(r#"Target="word/document.xml""#));
        assert_eq!(xml.matches("<Relationship ").count(), 1);
    }

    #[test]
    fn test_get_by_id() {
        let mut rels = RelationshipRegistry::new();
        let id = rels.add_footer_part("footer1.xml");
        let rel = rels.get(&id).unwrap();
        assert_eq!(rel.kind, RelationshipKind::Footer);
        assert!(!rel.external);
        assert!(rels.get("rId9").is_none());
    }
}
