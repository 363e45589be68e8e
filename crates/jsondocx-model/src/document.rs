//! Document root definition
//!
//! A definition is the body content plus optional header and footer
//! content. It is read-only once handed to a generator; asset resolution
//! works on a copy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::Node;
use crate::error::DefinitionError;

/// A complete document definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentDefinition {
    /// Body content in document order
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<HeaderFooter>,
}

/// Content of the page header or footer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderFooter {
    pub content: Vec<Node>,
}

impl HeaderFooter {
    pub fn new(content: Vec<Node>) -> Self {
        Self { content }
    }
}

impl DocumentDefinition {
    /// Create a definition with body content only
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            content,
            header: None,
            footer: None,
        }
    }

    pub fn with_header(mut self, content: Vec<Node>) -> Self {
        self.header = Some(HeaderFooter::new(content));
        self
    }

    pub fn with_footer(mut self, content: Vec<Node>) -> Self {
        self.footer = Some(HeaderFooter::new(content));
        self
    }

    /// Add a node to the body
    pub fn push(&mut self, node: impl Into<Node>) {
        self.content.push(node.into());
    }

    /// Parse and validate a definition from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, DefinitionError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Validate and decode a definition from a JSON value
    ///
    /// The skeleton is checked before decoding so that a non-sequence
    /// `content` is reported as such rather than as a generic decode error.
    pub fn from_json_value(value: Value) -> Result<Self, DefinitionError> {
        let root = value.as_object().ok_or(DefinitionError::NotAnObject)?;

        if !root.get("content").is_some_and(Value::is_array) {
            return Err(DefinitionError::NotASequence { field: "content" });
        }

        for field in ["header", "footer"] {
            match root.get(field) {
                None | Some(Value::Null) => {}
                Some(part) => {
                    if !part.get("content").is_some_and(Value::is_array) {
                        return Err(DefinitionError::NotASequence {
                            field: if field == "header" {
                                "header.content"
                            } else {
                                "footer.content"
                            },
                        });
                    }
                }
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Serialize back to the JSON form
    pub fn to_json_string(&self) -> Result<String, DefinitionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check if the body is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::{Image, ImageSource};

    #[test]
    fn test_minimal_definition() {
        let def = DocumentDefinition::from_json_str(r#"{"content": ["Hello"]}"#).unwrap();
        assert_eq!(def.content, vec![Node::PlainText("Hello".to_string())]);
        assert!(def.header.is_none());
        assert!(def.footer.is_none());
    }

    #[test]
    fn test_content_not_a_sequence() {
        for json in [
            r#"{"content": "Hello"}"#,
            r#"{"content": {"type": "text", "text": "x"}}"#,
            r#"{"content": 42}"#,
            r#"{}"#,
        ] {
            let err = DocumentDefinition::from_json_str(json).unwrap_err();
            assert!(
                matches!(err, DefinitionError::NotASequence { field: "content" }),
                "unexpected error for {json}: {err}"
            );
        }
    }

    #[test]
    fn test_root_not_an_object() {
        let err = DocumentDefinition::from_json_str(r#"["Hello"]"#).unwrap_err();
        assert!(matches!(err, DefinitionError::NotAnObject));
    }

    #[test]
    fn test_header_content_not_a_sequence() {
        let err = DocumentDefinition::from_json_str(r#"{"content": [], "header": {"content": "x"}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::NotASequence {
                field: "header.content"
            }
        ));
    }

    #[test]
    fn test_null_footer_is_absent() {
        let def = DocumentDefinition::from_json_str(r#"{"content": [], "footer": null}"#).unwrap();
        assert!(def.footer.is_none());
    }

    #[test]
    fn test_malformed_node() {
        let err = DocumentDefinition::from_json_str(r#"{"content": [{"type": "video"}]}"#)
            .unwrap_err();
        assert!(matches!(err, DefinitionError::Malformed(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let def = DocumentDefinition::new(vec![
            Node::plain("Intro"),
            Node::Image(Image::from_path("logo.png").with_size(10.0, 20.0)),
        ])
        .with_footer(vec![Node::plain("Page")]);

        let json = def.to_json_string().unwrap();
        let back = DocumentDefinition::from_json_str(&json).unwrap();
        assert_eq!(back, def);

        let Node::Image(image) = &back.content[1] else {
            panic!("Expected image");
        };
        assert!(matches!(image.source, ImageSource::Path(_)));
    }
}
