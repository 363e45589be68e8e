//! Inline content: text runs, hyperlinks and images
//!
//! Inline nodes are the children of paragraphs and table cells. In JSON a
//! bare string is shorthand for unstyled text; every other node is an object
//! discriminated by its `type` field.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::style::{Alignment, Style};

/// Content allowed inside a paragraph or a table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawInline", into = "RawInline")]
pub enum Inline {
    /// Bare string, styled by the enclosing paragraph or cell
    PlainText(String),
    /// Text with an optional style of its own
    Text(StyledText),
    /// External hyperlink
    Link(Link),
    /// Inline picture
    Image(Image),
}

impl Inline {
    /// Unstyled text
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText(text.into())
    }

    /// Styled text
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self::Text(StyledText::new(text).with_style(style))
    }

    /// Unstyled hyperlink
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link(Link::new(text, url))
    }
}

impl From<&str> for Inline {
    fn from(text: &str) -> Self {
        Self::PlainText(text.to_string())
    }
}

impl From<Image> for Inline {
    fn from(image: Image) -> Self {
        Self::Image(image)
    }
}

/// Wire shape: a bare string or a `type`-tagged object
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawInline {
    Plain(String),
    Tagged(TaggedInline),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedInline {
    Text(StyledText),
    Link(Link),
    Image(Image),
}

impl From<RawInline> for Inline {
    fn from(raw: RawInline) -> Self {
        match raw {
            RawInline::Plain(text) => Inline::PlainText(text),
            RawInline::Tagged(TaggedInline::Text(text)) => Inline::Text(text),
            RawInline::Tagged(TaggedInline::Link(link)) => Inline::Link(link),
            RawInline::Tagged(TaggedInline::Image(image)) => Inline::Image(image),
        }
    }
}

impl From<Inline> for RawInline {
    fn from(inline: Inline) -> Self {
        match inline {
            Inline::PlainText(text) => RawInline::Plain(text),
            Inline::Text(text) => RawInline::Tagged(TaggedInline::Text(text)),
            Inline::Link(link) => RawInline::Tagged(TaggedInline::Link(link)),
            Inline::Image(image) => RawInline::Tagged(TaggedInline::Image(image)),
        }
    }
}

/// A run of text with an optional style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl StyledText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

/// An external hyperlink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Visible link text
    pub text: String,
    /// Target URL
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl Link {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

/// Where the bytes of an image come from
///
/// `Path` only exists before asset resolution; the resolver replaces it with
/// `Bytes` on its copy of the definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// Raw image bytes
    Bytes(Vec<u8>),
    /// Base64 payload or `data:image/<fmt>;base64,<data>` URI
    #[serde(rename = "data")]
    Base64(String),
    /// Filesystem path, loaded by the asset resolver
    Path(PathBuf),
}

/// An embedded picture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(flatten)]
    pub source: ImageSource,
    /// Width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Description shown to assistive technology
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    /// Alignment of the paragraph holding a top-level image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,
}

impl Image {
    /// Image from an explicit source
    pub fn new(source: ImageSource) -> Self {
        Self {
            source,
            width: None,
            height: None,
            alt_text: None,
            align: None,
        }
    }

    /// Image loaded from disk at generation time
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(ImageSource::Path(path.into()))
    }

    /// Image from raw bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(ImageSource::Bytes(bytes.into()))
    }

    /// Image from a base64 string or data URI
    pub fn from_base64(data: impl Into<String>) -> Self {
        Self::new(ImageSource::Base64(data.into()))
    }

    /// Set both dimensions in pixels
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_alt_text(mut self, alt: impl Into<String>) -> Self {
        self.alt_text = Some(alt.into());
        self
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    /// Whether the source still needs to be loaded from disk
    pub fn is_unresolved(&self) -> bool {
        matches!(self.source, ImageSource::Path(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_string_is_plain_text() {
        let inline: Inline = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(inline, Inline::PlainText("hello".to_string()));
    }

    #[test]
    fn test_tagged_link() {
        let inline: Inline = serde_json::from_str(
            r#"{"type": "link", "text": "Docs", "url": "https://example.com", "style": {"bold": true}}"#,
        )
        .unwrap();

        let Inline::Link(link) = inline else {
            panic!("Expected link");
        };
        assert_eq!(link.url, "https://example.com");
        assert_eq!(link.style.unwrap().bold, Some(true));
    }

    #[test]
    fn test_image_sources() {
        let path: Inline =
            serde_json::from_str(r#"{"type": "image", "path": "logo.png", "width": 120}"#).unwrap();
        let Inline::Image(image) = path else {
            panic!("Expected image");
        };
        assert_eq!(image.source, ImageSource::Path(PathBuf::from("logo.png")));
        assert_eq!(image.width, Some(120.0));
        assert!(image.is_unresolved());

        let data: Inline = serde_json::from_str(
            r#"{"type": "image", "data": "data:image/png;base64,AAAA", "altText": "Logo"}"#,
        )
        .unwrap();
        let Inline::Image(image) = data else {
            panic!("Expected image");
        };
        assert_eq!(
            image.source,
            ImageSource::Base64("data:image/png;base64,AAAA".to_string())
        );
        assert_eq!(image.alt_text.as_deref(), Some("Logo"));

        let bytes: Inline =
            serde_json::from_str(r#"{"type": "image", "bytes": [137, 80, 78, 71]}"#).unwrap();
        let Inline::Image(image) = bytes else {
            panic!("Expected image");
        };
        assert_eq!(image.source, ImageSource::Bytes(vec![0x89, 0x50, 0x4E, 0x47]));
    }

    #[test]
    fn test_plain_text_serializes_as_string() {
        let json = serde_json::to_string(&Inline::plain("x")).unwrap();
        assert_eq!(json, r#""x""#);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<Inline, _> = serde_json::from_str(r#"{"type": "video", "src": "a"}"#);
        assert!(result.is_err());
    }
}
