//! jsondocx-model - Document definition types
//!
//! This crate provides the declarative content tree that jsondocx compiles
//! into a Word package: text runs, hyperlinks, images, paragraphs and tables,
//! plus optional header and footer content.
//!
//! Definitions can be built in Rust or parsed from their JSON form:
//!
//! ```
//! use jsondocx_model::DocumentDefinition;
//!
//! let def = DocumentDefinition::from_json_str(
//!     r#"{ "content": ["Hello", { "type": "link", "text": "Docs", "url": "https://example.com" }] }"#,
//! )?;
//! assert_eq!(def.content.len(), 2);
//! # Ok::<(), jsondocx_model::DefinitionError>(())
//! ```

pub mod block;
pub mod document;
pub mod error;
pub mod inline;
pub mod style;

pub use block::{Cell, Node, Paragraph, Row, Table};
pub use document::{DocumentDefinition, HeaderFooter};
pub use error::DefinitionError;
pub use inline::{Image, ImageSource, Inline, Link, StyledText};
pub use style::{Alignment, Style, VerticalAlignment};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
