//! jsondocx-ooxml: Document definitions to Office Open XML
//!
//! This crate compiles a [`DocumentDefinition`] into a `.docx` package:
//! - Resolve path images through a [`ByteLoader`]
//! - Emit `document.xml`, optional `header1.xml`/`footer1.xml`
//! - Keep content types, relationships and media consistent
//! - Write the ZIP archive to disk or memory
//!
//! # Example
//!
//! ```
//! use jsondocx_ooxml::{DocumentDefinition, DocxGenerator, MemoryLoader, Node};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> jsondocx_ooxml::Result<()> {
//! let definition = DocumentDefinition::new(vec![Node::plain("Hello, world")]);
//! let bytes = DocxGenerator::new(definition)
//!     .with_loader(MemoryLoader::new())
//!     .buffer()
//!     .await?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok(())
//! # }
//! ```

pub mod emit;
pub mod error;
pub mod generator;
pub mod image;
pub mod loader;
pub mod media;
pub mod options;
pub mod package;
pub mod parts;
pub mod relationships;
pub mod resolver;
pub mod session;

pub use error::{DocxError, Result};
pub use generator::DocxGenerator;
pub use loader::{ByteLoader, FsLoader, MemoryLoader};
pub use media::{MediaRegistry, RegisteredImage};
pub use options::{GeneratorOptions, PageLayout};
pub use package::{resolve_output_path, Package};
pub use relationships::{Relationship, RelationshipKind, RelationshipRegistry};
pub use resolver::resolve_assets;
pub use session::Session;

pub use jsondocx_model::{
    Alignment, Cell, DocumentDefinition, HeaderFooter, Image, ImageSource, Inline, Link, Node,
    Paragraph, Row, Style, StyledText, Table, VerticalAlignment,
};
