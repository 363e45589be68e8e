//! Package assembler
//!
//! [`DocxGenerator`] holds a definition and turns it into a `.docx` on
//! demand. Each call resolves image paths, emits every part in a fresh
//! [`Session`] and hands the parts to the packaging sink.

use std::path::{Path, PathBuf};

use jsondocx_model::DocumentDefinition;
use serde_json::Value;
use tracing::info;

use crate::error::{DocxError, Result};
use crate::loader::{ByteLoader, FsLoader};
use crate::options::GeneratorOptions;
use crate::package::{resolve_output_path, Package};
use crate::resolver::resolve_assets;
use crate::session::Session;

const GENERATION_FAILED: &str = "Failed to generate document";

/// Compiles one document definition into OOXML packages
///
/// The definition is never modified; calls are independent of each other.
///
/// # Example
///
/// ```no_run
/// use jsondocx_ooxml::DocxGenerator;
///
/// # async fn run() -> jsondocx_ooxml::Result<()> {
/// let generator = DocxGenerator::from_json_str(r#"{"content": ["Hello"]}"#)?;
/// let path = generator.save("hello").await?;
/// assert!(path.ends_with("hello.docx"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DocxGenerator<L: ByteLoader = FsLoader> {
    definition: DocumentDefinition,
    loader: L,
    options: GeneratorOptions,
}

impl DocxGenerator<FsLoader> {
    /// Create a generator that loads image paths from the filesystem
    pub fn new(definition: DocumentDefinition) -> Self {
        Self {
            definition,
            loader: FsLoader::new(),
            options: GeneratorOptions::default(),
        }
    }

    /// Parse and validate a JSON definition
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(DocumentDefinition::from_json_str(json)?))
    }

    /// Validate an already parsed JSON definition
    pub fn from_json_value(value: Value) -> Result<Self> {
        Ok(Self::new(DocumentDefinition::from_json_value(value)?))
    }
}

impl<L: ByteLoader> DocxGenerator<L> {
    /// Replace the byte loader used for path images
    pub fn with_loader<M: ByteLoader>(self, loader: M) -> DocxGenerator<M> {
        DocxGenerator {
            definition: self.definition,
            loader,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn definition(&self) -> &DocumentDefinition {
        &self.definition
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate the package and write it to `path`
    ///
    /// A missing extension becomes `.docx`; any other extension is rejected
    /// before any work is done. Returns the path actually written.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let target =
            resolve_output_path(path).map_err(|e| DocxError::generation(GENERATION_FAILED, e))?;

        info!("Generating {}", target.display());
        let package = self
            .package()
            .await
            .map_err(|e| DocxError::generation(GENERATION_FAILED, e))?;
        package
            .persist(&target)
            .await
            .map_err(|e| DocxError::generation(GENERATION_FAILED, e))?;

        info!("Saved {} ({} parts)", target.display(), package.len());
        Ok(target)
    }

    /// Generate the package in memory
    pub async fn buffer(&self) -> Result<Vec<u8>> {
        info!("Generating in-memory document");
        let bytes = async { self.package().await?.to_bytes() }
            .await
            .map_err(|e| DocxError::generation(GENERATION_FAILED, e))?;

        info!("Generated {} bytes", bytes.len());
        Ok(bytes)
    }

    /// Resolve assets and emit every part, without packaging
    pub async fn package(&self) -> Result<Package> {
        let resolved = resolve_assets(&self.definition, &self.loader).await?;
        let mut session = Session::new(&self.options);
        session.assemble(&resolved)
    }
}

#[cfg(test)]
mod tests {
    use jsondocx_model::{Image, Node};

    use super::*;
    use crate::loader::MemoryLoader;

    #[test]
    fn test_invalid_json_definition() {
        let err = DocxGenerator::from_json_str(r#"{"content": "not a list"}"#).unwrap_err();
        assert!(matches!(err, DocxError::InvalidDefinition(_)));
    }

    #[test]
    fn test_from_json_value() {
        let generator =
            DocxGenerator::from_json_value(serde_json::json!({ "content": ["Hi"] })).unwrap();
        assert_eq!(generator.definition().content, vec![Node::plain("Hi")]);
    }

    #[tokio::test]
    async fn test_buffer_is_zip() {
        let generator = DocxGenerator::new(DocumentDefinition::new(vec![Node::plain("Hi")]));
        let bytes = generator.buffer().await.unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_missing_image_is_wrapped() {
        let generator =
            DocxGenerator::new(DocumentDefinition::new(vec![Image::from_path("gone.png").into()]))
                .with_loader(MemoryLoader::new());

        let err = generator.buffer().await.unwrap_err();
        assert_eq!(err.code(), "DOCX000");
        assert!(matches!(err.root_cause(), DocxError::AssetResolution { .. }));
    }

    #[tokio::test]
    async fn test_bad_extension_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let generator = DocxGenerator::new(DocumentDefinition::new(vec![Node::plain("Hi")]));

        let err = generator.save(dir.path().join("report.zip")).await.unwrap_err();
        assert!(matches!(err.root_cause(), DocxError::InvalidOutputPath { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_zero_compression_level_still_generates() {
        let options = GeneratorOptions::from_toml_str("compression_level = 0").unwrap();
        let generator = DocxGenerator::new(DocumentDefinition::new(vec![Node::plain("Hi")]))
            .with_options(options);

        let bytes = generator.buffer().await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        assert!(archive.by_name("word/document.xml").is_ok());
    }

    #[tokio::test]
    async fn test_options_flow_into_package() {
        let options = GeneratorOptions {
            page: crate::options::PageLayout {
                width: 11906,
                height: 16838,
                margin: 1440,
            },
            ..Default::default()
        };
        let generator = DocxGenerator::new(DocumentDefinition::new(vec![Node::plain("A4")]))
            .with_options(options);

        let package = generator.package().await.unwrap();
        let document = package.get_string("word/document.xml").unwrap();
        assert!(document.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
    }
}
