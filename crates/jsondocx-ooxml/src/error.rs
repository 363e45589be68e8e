//! Error types for document generation

use std::path::PathBuf;

use jsondocx_model::DefinitionError;
use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, DocxError>;

/// Errors that can occur while compiling a definition into a package
#[derive(Error, Debug)]
pub enum DocxError {
    /// Uniform failure returned by `save` and `buffer`, wrapping the first error of the run
    #[error("{message}: {source}")]
    Generation {
        message: String,
        #[source]
        source: Box<DocxError>,
    },

    /// The definition is structurally invalid
    #[error("Invalid document definition: {0}")]
    InvalidDefinition(String),

    /// The save target has an extension other than `.docx`
    #[error("Invalid output path {path}: {reason}")]
    InvalidOutputPath { path: PathBuf, reason: String },

    /// An image path could not be read
    #[error("Failed to load image {path}")]
    AssetResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An image source the emitter cannot interpret (including unresolved paths)
    #[error("Unsupported image input: {0}")]
    UnsupportedImage(String),

    /// The archive could not be materialised
    #[error("Packaging failed: {message}")]
    Packaging {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Options file could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

impl From<DefinitionError> for DocxError {
    fn from(err: DefinitionError) -> Self {
        Self::InvalidDefinition(err.to_string())
    }
}

impl DocxError {
    /// Wrap an error as a generation failure
    pub fn generation(message: impl Into<String>, source: DocxError) -> Self {
        Self::Generation {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Create an invalid definition error
    pub fn invalid_definition(reason: impl Into<String>) -> Self {
        Self::InvalidDefinition(reason.into())
    }

    /// Create an invalid output path error
    pub fn invalid_output_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidOutputPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported image error
    pub fn unsupported_image(reason: impl Into<String>) -> Self {
        Self::UnsupportedImage(reason.into())
    }

    /// Create a packaging error
    pub fn packaging(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Packaging {
            message: message.into(),
            source: source.into(),
        }
    }

    /// The innermost error below any `Generation` wrappers
    pub fn root_cause(&self) -> &DocxError {
        match self {
            Self::Generation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::Generation { .. } => "DOCX000",
            Self::InvalidDefinition(_) => "DOCX001",
            Self::InvalidOutputPath { .. } => "DOCX002",
            Self::AssetResolution { .. } => "DOCX003",
            Self::UnsupportedImage(_) => "DOCX004",
            Self::Packaging { .. } => "DOCX005",
            Self::Io(_) => "DOCX006",
            Self::Archive(_) => "DOCX007",
            Self::Json(_) => "DOCX008",
            Self::Config(_) => "DOCX009",
        }
    }
}
