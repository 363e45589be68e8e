//! Packaging sink
//!
//! A `.docx` file is a ZIP archive of named parts. [`Package`] keeps the
//! parts in insertion order and writes them with DEFLATE compression.

use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{DocxError, Result};
use crate::options::{MAX_COMPRESSION_LEVEL, MIN_COMPRESSION_LEVEL};

/// Required extension of saved packages
pub const DOCX_EXTENSION: &str = "docx";

/// Named parts of a package, in archive order
#[derive(Debug, Clone)]
pub struct Package {
    parts: Vec<(String, Vec<u8>)>,
    compression_level: i64,
}

impl Default for Package {
    fn default() -> Self {
        Self {
            parts: Vec::new(),
            compression_level: MAX_COMPRESSION_LEVEL,
        }
    }
}

impl Package {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the DEFLATE level (clamped to 1-9)
    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = level.clamp(MIN_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL);
        self
    }

    /// Add a part, replacing an existing part with the same path in place
    pub fn add(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        let path = path.into();
        match self.parts.iter_mut().find(|(p, _)| *p == path) {
            Some((_, existing)) => *existing = contents,
            None => self.parts.push((path, contents)),
        }
    }

    /// Add an XML part
    pub fn add_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.add(path, contents.into().into_bytes());
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, contents)| contents.as_slice())
    }

    /// Get a part as a string
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.parts.iter().any(|(p, _)| p == path)
    }

    /// Part paths in archive order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(p, _)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Write the archive to any writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.compression_level));

        for (path, contents) in &self.parts {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(contents)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Write the archive into memory
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(&mut buffer)?;
        Ok(buffer.into_inner())
    }

    /// Write the archive to `path`
    ///
    /// The archive goes to a sibling temporary file first and is renamed
    /// over `path` once complete, so a failure never leaves a partial file.
    pub async fn persist(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        let temp_path = temp_sibling(path);

        if let Err(e) = tokio::fs::write(&temp_path, &bytes).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(DocxError::packaging(
                format!("could not write {}", path.display()),
                e,
            ));
        }
        if let Err(e) = tokio::fs::rename(&temp_path, path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(DocxError::packaging(
                format!("could not move package into {}", path.display()),
                e,
            ));
        }

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Unique per process and per call
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), seq))
}

/// Normalise a save target
///
/// A path without extension gets `.docx`; `.docx` is accepted in any case;
/// any other extension is rejected.
pub fn resolve_output_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();

    let Some(file_name) = path.file_name() else {
        return Err(DocxError::invalid_output_path(path, "no file name"));
    };

    // `Path::extension` sees none on a bare ".docx"
    let dotted = format!(".{}", DOCX_EXTENSION);
    if file_name.eq_ignore_ascii_case(&dotted) {
        return Ok(path.to_path_buf());
    }

    match path.extension() {
        None => Ok(path.with_extension(DOCX_EXTENSION)),
        Some(ext) if ext.eq_ignore_ascii_case(DOCX_EXTENSION) => Ok(path.to_path_buf()),
        Some(ext) => Err(DocxError::invalid_output_path(
            path,
            format!(
                "expected a .{} extension, got .{}",
                DOCX_EXTENSION,
                ext.to_string_lossy()
            ),
        )),
    }
}
