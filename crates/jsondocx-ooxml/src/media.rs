//! Media registry
//!
//! Collects the images embedded during one generation run and names them
//! `image1.png`, `image2.jpg`, ... The sequence is independent of
//! relationship ids.

use std::collections::BTreeSet;

use tracing::debug;

/// Directory of embedded media inside the package
pub const MEDIA_DIR: &str = "word/media";

/// An image held for packaging
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredImage {
    /// File name inside `word/media/` (e.g. `image1.png`)
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RegisteredImage {
    /// Extension of the generated file name
    pub fn extension(&self) -> &str {
        self.filename.rsplit('.').next().unwrap_or_default()
    }
}

/// Sequentially named images for one run
#[derive(Debug, Clone)]
pub struct MediaRegistry {
    images: Vec<RegisteredImage>,
    /// Counter for generating unique names (starts at 1)
    next_index: u32,
}

impl Default for MediaRegistry {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            next_index: 1,
        }
    }
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store image bytes and return the generated file name
    pub fn register(&mut self, bytes: Vec<u8>, extension: &str) -> String {
        let filename = format!("image{}.{}", self.next_index, extension);
        self.next_index += 1;

        debug!("Registered media {} ({} bytes)", filename, bytes.len());
        self.images.push(RegisteredImage {
            filename: filename.clone(),
            bytes,
        });

        filename
    }

    /// Drop all images and restart numbering at 1
    pub fn reset(&mut self) {
        self.images.clear();
        self.next_index = 1;
    }

    /// Package path and bytes for every registered image, in registration order
    pub fn export_all(&self) -> impl Iterator<Item = (String, &[u8])> {
        self.images
            .iter()
            .map(|img| (format!("{}/{}", MEDIA_DIR, img.filename), img.bytes.as_slice()))
    }

    /// Distinct extensions in use, sorted
    pub fn extensions(&self) -> BTreeSet<String> {
        self.images
            .iter()
            .map(|img| img.extension().to_ascii_lowercase())
            .collect()
    }

    pub fn images(&self) -> &[RegisteredImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
