//! Generator options
//!
//! Options can be built in code or loaded from a TOML file:
//!
//! ```toml
//! compression_level = 6
//! dedupe_hyperlinks = true
//!
//! [page]
//! width = 11906
//! height = 16838
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum DEFLATE compression level
pub const MAX_COMPRESSION_LEVEL: i64 = 9;

/// Lowest DEFLATE level the archive writer accepts
pub const MIN_COMPRESSION_LEVEL: i64 = 1;

/// Word's default hyperlink colour
pub const DEFAULT_HYPERLINK_COLOR: &str = "0563C1";

/// Settings that shape the generated package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// DEFLATE level for every archive entry (1-9)
    pub compression_level: i64,
    /// Colour of hyperlinks without an explicit colour
    pub hyperlink_color: String,
    /// Reuse one relationship per distinct URL within a part
    pub dedupe_hyperlinks: bool,
    /// Image width in pixels when the node gives none
    pub default_image_width: f64,
    /// Image height in pixels when the node gives none
    pub default_image_height: f64,
    /// Page geometry of the single section
    pub page: PageLayout,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            compression_level: MAX_COMPRESSION_LEVEL,
            hyperlink_color: DEFAULT_HYPERLINK_COLOR.to_string(),
            dedupe_hyperlinks: false,
            default_image_width: 100.0,
            default_image_height: 100.0,
            page: PageLayout::default(),
        }
    }
}

impl GeneratorOptions {
    /// Parse options from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Compression level clamped to the valid DEFLATE range
    pub fn effective_compression_level(&self) -> i64 {
        self.compression_level
            .clamp(MIN_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL)
    }
}

/// Page size and margins in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub width: u32,
    pub height: u32,
    /// Applied to all four sides
    pub margin: u32,
}

impl Default for PageLayout {
    fn default() -> Self {
        // US Letter with one-inch margins
        Self {
            width: 12240,
            height: 15840,
            margin: 1440,
        }
    }
}
