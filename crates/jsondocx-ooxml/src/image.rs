//! Image source normalisation and drawing units
//!
//! Image nodes reach the emitter carrying raw bytes or a base64 string
//! (plain payload or `data:image/<fmt>;base64,<data>` URI). This module
//! turns either into bytes plus a file extension.
//!
//! # Unit Conversions
//!
//! DrawingML extents are in EMUs (English Metric Units):
//! - 914400 EMUs = 1 inch
//! - 9525 EMUs = 1 pixel (at 96 DPI)

use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsondocx_model::ImageSource;
use regex::Regex;
use tracing::warn;

use crate::error::{DocxError, Result};

/// EMUs per pixel at 96 DPI (9525)
pub const EMU_PER_PIXEL: i64 = 9525;

/// Extension used when the byte signature is not recognised
pub const FALLBACK_EXTENSION: &str = "png";

/// Image bytes ready to be registered as media
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    /// Extension without the dot (`png`, `jpg`, ...)
    pub extension: String,
}

/// Normalise an image source into bytes and an extension
///
/// A `Path` source is a contract violation: paths are replaced by the asset
/// resolver before emission.
pub fn decode_source(source: &ImageSource) -> Result<DecodedImage> {
    match source {
        ImageSource::Bytes(bytes) => Ok(DecodedImage {
            extension: extension_or_fallback(bytes).to_string(),
            bytes: bytes.clone(),
        }),
        ImageSource::Base64(data) => decode_base64_source(data),
        ImageSource::Path(path) => Err(DocxError::unsupported_image(format!(
            "image path {} reached the emitter without being resolved",
            path.display()
        ))),
    }
}

fn data_uri_regex() -> &'static Regex {
    static DATA_URI_RE: OnceLock<Regex> = OnceLock::new();
    DATA_URI_RE.get_or_init(|| {
        Regex::new(r"(?s)^data:image/([A-Za-z0-9.+-]+);base64,(.*)$").expect("valid data URI regex")
    })
}

fn decode_base64_source(data: &str) -> Result<DecodedImage> {
    if let Some(caps) = data_uri_regex().captures(data) {
        let bytes = decode_base64(&caps[2])?;
        return Ok(DecodedImage {
            extension: extension_for_format(&caps[1]),
            bytes,
        });
    }

    // Not a data URI: the whole string is the payload
    let bytes = decode_base64(data)?;
    Ok(DecodedImage {
        extension: extension_or_fallback(&bytes).to_string(),
        bytes,
    })
}

fn decode_base64(payload: &str) -> Result<Vec<u8>> {
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| DocxError::unsupported_image(format!("invalid base64 image data: {}", e)))
}

/// Map the subtype of a `data:image/<fmt>` URI to a file extension
pub fn extension_for_format(format: &str) -> String {
    match format.to_ascii_lowercase().as_str() {
        "jpeg" | "pjpeg" => "jpg".to_string(),
        "svg+xml" => "svg".to_string(),
        "x-ms-bmp" => "bmp".to_string(),
        other => other.to_string(),
    }
}

/// Detect the image format from its leading bytes
pub fn detect_extension(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        Some("png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpg")
    } else if bytes.starts_with(&[0x47, 0x49, 0x46, 0x38]) {
        Some("gif")
    } else if bytes.starts_with(&[0x42, 0x4D]) {
        Some("bmp")
    } else {
        None
    }
}

fn extension_or_fallback(bytes: &[u8]) -> &'static str {
    detect_extension(bytes).unwrap_or_else(|| {
        warn!(
            "Unrecognised image signature ({} bytes), assuming {}",
            bytes.len(),
            FALLBACK_EXTENSION
        );
        FALLBACK_EXTENSION
    })
}

/// Convert pixels to EMUs at 96 DPI, rounding to the nearest EMU
pub fn pixels_to_emu(pixels: f64) -> i64 {
    (pixels * EMU_PER_PIXEL as f64).round() as i64
}

/// Get the MIME content type for an image extension
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        "tiff" | "tif" => "image/tiff",
        _ => "application/octet-stream",
    }
}
