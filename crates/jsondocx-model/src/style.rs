//! Formatting attributes shared by text, paragraphs and table cells

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a paragraph, image or table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
    Center,
    Justify,
}

/// Vertical alignment of table cell content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    Top,
    Middle,
    Bottom,
}

/// Optional formatting attributes
///
/// Every field is optional; an absent field means "no instruction", not a
/// default value. A style is applied wholesale: a child that carries its own
/// style replaces the inherited one entirely, fields are never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    /// Text colour as hex RGB without `#` (e.g. `FF0000`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,
    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Line spacing multiplier (1.0 = single)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    /// Table cell width in twips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Table cell shading as hex RGB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Table cell vertical alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlignment>,
}

impl Style {
    /// Create an empty style
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn font_size(mut self, points: f64) -> Self {
        self.font_size = Some(points);
        self
    }

    pub fn line_spacing(mut self, multiplier: f64) -> Self {
        self.line_spacing = Some(multiplier);
        self
    }

    pub fn width(mut self, twips: u32) -> Self {
        self.width = Some(twips);
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn vertical_align(mut self, align: VerticalAlignment) -> Self {
        self.vertical_align = Some(align);
        self
    }
}
