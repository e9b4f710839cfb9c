//! Workbook style tables: fonts, number formats and extended formats.

use xlsview_biff::{RawFont, RawFormat, RawXf};

/// A FONT record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Font {
    /// Font name; `None` when the record carries an empty name
    pub name: Option<String>,
    /// Height in twips
    pub height: u16,
    /// Option flags (bit 1 italic, bit 3 strikeout)
    pub flag: u16,
    /// Palette color index
    pub color: u16,
    /// Weight, 400 normal and 700 bold
    pub bold: u16,
    /// 0 none, 1 superscript, 2 subscript
    pub escapement: u16,
    pub underline: u8,
    pub family: u8,
    pub charset: u8,
}

impl Font {
    pub fn is_bold(&self) -> bool {
        self.bold >= 700
    }

    pub fn is_italic(&self) -> bool {
        self.flag & 0x0002 != 0
    }

    /// Size in points
    pub fn size(&self) -> f64 {
        f64::from(self.height) / 20.0
    }
}

impl From<&RawFont> for Font {
    fn from(raw: &RawFont) -> Self {
        Self {
            name: non_empty(&raw.name),
            height: raw.height,
            flag: raw.flag,
            color: raw.color,
            bold: raw.bold,
            escapement: raw.escapement,
            underline: raw.underline,
            family: raw.family,
            charset: raw.charset,
        }
    }
}

/// A FORMAT record: a number format pattern and the index XFs refer to it by
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NumberFormat {
    pub index: u16,
    pub value: Option<String>,
}

impl From<&RawFormat> for NumberFormat {
    fn from(raw: &RawFormat) -> Self {
        Self {
            index: raw.index,
            value: non_empty(&raw.value),
        }
    }
}

/// An XF record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtendedFormat {
    /// Index into the font table
    pub font_index: u16,
    /// Number format index
    pub format_index: u16,
    /// Cell/style flags and parent style index
    pub xf_type: u16,
    pub alignment: u8,
    pub rotation: u8,
    pub indent: u8,
    /// Bitmask of attribute groups this XF sets
    pub used_attributes: u8,
    /// Border line styles
    pub line_style: u32,
    /// Border line colors
    pub line_color: u32,
    /// Fill pattern colors
    pub background_color: u16,
}

impl ExtendedFormat {
    /// Whether this is a style XF rather than a cell XF
    pub fn is_style(&self) -> bool {
        self.xf_type & 0x0004 != 0
    }
}

impl From<&RawXf> for ExtendedFormat {
    fn from(raw: &RawXf) -> Self {
        Self {
            font_index: raw.font,
            format_index: raw.format,
            xf_type: raw.xf_type,
            alignment: raw.align,
            rotation: raw.rotation,
            indent: raw.ident,
            used_attributes: raw.usedattr,
            line_style: raw.linestyle,
            line_color: raw.linecolor,
            background_color: raw.groundcolor,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
