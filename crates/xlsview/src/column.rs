//! Column formatting

use xlsview_biff::ColInfo;

/// Formatting for a range of columns (a COLINFO record)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnInfo {
    /// First column of the range
    pub first_column: u16,
    /// Last column of the range (inclusive)
    pub last_column: u16,
    /// Width in 1/256 of a character
    pub width: u16,
    /// Extended format index
    pub xf_index: u16,
    /// Option flags
    pub flags: u16,
}

impl ColumnInfo {
    pub fn is_hidden(&self) -> bool {
        self.flags & 0x0001 != 0
    }

    /// Outline level, 0 to 7
    pub fn outline_level(&self) -> u8 {
        ((self.flags >> 8) & 0x07) as u8
    }

    /// Whether `column` falls in this range
    pub fn contains(&self, column: u16) -> bool {
        self.first_column <= column && column <= self.last_column
    }
}

impl From<&ColInfo> for ColumnInfo {
    fn from(raw: &ColInfo) -> Self {
        Self {
            first_column: raw.first,
            last_column: raw.last,
            width: raw.width,
            xf_index: raw.xf,
            flags: raw.flags,
        }
    }
}
