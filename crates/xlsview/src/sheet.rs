//! Sheet directory entries.

use xlsview_biff::RawSheet;

/// Visibility state of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SheetVisibility {
    #[default]
    Visible,
    Hidden,
    /// Hidden and not listed in Excel's unhide dialog
    VeryHidden,
}

impl SheetVisibility {
    /// Map a BOUNDSHEET visibility byte. Unknown values are visible.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => SheetVisibility::Hidden,
            2 => SheetVisibility::VeryHidden,
            _ => SheetVisibility::Visible,
        }
    }
}

/// One entry of the workbook's sheet directory
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SheetInfo {
    pub name: String,
    pub visibility: SheetVisibility,
    /// BOUNDSHEET sheet type: 0 worksheet, 2 chart, 6 VBA module
    pub sheet_type: u8,
}

impl From<&RawSheet> for SheetInfo {
    fn from(raw: &RawSheet) -> Self {
        Self {
            name: raw.name.clone(),
            visibility: SheetVisibility::from_raw(raw.visibility),
            sheet_type: raw.sheet_type,
        }
    }
}
