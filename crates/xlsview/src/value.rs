//! Semantic cell values.

use std::fmt;

use xlsview_biff::biff::records;

/// What a cell holds, resolved from the record that produced it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CellValue {
    /// No content
    Blank,
    /// Text, including shared strings and cached formula strings
    Text(String),
    /// Numeric value (dates are numbers; see the workbook's date system)
    Number(f64),
    /// Cached boolean formula result
    Boolean(bool),
    /// Cached formula error code
    Error(i32),
    /// A record this reader does not interpret
    Unknown,
}

impl CellValue {
    /// Resolve a raw cell record into a value.
    ///
    /// Formula records report their cached result type out of band: `l`
    /// is 0 for a number, otherwise the string payload is `"bool"`,
    /// `"error"` or the result text.
    pub(crate) fn decode(id: u16, string: Option<&str>, d: f64, l: i64) -> Self {
        let text = || CellValue::Text(string.unwrap_or_default().to_string());
        match id {
            records::BLANK | records::MULBLANK => CellValue::Blank,
            records::FORMULA | records::FORMULA_ALT => {
                if l == 0 {
                    CellValue::Number(d)
                } else {
                    match string {
                        Some("bool") => CellValue::Boolean(d != 0.0),
                        Some("error") => CellValue::Error(d as i32),
                        _ => text(),
                    }
                }
            }
            records::LABELSST | records::LABEL | records::RSTRING => text(),
            records::NUMBER | records::RK | records::MULRK => CellValue::Number(d),
            records::BOOLERR => text(),
            _ => CellValue::Unknown,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// Text content, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Blank => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Error(code) => write!(f, "#ERR({code})"),
            CellValue::Unknown => write!(f, "?"),
        }
    }
}
