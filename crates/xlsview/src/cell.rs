//! Cell snapshots.

use std::borrow::Cow;

use xlsview_biff::CellData;

use crate::value::CellValue;

/// One worksheet cell.
///
/// Text from the shared string table is borrowed from the workbook for
/// `'wb`; [`Cell::into_owned`] detaches it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cell<'wb> {
    #[cfg_attr(feature = "serde", serde(skip))]
    id: u16,
    row: u16,
    column: u16,
    xf_index: u16,
    string: Option<Cow<'wb, str>>,
    double_value: f64,
    int_value: i64,
    width: u16,
    colspan: u16,
    rowspan: u16,
    is_hidden: bool,
}

impl<'wb> Cell<'wb> {
    pub(crate) fn from_data(data: CellData<'wb>) -> Self {
        Self {
            id: data.id,
            row: data.row,
            column: data.col,
            xf_index: data.xf,
            string: data.text,
            double_value: data.d,
            int_value: data.l,
            width: data.width,
            colspan: data.colspan,
            rowspan: data.rowspan,
            is_hidden: data.is_hidden,
        }
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn column(&self) -> u16 {
        self.column
    }

    /// Index into the workbook's extended formats.
    pub fn xf_index(&self) -> u16 {
        self.xf_index
    }

    /// Raw string payload: display text for numbers, the text of labels,
    /// or a result marker for formulas and BOOLERR records.
    pub fn string(&self) -> Option<&str> {
        self.string.as_deref()
    }

    pub fn double_value(&self) -> f64 {
        self.double_value
    }

    /// Raw integer payload: the SST index for shared strings, the error
    /// flag for BOOLERR, nonzero for formulas with a non-numeric result.
    pub fn int_value(&self) -> i64 {
        self.int_value
    }

    /// Column width in 1/256 of a character.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Columns spanned when this cell anchors a merged range, else 0.
    pub fn colspan(&self) -> u16 {
        self.colspan
    }

    /// Rows spanned when this cell anchors a merged range, else 0.
    pub fn rowspan(&self) -> u16 {
        self.rowspan
    }

    /// Covered by a merged range anchored at another cell.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// The semantic value, resolved on every call.
    pub fn value(&self) -> CellValue {
        CellValue::decode(self.id, self.string(), self.double_value, self.int_value)
    }

    pub fn is_blank(&self) -> bool {
        self.value() == CellValue::Blank
    }

    /// Detach from the workbook's shared strings.
    pub fn into_owned(self) -> Cell<'static> {
        Cell {
            id: self.id,
            row: self.row,
            column: self.column,
            xf_index: self.xf_index,
            string: self.string.map(|s| Cow::Owned(s.into_owned())),
            double_value: self.double_value,
            int_value: self.int_value,
            width: self.width,
            colspan: self.colspan,
            rowspan: self.rowspan,
            is_hidden: self.is_hidden,
        }
    }
}
