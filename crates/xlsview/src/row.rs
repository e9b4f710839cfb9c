//! Row snapshots.

use xlsview_biff::RowData;

use crate::cell::Cell;

/// One worksheet row with a cell for every column of the sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Row<'wb> {
    index: u16,
    first_column: u16,
    last_column: u16,
    height: u16,
    flags: u16,
    xf_index: u16,
    xf_flags: u8,
    cells: Vec<Cell<'wb>>,
}

impl<'wb> Row<'wb> {
    pub(crate) fn from_data(data: RowData<'wb>) -> Self {
        Self {
            index: data.index,
            first_column: data.fcell,
            last_column: data.lcell,
            height: data.height,
            flags: data.flags,
            xf_index: data.xf,
            xf_flags: data.xf_flags,
            cells: data.cells.into_iter().map(Cell::from_data).collect(),
        }
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    /// First column with data, as recorded in the ROW record.
    pub fn first_column(&self) -> u16 {
        self.first_column
    }

    /// Last column of the sheet; every cell's column is at most this.
    pub fn last_column(&self) -> u16 {
        self.last_column
    }

    /// Height in twips.
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn xf_index(&self) -> u16 {
        self.xf_index
    }

    pub fn xf_flags(&self) -> u8 {
        self.xf_flags
    }

    pub fn cells(&self) -> &[Cell<'wb>] {
        &self.cells
    }

    /// The cell in `column`, if the row has one.
    ///
    /// Rows are dense, so the cell for column `i` sits at index `i`.
    pub fn cell(&self, column: usize) -> Option<&Cell<'wb>> {
        self.cells.get(column).filter(|c| c.column() as usize == column)
    }
}
