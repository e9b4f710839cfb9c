//! Worksheet snapshots.

use xlsview_biff::WorkSheet;

use crate::cell::Cell;
use crate::column::ColumnInfo;
use crate::row::Row;

/// A parsed worksheet.
///
/// Only reachable through [`Workbook::with_worksheet`](crate::Workbook::with_worksheet)
/// and its fallible variant, as a reference that cannot leave the callback.
/// Rows and cells borrowed from it are tied to that reference.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Worksheet<'wb> {
    default_column_width: u16,
    column_infos: Vec<ColumnInfo>,
    column_count: usize,
    rows: Vec<Row<'wb>>,
}

impl<'wb> Worksheet<'wb> {
    /// Snapshot a parsed engine sheet, releasing it.
    pub(crate) fn from_engine(sheet: WorkSheet<'wb>) -> Self {
        let default_column_width = sheet.defcolwidth();
        let column_infos = sheet.colinfo().iter().map(ColumnInfo::from).collect();
        let column_count = sheet.last_col().map_or(0, |c| c as usize + 1);
        let rows = sheet.into_rows().into_iter().map(Row::from_data).collect();
        Self {
            default_column_width,
            column_infos,
            column_count,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Default column width in 1/256 of a character.
    pub fn default_column_width(&self) -> u16 {
        self.default_column_width
    }

    pub fn column_infos(&self) -> &[ColumnInfo] {
        &self.column_infos
    }

    /// The row at `index`, or `None` past the last row.
    pub fn row(&self, index: usize) -> Option<&Row<'wb>> {
        self.rows.get(index)
    }

    /// The cell at (`row`, `column`).
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell<'wb>> {
        self.row(row)?.cell(column)
    }

    pub fn rows(&self) -> std::slice::Iter<'_, Row<'wb>> {
        self.rows.iter()
    }

    /// Visit every row in order, stopping at the first error.
    pub fn for_each_row<E, F>(&self, mut f: F) -> std::result::Result<(), E>
    where
        F: FnMut(&Row<'wb>) -> std::result::Result<(), E>,
    {
        for row in &self.rows {
            f(row)?;
        }
        Ok(())
    }
}

impl<'a, 'wb> IntoIterator for &'a Worksheet<'wb> {
    type Item = &'a Row<'wb>;
    type IntoIter = std::slice::Iter<'a, Row<'wb>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
