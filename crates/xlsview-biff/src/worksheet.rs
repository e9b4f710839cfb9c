//! Worksheet substream parsing.
//!
//! A worksheet is parsed into a dense table: one [`RowData`] per row from 0
//! to the last row, each holding one [`CellData`] per column from 0 to the
//! last column. Slots without a cell record stay BLANK.

use std::borrow::Cow;

use crate::biff::parser::{trailing_u16, ByteReader};
use crate::biff::strings::read_unicode_string;
use crate::biff::{records, BiffRecord, RecordReader};
use crate::config;
use crate::error::{BiffError, BiffResult};
use crate::workbook::WorkBook;

/// Highest row index a BIFF8 sheet can address.
const MAX_ROW: u16 = u16::MAX;
/// Highest column index a BIFF8 sheet can address.
const MAX_COL: u16 = 255;

/// Column width used when a sheet has no DEFCOLWIDTH record, in characters.
const DEFAULT_COLUMN_CHARS: u16 = 8;

/// `l` value marking a FORMULA cell whose cached result is not a number.
pub const FORMULA_NON_NUMERIC: i64 = 0xFFFF;

/// One cell slot of the table.
///
/// Field meaning depends on `id`, the record that produced the cell:
///
/// | record | `text` | `d` | `l` |
/// |---|---|---|---|
/// | NUMBER, RK, MULRK | display text | value | 0 |
/// | LABEL, RSTRING | decoded text | 0 | 0 |
/// | LABELSST | shared string | 0 | SST index |
/// | BOOLERR | `"bool"` / `"error"` | value | error flag |
/// | FORMULA, number | display text | value | 0 |
/// | FORMULA, other | text, `"bool"`, `"error"` or `""` | value | 0xFFFF |
#[derive(Debug, Clone, PartialEq)]
pub struct CellData<'wb> {
    pub id: u16,
    pub row: u16,
    pub col: u16,
    pub xf: u16,
    pub text: Option<Cow<'wb, str>>,
    pub d: f64,
    pub l: i64,
    /// Column width in 1/256 of a character.
    pub width: u16,
    pub colspan: u16,
    pub rowspan: u16,
    /// Covered by a merged range anchored elsewhere.
    pub is_hidden: bool,
}

impl<'wb> CellData<'wb> {
    fn blank(row: u16, col: u16) -> Self {
        Self {
            id: records::BLANK,
            row,
            col,
            xf: 0,
            text: None,
            d: 0.0,
            l: 0,
            width: 0,
            colspan: 0,
            rowspan: 0,
            is_hidden: false,
        }
    }

    fn set_number(&mut self, id: u16, xf: u16, value: f64) {
        self.id = id;
        self.xf = xf;
        self.d = value;
        self.l = 0;
        self.text = Some(Cow::Owned(value.to_string()));
    }
}

/// One row of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct RowData<'wb> {
    pub index: u16,
    /// First column with data, from the ROW record.
    pub fcell: u16,
    /// Always the table's last column.
    pub lcell: u16,
    /// Height in twips.
    pub height: u16,
    pub flags: u16,
    pub xf: u16,
    pub xf_flags: u8,
    pub cells: Vec<CellData<'wb>>,
}

impl<'wb> RowData<'wb> {
    fn blank(index: u16, last_col: u16) -> Self {
        Self {
            index,
            fcell: 0,
            lcell: last_col,
            height: 0,
            flags: 0,
            xf: 0,
            xf_flags: 0,
            cells: (0..=last_col).map(|col| CellData::blank(index, col)).collect(),
        }
    }
}

/// A COLINFO record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColInfo {
    pub first: u16,
    pub last: u16,
    /// Width in 1/256 of a character.
    pub width: u16,
    pub xf: u16,
    /// Bit 0 hidden, bits 8..10 outline level, bit 12 collapsed.
    pub flags: u16,
}

#[derive(Debug, Clone, Copy)]
struct MergedRange {
    first_row: u16,
    last_row: u16,
    first_col: u16,
    last_col: u16,
}

/// A worksheet handle borrowed from its [`WorkBook`].
pub struct WorkSheet<'wb> {
    workbook: &'wb WorkBook,
    filepos: u32,
    defcolwidth: u16,
    colinfo: Vec<ColInfo>,
    rows: Vec<RowData<'wb>>,
    last_col: u16,
    merged: Vec<MergedRange>,
}

impl<'wb> WorkSheet<'wb> {
    pub(crate) fn new(workbook: &'wb WorkBook, filepos: u32) -> Self {
        Self {
            workbook,
            filepos,
            defcolwidth: DEFAULT_COLUMN_CHARS * 256,
            colinfo: Vec::new(),
            rows: Vec::new(),
            last_col: 0,
            merged: Vec::new(),
        }
    }

    /// Parse the sheet substream into the cell table.
    pub fn parse(&mut self) -> BiffResult<()> {
        let wb: &'wb WorkBook = self.workbook;
        let stream = wb.stream();
        let start = self.filepos as usize;
        if start >= stream.len() {
            return Err(BiffError::Seek(format!(
                "sheet offset {start:#x} is past the end of a {} byte stream",
                stream.len()
            )));
        }

        let debug = config::debug_enabled();
        let trace = config::trace_enabled();
        let mut reader = RecordReader::new(stream, start);
        match reader.next() {
            Some(Ok(rec)) if rec.record_type == records::BOF => {}
            Some(Err(e)) => return Err(e),
            _ => {
                return Err(BiffError::parse(format!(
                    "no BOF record at sheet offset {start:#x}"
                )))
            }
        }

        // Position of the FORMULA cell waiting for its STRING record.
        let mut pending_string: Option<(u16, u16)> = None;
        let mut depth = 0usize;

        for rec in reader {
            let rec = rec?;
            if trace {
                log::trace!(
                    "sheet @{:#x}: {} (0x{:04X}) len={}",
                    rec.stream_offset,
                    records::name(rec.record_type),
                    rec.record_type,
                    rec.data.len()
                );
            }

            // Embedded substreams (charts) carry their own BOF..EOF pairs.
            match rec.record_type {
                records::BOF => {
                    depth += 1;
                    continue;
                }
                records::EOF if depth > 0 => {
                    depth -= 1;
                    continue;
                }
                records::EOF => break,
                _ if depth > 0 => continue,
                _ => {}
            }

            if rec.record_type != records::STRING {
                if matches!(
                    rec.record_type,
                    records::FORMULA | records::FORMULA_ALT | records::ARRAY | records::SHRFMLA
                ) {
                    config::notify_formula(rec.record_type, &rec.data);
                }
                if !matches!(rec.record_type, records::ARRAY | records::SHRFMLA) {
                    pending_string = None;
                }
            }

            self.apply_record(&rec, &mut pending_string)?;
        }

        self.finish();
        if debug {
            log::debug!(
                "sheet at {:#x}: {} rows x {} columns, {} column infos",
                self.filepos,
                self.rows.len(),
                if self.rows.is_empty() { 0 } else { self.last_col as usize + 1 },
                self.colinfo.len()
            );
        }
        Ok(())
    }

    fn apply_record(
        &mut self,
        rec: &BiffRecord<'_>,
        pending_string: &mut Option<(u16, u16)>,
    ) -> BiffResult<()> {
        let mut r = ByteReader::new(&rec.data);
        match rec.record_type {
            records::DIMENSION => self.parse_dimension(&mut r)?,
            records::DEFCOLWIDTH => {
                self.defcolwidth = r.u16()?.saturating_mul(256);
            }
            records::COLINFO => {
                self.colinfo.push(ColInfo {
                    first: r.u16()?,
                    last: r.u16()?,
                    width: r.u16()?,
                    xf: r.u16()?,
                    flags: r.u16()?,
                });
            }
            records::ROW => self.parse_row(&mut r)?,
            records::MERGECELLS => {
                let count = r.u16()?;
                for _ in 0..count {
                    self.merged.push(MergedRange {
                        first_row: r.u16()?,
                        last_row: r.u16()?,
                        first_col: r.u16()?,
                        last_col: r.u16()?,
                    });
                }
            }

            // ── Cell records ─────────────────────────────────────────
            records::BLANK => {
                let (row, col, xf) = cell_header(&mut r)?;
                if let Some(cell) = self.cell_mut(row, col) {
                    cell.id = records::BLANK;
                    cell.xf = xf;
                }
            }
            records::MULBLANK => {
                // row(2) + first_col(2) + [xf(2)]* + last_col(2)
                let row = r.u16()?;
                let first_col = r.u16()?;
                let last_col = trailing_u16(&rec.data).unwrap_or(first_col);
                for col in first_col..=last_col {
                    if r.remaining() < 4 {
                        break;
                    }
                    let xf = r.u16()?;
                    if let Some(cell) = self.cell_mut(row, col) {
                        cell.id = records::MULBLANK;
                        cell.xf = xf;
                    }
                }
            }
            records::NUMBER => {
                let (row, col, xf) = cell_header(&mut r)?;
                let value = r.f64()?;
                if let Some(cell) = self.cell_mut(row, col) {
                    cell.set_number(records::NUMBER, xf, value);
                }
            }
            records::RK => {
                let (row, col, xf) = cell_header(&mut r)?;
                let value = r.rk()?;
                if let Some(cell) = self.cell_mut(row, col) {
                    cell.set_number(records::RK, xf, value);
                }
            }
            records::MULRK => {
                // row(2) + first_col(2) + [xf(2) + rk(4)]* + last_col(2)
                let row = r.u16()?;
                let first_col = r.u16()?;
                let last_col = trailing_u16(&rec.data).unwrap_or(first_col);
                for col in first_col..=last_col {
                    if r.remaining() < 8 {
                        break;
                    }
                    let xf = r.u16()?;
                    let value = r.rk()?;
                    if let Some(cell) = self.cell_mut(row, col) {
                        cell.set_number(records::MULRK, xf, value);
                    }
                }
            }
            records::LABEL | records::RSTRING => {
                let (row, col, xf) = cell_header(&mut r)?;
                let wb = self.workbook;
                let text = read_unicode_string(&mut r, wb.version(), wb.codepage())?;
                let text = wb.target_charset().restrict(text);
                if let Some(cell) = self.cell_mut(row, col) {
                    cell.id = rec.record_type;
                    cell.xf = xf;
                    cell.text = Some(Cow::Owned(text));
                }
            }
            records::LABELSST => {
                let (row, col, xf) = cell_header(&mut r)?;
                let index = r.u32()?;
                let wb: &'wb WorkBook = self.workbook;
                let shared = wb.sst().get(index as usize).map(String::as_str);
                if shared.is_none() {
                    log::warn!("LABELSST at ({row}, {col}) references missing string {index}");
                }
                if let Some(cell) = self.cell_mut(row, col) {
                    cell.id = records::LABELSST;
                    cell.xf = xf;
                    cell.l = index as i64;
                    cell.text = shared.map(Cow::Borrowed);
                }
            }
            records::BOOLERR => {
                // row(2) + col(2) + xf(2) + value(1) + is_error(1)
                let (row, col, xf) = cell_header(&mut r)?;
                let value = r.u8()?;
                let is_error = r.u8()?;
                if let Some(cell) = self.cell_mut(row, col) {
                    cell.id = records::BOOLERR;
                    cell.xf = xf;
                    cell.d = value as f64;
                    cell.l = is_error as i64;
                    cell.text = Some(Cow::Borrowed(if is_error != 0 { "error" } else { "bool" }));
                }
            }
            records::FORMULA | records::FORMULA_ALT => {
                // row(2) + col(2) + xf(2) + result(8) + options(2) + chn(4) + rgce
                let (row, col, xf) = cell_header(&mut r)?;
                let result = r.take(8)?;
                let id = rec.record_type;
                let Some(cell) = self.cell_mut(row, col) else {
                    return Ok(());
                };
                cell.id = id;
                cell.xf = xf;

                // Bytes 6-7 == 0xFFFF mark a non-numeric cached result.
                if result[6] == 0xFF && result[7] == 0xFF {
                    cell.l = FORMULA_NON_NUMERIC;
                    match result[0] {
                        0x00 => {
                            cell.d = 0.0;
                            cell.text = Some(Cow::Borrowed(""));
                            *pending_string = Some((row, col));
                        }
                        0x01 => {
                            cell.d = result[2] as f64;
                            cell.text = Some(Cow::Borrowed("bool"));
                        }
                        0x02 => {
                            cell.d = result[2] as f64;
                            cell.text = Some(Cow::Borrowed("error"));
                        }
                        _ => {
                            cell.d = 0.0;
                            cell.text = Some(Cow::Borrowed(""));
                        }
                    }
                } else {
                    let mut raw = [0u8; 8];
                    raw.copy_from_slice(result);
                    cell.set_number(id, xf, f64::from_le_bytes(raw));
                }
            }
            records::STRING => {
                // Cached string result of the preceding FORMULA
                if let Some((row, col)) = pending_string.take() {
                    let wb = self.workbook;
                    let text = read_unicode_string(&mut r, wb.version(), wb.codepage())?;
                    let text = wb.target_charset().restrict(text);
                    if let Some(cell) = self.cell_mut(row, col) {
                        cell.text = Some(Cow::Owned(text));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// DIMENSION: BIFF8 rwMic(4) rwMac(4) colMic(2) colMac(2); BIFF5 rows are 2 bytes.
    fn parse_dimension(&mut self, r: &mut ByteReader<'_>) -> BiffResult<()> {
        let (_first_row, row_mac) = if self.workbook.is_biff5() {
            (r.u16()? as u32, r.u16()? as u32)
        } else {
            (r.u32()?, r.u32()?)
        };
        let _first_col = r.u16()?;
        let col_mac = r.u16()?;

        // rwMac and colMac are one past the last used index; zero means the
        // sheet has no cells.
        if row_mac == 0 || col_mac == 0 {
            return Ok(());
        }
        let last_row = row_mac.saturating_sub(1).min(MAX_ROW as u32) as u16;
        let last_col = col_mac.saturating_sub(1).min(MAX_COL);
        self.grow(last_row, last_col);
        Ok(())
    }

    /// ROW: rw(2) colMic(2) colMac(2) miyRw(2) reserved(4) grbit(2) ixfe(2)
    fn parse_row(&mut self, r: &mut ByteReader<'_>) -> BiffResult<()> {
        let index = r.u16()?;
        let first_col = r.u16()?;
        let _col_mac = r.u16()?;
        let height = r.u16()?;
        r.skip(4);
        let flags = r.u16().unwrap_or(0);
        let ixfe = r.u16().unwrap_or(0);

        let last_col = self.last_col;
        self.grow(index, last_col);
        if let Some(row) = self.rows.get_mut(index as usize) {
            row.fcell = first_col;
            row.height = height;
            row.flags = flags;
            row.xf = ixfe & 0x0FFF;
            row.xf_flags = (ixfe >> 12) as u8;
        }
        Ok(())
    }

    /// Grow the table so it covers (`last_row`, `last_col`).
    fn grow(&mut self, last_row: u16, last_col: u16) {
        let last_col = last_col.min(MAX_COL);
        if self.rows.is_empty() {
            self.last_col = last_col;
        } else if last_col > self.last_col {
            for row in &mut self.rows {
                let index = row.index;
                row.cells
                    .extend((self.last_col + 1..=last_col).map(|col| CellData::blank(index, col)));
                row.lcell = last_col;
            }
            self.last_col = last_col;
        }

        let wanted = last_row as usize + 1;
        if wanted > self.rows.len() {
            let start = self.rows.len();
            let cols = self.last_col;
            self.rows
                .extend((start..wanted).map(|index| RowData::blank(index as u16, cols)));
        }
    }

    fn cell_mut(&mut self, row: u16, col: u16) -> Option<&mut CellData<'wb>> {
        if col > MAX_COL {
            log::warn!("ignoring cell ({row}, {col}) beyond column {MAX_COL}");
            return None;
        }
        self.grow(row, col);
        self.rows
            .get_mut(row as usize)
            .and_then(|r| r.cells.get_mut(col as usize))
    }

    /// Apply column widths and merged ranges once every record is in.
    ///
    /// A merge covering a whole column spans 65536 rows, which saturates the
    /// `u16` span at `u16::MAX`.
    fn finish(&mut self) {
        let defcolwidth = self.defcolwidth;
        let colinfo = &self.colinfo;
        for row in &mut self.rows {
            for cell in &mut row.cells {
                cell.width = colinfo
                    .iter()
                    .find(|ci| ci.first <= cell.col && cell.col <= ci.last)
                    .map_or(defcolwidth, |ci| ci.width);
            }
        }

        for range in std::mem::take(&mut self.merged) {
            if range.first_row > range.last_row || range.first_col > range.last_col {
                continue;
            }
            for row in range.first_row..=range.last_row {
                for col in range.first_col..=range.last_col {
                    let Some(cell) = self
                        .rows
                        .get_mut(row as usize)
                        .and_then(|r| r.cells.get_mut(col as usize))
                    else {
                        continue;
                    };
                    if row == range.first_row && col == range.first_col {
                        cell.colspan = span(range.first_col, range.last_col);
                        cell.rowspan = span(range.first_row, range.last_row);
                    } else {
                        cell.is_hidden = true;
                    }
                }
            }
        }
    }

    /// Default column width in 1/256 of a character.
    pub fn defcolwidth(&self) -> u16 {
        self.defcolwidth
    }

    pub fn colinfo(&self) -> &[ColInfo] {
        &self.colinfo
    }

    pub fn rows(&self) -> &[RowData<'wb>] {
        &self.rows
    }

    /// Index of the last row, or `None` for an empty table.
    pub fn last_row(&self) -> Option<u16> {
        self.rows.last().map(|r| r.index)
    }

    /// Index of the last column, or `None` for an empty table.
    pub fn last_col(&self) -> Option<u16> {
        (!self.rows.is_empty()).then_some(self.last_col)
    }

    /// Take ownership of the rows, consuming the handle.
    pub fn into_rows(self) -> Vec<RowData<'wb>> {
        self.rows
    }
}

/// Common cell record prefix: row(2) + col(2) + xf(2).
fn cell_header(r: &mut ByteReader<'_>) -> BiffResult<(u16, u16, u16)> {
    Ok((r.u16()?, r.u16()?, r.u16()?))
}

/// Number of indices in `first..=last`, saturated to `u16`.
fn span(first: u16, last: u16) -> u16 {
    let count = u32::from(last) - u32::from(first) + 1;
    u16::try_from(count).unwrap_or(u16::MAX)
}
