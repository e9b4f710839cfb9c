//! In-memory `.xls` fixtures for engine tests.
//!
//! Workbooks are assembled record by record and wrapped in a CFB container,
//! so no binary fixtures are checked in.

#![allow(dead_code)]

use std::io::{Cursor, Write};

pub const BOF: u16 = 0x0809;
pub const EOF: u16 = 0x000A;
pub const CONTINUE: u16 = 0x003C;
pub const BOUNDSHEET: u16 = 0x0085;
pub const SST: u16 = 0x00FC;
pub const CODEPAGE: u16 = 0x0042;
pub const DATEMODE: u16 = 0x0022;
pub const WINDOW1: u16 = 0x003D;
pub const FILEPASS: u16 = 0x002F;
pub const FONT: u16 = 0x0031;
pub const FORMAT: u16 = 0x041E;
pub const XF: u16 = 0x00E0;
pub const DIMENSION: u16 = 0x0200;
pub const ROW: u16 = 0x0208;
pub const COLINFO: u16 = 0x007D;
pub const DEFCOLWIDTH: u16 = 0x0055;
pub const MERGECELLS: u16 = 0x00E5;
pub const BLANK: u16 = 0x0201;
pub const NUMBER: u16 = 0x0203;
pub const LABEL: u16 = 0x0204;
pub const BOOLERR: u16 = 0x0205;
pub const RK: u16 = 0x027E;
pub const MULRK: u16 = 0x00BD;
pub const FORMULA: u16 = 0x0006;
pub const LABELSST: u16 = 0x00FD;
pub const STRING: u16 = 0x0207;

/// Encode one record.
pub fn record(id: u16, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 4);
    out.extend_from_slice(&id.to_le_bytes());
    out.extend_from_slice(&(body.len() as u16).to_le_bytes());
    out.extend_from_slice(body);
    out
}

/// BIFF8 unicode string with a 2-byte length (compressed when Latin-1).
pub fn unicode_string(text: &str) -> Vec<u8> {
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut out = (units.len() as u16).to_le_bytes().to_vec();
    if units.iter().all(|&u| u < 0x100) {
        out.push(0x00);
        out.extend(units.iter().map(|&u| u as u8));
    } else {
        out.push(0x01);
        for u in units {
            out.extend_from_slice(&u.to_le_bytes());
        }
    }
    out
}

fn cell_prefix(row: u16, col: u16, xf: u16) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&row.to_le_bytes());
    out.extend_from_slice(&col.to_le_bytes());
    out.extend_from_slice(&xf.to_le_bytes());
    out
}

pub fn dimension(rows: u32, cols: u16) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&0u32.to_le_bytes());
    body.extend_from_slice(&rows.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());
    body.extend_from_slice(&cols.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());
    record(DIMENSION, &body)
}

pub fn number(row: u16, col: u16, value: f64) -> Vec<u8> {
    let mut body = cell_prefix(row, col, 15);
    body.extend_from_slice(&value.to_le_bytes());
    record(NUMBER, &body)
}

pub fn rk_int(row: u16, col: u16, value: i32) -> Vec<u8> {
    let mut body = cell_prefix(row, col, 15);
    body.extend_from_slice(&(((value << 2) | 0x02) as u32).to_le_bytes());
    record(RK, &body)
}

pub fn label(row: u16, col: u16, text: &str) -> Vec<u8> {
    let mut body = cell_prefix(row, col, 15);
    body.extend(unicode_string(text));
    record(LABEL, &body)
}

pub fn label_sst(row: u16, col: u16, index: u32) -> Vec<u8> {
    let mut body = cell_prefix(row, col, 15);
    body.extend_from_slice(&index.to_le_bytes());
    record(LABELSST, &body)
}

pub fn boolerr(row: u16, col: u16, value: u8, is_error: bool) -> Vec<u8> {
    let mut body = cell_prefix(row, col, 15);
    body.push(value);
    body.push(is_error as u8);
    record(BOOLERR, &body)
}

pub fn blank(row: u16, col: u16, xf: u16) -> Vec<u8> {
    record(BLANK, &cell_prefix(row, col, xf))
}

fn formula_with_result(row: u16, col: u16, result: [u8; 8]) -> Vec<u8> {
    let mut body = cell_prefix(row, col, 15);
    body.extend_from_slice(&result);
    body.extend_from_slice(&0u16.to_le_bytes()); // options
    body.extend_from_slice(&0u32.to_le_bytes()); // chn
    body.extend_from_slice(&[0x03, 0x00, 0x1E, 0x01, 0x00]); // rgce: tInt 1
    record(FORMULA, &body)
}

pub fn formula_number(row: u16, col: u16, value: f64) -> Vec<u8> {
    formula_with_result(row, col, value.to_le_bytes())
}

/// FORMULA with a string result, followed by its STRING record.
pub fn formula_string(row: u16, col: u16, text: &str) -> Vec<u8> {
    let mut out = formula_with_result(row, col, [0x00, 0, 0, 0, 0, 0, 0xFF, 0xFF]);
    out.extend(record(STRING, &unicode_string(text)));
    out
}

pub fn formula_bool(row: u16, col: u16, value: bool) -> Vec<u8> {
    formula_with_result(row, col, [0x01, 0, value as u8, 0, 0, 0, 0xFF, 0xFF])
}

pub fn formula_error(row: u16, col: u16, code: u8) -> Vec<u8> {
    formula_with_result(row, col, [0x02, 0, code, 0, 0, 0, 0xFF, 0xFF])
}

pub fn formula_empty(row: u16, col: u16) -> Vec<u8> {
    formula_with_result(row, col, [0x03, 0, 0, 0, 0, 0, 0xFF, 0xFF])
}

pub fn row_record(index: u16, first_col: u16, last_col_plus1: u16, height: u16, ixfe: u16) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&index.to_le_bytes());
    body.extend_from_slice(&first_col.to_le_bytes());
    body.extend_from_slice(&last_col_plus1.to_le_bytes());
    body.extend_from_slice(&height.to_le_bytes());
    body.extend_from_slice(&[0u8; 4]);
    body.extend_from_slice(&0x0100u16.to_le_bytes());
    body.extend_from_slice(&ixfe.to_le_bytes());
    record(ROW, &body)
}

pub fn colinfo(first: u16, last: u16, width: u16, flags: u16) -> Vec<u8> {
    let mut body = Vec::new();
    for v in [first, last, width, 15, flags, 0] {
        body.extend_from_slice(&v.to_le_bytes());
    }
    record(COLINFO, &body)
}

pub fn defcolwidth(chars: u16) -> Vec<u8> {
    record(DEFCOLWIDTH, &chars.to_le_bytes())
}

pub fn mergecells(ranges: &[(u16, u16, u16, u16)]) -> Vec<u8> {
    let mut body = (ranges.len() as u16).to_le_bytes().to_vec();
    for &(fr, lr, fc, lc) in ranges {
        for v in [fr, lr, fc, lc] {
            body.extend_from_slice(&v.to_le_bytes());
        }
    }
    record(MERGECELLS, &body)
}

/// A sheet to place in the fixture.
pub struct SheetFixture {
    pub name: String,
    pub visibility: u8,
    pub sheet_type: u8,
    /// Records between the sheet BOF and EOF.
    pub body: Vec<u8>,
}

impl SheetFixture {
    pub fn new(name: &str, body: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            visibility: 0,
            sheet_type: 0,
            body,
        }
    }

    pub fn hidden(mut self, visibility: u8) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Builds a BIFF8 workbook stream and wraps it in a CFB container.
#[derive(Default)]
pub struct XlsFixture {
    pub sst: Vec<String>,
    pub sheets: Vec<SheetFixture>,
    /// Extra records appended to the globals before the sheet directory.
    pub globals: Vec<u8>,
    pub active_sheet: u16,
    /// Named streams to add next to the workbook stream.
    pub streams: Vec<(String, Vec<u8>)>,
}

impl XlsFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sst(mut self, strings: &[&str]) -> Self {
        self.sst = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn sheet(mut self, sheet: SheetFixture) -> Self {
        self.sheets.push(sheet);
        self
    }

    pub fn global_record(mut self, rec: Vec<u8>) -> Self {
        self.globals.extend(rec);
        self
    }

    pub fn stream(mut self, name: &str, data: Vec<u8>) -> Self {
        self.streams.push((name.to_string(), data));
        self
    }

    fn globals_stream(&self, positions: &[u32]) -> Vec<u8> {
        let mut out = record(BOF, &bof_body(0x0005));
        out.extend(record(CODEPAGE, &1200u16.to_le_bytes()));
        let mut window1 = vec![0u8; 18];
        window1[10..12].copy_from_slice(&self.active_sheet.to_le_bytes());
        out.extend(record(WINDOW1, &window1));
        out.extend(record(DATEMODE, &0u16.to_le_bytes()));
        out.extend(font_record("Arial"));
        out.extend(record(XF, &[0u8; 20]));
        out.extend_from_slice(&self.globals);

        for (sheet, &pos) in self.sheets.iter().zip(positions) {
            let mut body = pos.to_le_bytes().to_vec();
            body.push(sheet.visibility);
            body.push(sheet.sheet_type);
            body.push(sheet.name.len() as u8);
            body.push(0x00);
            body.extend_from_slice(sheet.name.as_bytes());
            out.extend(record(BOUNDSHEET, &body));
        }

        if !self.sst.is_empty() {
            let mut body = Vec::new();
            body.extend_from_slice(&(self.sst.len() as u32).to_le_bytes());
            body.extend_from_slice(&(self.sst.len() as u32).to_le_bytes());
            for s in &self.sst {
                body.extend(unicode_string(s));
            }
            out.extend(record(SST, &body));
        }
        out.extend(record(EOF, &[]));
        out
    }

    /// The raw BIFF stream.
    pub fn workbook_stream(&self) -> Vec<u8> {
        let placeholder = vec![0u32; self.sheets.len()];
        let globals_len = self.globals_stream(&placeholder).len();

        let mut sheet_streams = Vec::new();
        let mut positions = Vec::new();
        let mut pos = globals_len;
        for sheet in &self.sheets {
            let mut s = record(BOF, &bof_body(0x0010));
            s.extend_from_slice(&sheet.body);
            s.extend(record(EOF, &[]));
            positions.push(pos as u32);
            pos += s.len();
            sheet_streams.push(s);
        }

        let mut out = self.globals_stream(&positions);
        for s in sheet_streams {
            out.extend(s);
        }
        out
    }

    /// The complete `.xls` file.
    pub fn build(&self) -> Vec<u8> {
        let mut streams = vec![("/Workbook".to_string(), self.workbook_stream())];
        streams.extend(self.streams.iter().cloned());
        cfb_file(&streams)
    }
}

fn bof_body(dt: u16) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&0x0600u16.to_le_bytes());
    body.extend_from_slice(&dt.to_le_bytes());
    body.extend_from_slice(&[0u8; 12]);
    body
}

pub fn font_record(name: &str) -> Vec<u8> {
    let mut body = Vec::new();
    for v in [200u16, 0, 0x7FFF, 400, 0] {
        body.extend_from_slice(&v.to_le_bytes());
    }
    body.extend_from_slice(&[0, 0, 0, 0]);
    body.push(name.len() as u8);
    body.push(0x00);
    body.extend_from_slice(name.as_bytes());
    record(FONT, &body)
}

/// Wrap named streams in a CFB container.
pub fn cfb_file(streams: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut comp = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
    for (name, data) in streams {
        let mut stream = comp.create_stream(name).unwrap();
        stream.write_all(data).unwrap();
        stream.flush().unwrap();
    }
    comp.flush().unwrap();
    comp.into_inner().into_inner()
}
