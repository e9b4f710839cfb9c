//! Synthetic `.xls` workbooks built in memory.

#![allow(dead_code)]

use std::io::{Cursor, Write};

pub const FORMULA: u16 = 0x0006;

pub fn record(id: u16, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 4);
    out.extend_from_slice(&id.to_le_bytes());
    out.extend_from_slice(&(body.len() as u16).to_le_bytes());
    out.extend_from_slice(body);
    out
}

/// BIFF8 string with a 2-byte character count, stored compressed.
pub fn unicode_string(text: &str) -> Vec<u8> {
    let mut out = (text.len() as u16).to_le_bytes().to_vec();
    out.push(0x00);
    out.extend_from_slice(text.as_bytes());
    out
}

fn cell(id: u16, row: u16, col: u16, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&row.to_le_bytes());
    body.extend_from_slice(&col.to_le_bytes());
    body.extend_from_slice(&15u16.to_le_bytes());
    body.extend_from_slice(payload);
    record(id, &body)
}

pub fn dimension(rows: u32, cols: u16) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&0u32.to_le_bytes());
    body.extend_from_slice(&rows.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());
    body.extend_from_slice(&cols.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());
    record(0x0200, &body)
}

pub fn number(row: u16, col: u16, value: f64) -> Vec<u8> {
    cell(0x0203, row, col, &value.to_le_bytes())
}

pub fn label(row: u16, col: u16, text: &str) -> Vec<u8> {
    cell(0x0204, row, col, &unicode_string(text))
}

pub fn label_sst(row: u16, col: u16, index: u32) -> Vec<u8> {
    cell(0x00FD, row, col, &index.to_le_bytes())
}

pub fn boolerr(row: u16, col: u16, value: u8, is_error: bool) -> Vec<u8> {
    cell(0x0205, row, col, &[value, is_error as u8])
}

pub fn blank(row: u16, col: u16) -> Vec<u8> {
    cell(0x0201, row, col, &[])
}

fn formula(row: u16, col: u16, result: [u8; 8]) -> Vec<u8> {
    let mut payload = result.to_vec();
    payload.extend_from_slice(&[0u8; 6]); // options + chn
    payload.extend_from_slice(&[0x03, 0x00, 0x1E, 0x01, 0x00]);
    cell(FORMULA, row, col, &payload)
}

pub fn formula_number(row: u16, col: u16, value: f64) -> Vec<u8> {
    formula(row, col, value.to_le_bytes())
}

pub fn formula_string(row: u16, col: u16, text: &str) -> Vec<u8> {
    let mut out = formula(row, col, [0x00, 0, 0, 0, 0, 0, 0xFF, 0xFF]);
    out.extend(record(0x0207, &unicode_string(text)));
    out
}

pub fn formula_bool(row: u16, col: u16, value: bool) -> Vec<u8> {
    formula(row, col, [0x01, 0, value as u8, 0, 0, 0, 0xFF, 0xFF])
}

pub fn formula_error(row: u16, col: u16, code: u8) -> Vec<u8> {
    formula(row, col, [0x02, 0, code, 0, 0, 0, 0xFF, 0xFF])
}

pub fn colinfo(first: u16, last: u16, width: u16, flags: u16) -> Vec<u8> {
    let mut body = Vec::new();
    for v in [first, last, width, 15, flags, 0] {
        body.extend_from_slice(&v.to_le_bytes());
    }
    record(0x007D, &body)
}

pub fn defcolwidth(chars: u16) -> Vec<u8> {
    record(0x0055, &chars.to_le_bytes())
}

pub fn mergecells(first_row: u16, last_row: u16, first_col: u16, last_col: u16) -> Vec<u8> {
    let mut body = 1u16.to_le_bytes().to_vec();
    for v in [first_row, last_row, first_col, last_col] {
        body.extend_from_slice(&v.to_le_bytes());
    }
    record(0x00E5, &body)
}

pub fn font(name: &str, height: u16, weight: u16) -> Vec<u8> {
    let mut body = Vec::new();
    for v in [height, 0, 0x7FFF, weight, 0] {
        body.extend_from_slice(&v.to_le_bytes());
    }
    body.extend_from_slice(&[0, 0, 0, 0]);
    body.push(name.len() as u8);
    body.push(0x00);
    body.extend_from_slice(name.as_bytes());
    record(0x0031, &body)
}

pub fn format(index: u16, pattern: &str) -> Vec<u8> {
    let mut body = index.to_le_bytes().to_vec();
    body.extend(unicode_string(pattern));
    record(0x041E, &body)
}

pub fn xf(font: u16, format: u16) -> Vec<u8> {
    let mut body = [0u8; 20];
    body[0..2].copy_from_slice(&font.to_le_bytes());
    body[2..4].copy_from_slice(&format.to_le_bytes());
    record(0x00E0, &body)
}

pub struct Sheet {
    name: String,
    visibility: u8,
    body: Vec<u8>,
}

impl Sheet {
    pub fn new(name: &str, records: &[Vec<u8>]) -> Self {
        Self {
            name: name.to_string(),
            visibility: 0,
            body: records.concat(),
        }
    }

    pub fn visibility(mut self, visibility: u8) -> Self {
        self.visibility = visibility;
        self
    }
}

/// A BIFF8 workbook in a CFB container.
#[derive(Default)]
pub struct Fixture {
    sst: Vec<String>,
    sheets: Vec<Sheet>,
    globals: Vec<u8>,
    active_sheet: u16,
    date1904: bool,
    streams: Vec<(String, Vec<u8>)>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sst(mut self, strings: &[&str]) -> Self {
        self.sst = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    pub fn globals(mut self, records: &[Vec<u8>]) -> Self {
        self.globals.extend(records.concat());
        self
    }

    pub fn active_sheet(mut self, index: u16) -> Self {
        self.active_sheet = index;
        self
    }

    pub fn date1904(mut self) -> Self {
        self.date1904 = true;
        self
    }

    pub fn stream(mut self, name: &str, data: Vec<u8>) -> Self {
        self.streams.push((name.to_string(), data));
        self
    }

    fn globals_stream(&self, positions: &[u32]) -> Vec<u8> {
        let mut out = record(0x0809, &bof(0x0005));
        out.extend(record(0x0042, &1200u16.to_le_bytes()));
        let mut window1 = vec![0u8; 18];
        window1[10..12].copy_from_slice(&self.active_sheet.to_le_bytes());
        out.extend(record(0x003D, &window1));
        out.extend(record(0x0022, &(self.date1904 as u16).to_le_bytes()));
        out.extend_from_slice(&self.globals);
        for (sheet, pos) in self.sheets.iter().zip(positions) {
            let mut body = pos.to_le_bytes().to_vec();
            body.extend_from_slice(&[sheet.visibility, 0, sheet.name.len() as u8, 0]);
            body.extend_from_slice(sheet.name.as_bytes());
            out.extend(record(0x0085, &body));
        }
        if !self.sst.is_empty() {
            let count = (self.sst.len() as u32).to_le_bytes();
            let mut body = [count, count].concat();
            for s in &self.sst {
                body.extend(unicode_string(s));
            }
            out.extend(record(0x00FC, &body));
        }
        out.extend(record(0x000A, &[]));
        out
    }

    pub fn build(&self) -> Vec<u8> {
        let globals_len = self.globals_stream(&vec![0; self.sheets.len()]).len();
        let mut positions = Vec::new();
        let mut sheets = Vec::new();
        for sheet in &self.sheets {
            positions.push((globals_len + sheets.len()) as u32);
            sheets.extend(record(0x0809, &bof(0x0010)));
            sheets.extend_from_slice(&sheet.body);
            sheets.extend(record(0x000A, &[]));
        }
        let mut stream = self.globals_stream(&positions);
        stream.extend(sheets);

        let mut all = vec![("/Workbook".to_string(), stream)];
        all.extend(self.streams.iter().cloned());
        cfb_file(&all)
    }
}

fn bof(dt: u16) -> Vec<u8> {
    let mut body = 0x0600u16.to_le_bytes().to_vec();
    body.extend_from_slice(&dt.to_le_bytes());
    body.extend_from_slice(&[0u8; 12]);
    body
}

/// A one-section property set holding VT_LPSTR values in codepage 1252.
pub fn property_set(props: &[(u32, &str)]) -> Vec<u8> {
    let table_len = 8 + 8 * (props.len() + 1);
    let mut table = Vec::new();
    let mut values = Vec::new();

    let mut push = |id: u32, value: Vec<u8>| {
        table.extend_from_slice(&id.to_le_bytes());
        table.extend_from_slice(&((table_len + values.len()) as u32).to_le_bytes());
        values.extend(value);
        while values.len() % 4 != 0 {
            values.push(0);
        }
    };
    // PID_CODEPAGE, VT_I2
    push(1, [2u32.to_le_bytes().to_vec(), 1252u16.to_le_bytes().to_vec()].concat());
    for (id, text) in props {
        let mut value = 0x1Eu32.to_le_bytes().to_vec();
        value.extend_from_slice(&(text.len() as u32 + 1).to_le_bytes());
        value.extend_from_slice(text.as_bytes());
        value.push(0);
        push(*id, value);
    }

    let mut out = Vec::new();
    out.extend_from_slice(&0xFFFEu16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0x0002_0005u32.to_le_bytes());
    out.extend_from_slice(&[0u8; 16]);
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&[0xE0; 16]);
    out.extend_from_slice(&48u32.to_le_bytes());
    out.extend_from_slice(&((table_len + values.len()) as u32).to_le_bytes());
    out.extend_from_slice(&(props.len() as u32 + 1).to_le_bytes());
    out.extend(table);
    out.extend(values);
    out
}

pub fn cfb_file(streams: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut comp = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
    for (name, data) in streams {
        let mut stream = comp.create_stream(name).unwrap();
        stream.write_all(data).unwrap();
    }
    comp.flush().unwrap();
    comp.into_inner().into_inner()
}

/// Two sheets: "People" with 10 rows and a header "Name" at A1, and a
/// hidden "Notes" sheet.
pub fn people() -> Vec<u8> {
    let mut people = vec![dimension(10, 2), label_sst(0, 0, 0), label_sst(0, 1, 1)];
    for row in 1..10u16 {
        people.push(label(row, 0, &format!("person{row}")));
        people.push(number(row, 1, 20.0 + row as f64));
    }
    Fixture::new()
        .sst(&["Name", "Age"])
        .globals(&[font("Arial", 200, 400), font("Arial", 200, 700), xf(0, 0)])
        .sheet(Sheet::new("People", &people))
        .sheet(Sheet::new("Notes", &[dimension(1, 1), label(0, 0, "todo")]).visibility(1))
        .build()
}
