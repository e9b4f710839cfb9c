//! OLE property set streams (document summary information).
//!
//! Property set layout ([MS-OLEPS] §2.21):
//!
//! ```text
//! Offset  Size  Field
//!  0      2     byte order (0xFFFE)
//!  2      2     version
//!  4      4     system identifier
//!  8      16    CLSID
//! 24      4     number of sections
//! 28      16    FMTID of the first section
//! 44      4     offset of the first section
//! ```
//!
//! A section is `size(4) count(4)` followed by `count` pairs of
//! `(property id, offset)`, offsets relative to the section start.

use std::collections::BTreeMap;
use std::io::{Read, Seek};

use cfb::CompoundFile;

use crate::biff::parser::ByteReader;
use crate::charset::decode_ansi;
use crate::error::{BiffError, BiffResult};

const SUMMARY_STREAM: &str = "/\u{5}SummaryInformation";
const DOC_SUMMARY_STREAM: &str = "/\u{5}DocumentSummaryInformation";

const BYTE_ORDER_MARK: u16 = 0xFFFE;
const PID_CODEPAGE: u32 = 1;

const VT_I2: u32 = 0x0002;
const VT_LPSTR: u32 = 0x001E;
const VT_LPWSTR: u32 = 0x001F;

/// Codepage marking VT_LPSTR values as UTF-16LE.
const CP_UTF16: u16 = 1200;

// SummaryInformation property ids
const PID_TITLE: u32 = 0x02;
const PID_SUBJECT: u32 = 0x03;
const PID_AUTHOR: u32 = 0x04;
const PID_KEYWORDS: u32 = 0x05;
const PID_COMMENTS: u32 = 0x06;
const PID_LAST_AUTHOR: u32 = 0x08;
const PID_APP_NAME: u32 = 0x12;

// DocumentSummaryInformation property ids
const PID_CATEGORY: u32 = 0x02;
const PID_MANAGER: u32 = 0x0E;
const PID_COMPANY: u32 = 0x0F;

/// Text properties from the two summary streams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSummaryInfo {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub keywords: Option<String>,
    pub comment: Option<String>,
    pub last_author: Option<String>,
    pub app_name: Option<String>,
    pub category: Option<String>,
    pub manager: Option<String>,
    pub company: Option<String>,
}

impl RawSummaryInfo {
    /// Apply `f` to every present text field.
    pub(crate) fn map_text<F: Fn(String) -> String>(self, f: F) -> Self {
        let f = |v: Option<String>| v.map(&f);
        Self {
            title: f(self.title),
            subject: f(self.subject),
            author: f(self.author),
            keywords: f(self.keywords),
            comment: f(self.comment),
            last_author: f(self.last_author),
            app_name: f(self.app_name),
            category: f(self.category),
            manager: f(self.manager),
            company: f(self.company),
        }
    }
}

/// Read both summary streams from `container`.
///
/// Returns `Ok(None)` if neither stream exists.
pub(crate) fn read<F: Read + Seek>(
    container: &mut CompoundFile<F>,
) -> BiffResult<Option<RawSummaryInfo>> {
    let summary = read_stream(container, SUMMARY_STREAM)?;
    let doc_summary = read_stream(container, DOC_SUMMARY_STREAM)?;
    if summary.is_none() && doc_summary.is_none() {
        return Ok(None);
    }

    let mut info = RawSummaryInfo::default();
    if let Some(data) = summary {
        let mut props = parse_property_set(&data)?;
        info.title = props.remove(&PID_TITLE);
        info.subject = props.remove(&PID_SUBJECT);
        info.author = props.remove(&PID_AUTHOR);
        info.keywords = props.remove(&PID_KEYWORDS);
        info.comment = props.remove(&PID_COMMENTS);
        info.last_author = props.remove(&PID_LAST_AUTHOR);
        info.app_name = props.remove(&PID_APP_NAME);
    }
    if let Some(data) = doc_summary {
        let mut props = parse_property_set(&data)?;
        info.category = props.remove(&PID_CATEGORY);
        info.manager = props.remove(&PID_MANAGER);
        info.company = props.remove(&PID_COMPANY);
    }
    Ok(Some(info))
}

fn read_stream<F: Read + Seek>(
    container: &mut CompoundFile<F>,
    path: &str,
) -> BiffResult<Option<Vec<u8>>> {
    if !container.is_stream(path) {
        return Ok(None);
    }
    let mut stream = container
        .open_stream(path)
        .map_err(BiffError::from_container)?;
    let mut data = Vec::new();
    stream.read_to_end(&mut data).map_err(BiffError::Read)?;
    Ok(Some(data))
}

/// Decode the string properties of the first section of a property set.
pub fn parse_property_set(data: &[u8]) -> BiffResult<BTreeMap<u32, String>> {
    let mut header = ByteReader::new(data);
    let byte_order = header.u16()?;
    if byte_order != BYTE_ORDER_MARK {
        return Err(BiffError::parse(format!(
            "property set byte order 0x{byte_order:04X}, expected 0xFFFE"
        )));
    }
    header.skip(2 + 4 + 16);
    let section_count = header.u32()?;
    if section_count == 0 {
        return Ok(BTreeMap::new());
    }
    header.skip(16); // FMTID
    let section_start = header.u32()? as usize;

    let section = data.get(section_start..).ok_or_else(|| {
        BiffError::parse(format!("property section offset {section_start} out of range"))
    })?;
    let mut r = ByteReader::new(section);
    let _size = r.u32()?;
    let count = r.u32()?;

    let mut entries = Vec::with_capacity((count as usize).min(section.len() / 8));
    for _ in 0..count {
        entries.push((r.u32()?, r.u32()? as usize));
    }

    let mut codepage = 1252u16;
    if let Some(&(_, offset)) = entries.iter().find(|(id, _)| *id == PID_CODEPAGE) {
        let mut v = value_at(section, offset)?;
        if v.u32()? == VT_I2 {
            codepage = v.u16()?;
        }
    }

    let mut props = BTreeMap::new();
    for (id, offset) in entries {
        let mut v = value_at(section, offset)?;
        let text = match v.u32()? {
            VT_LPSTR => {
                let len = v.u32()? as usize;
                let bytes = v.take(len)?;
                if codepage == CP_UTF16 {
                    utf16_string(bytes)
                } else {
                    decode_ansi(codepage, bytes)
                }
            }
            VT_LPWSTR => {
                let chars = v.u32()? as usize;
                utf16_string(v.take(chars * 2)?)
            }
            _ => continue,
        };
        props.insert(id, text.trim_end_matches('\0').to_string());
    }
    Ok(props)
}

fn value_at(section: &[u8], offset: usize) -> BiffResult<ByteReader<'_>> {
    section
        .get(offset..)
        .map(ByteReader::new)
        .ok_or_else(|| BiffError::parse(format!("property offset {offset} out of range")))
}

fn utf16_string(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}
