//! BIFF record layer.
//!
//! A BIFF stream is a sequence of records, each with a 4-byte header
//! (2 bytes record type + 2 bytes body length) followed by the body.
//!
//! CONTINUE records (type 0x003C) extend the body of the preceding record
//! beyond the per-record size limit. [`RecordReader`] merges them and keeps
//! the merge points, because strings split across a CONTINUE boundary carry
//! a fresh option byte at the start of the continuation.

pub mod parser;
pub mod records;
pub mod strings;

use std::borrow::Cow;

use crate::error::{BiffError, BiffResult};

/// BIFF dialect of a workbook stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiffVersion {
    /// Excel 5.0 / 95: 8-bit codepage strings, no shared string table.
    Biff5,
    /// Excel 97–2003: Unicode strings and a shared string table.
    Biff8,
}

/// A single logical record (CONTINUE bodies already merged).
#[derive(Debug)]
pub struct BiffRecord<'a> {
    /// Record type ID (e.g. `records::SST`, `records::NUMBER`).
    pub record_type: u16,
    /// Record body bytes; borrowed from the stream unless CONTINUE bodies were merged.
    pub data: Cow<'a, [u8]>,
    /// Offsets into `data` where each merged CONTINUE body begins.
    pub continue_breaks: Vec<usize>,
    /// Byte offset of this record's header in the stream.
    pub stream_offset: usize,
}

/// Iterates the logical records of a BIFF stream starting at a given offset.
pub struct RecordReader<'a> {
    stream: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> RecordReader<'a> {
    pub fn new(stream: &'a [u8], offset: usize) -> Self {
        Self {
            stream,
            pos: offset,
            done: false,
        }
    }

    /// Header at `pos`, if a full one is present.
    fn header_at(&self, pos: usize) -> Option<(u16, usize)> {
        let h = self.stream.get(pos..pos.checked_add(4)?)?;
        Some((
            u16::from_le_bytes([h[0], h[1]]),
            u16::from_le_bytes([h[2], h[3]]) as usize,
        ))
    }

    fn body_at(&self, pos: usize, len: usize) -> BiffResult<&'a [u8]> {
        self.stream.get(pos..pos + len).ok_or_else(|| {
            BiffError::Read(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("record body at offset {pos} truncated ({len} bytes declared)"),
            ))
        })
    }

    fn read_record(&mut self) -> BiffResult<Option<BiffRecord<'a>>> {
        let stream_offset = self.pos;
        let Some((record_type, len)) = self.header_at(self.pos) else {
            return Ok(None);
        };
        let first = self.body_at(self.pos + 4, len)?;
        self.pos += 4 + len;

        let mut data = Cow::Borrowed(first);
        let mut continue_breaks = Vec::new();
        while let Some((records::CONTINUE, len)) = self.header_at(self.pos) {
            let body = self.body_at(self.pos + 4, len)?;
            continue_breaks.push(data.len());
            data.to_mut().extend_from_slice(body);
            self.pos += 4 + len;
        }

        Ok(Some(BiffRecord {
            record_type,
            data,
            continue_breaks,
            stream_offset,
        }))
    }
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = BiffResult<BiffRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Extract the BOF record fields from a record body.
///
/// Returns `(version, substream_type)`.
pub fn parse_bof(data: &[u8]) -> BiffResult<(u16, u16)> {
    let mut r = parser::ByteReader::new(data);
    let version = r.u16()?;
    let dt = r.u16()?;
    Ok((version, dt))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: u16, body: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&id.to_le_bytes());
        out.extend_from_slice(&(body.len() as u16).to_le_bytes());
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn test_continue_bodies_are_merged() {
        let mut stream = rec(records::SST, &[1, 2, 3]);
        stream.extend(rec(records::CONTINUE, &[4, 5]));
        stream.extend(rec(records::CONTINUE, &[6]));
        stream.extend(rec(records::EOF, &[]));

        let recs: Vec<_> = RecordReader::new(&stream, 0)
            .collect::<BiffResult<_>>()
            .unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].data.as_ref(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(recs[0].continue_breaks, vec![3, 5]);
        assert_eq!(recs[1].record_type, records::EOF);
        assert_eq!(recs[1].stream_offset, 7 + 6 + 5);
    }

    #[test]
    fn test_reader_starts_at_offset() {
        let mut stream = rec(records::NUMBER, &[0; 14]);
        let second = stream.len();
        stream.extend(rec(records::EOF, &[]));
        let first = RecordReader::new(&stream, second).next().unwrap().unwrap();
        assert_eq!(first.record_type, records::EOF);
        assert!(matches!(first.data, Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncated_body_is_read_error() {
        let mut stream = rec(records::NUMBER, &[0; 14]);
        stream.truncate(10);
        let err = RecordReader::new(&stream, 0).next().unwrap().unwrap_err();
        assert!(matches!(err, BiffError::Read(_)));
    }

    #[test]
    fn test_parse_bof() {
        assert_eq!(parse_bof(&[0x00, 0x06, 0x05, 0x00]).unwrap(), (0x0600, 0x0005));
        assert!(parse_bof(&[0x00]).is_err());
    }
}
