//! BIFF string decoding.
//!
//! BIFF8 strings have a complex encoding:
//! - Header: char_count (1 or 2 bytes) + flags (1 byte)
//! - Flags bit 0 (`fHighByte`): 0 = compressed Latin-1, 1 = uncompressed UTF-16LE
//! - Flags bit 2 (`fExtSt`): extended string data follows (Asian phonetic)
//! - Flags bit 3 (`fRichSt`): rich text run array follows
//! - If fRichSt: 2-byte run count follows the flags
//! - If fExtSt: 4-byte extended data size follows
//! - Then the character data, the rich text runs (4 bytes each) and the
//!   extended data
//!
//! BIFF5 strings are a length prefix followed by 8-bit text in the workbook
//! codepage.
//!
//! In SST records, strings can span CONTINUE records. The CONTINUE record
//! can change the encoding (compressed ↔ uncompressed) mid-string via a
//! new flags byte at the start of the continuation.

use super::parser::ByteReader;
use super::BiffVersion;
use crate::charset::decode_ansi;
use crate::error::{BiffError, BiffResult};

const FLAG_HIGH_BYTE: u8 = 0x01;
const FLAG_EXT: u8 = 0x04;
const FLAG_RICH: u8 = 0x08;

/// Read a "short" string (1-byte length prefix; BOUNDSHEET, FONT).
pub fn read_short_string(
    r: &mut ByteReader<'_>,
    version: BiffVersion,
    codepage: u16,
) -> BiffResult<String> {
    let char_count = r.u8()? as usize;
    match version {
        BiffVersion::Biff5 => Ok(decode_ansi(codepage, r.take(char_count)?)),
        BiffVersion::Biff8 => {
            let flags = r.u8()?;
            read_character_data(r, char_count, flags)
        }
    }
}

/// Read a string with a 2-byte length prefix (LABEL, FORMAT, STRING, RSTRING).
pub fn read_unicode_string(
    r: &mut ByteReader<'_>,
    version: BiffVersion,
    codepage: u16,
) -> BiffResult<String> {
    let char_count = r.u16()? as usize;
    if version == BiffVersion::Biff5 {
        return Ok(decode_ansi(codepage, r.take(char_count)?));
    }

    let flags = r.u8()?;
    let run_count = if flags & FLAG_RICH != 0 { r.u16()? } else { 0 };
    let ext_size = if flags & FLAG_EXT != 0 { r.u32()? } else { 0 };

    let text = read_character_data(r, char_count, flags)?;
    r.skip(run_count as usize * 4);
    r.skip(ext_size as usize);
    Ok(text)
}

/// Read character data (no header) given char_count and flags byte.
fn read_character_data(r: &mut ByteReader<'_>, count: usize, flags: u8) -> BiffResult<String> {
    if flags & FLAG_HIGH_BYTE != 0 {
        let bytes = r.take(count * 2)?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(String::from_utf16_lossy(&units))
    } else {
        Ok(r.take(count)?.iter().map(|&b| char::from(b)).collect())
    }
}

/// Cursor over an SST body that knows where CONTINUE bodies begin.
struct SstCursor<'a> {
    inner: ByteReader<'a>,
    len: usize,
    breaks: &'a [usize],
    next_break: usize,
}

impl<'a> SstCursor<'a> {
    fn new(data: &'a [u8], breaks: &'a [usize]) -> Self {
        Self {
            inner: ByteReader::new(data),
            len: data.len(),
            breaks,
            next_break: 0,
        }
    }

    fn sync_breaks(&mut self) {
        let pos = self.inner.position();
        while self.next_break < self.breaks.len() && self.breaks[self.next_break] < pos {
            self.next_break += 1;
        }
    }

    /// True if the cursor sits exactly at the start of a CONTINUE body.
    fn at_break(&mut self) -> bool {
        self.sync_breaks();
        self.breaks.get(self.next_break) == Some(&self.inner.position())
    }

    /// Bytes readable before the next CONTINUE boundary.
    fn until_break(&mut self) -> usize {
        self.sync_breaks();
        let pos = self.inner.position();
        match self.breaks.get(self.next_break) {
            Some(&b) if b > pos => b - pos,
            _ => self.len - pos,
        }
    }

    fn read_string(&mut self) -> BiffResult<String> {
        let char_count = self.inner.u16()? as usize;
        let flags = self.inner.u8()?;
        let run_count = if flags & FLAG_RICH != 0 { self.inner.u16()? } else { 0 };
        let ext_size = if flags & FLAG_EXT != 0 { self.inner.u32()? } else { 0 };

        let mut wide = flags & FLAG_HIGH_BYTE != 0;
        let mut units: Vec<u16> = Vec::with_capacity(char_count);
        let mut remaining = char_count;
        while remaining > 0 {
            if self.at_break() {
                wide = self.inner.u8()? & FLAG_HIGH_BYTE != 0;
            }
            let width = if wide { 2 } else { 1 };
            let n = remaining.min(self.until_break() / width);
            if n == 0 {
                return Err(BiffError::parse(format!(
                    "SST string truncated at offset {} ({remaining} chars missing)",
                    self.inner.position()
                )));
            }
            let bytes = self.inner.take(n * width)?;
            if wide {
                units.extend(
                    bytes
                        .chunks_exact(2)
                        .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
                );
            } else {
                units.extend(bytes.iter().map(|&b| b as u16));
            }
            remaining -= n;
        }

        self.inner.skip(run_count as usize * 4);
        self.inner.skip(ext_size as usize);
        Ok(String::from_utf16_lossy(&units))
    }
}

/// Parse the Shared String Table from an SST body with its CONTINUE
/// bodies merged in; `breaks` are the merge offsets.
///
/// The SST body starts with:
/// - `total_strings` (4 bytes, u32): total string refs in workbook
/// - `unique_strings` (4 bytes, u32): number of unique strings in this table
/// - Then `unique_strings` Unicode string entries
pub fn parse_sst(data: &[u8], breaks: &[usize]) -> BiffResult<Vec<String>> {
    let mut cursor = SstCursor::new(data, breaks);

    let _total_strings = cursor.inner.u32()?;
    let unique_count = cursor.inner.u32()? as usize;

    let mut strings = Vec::with_capacity(unique_count.min(data.len()));
    for i in 0..unique_count {
        match cursor.read_string() {
            Ok(s) => strings.push(s),
            Err(e) => {
                // Some writers pad or truncate the SST; keep what decoded cleanly.
                log::warn!("SST parse error at string {i}/{unique_count}: {e}");
                break;
            }
        }
    }

    Ok(strings)
}
