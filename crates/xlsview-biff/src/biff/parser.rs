//! Bounds-checked little-endian reading over a record body.
//!
//! All multi-byte integers in BIFF are little-endian.

use crate::error::{BiffError, BiffResult};

/// A forward-only cursor over a record body.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the body.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `n` bytes and advance past them.
    pub fn take(&mut self, n: usize) -> BiffResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                BiffError::parse(format!(
                    "unexpected end of record at offset {}, need {} bytes, have {}",
                    self.pos,
                    n,
                    self.remaining()
                ))
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Advance without reading; clamps at the end of the body.
    pub fn skip(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    #[inline]
    pub fn u8(&mut self) -> BiffResult<u8> {
        Ok(self.take(1)?[0])
    }

    #[inline]
    pub fn u16(&mut self) -> BiffResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    #[inline]
    pub fn u32(&mut self) -> BiffResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    pub fn f64(&mut self) -> BiffResult<f64> {
        let b = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(b);
        Ok(f64::from_le_bytes(raw))
    }

    /// Read a 4-byte RK value and decode it.
    #[inline]
    pub fn rk(&mut self) -> BiffResult<f64> {
        self.u32().map(decode_rk)
    }
}

/// Read the trailing `u16` of a record body (MULRK / MULBLANK last column).
pub fn trailing_u16(data: &[u8]) -> Option<u16> {
    let n = data.len();
    (n >= 2).then(|| u16::from_le_bytes([data[n - 2], data[n - 1]]))
}

/// Decode an RK-encoded number.
///
/// RK encoding (4 bytes):
/// - Bit 0: the decoded number is divided by 100
/// - Bit 1: bits 2..31 are a signed 30-bit integer; otherwise they are the
///   upper 30 bits of an IEEE 754 double whose low 34 bits are zero
#[inline]
pub fn decode_rk(rk: u32) -> f64 {
    let value = if rk & 0x02 != 0 {
        ((rk as i32) >> 2) as f64
    } else {
        f64::from_bits(((rk & 0xFFFF_FFFC) as u64) << 32)
    };

    if rk & 0x01 != 0 {
        value / 100.0
    } else {
        value
    }
}
