//! Style record parsing.
//!
//! Parses FONT, FORMAT and XF records from the workbook globals stream into
//! flat records that mirror the on-disk fields. Resolution into richer style
//! objects is left to callers.

use crate::biff::parser::ByteReader;
use crate::biff::strings::{read_short_string, read_unicode_string};
use crate::biff::BiffVersion;
use crate::error::BiffResult;

// ============================================================================
// Record types
// ============================================================================

/// Parsed FONT record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFont {
    /// Height in twips (1/20 of a point).
    pub height: u16,
    /// Option flags: bit 1 italic, bit 3 strikeout, bit 4 outline, bit 5 shadow.
    pub flag: u16,
    /// Palette color index.
    pub color: u16,
    /// Weight, 400 = normal, 700 = bold.
    pub bold: u16,
    /// 0 = baseline, 1 = superscript, 2 = subscript.
    pub escapement: u16,
    pub underline: u8,
    pub family: u8,
    pub charset: u8,
    pub name: String,
}

/// Parsed FORMAT record (a number format pattern).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFormat {
    pub index: u16,
    pub value: String,
}

/// Parsed XF (extended format) record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawXf {
    pub font: u16,
    pub format: u16,
    /// Protection and parent-style bits.
    pub xf_type: u16,
    pub align: u8,
    pub rotation: u8,
    pub ident: u8,
    /// Bitmask of attributes this XF overrides.
    pub usedattr: u8,
    pub linestyle: u32,
    pub linecolor: u32,
    pub groundcolor: u16,
}

// ============================================================================
// Record parsers
// ============================================================================

/// Parse a FONT record.
///
/// ```text
/// Offset  Size  Field
///  0      2     dyHeight (twips)
///  2      2     grbit (flags)
///  4      2     icv (color index)
///  6      2     bls (weight)
///  8      2     sss (escapement)
/// 10      1     uls (underline)
/// 11      1     bFamily
/// 12      1     bCharSet
/// 13      1     reserved
/// 14      var   fontName (short string)
/// ```
pub fn parse_font(data: &[u8], version: BiffVersion, codepage: u16) -> BiffResult<RawFont> {
    let mut r = ByteReader::new(data);
    let height = r.u16()?;
    let flag = r.u16()?;
    let color = r.u16()?;
    let bold = r.u16()?;
    let escapement = r.u16()?;
    let underline = r.u8()?;
    let family = r.u8()?;
    let charset = r.u8()?;
    r.skip(1);

    // Some writers omit the name entirely; treat that as an empty name.
    let name = if r.is_empty() {
        String::new()
    } else {
        read_short_string(&mut r, version, codepage)?
    };

    Ok(RawFont {
        height,
        flag,
        color,
        bold,
        escapement,
        underline,
        family,
        charset,
        name,
    })
}

/// Parse a FORMAT record: a 2-byte format index followed by the pattern.
pub fn parse_format(data: &[u8], version: BiffVersion, codepage: u16) -> BiffResult<RawFormat> {
    let mut r = ByteReader::new(data);
    let index = r.u16()?;
    let value = match version {
        BiffVersion::Biff8 => read_unicode_string(&mut r, version, codepage)?,
        BiffVersion::Biff5 => read_short_string(&mut r, version, codepage)?,
    };
    Ok(RawFormat { index, value })
}

/// Parse an XF record.
///
/// BIFF8 layout (20 bytes):
/// ```text
/// Offset  Size  Field
///  0      2     ifnt
///  2      2     ifmt
///  4      2     type / protection / parent
///  6      1     alignment
///  7      1     rotation
///  8      1     indent / shrink / reading order
///  9      1     used attributes
/// 10      4     border line styles
/// 14      4     border colors, diagonal
/// 18      2     fill colors
/// ```
///
/// BIFF5 packs colors and borders differently (16 bytes); only the fields
/// with a direct counterpart are kept.
pub fn parse_xf(data: &[u8], version: BiffVersion) -> BiffResult<RawXf> {
    let mut r = ByteReader::new(data);
    let font = r.u16()?;
    let format = r.u16()?;
    let xf_type = r.u16()?;

    match version {
        BiffVersion::Biff8 => Ok(RawXf {
            font,
            format,
            xf_type,
            align: r.u8()?,
            rotation: r.u8()?,
            ident: r.u8()?,
            usedattr: r.u8()?,
            linestyle: r.u32()?,
            linecolor: r.u32()?,
            groundcolor: r.u16()?,
        }),
        BiffVersion::Biff5 => {
            let align = r.u8()?;
            let _orientation = r.u8()?;
            let color = r.u32()?;
            let linestyle = r.u32()?;
            Ok(RawXf {
                font,
                format,
                xf_type,
                align,
                linestyle,
                groundcolor: (color & 0xFFFF) as u16,
                ..RawXf::default()
            })
        }
    }
}

// ============================================================================
// Unit tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn font_body(name: &[u8], biff8: bool) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&220u16.to_le_bytes()); // height = 11pt
        data.extend_from_slice(&0x0002u16.to_le_bytes()); // italic
        data.extend_from_slice(&0x7FFFu16.to_le_bytes()); // icv = auto
        data.extend_from_slice(&700u16.to_le_bytes()); // bold
        data.extend_from_slice(&1u16.to_le_bytes()); // superscript
        data.push(0x01); // single underline
        data.push(2); // family
        data.push(0); // charset
        data.push(0); // reserved
        data.push(name.len() as u8);
        if biff8 {
            data.push(0x00);
        }
        data.extend_from_slice(name);
        data
    }

    #[test]
    fn test_parse_font_biff8() {
        let font = parse_font(&font_body(b"Arial", true), BiffVersion::Biff8, 1200).unwrap();
        assert_eq!(
            font,
            RawFont {
                height: 220,
                flag: 0x0002,
                color: 0x7FFF,
                bold: 700,
                escapement: 1,
                underline: 1,
                family: 2,
                charset: 0,
                name: "Arial".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_font_biff5_codepage_name() {
        let font = parse_font(&font_body(&[b'T', 0xE9], false), BiffVersion::Biff5, 1252).unwrap();
        assert_eq!(font.name, "Té");
    }

    #[test]
    fn test_parse_font_without_name() {
        let mut body = font_body(b"", true);
        body.truncate(14);
        assert_eq!(parse_font(&body, BiffVersion::Biff8, 1200).unwrap().name, "");
    }

    #[test]
    fn test_parse_format_versions() {
        let mut b8 = 164u16.to_le_bytes().to_vec();
        b8.extend_from_slice(&[0x04, 0x00, 0x00]);
        b8.extend_from_slice(b"0.00");
        assert_eq!(
            parse_format(&b8, BiffVersion::Biff8, 1200).unwrap(),
            RawFormat {
                index: 164,
                value: "0.00".to_string()
            }
        );

        let mut b5 = 5u16.to_le_bytes().to_vec();
        b5.push(1);
        b5.push(b'@');
        assert_eq!(parse_format(&b5, BiffVersion::Biff5, 1252).unwrap().value, "@");
    }

    #[test]
    fn test_parse_xf_biff8() {
        let mut data = Vec::new();
        data.extend_from_slice(&5u16.to_le_bytes());
        data.extend_from_slice(&14u16.to_le_bytes());
        data.extend_from_slice(&0x0001u16.to_le_bytes());
        data.extend_from_slice(&[0x22, 45, 0x03, 0xF8]);
        data.extend_from_slice(&0x0000_1111u32.to_le_bytes());
        data.extend_from_slice(&0x0040_0808u32.to_le_bytes());
        data.extend_from_slice(&0x20C0u16.to_le_bytes());

        let xf = parse_xf(&data, BiffVersion::Biff8).unwrap();
        assert_eq!(xf.font, 5);
        assert_eq!(xf.format, 14);
        assert_eq!(xf.xf_type, 1);
        assert_eq!(xf.align, 0x22);
        assert_eq!(xf.rotation, 45);
        assert_eq!(xf.ident, 3);
        assert_eq!(xf.usedattr, 0xF8);
        assert_eq!(xf.linestyle, 0x1111);
        assert_eq!(xf.linecolor, 0x0040_0808);
        assert_eq!(xf.groundcolor, 0x20C0);
    }

    #[test]
    fn test_parse_xf_biff5() {
        let mut data = Vec::new();
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&0xFFF5u16.to_le_bytes());
        data.extend_from_slice(&[0x20, 0x00]);
        data.extend_from_slice(&0x0001_20C0u32.to_le_bytes());
        data.extend_from_slice(&0x0000_0001u32.to_le_bytes());

        let xf = parse_xf(&data, BiffVersion::Biff5).unwrap();
        assert_eq!(xf.align, 0x20);
        assert_eq!(xf.groundcolor, 0x20C0);
        assert_eq!(xf.linestyle, 1);
        assert_eq!(xf.rotation, 0);
        assert_eq!(xf.linecolor, 0);
    }

    #[test]
    fn test_parse_xf_truncated() {
        assert!(parse_xf(&[0u8; 8], BiffVersion::Biff8).is_err());
    }
}
