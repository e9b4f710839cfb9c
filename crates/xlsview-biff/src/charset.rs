//! Source codepages and target charsets.
//!
//! BIFF5 stores 8-bit text in the workbook codepage (CODEPAGE record).
//! Decoded text is then restricted to the repertoire of the charset the
//! caller asked for when opening the workbook.

use std::collections::BTreeSet;
use std::sync::Mutex;

use encoding_rs::{
    Encoding, BIG5, EUC_KR, GBK, MACINTOSH, SHIFT_JIS, UTF_8, WINDOWS_1250, WINDOWS_1251,
    WINDOWS_1252, WINDOWS_1253, WINDOWS_1254, WINDOWS_1255, WINDOWS_1256, WINDOWS_1257,
    WINDOWS_1258, WINDOWS_874,
};

use lazy_static::lazy_static;

use crate::error::{BiffError, BiffResult};

/// Map a Windows codepage identifier to an `encoding_rs` encoding.
///
/// The DOS codepages 437 and 850 have no `encoding_rs` counterpart; they are
/// decoded through [`oem_high_half`] instead.
pub fn encoding_for_codepage(codepage: u16) -> Option<&'static Encoding> {
    Some(match codepage {
        874 => WINDOWS_874,
        932 => SHIFT_JIS,
        936 => GBK,
        949 => EUC_KR,
        950 => BIG5,
        1250 => WINDOWS_1250,
        1251 => WINDOWS_1251,
        // 367 is US-ASCII; 32769 is the BIFF alias for ANSI Latin I.
        367 | 1252 | 32769 => WINDOWS_1252,
        1253 => WINDOWS_1253,
        1254 => WINDOWS_1254,
        1255 => WINDOWS_1255,
        1256 => WINDOWS_1256,
        1257 => WINDOWS_1257,
        1258 => WINDOWS_1258,
        10000 | 32768 => MACINTOSH,
        65001 => UTF_8,
        _ => return None,
    })
}

/// Decode 8-bit text stored in `codepage`.
///
/// Unknown codepages fall back to a byte-to-Unicode (Latin-1) mapping so
/// ASCII survives intact.
pub fn decode_ansi(codepage: u16, bytes: &[u8]) -> String {
    if let Some(high) = oem_high_half(codepage) {
        return bytes
            .iter()
            .map(|&b| if b < 0x80 { char::from(b) } else { high[usize::from(b - 0x80)] })
            .collect();
    }
    if let Some(encoding) = encoding_for_codepage(codepage) {
        let (text, _) = encoding.decode_without_bom_handling(bytes);
        return text.into_owned();
    }

    warn_unsupported_codepage(codepage);
    bytes.iter().copied().map(char::from).collect()
}

/// Bytes 0x80..=0xFF of the DOS codepages, which agree with ASCII below.
fn oem_high_half(codepage: u16) -> Option<&'static [char; 128]> {
    match codepage {
        437 => Some(&CP437_HIGH),
        850 => Some(&CP850_HIGH),
        _ => None,
    }
}

#[rustfmt::skip]
static CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', '\u{B5}', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '\u{2219}', '\u{B7}', '√', 'ⁿ', '²', '■', '\u{A0}',
];

#[rustfmt::skip]
static CP850_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', 'ø', '£', 'Ø', '×', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '®', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', 'Á', 'Â', 'À', '©', '╣', '║', '╗', '╝', '¢', '¥', '┐',
    '└', '┴', '┬', '├', '─', '┼', 'ã', 'Ã', '╚', '╔', '╩', '╦', '╠', '═', '╬', '¤',
    'ð', 'Ð', 'Ê', 'Ë', 'È', 'ı', 'Í', 'Î', 'Ï', '┘', '┌', '█', '▄', '¦', 'Ì', '▀',
    'Ó', 'ß', 'Ô', 'Ò', 'õ', 'Õ', '\u{B5}', 'þ', 'Þ', 'Ú', 'Û', 'Ù', 'ý', 'Ý', '\u{AF}', '\u{B4}',
    '\u{AD}', '±', '‗', '¾', '¶', '§', '÷', '¸', '°', '¨', '\u{B7}', '¹', '³', '²', '■', '\u{A0}',
];

lazy_static! {
    static ref WARNED_CODEPAGES: Mutex<BTreeSet<u16>> = Mutex::new(BTreeSet::new());
}

fn warn_unsupported_codepage(codepage: u16) {
    let mut warned = WARNED_CODEPAGES
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if warned.insert(codepage) {
        log::warn!("unsupported codepage {codepage}; decoding 8-bit strings as Latin-1");
    }
}

/// The text encoding requested by the caller at open time.
#[derive(Debug, Clone)]
pub struct TargetCharset {
    label: String,
    encoding: &'static Encoding,
}

impl TargetCharset {
    /// Resolve a charset label such as `"UTF-8"` or `"windows-1252"`.
    pub fn from_label(label: &str) -> BiffResult<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(BiffError::NullArgument("charset is empty".into()));
        }
        let encoding = Encoding::for_label(trimmed.as_bytes())
            .ok_or_else(|| BiffError::NullArgument(format!("unknown charset {trimmed:?}")))?;
        Ok(Self {
            label: trimmed.to_string(),
            encoding,
        })
    }

    /// The label as given by the caller.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Replace characters the target charset cannot represent with `?`.
    pub fn restrict(&self, text: String) -> String {
        // UTF-8, UTF-16LE/BE: every scalar value is representable.
        if self.encoding.output_encoding() == UTF_8 {
            return text;
        }
        let (_, _, unmappable) = self.encoding.encode(&text);
        if !unmappable {
            return text;
        }
        let mut buf = [0u8; 4];
        text.chars()
            .map(|c| {
                let (_, _, bad) = self.encoding.encode(c.encode_utf8(&mut buf));
                if bad {
                    '?'
                } else {
                    c
                }
            })
            .collect()
    }
}

impl Default for TargetCharset {
    fn default() -> Self {
        Self {
            label: "UTF-8".to_string(),
            encoding: UTF_8,
        }
    }
}
