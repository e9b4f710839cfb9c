//! BIFF record identifiers.
//!
//! Reference: [MS-XLS] §2.3: Record Enumeration

// ── Stream structure ────────────────────────────────────────────────────
pub const BOF: u16 = 0x0809;
pub const EOF: u16 = 0x000A;
pub const CONTINUE: u16 = 0x003C;

/// BOF identifiers used by BIFF2, BIFF3 and BIFF4 streams (unsupported).
pub const LEGACY_BOFS: [u16; 3] = [0x0009, 0x0209, 0x0409];

// ── Workbook globals ────────────────────────────────────────────────────
pub const BOUNDSHEET: u16 = 0x0085; // Sheet name, type, visibility, stream offset
pub const SST: u16 = 0x00FC; // Shared String Table
pub const DATEMODE: u16 = 0x0022; // 1900 vs 1904 date system
pub const CODEPAGE: u16 = 0x0042; // Code page of 8-bit strings
pub const WINDOW1: u16 = 0x003D; // Workbook window, holds the active sheet
pub const FILEPASS: u16 = 0x002F; // Encryption header
pub const FONT: u16 = 0x0031;
pub const FORMAT: u16 = 0x041E; // Number format string
pub const XF: u16 = 0x00E0; // Extended Format

// ── Cell records ────────────────────────────────────────────────────────
pub const DIMENSION: u16 = 0x0200; // Used range
pub const BLANK: u16 = 0x0201;
pub const MULBLANK: u16 = 0x00BE;
pub const NUMBER: u16 = 0x0203;
pub const LABEL: u16 = 0x0204;
pub const BOOLERR: u16 = 0x0205;
pub const RK: u16 = 0x027E;
pub const MULRK: u16 = 0x00BD;
pub const FORMULA: u16 = 0x0006;
pub const FORMULA_ALT: u16 = 0x0406; // BIFF3/4 formula id, still emitted by some writers
pub const LABELSST: u16 = 0x00FD;
pub const RSTRING: u16 = 0x00D6;
pub const STRING: u16 = 0x0207; // Cached string result for the preceding FORMULA
pub const ARRAY: u16 = 0x0221;
pub const SHRFMLA: u16 = 0x04BC;

// ── Sheet structure ─────────────────────────────────────────────────────
pub const ROW: u16 = 0x0208;
pub const COLINFO: u16 = 0x007D;
pub const DEFCOLWIDTH: u16 = 0x0055;
pub const MERGECELLS: u16 = 0x00E5;

// ── BOF substream types (the `dt` field) ────────────────────────────────
pub const BOF_WORKBOOK_GLOBALS: u16 = 0x0005;
pub const BOF_WORKSHEET: u16 = 0x0010;

// ── BOF versions ────────────────────────────────────────────────────────
pub const BIFF8_VERSION: u16 = 0x0600;
pub const BIFF5_VERSION: u16 = 0x0500;

/// Short mnemonic for a record id, used in trace output.
pub fn name(id: u16) -> &'static str {
    match id {
        BOF => "BOF",
        EOF => "EOF",
        CONTINUE => "CONTINUE",
        BOUNDSHEET => "BOUNDSHEET",
        SST => "SST",
        DATEMODE => "DATEMODE",
        CODEPAGE => "CODEPAGE",
        WINDOW1 => "WINDOW1",
        FILEPASS => "FILEPASS",
        FONT => "FONT",
        FORMAT => "FORMAT",
        XF => "XF",
        DIMENSION => "DIMENSION",
        BLANK => "BLANK",
        MULBLANK => "MULBLANK",
        NUMBER => "NUMBER",
        LABEL => "LABEL",
        BOOLERR => "BOOLERR",
        RK => "RK",
        MULRK => "MULRK",
        FORMULA | FORMULA_ALT => "FORMULA",
        LABELSST => "LABELSST",
        RSTRING => "RSTRING",
        STRING => "STRING",
        ARRAY => "ARRAY",
        SHRFMLA => "SHRFMLA",
        ROW => "ROW",
        COLINFO => "COLINFO",
        DEFCOLWIDTH => "DEFCOLWIDTH",
        MERGECELLS => "MERGECELLS",
        _ => "?",
    }
}
