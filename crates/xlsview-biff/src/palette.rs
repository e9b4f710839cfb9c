//! Default BIFF8 color palette.

/// The standard BIFF8 color palette. Workbook color indices 8–63 map to
/// entries 0–55 here.
pub const DEFAULT_PALETTE: [(u8, u8, u8); 56] = [
    (0, 0, 0),       //  8: Black
    (255, 255, 255), //  9: White
    (255, 0, 0),     // 10: Red
    (0, 255, 0),     // 11: Bright Green
    (0, 0, 255),     // 12: Blue
    (255, 255, 0),   // 13: Yellow
    (255, 0, 255),   // 14: Pink
    (0, 255, 255),   // 15: Turquoise
    (128, 0, 0),     // 16: Dark Red
    (0, 128, 0),     // 17: Green
    (0, 0, 128),     // 18: Dark Blue
    (128, 128, 0),   // 19: Dark Yellow
    (128, 0, 128),   // 20: Violet
    (0, 128, 128),   // 21: Teal
    (192, 192, 192), // 22: Silver (25% Gray)
    (128, 128, 128), // 23: Gray (50% Gray)
    (153, 153, 255), // 24: Periwinkle
    (153, 51, 102),  // 25: Plum
    (255, 255, 204), // 26: Ivory
    (204, 255, 255), // 27: Light Turquoise
    (102, 0, 102),   // 28: Dark Purple
    (255, 128, 128), // 29: Coral
    (0, 102, 204),   // 30: Ocean Blue
    (204, 204, 255), // 31: Ice Blue
    (0, 0, 128),     // 32: Dark Blue (dup)
    (255, 0, 255),   // 33: Pink (dup)
    (255, 255, 0),   // 34: Yellow (dup)
    (0, 255, 255),   // 35: Turquoise (dup)
    (128, 0, 128),   // 36: Violet (dup)
    (128, 0, 0),     // 37: Dark Red (dup)
    (0, 128, 128),   // 38: Teal (dup)
    (0, 0, 255),     // 39: Blue (dup)
    (0, 204, 255),   // 40: Sky Blue
    (204, 255, 255), // 41: Light Turquoise (dup)
    (204, 255, 204), // 42: Light Green
    (255, 255, 153), // 43: Light Yellow
    (153, 204, 255), // 44: Pale Blue
    (255, 153, 204), // 45: Rose
    (204, 153, 255), // 46: Lavender
    (255, 204, 153), // 47: Tan
    (51, 102, 255),  // 48: Light Blue
    (51, 204, 204),  // 49: Aqua
    (153, 204, 0),   // 50: Lime
    (255, 204, 0),   // 51: Gold
    (255, 153, 0),   // 52: Light Orange
    (255, 102, 0),   // 53: Orange
    (102, 102, 153), // 54: Blue-Gray
    (150, 150, 150), // 55: 40% Gray
    (0, 51, 102),    // 56: Dark Teal
    (51, 153, 102),  // 57: Sea Green
    (0, 51, 0),      // 58: Dark Green
    (51, 51, 0),     // 59: Olive Green
    (153, 51, 0),    // 60: Brown
    (153, 51, 51),   // 61: Dark Rose
    (51, 51, 153),   // 62: Indigo
    (51, 51, 51),    // 63: 80% Gray
];

/// First workbook color index backed by the palette.
const PALETTE_BASE: u16 = 8;

/// Resolve a color index to `0xRRGGBB`.
///
/// Indices at or above 8 are rebased onto the palette. If `index` does not
/// land inside the palette, `default` is resolved the same way; if neither
/// does, the result is black.
pub fn color(index: u16, default: u16) -> u32 {
    lookup(index).or_else(|| lookup(default)).unwrap_or(0)
}

fn lookup(index: u16) -> Option<u32> {
    let slot = if index >= PALETTE_BASE {
        index - PALETTE_BASE
    } else {
        index
    };
    DEFAULT_PALETTE
        .get(slot as usize)
        .map(|&(r, g, b)| (r as u32) << 16 | (g as u32) << 8 | b as u32)
}
