//! Process-wide settings and helpers.
//!
//! The debug level and the formula handler are global to the process, not
//! per workbook. Setting either replaces the previous value.

use xlsview_biff::{config, palette};

pub use xlsview_biff::FormulaHandler;

/// Version of the underlying parsing engine.
pub fn version() -> &'static str {
    xlsview_biff::version()
}

/// Current engine debug level. 0 is off.
pub fn debug_level() -> i32 {
    config::debug_level()
}

/// Set the engine debug level, returning the previous one.
///
/// Diagnostics go through the `log` facade; level 1 emits `debug`
/// records, level 2 and above also emit `trace` records per BIFF record.
pub fn set_debug_level(level: i32) -> i32 {
    config::set_debug_level(level)
}

/// Install or clear the handler called for every FORMULA, ARRAY and
/// SHRFMLA record during a worksheet parse. Returns the previous handler.
pub fn set_formula_handler(handler: Option<FormulaHandler>) -> Option<FormulaHandler> {
    config::set_formula_handler(handler)
}

/// Resolve a palette color index to `0xRRGGBB`, falling back to
/// `default` when `index` is outside the palette.
pub fn resolve_color(index: u16, default: u16) -> u32 {
    palette::color(index, default)
}
