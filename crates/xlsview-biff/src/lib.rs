//! # xlsview-biff
//!
//! Read-only parsing engine for legacy Excel binary workbooks (.xls,
//! BIFF5 and BIFF8).
//!
//! A [`WorkBook`] is opened from a path or a shared buffer, then
//! [`parse`](WorkBook::parse)d to load the workbook globals: the sheet
//! directory, fonts, number formats, extended formats and the shared string
//! table. Each [`WorkSheet`] is borrowed from its workbook and parsed on
//! demand into a dense cell table.
//!
//! ```no_run
//! use xlsview_biff::WorkBook;
//!
//! let mut wb = WorkBook::open_file("report.xls", "UTF-8")?;
//! wb.parse()?;
//! if let Some(mut ws) = wb.worksheet(0) {
//!     ws.parse()?;
//!     println!("{} rows", ws.rows().len());
//! }
//! # Ok::<(), xlsview_biff::BiffError>(())
//! ```

pub mod biff;
pub mod charset;
pub mod config;
pub mod error;
pub mod palette;
pub mod styles;
pub mod summary;
mod workbook;
mod worksheet;

pub use biff::BiffVersion;
pub use config::FormulaHandler;
pub use error::{error_message, BiffError, BiffResult, StatusCode};
pub use styles::{RawFont, RawFormat, RawXf};
pub use summary::RawSummaryInfo;
pub use workbook::{RawSheet, WorkBook};
pub use worksheet::{CellData, ColInfo, RowData, WorkSheet, FORMULA_NON_NUMERIC};

/// Version of the engine.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
