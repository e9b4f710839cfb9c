//! # xlsview
//!
//! Read-only access to legacy Excel binary workbooks (`.xls`, BIFF5 and
//! BIFF8).
//!
//! ## Quick Start
//!
//! ```no_run
//! use xlsview::{CellValue, Workbook};
//!
//! let workbook = Workbook::open("report.xls")?;
//! for sheet in workbook.sheets() {
//!     println!("{} ({:?})", sheet.name, sheet.visibility);
//! }
//!
//! let header = workbook.with_worksheet(0, |ws| {
//!     ws.cell(0, 0).map(|cell| cell.value())
//! })?;
//! if let Some(CellValue::Text(text)) = header {
//!     println!("A1 = {text}");
//! }
//! # Ok::<(), xlsview::Error>(())
//! ```
//!
//! ## Worksheet lifetime
//!
//! A [`Worksheet`] is only ever lent to the closure given to
//! [`Workbook::with_worksheet`] and is released when the closure returns.
//! It cannot be smuggled out:
//!
//! ```compile_fail
//! use xlsview::Workbook;
//!
//! let workbook = Workbook::open("report.xls").unwrap();
//! let escaped = workbook.with_worksheet(0, |ws| ws).unwrap();
//! println!("{}", escaped.row_count());
//! ```
//!
//! Cells can be cloned out; they borrow shared strings from the workbook,
//! so they cannot outlive it:
//!
//! ```compile_fail
//! use xlsview::Workbook;
//!
//! let cell = {
//!     let workbook = Workbook::open("report.xls").unwrap();
//!     workbook.with_worksheet(0, |ws| ws.cell(0, 0).cloned()).unwrap()
//! };
//! println!("{:?}", cell);
//! ```
//!
//! [`Cell::into_owned`] detaches a cell from the workbook.

pub mod cell;
pub mod column;
pub mod error;
pub mod globals;
pub mod row;
pub mod sheet;
pub mod style;
pub mod summary;
pub mod value;
pub mod workbook;
pub mod worksheet;

pub use cell::Cell;
pub use column::ColumnInfo;
pub use error::{Error, ErrorKind, Result};
pub use globals::{
    debug_level, resolve_color, set_debug_level, set_formula_handler, version, FormulaHandler,
};
pub use row::Row;
pub use sheet::{SheetInfo, SheetVisibility};
pub use style::{ExtendedFormat, Font, NumberFormat};
pub use summary::SummaryInfo;
pub use value::CellValue;
pub use workbook::{Workbook, DEFAULT_CHARSET};
pub use worksheet::Worksheet;
