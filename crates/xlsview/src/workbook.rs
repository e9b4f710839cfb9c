//! Workbook: the root owner of an opened document.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use xlsview_biff::WorkBook;

use crate::error::{Error, ErrorKind, Result};
use crate::sheet::SheetInfo;
use crate::style::{ExtendedFormat, Font, NumberFormat};
use crate::summary::SummaryInfo;
use crate::worksheet::Worksheet;

/// Target charset used when none is given.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// An opened and parsed `.xls` workbook.
///
/// Opening parses the workbook globals eagerly: the sheet directory, fonts,
/// number formats, extended formats and shared strings. Sheets are parsed
/// on demand by [`with_worksheet`](Workbook::with_worksheet).
///
/// A workbook may be moved to another thread but not shared between
/// threads; it is `Send` and not `Sync`.
pub struct Workbook {
    // Field order is drop order: the engine handle goes before the buffer
    // it reads from.
    handle: WorkBook,
    buffer: Option<Arc<[u8]>>,
    sheets: Vec<SheetInfo>,
    fonts: Vec<Font>,
    number_formats: Vec<NumberFormat>,
    extended_formats: Vec<ExtendedFormat>,
}

impl Workbook {
    /// Open the workbook at `path`, decoding text to UTF-8.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_charset(path, DEFAULT_CHARSET)
    }

    /// Open the workbook at `path`, restricting text to `charset`.
    pub fn open_with_charset<P: AsRef<Path>>(path: P, charset: &str) -> Result<Self> {
        let handle = WorkBook::open_file(path.as_ref(), charset)?;
        Self::load(handle, None)
    }

    /// Open a workbook from memory, decoding text to UTF-8.
    ///
    /// The bytes are copied; the copy lives as long as the workbook.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_charset(bytes, DEFAULT_CHARSET)
    }

    /// Open a workbook from memory, restricting text to `charset`.
    pub fn from_bytes_with_charset(bytes: &[u8], charset: &str) -> Result<Self> {
        let buffer: Arc<[u8]> = Arc::from(bytes);
        let handle = WorkBook::open_buffer(Arc::clone(&buffer), charset)?;
        Self::load(handle, Some(buffer))
    }

    fn load(mut handle: WorkBook, buffer: Option<Arc<[u8]>>) -> Result<Self> {
        handle.parse()?;
        log::debug!(
            "opened {:?} workbook: {} sheets, {} fonts, {} formats, {} xfs",
            handle.version(),
            handle.sheets().len(),
            handle.fonts().len(),
            handle.formats().len(),
            handle.xfs().len()
        );

        let sheets = handle.sheets().iter().map(SheetInfo::from).collect();
        let fonts = handle.fonts().iter().map(Font::from).collect();
        let number_formats = handle.formats().iter().map(NumberFormat::from).collect();
        let extended_formats = handle.xfs().iter().map(ExtendedFormat::from).collect();
        Ok(Self {
            handle,
            buffer,
            sheets,
            fonts,
            number_formats,
            extended_formats,
        })
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// The sheet directory, in workbook order.
    pub fn sheets(&self) -> &[SheetInfo] {
        &self.sheets
    }

    pub fn sheet(&self, index: usize) -> Option<&SheetInfo> {
        self.sheets.get(index)
    }

    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    pub fn number_formats(&self) -> &[NumberFormat] {
        &self.number_formats
    }

    pub fn extended_formats(&self) -> &[ExtendedFormat] {
        &self.extended_formats
    }

    /// Dates count from 1904-01-01 rather than 1900-01-01.
    pub fn uses_1904_date_system(&self) -> bool {
        self.handle.is1904()
    }

    /// BIFF5 (Excel 5.0/95) rather than BIFF8.
    pub fn is_legacy_format(&self) -> bool {
        self.handle.is_biff5()
    }

    /// Substream type from the globals BOF record.
    pub fn workbook_type(&self) -> u16 {
        self.handle.workbook_type()
    }

    /// Codepage of the workbook's 8-bit strings.
    pub fn codepage(&self) -> u16 {
        self.handle.codepage()
    }

    /// Target charset given at open time.
    pub fn charset(&self) -> &str {
        self.handle.charset()
    }

    /// Sheet selected when the workbook was saved.
    pub fn active_sheet_index(&self) -> usize {
        usize::from(self.handle.active_sheet())
    }

    /// Parse the sheet at `index` and pass it to `f`.
    ///
    /// The worksheet exists only for the duration of the call. Cells cloned
    /// out of it stay valid as long as the workbook.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Parse`] if there is no sheet at `index`, otherwise
    /// whatever the sheet parse reports.
    pub fn with_worksheet<'wb, R, F>(&'wb self, index: usize, f: F) -> Result<R>
    where
        F: FnOnce(&Worksheet<'wb>) -> R,
    {
        let worksheet = self.acquire_worksheet(index)?;
        Ok(f(&worksheet))
    }

    /// Like [`with_worksheet`](Workbook::with_worksheet) for operations
    /// that can fail. Acquisition errors convert into `E`.
    pub fn try_with_worksheet<'wb, R, E, F>(
        &'wb self,
        index: usize,
        f: F,
    ) -> std::result::Result<R, E>
    where
        E: From<Error>,
        F: FnOnce(&Worksheet<'wb>) -> std::result::Result<R, E>,
    {
        let worksheet = self.acquire_worksheet(index)?;
        f(&worksheet)
    }

    fn acquire_worksheet(&self, index: usize) -> Result<Worksheet<'_>> {
        let mut sheet = self.handle.worksheet(index).ok_or_else(|| {
            log::debug!("no sheet at index {index} of {}", self.sheets.len());
            Error::new(ErrorKind::Parse)
        })?;
        sheet.parse()?;
        Ok(Worksheet::from_engine(sheet))
    }

    /// Document properties, or `None` if the file has no summary streams.
    pub fn summary_info(&self) -> Result<Option<SummaryInfo>> {
        Ok(self.handle.summary_info()?.map(SummaryInfo::from))
    }
}

impl fmt::Debug for Workbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workbook")
            .field("handle", &self.handle)
            .field("buffer_len", &self.buffer.as_ref().map(|b| b.len()))
            .field("sheets", &self.sheets)
            .finish_non_exhaustive()
    }
}
