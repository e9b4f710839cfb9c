//! Workbook handle: container access and the globals substream.
//!
//! Opens a Compound File Binary (CFB/OLE2) container, copies the `Workbook`
//! (BIFF8) or `Book` (BIFF5) stream into memory, and parses the globals
//! substream into the shared tables every worksheet reads from.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use cfb::CompoundFile;

use crate::biff::parser::ByteReader;
use crate::biff::strings::{parse_sst, read_short_string};
use crate::biff::{self, records, BiffVersion, RecordReader};
use crate::charset::TargetCharset;
use crate::config;
use crate::error::{BiffError, BiffResult};
use crate::styles::{self, RawFont, RawFormat, RawXf};
use crate::summary::{self, RawSummaryInfo};
use crate::worksheet::WorkSheet;

/// Byte source behind the CFB container.
#[derive(Debug)]
pub(crate) enum Source {
    File(File),
    Buffer(Cursor<Arc<[u8]>>),
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::File(f) => f.read(buf),
            Source::Buffer(c) => c.read(buf),
        }
    }
}

impl Seek for Source {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Source::File(f) => f.seek(pos),
            Source::Buffer(c) => c.seek(pos),
        }
    }
}

/// One BOUNDSHEET entry of the sheet directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSheet {
    /// Absolute offset of the sheet's BOF in the workbook stream.
    pub filepos: u32,
    /// 0 = visible, 1 = hidden, 2 = very hidden.
    pub visibility: u8,
    /// 0 = worksheet, 2 = chart, 6 = VBA module.
    pub sheet_type: u8,
    pub name: String,
}

/// An opened workbook.
///
/// The handle is `!Sync`: a workbook and everything borrowed from it belong
/// to one thread.
pub struct WorkBook {
    container: RefCell<CompoundFile<Source>>,
    stream: Vec<u8>,
    charset: TargetCharset,
    version: BiffVersion,
    workbook_type: u16,
    codepage: u16,
    is1904: bool,
    active_sheet: u16,
    sheets: Vec<RawSheet>,
    fonts: Vec<RawFont>,
    formats: Vec<RawFormat>,
    xfs: Vec<RawXf>,
    sst: Vec<String>,
}

impl std::fmt::Debug for WorkBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkBook")
            .field("version", &self.version)
            .field("charset", &self.charset.label())
            .field("codepage", &self.codepage)
            .field("sheets", &self.sheets.len())
            .field("stream_len", &self.stream.len())
            .finish()
    }
}

impl WorkBook {
    /// Open the workbook stored at `path`. Nothing is parsed yet.
    pub fn open_file<P: AsRef<Path>>(path: P, charset: &str) -> BiffResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(BiffError::NullArgument("path is empty".into()));
        }
        let charset = TargetCharset::from_label(charset)?;
        let file = File::open(path).map_err(BiffError::Open)?;
        if config::debug_enabled() {
            log::debug!("opening {}", path.display());
        }
        Self::from_source(Source::File(file), charset)
    }

    /// Open a workbook held in memory. The buffer is shared, not copied.
    pub fn open_buffer(buffer: Arc<[u8]>, charset: &str) -> BiffResult<Self> {
        if buffer.is_empty() {
            return Err(BiffError::NullArgument("buffer is empty".into()));
        }
        let charset = TargetCharset::from_label(charset)?;
        if config::debug_enabled() {
            log::debug!("opening {} byte buffer", buffer.len());
        }
        Self::from_source(Source::Buffer(Cursor::new(buffer)), charset)
    }

    fn from_source(source: Source, charset: TargetCharset) -> BiffResult<Self> {
        let mut cfb = CompoundFile::open(source).map_err(BiffError::from_container)?;

        // BIFF5 files use "Book" instead of "Workbook"
        let stream_path = if cfb.exists("/Workbook") {
            "/Workbook"
        } else if cfb.exists("/Book") {
            "/Book"
        } else {
            return Err(BiffError::parse("no Workbook or Book stream found in CFB"));
        };

        let stream = {
            let mut s = cfb.open_stream(stream_path).map_err(BiffError::from_container)?;
            let len = s.len() as usize;
            let mut data = Vec::new();
            data.try_reserve_exact(len)
                .map_err(|_| BiffError::Malloc(len))?;
            s.read_to_end(&mut data).map_err(BiffError::Read)?;
            data
        };

        if config::debug_enabled() {
            log::debug!("{stream_path}: {} bytes", stream.len());
        }

        Ok(Self {
            container: RefCell::new(cfb),
            stream,
            charset,
            version: BiffVersion::Biff8,
            workbook_type: 0,
            codepage: 1252,
            is1904: false,
            active_sheet: 0,
            sheets: Vec::new(),
            fonts: Vec::new(),
            formats: Vec::new(),
            xfs: Vec::new(),
            sst: Vec::new(),
        })
    }

    /// Parse the workbook globals substream.
    pub fn parse(&mut self) -> BiffResult<()> {
        let trace = config::trace_enabled();
        let mut reader = RecordReader::new(&self.stream, 0);

        let bof = match reader.next() {
            Some(rec) => rec?,
            None => return Err(BiffError::parse("workbook stream is empty")),
        };
        if records::LEGACY_BOFS.contains(&bof.record_type) {
            return Err(BiffError::parse(format!(
                "BIFF2-4 workbooks are not supported (BOF 0x{:04X})",
                bof.record_type
            )));
        }
        if bof.record_type != records::BOF {
            return Err(BiffError::parse(format!(
                "expected BOF, found record 0x{:04X}",
                bof.record_type
            )));
        }
        let (version, dt) = biff::parse_bof(&bof.data)?;
        self.version = match version {
            records::BIFF8_VERSION => BiffVersion::Biff8,
            records::BIFF5_VERSION => BiffVersion::Biff5,
            other => {
                return Err(BiffError::parse(format!(
                    "unsupported BIFF version 0x{other:04X}"
                )))
            }
        };
        self.workbook_type = dt;
        if config::debug_enabled() {
            log::debug!("globals BOF: {:?}, substream type 0x{dt:04X}", self.version);
        }

        let mut terminated = false;
        for rec in reader {
            let rec = rec?;
            if trace {
                log::trace!(
                    "globals @{:#x}: {} (0x{:04X}) len={}",
                    rec.stream_offset,
                    records::name(rec.record_type),
                    rec.record_type,
                    rec.data.len()
                );
            }

            match rec.record_type {
                records::EOF => {
                    terminated = true;
                    break;
                }
                records::FILEPASS => return Err(BiffError::UnsupportedEncryption),
                records::CODEPAGE => {
                    self.codepage = ByteReader::new(&rec.data).u16()?;
                }
                records::DATEMODE => {
                    self.is1904 = ByteReader::new(&rec.data).u16()? == 1;
                }
                records::WINDOW1 => {
                    let mut r = ByteReader::new(&rec.data);
                    r.skip(10);
                    self.active_sheet = r.u16().unwrap_or(0);
                }
                records::BOUNDSHEET => {
                    let sheet = self.parse_boundsheet(&rec.data)?;
                    if config::debug_enabled() {
                        log::debug!(
                            "sheet {:?} at {:#x} (type {}, visibility {})",
                            sheet.name,
                            sheet.filepos,
                            sheet.sheet_type,
                            sheet.visibility
                        );
                    }
                    self.sheets.push(sheet);
                }
                records::FONT => {
                    match styles::parse_font(&rec.data, self.version, self.codepage) {
                        Ok(mut font) => {
                            font.name = self.charset.restrict(font.name);
                            self.fonts.push(font);
                        }
                        Err(e) => log::warn!("skipping FONT record: {e}"),
                    }
                }
                records::FORMAT => {
                    match styles::parse_format(&rec.data, self.version, self.codepage) {
                        Ok(mut format) => {
                            format.value = self.charset.restrict(format.value);
                            self.formats.push(format);
                        }
                        Err(e) => log::warn!("skipping FORMAT record: {e}"),
                    }
                }
                records::XF => match styles::parse_xf(&rec.data, self.version) {
                    Ok(xf) => self.xfs.push(xf),
                    Err(e) => log::warn!("skipping XF record: {e}"),
                },
                records::SST if self.version == BiffVersion::Biff8 => {
                    let strings = parse_sst(&rec.data, &rec.continue_breaks)?;
                    self.sst = strings
                        .into_iter()
                        .map(|s| self.charset.restrict(s))
                        .collect();
                    if config::debug_enabled() {
                        log::debug!("SST: {} strings", self.sst.len());
                    }
                }
                _ => {}
            }
        }

        if !terminated {
            return Err(BiffError::parse("workbook globals are not terminated by EOF"));
        }
        Ok(())
    }

    /// BOUNDSHEET: filepos(4) + visibility(1) + type(1) + name (short string)
    fn parse_boundsheet(&self, data: &[u8]) -> BiffResult<RawSheet> {
        let mut r = ByteReader::new(data);
        let filepos = r.u32()?;
        let visibility = r.u8()?;
        let sheet_type = r.u8()?;
        let name = read_short_string(&mut r, self.version, self.codepage)?;
        Ok(RawSheet {
            filepos,
            visibility,
            sheet_type,
            name: self.charset.restrict(name),
        })
    }

    /// A worksheet handle for the sheet at `index`, or `None` if the sheet
    /// directory has no such entry. The sheet is not parsed yet.
    pub fn worksheet(&self, index: usize) -> Option<WorkSheet<'_>> {
        let sheet = self.sheets.get(index)?;
        Some(WorkSheet::new(self, sheet.filepos))
    }

    /// Read the document property streams.
    ///
    /// Returns `Ok(None)` when the container has neither property stream.
    pub fn summary_info(&self) -> BiffResult<Option<RawSummaryInfo>> {
        let mut container = self.container.borrow_mut();
        let info = summary::read(&mut *container)?;
        Ok(info.map(|info| info.map_text(|s| self.charset.restrict(s))))
    }

    pub(crate) fn stream(&self) -> &[u8] {
        &self.stream
    }

    pub(crate) fn target_charset(&self) -> &TargetCharset {
        &self.charset
    }

    pub fn version(&self) -> BiffVersion {
        self.version
    }

    /// True for BIFF5/7 (Excel 5.0/95) workbooks.
    pub fn is_biff5(&self) -> bool {
        self.version == BiffVersion::Biff5
    }

    /// Substream type from the globals BOF record.
    pub fn workbook_type(&self) -> u16 {
        self.workbook_type
    }

    pub fn is1904(&self) -> bool {
        self.is1904
    }

    pub fn codepage(&self) -> u16 {
        self.codepage
    }

    /// The target charset label given at open time.
    pub fn charset(&self) -> &str {
        self.charset.label()
    }

    pub fn active_sheet(&self) -> u16 {
        self.active_sheet
    }

    pub fn sheets(&self) -> &[RawSheet] {
        &self.sheets
    }

    pub fn fonts(&self) -> &[RawFont] {
        &self.fonts
    }

    pub fn formats(&self) -> &[RawFormat] {
        &self.formats
    }

    pub fn xfs(&self) -> &[RawXf] {
        &self.xfs
    }

    /// The shared string table.
    pub fn sst(&self) -> &[String] {
        &self.sst
    }
}
