//! Engine error types and native status codes.

use thiserror::Error;

/// Result type for engine operations
pub type BiffResult<T> = std::result::Result<T, BiffError>;

/// Native status code reported by every engine failure.
///
/// Codes are plain integers so that callers can round-trip them through
/// their own taxonomies; [`error_message`] formats any code, known or not.
pub type StatusCode = i32;

pub const STATUS_OK: StatusCode = 0;
pub const STATUS_OPEN: StatusCode = 1;
pub const STATUS_SEEK: StatusCode = 2;
pub const STATUS_READ: StatusCode = 3;
pub const STATUS_PARSE: StatusCode = 4;
pub const STATUS_MALLOC: StatusCode = 5;
pub const STATUS_UNSUPPORTED_ENCRYPTION: StatusCode = 6;
pub const STATUS_NULL_ARGUMENT: StatusCode = 7;

/// Human-readable message for a status code.
pub fn error_message(code: StatusCode) -> &'static str {
    match code {
        STATUS_OK => "No error",
        STATUS_OPEN => "Unable to open file",
        STATUS_SEEK => "Unable to seek within file",
        STATUS_READ => "Unable to read from file",
        STATUS_PARSE => "Unable to parse file",
        STATUS_MALLOC => "Unable to allocate sufficient memory",
        STATUS_UNSUPPORTED_ENCRYPTION => "Unsupported encryption scheme",
        STATUS_NULL_ARGUMENT => "Null argument",
        _ => "Unknown error",
    }
}

/// Errors that can occur while opening or parsing a BIFF workbook
#[derive(Debug, Error)]
pub enum BiffError {
    /// The input could not be opened
    #[error("cannot open input: {0}")]
    Open(#[source] std::io::Error),

    /// Positioning inside the container or stream failed
    #[error("seek failed: {0}")]
    Seek(String),

    /// I/O failure or truncated stream
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    /// Malformed container or BIFF structure
    #[error("parse error: {0}")]
    Parse(String),

    /// A buffer could not be reserved
    #[error("allocation of {0} bytes failed")]
    Malloc(usize),

    /// The workbook carries a FILEPASS record
    #[error("workbook is password protected")]
    UnsupportedEncryption,

    /// A required argument was empty or invalid
    #[error("invalid argument: {0}")]
    NullArgument(String),
}

impl BiffError {
    /// The native status code for this error.
    pub fn code(&self) -> StatusCode {
        match self {
            BiffError::Open(_) => STATUS_OPEN,
            BiffError::Seek(_) => STATUS_SEEK,
            BiffError::Read(_) => STATUS_READ,
            BiffError::Parse(_) => STATUS_PARSE,
            BiffError::Malloc(_) => STATUS_MALLOC,
            BiffError::UnsupportedEncryption => STATUS_UNSUPPORTED_ENCRYPTION,
            BiffError::NullArgument(_) => STATUS_NULL_ARGUMENT,
        }
    }

    pub(crate) fn parse<S: Into<String>>(msg: S) -> Self {
        BiffError::Parse(msg.into())
    }

    /// Classify an error raised by the CFB layer while opening a container.
    ///
    /// `cfb` reports structural problems as `InvalidData`/`InvalidInput`;
    /// those are parse failures, everything else is a read failure.
    pub(crate) fn from_container(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::InvalidData | ErrorKind::InvalidInput | ErrorKind::UnexpectedEof => {
                BiffError::Parse(format!("invalid compound file: {err}"))
            }
            ErrorKind::NotFound => BiffError::Parse(format!("missing container stream: {err}")),
            _ => BiffError::Read(err),
        }
    }
}
