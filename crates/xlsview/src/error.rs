//! Error types for xlsview

use thiserror::Error;
use xlsview_biff::{error as status, error_message, BiffError, StatusCode};

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong, one kind per engine failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorKind {
    /// The input could not be opened
    Open,
    /// Positioning inside the container failed
    Seek,
    /// I/O failure or truncated input
    Read,
    /// Malformed container or BIFF structure, including an unknown sheet index
    Parse,
    /// Allocation failure
    Malloc,
    /// The workbook is password protected
    UnsupportedEncryption,
    /// A required argument was empty or invalid
    NullArgument,
}

impl ErrorKind {
    /// Map an engine status code to a kind. Unknown codes map to
    /// [`ErrorKind::Parse`].
    pub fn from_code(code: StatusCode) -> Self {
        match code {
            status::STATUS_OPEN => ErrorKind::Open,
            status::STATUS_SEEK => ErrorKind::Seek,
            status::STATUS_READ => ErrorKind::Read,
            status::STATUS_PARSE => ErrorKind::Parse,
            status::STATUS_MALLOC => ErrorKind::Malloc,
            status::STATUS_UNSUPPORTED_ENCRYPTION => ErrorKind::UnsupportedEncryption,
            status::STATUS_NULL_ARGUMENT => ErrorKind::NullArgument,
            _ => ErrorKind::Parse,
        }
    }

    /// The engine status code for this kind.
    pub fn code(self) -> StatusCode {
        match self {
            ErrorKind::Open => status::STATUS_OPEN,
            ErrorKind::Seek => status::STATUS_SEEK,
            ErrorKind::Read => status::STATUS_READ,
            ErrorKind::Parse => status::STATUS_PARSE,
            ErrorKind::Malloc => status::STATUS_MALLOC,
            ErrorKind::UnsupportedEncryption => status::STATUS_UNSUPPORTED_ENCRYPTION,
            ErrorKind::NullArgument => status::STATUS_NULL_ARGUMENT,
        }
    }

    /// The engine's message for this kind.
    pub fn message(self) -> &'static str {
        error_message(self.code())
    }
}

/// An error reported while opening or reading a workbook.
///
/// Two errors are equal when their kinds are equal; the message and the
/// underlying engine error are not compared.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: &'static str,
    #[source]
    source: Option<BiffError>,
}

impl Error {
    /// Create an error of the given kind with the engine's message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.message(),
            source: None,
        }
    }

    /// Create an error from a raw engine status code.
    pub fn from_code(code: StatusCode) -> Self {
        Self::new(ErrorKind::from_code(code))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    /// The engine error this was converted from, if any.
    pub fn engine_error(&self) -> Option<&BiffError> {
        self.source.as_ref()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<BiffError> for Error {
    fn from(err: BiffError) -> Self {
        let kind = ErrorKind::from_code(err.code());
        Self {
            kind,
            message: kind.message(),
            source: Some(err),
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Error {}
