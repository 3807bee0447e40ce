use std::fmt;

use thiserror::Error;

use crate::value::JsonType;

pub use crate::parser::{ParseError, ParseErrorReason};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error classification shared by every fallible operation in the crate.
///
/// The discriminants are stable numeric error codes, with `0` reserved for
/// success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MemoryAllocationFailed = 1,
    InvalidUtf8,
    SyntaxError,
    InvalidType,
    KeyNotFound,
    IndexOutOfBounds,
    InvalidArgument,
    ParseError,
    SerializationError,
    NotImplemented,
    UnknownError,
}

impl ErrorKind {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::MemoryAllocationFailed => "Memory allocation failed",
            ErrorKind::InvalidUtf8 => "Invalid UTF-8 sequence",
            ErrorKind::SyntaxError => "JSON syntax error",
            ErrorKind::InvalidType => "Invalid type",
            ErrorKind::KeyNotFound => "Key not found",
            ErrorKind::IndexOutOfBounds => "Index out of bounds",
            ErrorKind::InvalidArgument => "Invalid argument",
            ErrorKind::ParseError => "Parse error",
            ErrorKind::SerializationError => "Serialization error",
            ErrorKind::NotImplemented => "Not implemented",
            ErrorKind::UnknownError => "Unknown error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Misuse of the value model: wrong variant, bad index or bad bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("value is not {}, found {found}", .expected.with_article())]
    InvalidType { expected: JsonType, found: JsonType },
    #[error("array index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("key {key:?} not found")]
    KeyNotFound { key: String },
    #[error("invalid UTF-8 sequence in string value")]
    InvalidUtf8,
}

impl ValueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValueError::InvalidType { .. } => ErrorKind::InvalidType,
            ValueError::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            ValueError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            ValueError::InvalidUtf8 => ErrorKind::InvalidUtf8,
        }
    }
}

/// Failure to decode a quoted JSON string literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    #[error("JSON string literal must begin and end with '\"'")]
    NotQuoted,
    #[error("invalid escape sequence at byte {position}")]
    InvalidEscape { position: usize },
    #[error("invalid unicode escape sequence at byte {position}")]
    InvalidUnicodeEscape { position: usize },
    #[error("unescaped string is not valid UTF-8")]
    InvalidUtf8,
}

impl EscapeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EscapeError::NotQuoted => ErrorKind::InvalidArgument,
            EscapeError::InvalidEscape { .. } | EscapeError::InvalidUnicodeEscape { .. } => {
                ErrorKind::SyntaxError
            }
            EscapeError::InvalidUtf8 => ErrorKind::InvalidUtf8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error(transparent)]
    Escape(#[from] EscapeError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(err) => err.kind(),
            Error::Value(err) => err.kind(),
            Error::Escape(err) => err.kind(),
        }
    }
}
