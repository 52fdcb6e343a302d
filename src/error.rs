use thiserror::Error;

/// The single failure reported by the fallible entry points.
///
/// Every malformed input and every unencodable value collapses into this one
/// variant; positions and causes are not part of the public surface.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid rison input")]
    InvalidInput,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub(crate) enum Code {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("EoF while parsing a list")]
    EofList,
    #[error("EoF while parsing an object")]
    EofObject,
    #[error("EoF while parsing a quoted string")]
    EofString,
    #[error("EoF while parsing a value")]
    EofValue,
    #[error("expected `:`")]
    ExpectedColon,
    #[error("expected `,` or `)`")]
    ExpectedListSepOrEnd,
    #[error("expected `,` or `)`")]
    ExpectedObjectSepOrEnd,
    #[error("expected ident")]
    ExpectedIdent,
    #[error("expected value")]
    ExpectedValue,
    #[error("invalid marker")]
    InvalidMarker,
    #[error("invalid escape")]
    InvalidEscape,
    #[error("invalid number")]
    InvalidNumber,
    #[error("invalid unicode code point")]
    InvalidUnicode,
    #[error("trailing characters")]
    TrailingChars,
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
    #[error("fraction must be a non-empty run of digits")]
    InvalidFraction,
    #[error("number has neither fraction nor exponent")]
    BareNumber,
    #[error("object key is not an identifier")]
    InvalidKey,
}

/// Cause of a failure inside the encoder or decoder, kept crate-internal.
#[derive(Debug)]
pub(crate) struct ErrorImpl {
    code: Code,
    /// Byte offset into the input, when the failure came from decoding.
    offset: Option<usize>,
}

pub(crate) type Fallible<T> = std::result::Result<T, ErrorImpl>;

impl ErrorImpl {
    pub(crate) fn at(code: Code, offset: usize) -> Self {
        Self {
            code,
            offset: Some(offset),
        }
    }

    pub(crate) fn unencodable(code: Code) -> Self {
        Self { code, offset: None }
    }

    /// Drop the cause, leaving only a debug event behind.
    pub(crate) fn collapse(self) -> Error {
        match self.offset {
            Some(offset) => tracing::debug!(cause = %self.code, offset, "rejected rison input"),
            None => tracing::debug!(cause = %self.code, "rejected value for rison encoding"),
        }
        Error::InvalidInput
    }
}

impl serde::de::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: std::fmt::Display,
    {
        tracing::debug!(cause = %msg, "rison value did not match the requested type");
        Error::InvalidInput
    }
}
