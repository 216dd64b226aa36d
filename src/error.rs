//! Status codes and error types for JSON parsing, writing and binding.
//!
//! Every failure the crate can report is one variant of [`Error`]. Each variant
//! carries a fixed, human-readable status text, so callers can match on the
//! variant or print it directly.
//!
//! Parse failures are additionally wrapped in a [`ParseError`], which records
//! the line and column where the failure was detected.
//!
//! ## Error Categories
//!
//! - **I/O**: the file could not be opened, read or written
//! - **Syntax**: malformed text, reported with a [`Position`]
//! - **Binding**: the tree does not have the shape a native type expects
//! - **Resources**: allocation failure or nesting beyond the configured limit
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::{Document, Error};
//!
//! let mut doc = Document::new();
//! let err = doc.parse_str("{\"a\" 1}").unwrap_err();
//!
//! assert_eq!(err.error, Error::ExpectedColon);
//! assert_eq!(err.to_string(), "Expected colon. Line: 1, column: 6");
//! ```

use std::collections::TryReserveError;
use std::fmt;
use thiserror::Error;

/// Every status the engine can report.
///
/// The `Display` text of each variant is stable and is what
/// [`ParseError`] prefixes to its line/column suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
    #[error("Could not open file")]
    FileOpen,

    #[error("Could not read file")]
    FileRead,

    #[error("Could not write file")]
    FileWrite,

    /// The input was empty.
    #[error("Invalid JSON text")]
    TextInvalid,

    #[error("Expected opening curly braces")]
    ExpectedOpeningBrace,

    #[error("Expected closing curly braces or comma")]
    ExpectedClosingBraceOrComma,

    #[error("Expected opening square braces")]
    ExpectedOpeningBracket,

    #[error("Expected closing square braces or comma")]
    ExpectedClosingBracketOrComma,

    /// A raw control character, DEL, or malformed UTF-8 inside a string.
    #[error("Illegal character")]
    IllegalCharacter,

    #[error("Illegal escape")]
    IllegalEscape,

    #[error("Expected colon")]
    ExpectedColon,

    #[error("Expected begining double quotes")]
    ExpectedOpeningQuote,

    #[error("Expected ending double quotes")]
    ExpectedClosingQuote,

    #[error("Invalid number")]
    InvalidNumber,

    #[error("Expected 'true' or 'false'")]
    ExpectedTrueOrFalse,

    #[error("Expected 'null'")]
    ExpectedNull,

    #[error("Expected a JSON value (object, array, string, number, 'true', 'false', or 'null')")]
    ExpectedValue,

    /// Non-whitespace text follows the root value.
    #[error("Expected end of file")]
    ExpectedEndOfFile,

    /// The input ended inside a string or a multi-byte character.
    #[error("File ends prematurely")]
    PrematureEnd,

    #[error("Numbers cannot have leading zeros")]
    LeadingZeros,

    /// No root value to bind or write.
    #[error("JSON structure is invalid")]
    InvalidStructuredData,

    /// An object's ordering and its key set disagree.
    ///
    /// [`ObjectMap`](crate::ObjectMap) keeps both in one structure, so this
    /// status is never produced by the crate itself.
    #[error("An expected object value pair was not found")]
    MissingObjectElement,

    /// An allocation failed.
    #[error("An exception was caught")]
    Exception,

    /// A node does not hold the kind of value a binding expects.
    #[error("JSON structured data contains invalid value type")]
    InvalidValueType,

    /// A record field's key is absent from the object.
    #[error("Could not find requested name of name/value pair")]
    NameNotPresent,

    #[error("Maximum nesting depth exceeded")]
    DepthLimitExceeded,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::Exception
    }
}

/// A 1-based line and column in the source text.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line: {}, column: {}", self.line, self.column)
    }
}

/// A failure while loading a document, with its location when one applies.
///
/// I/O failures and empty input carry no position.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{Error, ParseError, Position};
///
/// let err = ParseError::at(Error::InvalidNumber, Position { line: 3, column: 7 });
/// assert_eq!(err.to_string(), "Invalid number. Line: 3, column: 7");
///
/// let err = ParseError::from(Error::FileOpen);
/// assert_eq!(err.to_string(), "Could not open file");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub struct ParseError {
    pub error: Error,
    pub position: Option<Position>,
}

impl ParseError {
    /// Creates a parse error located at `position`.
    #[must_use]
    pub const fn at(error: Error, position: Position) -> Self {
        ParseError {
            error,
            position: Some(position),
        }
    }

    /// The line of the failure, or 0 when it has no location.
    #[inline]
    #[must_use]
    pub fn line(&self) -> usize {
        self.position.map_or(0, |p| p.line)
    }

    /// The column of the failure, or 0 when it has no location.
    #[inline]
    #[must_use]
    pub fn column(&self) -> usize {
        self.position.map_or(0, |p| p.column)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) if self.error != Error::Exception => {
                write!(f, "{}. {}", self.error, position)
            }
            _ => write!(f, "{}", self.error),
        }
    }
}

impl From<Error> for ParseError {
    fn from(error: Error) -> Self {
        ParseError {
            error,
            position: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
