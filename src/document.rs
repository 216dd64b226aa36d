//! The document façade: one optional root value plus the operations that
//! load, bind and store it.
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::{record, Document, WriteOptions};
//!
//! #[derive(Default)]
//! struct Settings {
//!     volume: u8,
//!     muted: bool,
//! }
//!
//! record!(Settings { "volume" => volume, "muted" => muted });
//!
//! let mut doc = Document::new();
//! doc.parse_str(r#"{ "volume": 7, "muted": false }"#).unwrap();
//!
//! let mut settings = Settings::default();
//! jsondoc::validate(&doc, &settings).unwrap();
//! doc.deserialize_to(&mut settings).unwrap();
//! assert_eq!(settings.volume, 7);
//!
//! settings.muted = true;
//! doc.serialize_from(&settings).unwrap();
//! assert_eq!(
//!     doc.to_string_with(&WriteOptions::default()).unwrap(),
//!     "{\n  \"volume\" : 7,\n  \"muted\" : true\n}"
//! );
//! ```

use crate::write::write_value;
use crate::{parse, Bind, Error, ParseError, ParseOptions, Result, Value, WriteOptions};
use log::debug;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Owns at most one root [`Value`].
///
/// A new document is empty. Every parse drops the previous root first, so a
/// failed parse leaves the document empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Option<Value>,
    options: ParseOptions,
}

impl Document {
    /// Creates an empty document with default parse options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document that parses with `options`.
    #[must_use]
    pub fn with_options(options: ParseOptions) -> Self {
        Document {
            root: None,
            options,
        }
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses the contents of the file at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::FileOpen`] if the file cannot be opened,
    /// [`Error::FileRead`] if it cannot be read, otherwise as
    /// [`parse_slice`](Self::parse_slice).
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> std::result::Result<(), ParseError> {
        self.root = None;
        let path = path.as_ref();
        let mut file = fs::File::open(path).map_err(|e| {
            debug!("cannot open {}: {e}", path.display());
            Error::FileOpen
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            debug!("cannot read {}: {e}", path.display());
            Error::FileRead
        })?;
        self.parse_slice(&bytes)
    }

    /// Parses `text`.
    ///
    /// # Errors
    ///
    /// As [`parse_slice`](Self::parse_slice).
    pub fn parse_str(&mut self, text: &str) -> std::result::Result<(), ParseError> {
        self.parse_slice(text.as_bytes())
    }

    /// Parses `bytes` as UTF-8 JSON text, replacing the current root.
    ///
    /// # Errors
    ///
    /// The first syntax error, with its line and column, or
    /// [`Error::TextInvalid`] for empty input. The document is empty
    /// afterwards.
    pub fn parse_slice(&mut self, bytes: &[u8]) -> std::result::Result<(), ParseError> {
        self.root = None;
        let root = parse::parse(bytes, &self.options)?;
        debug!("parsed document with root {}", root.kind());
        self.root = Some(root);
        Ok(())
    }

    /// Reads all of `reader` and parses it.
    ///
    /// # Errors
    ///
    /// [`Error::FileRead`] if reading fails, otherwise as
    /// [`parse_slice`](Self::parse_slice).
    pub fn parse_reader<R: Read>(&mut self, mut reader: R) -> std::result::Result<(), ParseError> {
        self.root = None;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|_| Error::FileRead)?;
        self.parse_slice(&bytes)
    }

    /// Renders the root as text.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStructuredData`] if the document is empty,
    /// [`Error::IllegalCharacter`] if a string holds U+0000.
    pub fn to_string_with(&self, options: &WriteOptions) -> Result<String> {
        let root = self.root.as_ref().ok_or(Error::InvalidStructuredData)?;
        let mut out = String::new();
        write_value(root, options, &mut out)?;
        Ok(out)
    }

    /// Writes the root as text to `writer`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStructuredData`] if the document is empty,
    /// [`Error::IllegalCharacter`] if a string holds U+0000,
    /// [`Error::FileWrite`] if writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W, options: &WriteOptions) -> Result<()> {
        let text = self.to_string_with(options)?;
        writer.write_all(text.as_bytes()).map_err(|e| {
            debug!("write failed: {e}");
            Error::FileWrite
        })?;
        writer.flush().map_err(|_| Error::FileWrite)
    }

    /// Writes the root as text to the file at `path`, replacing it.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStructuredData`] if the document is empty,
    /// [`Error::IllegalCharacter`] if a string holds U+0000 (the file is not
    /// touched),
    /// [`Error::FileOpen`] if the file cannot be created,
    /// [`Error::FileWrite`] if writing fails.
    pub fn write_file(&self, path: impl AsRef<Path>, options: &WriteOptions) -> Result<()> {
        let text = self.to_string_with(options)?;
        let path = path.as_ref();
        let file = fs::File::create(path).map_err(|e| {
            debug!("cannot create {}: {e}", path.display());
            Error::FileOpen
        })?;
        let mut writer = io::BufWriter::new(file);
        writer.write_all(text.as_bytes()).map_err(|e| {
            debug!("cannot write {}: {e}", path.display());
            Error::FileWrite
        })?;
        writer.flush().map_err(|_| Error::FileWrite)
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    #[inline]
    pub fn root_mut(&mut self) -> Option<&mut Value> {
        self.root.as_mut()
    }

    /// Replaces the root, returning the previous one.
    pub fn set_root(&mut self, root: Value) -> Option<Value> {
        self.root.replace(root)
    }

    /// Removes the root, leaving the document empty.
    pub fn take_root(&mut self) -> Option<Value> {
        self.root.take()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Fills `target` from the root.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStructuredData`] if the document is empty, otherwise
    /// whatever `target`'s [`Bind::deserialize`] reports.
    pub fn deserialize_to<T: Bind>(&self, target: &mut T) -> Result<()> {
        let root = self.root.as_ref().ok_or(Error::InvalidStructuredData)?;
        target.deserialize(root)
    }

    /// Replaces the root with the serialized form of `source`.
    ///
    /// # Errors
    ///
    /// Whatever `source`'s [`Bind::serialize`] reports; the document is
    /// empty afterwards.
    pub fn serialize_from<T: Bind>(&mut self, source: &T) -> Result<()> {
        self.root = None;
        let mut root = T::new_node();
        source.serialize(&mut root)?;
        self.root = Some(root);
        Ok(())
    }
}

/// Checks that `doc`'s root has the shape `data` expects, without changing
/// either.
///
/// # Errors
///
/// [`Error::InvalidStructuredData`] if the document is empty, otherwise
/// whatever `data`'s [`Bind::validate`] reports.
pub fn validate<T: Bind>(doc: &Document, data: &T) -> Result<()> {
    let root = doc.root().ok_or(Error::InvalidStructuredData)?;
    data.validate(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(
            doc.to_string_with(&WriteOptions::default()),
            Err(Error::InvalidStructuredData)
        );
        let mut n = 0u8;
        assert_eq!(doc.deserialize_to(&mut n), Err(Error::InvalidStructuredData));
        assert_eq!(validate(&doc, &n), Err(Error::InvalidStructuredData));
    }

    #[test]
    fn test_failed_parse_clears_root() {
        let mut doc = Document::new();
        doc.parse_str("[1]").unwrap();
        assert!(!doc.is_empty());

        let err = doc.parse_str("[1,").unwrap_err();
        assert_eq!(err.error, Error::ExpectedValue);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_replaces_root() {
        let mut doc = Document::new();
        doc.parse_str("1").unwrap();
        doc.parse_str(r#"{"a":true}"#).unwrap();
        assert_eq!(doc.root(), Some(&json!({ "a": true })));
    }

    #[test]
    fn test_serialize_from_replaces_root() {
        let mut doc = Document::new();
        doc.parse_str(r#"{"old": 1}"#).unwrap();
        doc.serialize_from(&vec!["x".to_string()]).unwrap();
        assert_eq!(doc.root(), Some(&json!(["x"])));
    }

    #[test]
    fn test_write_to() {
        let mut doc = Document::new();
        doc.set_root(json!({ "k": [null] }));
        let mut out = Vec::new();
        doc.write_to(&mut out, &WriteOptions::new().with_indent(1))
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n \"k\" : [\n  null\n ]\n}");
    }

    #[test]
    fn test_nul_string_is_not_written() {
        let mut doc = Document::new();
        doc.set_root(json!({ "name": "a\u{0}b" }));
        assert_eq!(
            doc.to_string_with(&WriteOptions::default()),
            Err(Error::IllegalCharacter)
        );
        let mut out = Vec::new();
        assert_eq!(
            doc.write_to(&mut out, &WriteOptions::default()),
            Err(Error::IllegalCharacter)
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_parse_reader() {
        let mut doc = Document::new();
        doc.parse_reader(std::io::Cursor::new(b" [true] ")).unwrap();
        assert_eq!(doc.take_root(), Some(json!([true])));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let mut doc = Document::new();
        let err = doc
            .parse_file("/definitely/not/a/real/path.json")
            .unwrap_err();
        assert_eq!(err.error, Error::FileOpen);
        assert_eq!(err.position, None);
        assert_eq!(err.to_string(), "Could not open file");
    }
}
