//! # jsondoc
//!
//! A JSON document engine: strict RFC 8259 parsing into an ordered value tree,
//! a pretty writer, and structured binding between that tree and native Rust
//! types.
//!
//! ## Key Features
//!
//! - **Strict Grammar**: Leading zeros, trailing commas, bare control
//!   characters and trailing garbage are all rejected
//! - **Precise Diagnostics**: Every syntax error carries the 1-based line and
//!   column where parsing stopped
//! - **Ordered Objects**: Members keep their first-insertion order, so output
//!   reproduces the field order of the input
//! - **Structured Binding**: Validate a tree against a type without touching
//!   it, then deserialize into it, or serialize a type into a fresh tree
//! - **No Unsafe Code**: Written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! jsondoc = "0.1"
//! ```
//!
//! ### Binding a Record
//!
//! ```rust
//! use jsondoc::{from_str, record, to_string};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! record!(User {
//!     "id" => id,
//!     "name" => name,
//!     "active" => active,
//! });
//!
//! let user: User = from_str(r#"{ "id": 123, "name": "Alice", "active": true }"#).unwrap();
//! assert_eq!(user.name, "Alice");
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "{\n  \"id\" : 123,\n  \"name\" : \"Alice\",\n  \"active\" : true\n}");
//! assert_eq!(from_str::<User>(&text).unwrap(), user);
//! ```
//!
//! ### Errors With Positions
//!
//! ```rust
//! use jsondoc::{Document, Error};
//!
//! let mut doc = Document::new();
//! let err = doc.parse_str("{\n  \"a\": 01\n}").unwrap_err();
//! assert_eq!(err.error, Error::LeadingZeros);
//! assert_eq!((err.line(), err.column()), (2, 8));
//! assert_eq!(err.to_string(), "Numbers cannot have leading zeros. Line: 2, column: 8");
//! ```
//!
//! ### Dynamic Values with json! Macro
//!
//! ```rust
//! use jsondoc::{json, Value};
//!
//! let data = json!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "json"]
//! });
//!
//! assert_eq!(data["name"].as_str(), Some("Alice"));
//! assert_eq!(data["tags"].count(), 2);
//! assert_eq!(data["missing"], Value::Null);
//! ```
//!
//! ## Numbers
//!
//! Every number is an `f64`. The default [`NumberPolicy::Precise`] reads
//! correctly rounded values; [`NumberPolicy::Table`] trades the last bit of
//! accuracy for a simpler power-of-ten scaling. Integral values below `1e16`
//! are written without a fraction, everything else in the shortest form that
//! reads back to the same bits.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Nesting depth is bounded by [`ParseOptions::max_depth`] so hostile input
//!   cannot exhaust the stack
//! - Allocation failures while building strings and objects surface as
//!   [`Error::Exception`]

pub mod bind;
pub mod document;
pub mod error;
mod impls;
pub mod macros;
pub mod map;
pub mod number;
pub mod options;
pub mod parse;
pub mod prototype;
pub mod scan;
pub mod value;
pub mod write;

pub use bind::Bind;
pub use document::{validate, Document};
pub use error::{Error, ParseError, Position, Result};
pub use map::ObjectMap;
pub use options::{NumberPolicy, ParseOptions, WriteOptions, DEFAULT_MAX_DEPTH};
pub use prototype::{Field, Prototype, Record};
pub use value::{Null, Value};

use std::io;

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse `text` and bind it to a new `T`.
///
/// The whole tree is validated against `T` before anything is deserialized.
///
/// # Examples
///
/// ```rust
/// let scores: Vec<u8> = jsondoc::from_str("[3, 1, 4]").unwrap();
/// assert_eq!(scores, vec![3, 1, 4]);
/// ```
///
/// # Errors
///
/// The first syntax error with its position, or the validation failure
/// without one.
pub fn from_str<T>(text: &str) -> std::result::Result<T, ParseError>
where
    T: Bind + Default,
{
    from_slice(text.as_bytes())
}

/// Parse `bytes` as UTF-8 JSON text and bind it to a new `T`.
///
/// # Examples
///
/// ```rust
/// let flag: Option<bool> = jsondoc::from_slice(b"null").unwrap();
/// assert_eq!(flag, None);
/// ```
///
/// # Errors
///
/// As [`from_str`].
pub fn from_slice<T>(bytes: &[u8]) -> std::result::Result<T, ParseError>
where
    T: Bind + Default,
{
    let root = parse::parse(bytes, &ParseOptions::default())?;
    Ok(from_value(&root)?)
}

/// Read all of `reader` and bind it to a new `T`.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// let name: String = jsondoc::from_reader(Cursor::new(br#""Ada""#)).unwrap();
/// assert_eq!(name, "Ada");
/// ```
///
/// # Errors
///
/// [`Error::FileRead`] if reading fails, otherwise as [`from_str`].
pub fn from_reader<R, T>(mut reader: R) -> std::result::Result<T, ParseError>
where
    R: io::Read,
    T: Bind + Default,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|_| Error::FileRead)?;
    from_slice(&bytes)
}

/// Bind an existing tree to a new `T`.
///
/// # Examples
///
/// ```rust
/// use jsondoc::json;
///
/// let pair: Vec<f64> = jsondoc::from_value(&json!([0.5, -2])).unwrap();
/// assert_eq!(pair, vec![0.5, -2.0]);
/// ```
///
/// # Errors
///
/// Whatever `T`'s [`Bind::validate`] or [`Bind::deserialize`] reports.
pub fn from_value<T>(value: &Value) -> Result<T>
where
    T: Bind + Default,
{
    let mut target = T::default();
    target.validate(value)?;
    target.deserialize(value)?;
    Ok(target)
}

/// Serialize `value` into a new tree.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{json, to_value};
///
/// assert_eq!(to_value(&vec![Some(1u8), None]).unwrap(), json!([1, null]));
/// ```
///
/// # Errors
///
/// Whatever `T`'s [`Bind::serialize`] reports.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: Bind,
{
    let mut node = T::new_node();
    value.serialize(&mut node)?;
    Ok(node)
}

/// Serialize `value` to text indented by two spaces per level.
///
/// # Examples
///
/// ```rust
/// assert_eq!(jsondoc::to_string(&vec![true]).unwrap(), "[\n  true\n]");
/// ```
///
/// # Errors
///
/// Whatever `T`'s [`Bind::serialize`] reports, or
/// [`Error::IllegalCharacter`] if a string holds U+0000.
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: Bind,
{
    to_string_with_options(value, &WriteOptions::default())
}

/// Serialize `value` to text indented by one tab per level.
///
/// # Examples
///
/// ```rust
/// assert_eq!(jsondoc::to_string_pretty(&vec![1]).unwrap(), "[\n\t1\n]");
/// ```
///
/// # Errors
///
/// Whatever `T`'s [`Bind::serialize`] reports, or
/// [`Error::IllegalCharacter`] if a string holds U+0000.
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: Bind,
{
    to_string_with_options(value, &WriteOptions::tabs())
}

/// Serialize `value` to text with custom indentation.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{json, to_string_with_options, Value, WriteOptions};
///
/// let value: Value = json!({ "a": [] });
/// let text = to_string_with_options(&value, &WriteOptions::new().with_indent(4)).unwrap();
/// assert_eq!(text, "{\n    \"a\" : [\n    ]\n}");
/// ```
///
/// # Errors
///
/// Whatever `T`'s [`Bind::serialize`] reports, or
/// [`Error::IllegalCharacter`] if a string holds U+0000.
pub fn to_string_with_options<T>(value: &T, options: &WriteOptions) -> Result<String>
where
    T: Bind,
{
    let node = to_value(value)?;
    let mut out = String::new();
    write::write_value(&node, options, &mut out)?;
    Ok(out)
}

/// Serialize `value` as text into `writer`.
///
/// # Examples
///
/// ```rust
/// let mut buffer = Vec::new();
/// jsondoc::to_writer(&mut buffer, &"hi".to_string()).unwrap();
/// assert_eq!(buffer, b"\"hi\"");
/// ```
///
/// # Errors
///
/// [`Error::FileWrite`] if writing fails, otherwise as [`to_string`].
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Bind,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|_| Error::FileWrite)?;
    Ok(())
}
