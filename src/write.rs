//! Pretty printer for [`Value`] trees.
//!
//! Layout rules:
//!
//! - scalars are written inline
//! - an array or object opens its bracket, then puts each child on its own
//!   line, one indent step deeper than the container, separated by `,`
//! - the closing bracket goes on its own line at the container's indentation
//! - object members are written as `"key" : value`, in insertion order
//! - there is no trailing newline
//!
//! The parser rejects `\u0000`, so a string holding U+0000 cannot be written
//! as text that reads back; [`write_value`] reports it as
//! [`Error::IllegalCharacter`](crate::Error::IllegalCharacter).
//!
//! ```text
//! {
//!   "name" : "Widget",
//!   "sizes" : [
//!     1,
//!     2
//!   ],
//!   "extra" : {
//!   }
//! }
//! ```

use crate::{number, Error, Result, Value, WriteOptions};
use log::trace;

/// Appends the text of `value` to `out`.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{json, write::write_value, WriteOptions};
///
/// let value = json!({ "a": [1, "x"] });
/// let mut out = String::new();
/// write_value(&value, &WriteOptions::default(), &mut out).unwrap();
/// assert_eq!(out, "{\n  \"a\" : [\n    1,\n    \"x\"\n  ]\n}");
/// ```
///
/// # Errors
///
/// [`Error::IllegalCharacter`] if a string or key contains U+0000. `out` may
/// hold a partial rendering afterwards.
pub fn write_value(value: &Value, options: &WriteOptions, out: &mut String) -> Result<()> {
    trace!("writing {} value", value.kind());
    Writer::new(options, out, true).value(value)
}

/// Like [`write_value`], but U+0000 is written as `\u0000` instead of
/// failing. Used for `Display`.
pub(crate) fn write_value_lossy(value: &Value, options: &WriteOptions, out: &mut String) {
    // Only NUL fails, and it is not rejected in this mode.
    let _ = Writer::new(options, out, false).value(value);
}

struct Writer<'a> {
    options: &'a WriteOptions,
    /// Indentation of the container currently being written.
    prefix: String,
    out: &'a mut String,
    reject_nul: bool,
}

impl<'a> Writer<'a> {
    fn new(options: &'a WriteOptions, out: &'a mut String, reject_nul: bool) -> Self {
        Writer {
            options,
            prefix: String::new(),
            out,
            reject_nul,
        }
    }

    fn value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Number(n) => number::write(*n, self.out),
            Value::String(s) => self.string(s)?,
            Value::Array(elements) => {
                self.out.push('[');
                self.out.push('\n');
                self.descend();
                for (i, element) in elements.iter().enumerate() {
                    self.separator(i);
                    self.value(element)?;
                }
                self.ascend(!elements.is_empty());
                self.out.push(']');
            }
            Value::Object(members) => {
                self.out.push('{');
                self.out.push('\n');
                self.descend();
                for (i, (key, member)) in members.iter().enumerate() {
                    self.separator(i);
                    self.string(key)?;
                    self.out.push_str(" : ");
                    self.value(member)?;
                }
                self.ascend(!members.is_empty());
                self.out.push('}');
            }
        }
        Ok(())
    }

    fn string(&mut self, s: &str) -> Result<()> {
        if self.reject_nul && s.contains('\0') {
            return Err(Error::IllegalCharacter);
        }
        escape(s, self.out);
        Ok(())
    }

    fn separator(&mut self, index: usize) {
        if index > 0 {
            self.out.push_str(",\n");
        }
        self.out.push_str(&self.prefix);
    }

    fn descend(&mut self) {
        self.options.push_step(&mut self.prefix);
    }

    fn ascend(&mut self, had_children: bool) {
        let len = self.prefix.len() - self.options.step_len();
        self.prefix.truncate(len);
        if had_children {
            self.out.push('\n');
        }
        self.out.push_str(&self.prefix);
    }
}

/// Appends `s` as a quoted JSON string.
///
/// Quotes, backslashes and control characters (DEL included) are escaped;
/// everything else is copied through.
///
/// # Examples
///
/// ```rust
/// use jsondoc::write::write_string;
///
/// let mut out = String::new();
/// write_string("say \"hi\"\n\u{1}", &mut out).unwrap();
/// assert_eq!(out, r#""say \"hi\"\n\u0001""#);
/// ```
///
/// # Errors
///
/// [`Error::IllegalCharacter`] if `s` contains U+0000; nothing is appended.
pub fn write_string(s: &str, out: &mut String) -> Result<()> {
    if s.contains('\0') {
        return Err(Error::IllegalCharacter);
    }
    escape(s, out);
    Ok(())
}

fn escape(s: &str, out: &mut String) {
    const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

    out.push('"');
    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let short = match b {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x08 => "\\b",
            0x0C => "\\f",
            0x00..=0x1F | 0x7F => "",
            _ => continue,
        };
        out.push_str(&s[start..i]);
        if short.is_empty() {
            out.push_str("\\u00");
            out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
            out.push(char::from(HEX_DIGITS[usize::from(b & 0xF)]));
        } else {
            out.push_str(short);
        }
        start = i + 1;
    }
    out.push_str(&s[start..]);
    out.push('"');
}
