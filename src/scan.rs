//! Byte-level cursor over JSON text.
//!
//! The [`Scanner`] knows about whitespace, literal keywords and strings; the
//! parser drives it. Strings are decoded in two passes over the same bytes:
//! the first measures the decoded length so the destination can be reserved
//! up front (and fail cleanly if it cannot), the second copies.
//!
//! On failure the cursor is left at the offset where the problem was found,
//! and [`locate`] turns that offset into a line and column.

use crate::{Error, Position, Result};

/// Hex digit values; `0xFF` marks bytes that are not hex digits.
const HEX: [u8; 256] = {
    let mut table = [0xFF_u8; 256];
    let mut i = 0;
    while i < 256 {
        let b = i as u8;
        table[i] = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => 0xFF,
        };
        i += 1;
    }
    table
};

/// JSON insignificant whitespace.
#[inline]
pub const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// A decoded stretch of string content.
enum Piece<'a> {
    Text(&'a str),
    Char(char),
}

impl Piece<'_> {
    fn len(&self) -> usize {
        match self {
            Piece::Text(s) => s.len(),
            Piece::Char(c) => c.len_utf8(),
        }
    }
}

/// A failure inside a string, with the byte offset where it was found.
type Fail = (Error, usize);

pub struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Scanner { bytes, pos: 0 }
    }

    #[inline]
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Moves the cursor back to a saved position.
    #[inline]
    pub fn restore(&mut self, pos: usize) {
        self.pos = pos;
    }

    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// The unread input.
    #[inline]
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    #[inline]
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    /// Consumes `b` if it is the next byte.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes `literal` if the input continues with it.
    pub fn eat_literal(&mut self, literal: &[u8]) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Reads a string whose opening quote has already been consumed.
    ///
    /// On success the cursor is past the closing quote.
    ///
    /// # Errors
    ///
    /// - [`Error::IllegalCharacter`] for raw control characters, DEL, or
    ///   malformed UTF-8
    /// - [`Error::IllegalEscape`] for unknown escapes, bad `\u` sequences,
    ///   unpaired surrogates, or `\u0000`
    /// - [`Error::PrematureEnd`] if the input ends before the closing quote
    /// - [`Error::Exception`] if the string cannot be allocated
    pub fn read_string(&mut self) -> Result<String> {
        let mut decoded = 0usize;
        let consumed = match self.walk_string(|piece| decoded += piece.len()) {
            Ok(consumed) => consumed,
            Err((error, offset)) => {
                self.pos = offset;
                return Err(error);
            }
        };

        let mut out = String::new();
        out.try_reserve_exact(decoded)?;
        self.walk_string(|piece| match piece {
            Piece::Text(s) => out.push_str(s),
            Piece::Char(c) => out.push(c),
        })
        .map_err(|(error, _)| error)?;

        self.pos += consumed;
        Ok(out)
    }

    /// Walks string content from the cursor to the closing quote, handing
    /// each decoded piece to `emit`. Returns the number of bytes consumed,
    /// closing quote included.
    fn walk_string(&self, mut emit: impl FnMut(Piece<'a>)) -> std::result::Result<usize, Fail> {
        let bytes = self.bytes;
        let start = self.pos;
        let mut run = start;
        let mut i = start;

        loop {
            let Some(&b) = bytes.get(i) else {
                emit_run(bytes, run, i, &mut emit)?;
                return Err((Error::PrematureEnd, i));
            };
            match b {
                b'"' => {
                    emit_run(bytes, run, i, &mut emit)?;
                    return Ok(i + 1 - start);
                }
                b'\\' => {
                    emit_run(bytes, run, i, &mut emit)?;
                    let (c, len) = unescape(bytes, i)?;
                    emit(Piece::Char(c));
                    i += len;
                    run = i;
                }
                0x00..=0x1F | 0x7F => {
                    emit_run(bytes, run, i, &mut emit)?;
                    return Err((Error::IllegalCharacter, i));
                }
                _ => i += 1,
            }
        }
    }
}

/// Validates `bytes[from..to]` as UTF-8 and emits it.
fn emit_run<'a>(
    bytes: &'a [u8],
    from: usize,
    to: usize,
    emit: &mut impl FnMut(Piece<'a>),
) -> std::result::Result<(), Fail> {
    if from == to {
        return Ok(());
    }
    match std::str::from_utf8(&bytes[from..to]) {
        Ok(text) => {
            emit(Piece::Text(text));
            Ok(())
        }
        Err(e) => {
            let offset = from + e.valid_up_to();
            // A sequence cut short by the end of the input, not by a quote.
            if e.error_len().is_none() && to == bytes.len() {
                Err((Error::PrematureEnd, to))
            } else {
                Err((Error::IllegalCharacter, offset))
            }
        }
    }
}

/// Decodes the escape sequence starting with the backslash at `at`.
///
/// Returns the character and the number of source bytes it spans.
fn unescape(bytes: &[u8], at: usize) -> std::result::Result<(char, usize), Fail> {
    let Some(&kind) = bytes.get(at + 1) else {
        return Err((Error::PrematureEnd, at + 1));
    };
    let c = match kind {
        b'"' => '"',
        b'\\' => '\\',
        b'/' => '/',
        b'b' => '\u{0008}',
        b'f' => '\u{000C}',
        b'n' => '\n',
        b'r' => '\r',
        b't' => '\t',
        b'u' => return unescape_unicode(bytes, at),
        _ => return Err((Error::IllegalEscape, at)),
    };
    Ok((c, 2))
}

fn unescape_unicode(bytes: &[u8], at: usize) -> std::result::Result<(char, usize), Fail> {
    let unit = hex4(bytes, at + 2).map_err(|e| (e, at))?;
    match unit {
        0 => Err((Error::IllegalEscape, at)),
        0xD800..=0xDBFF => {
            let low_at = at + 6;
            if bytes.get(low_at) != Some(&b'\\') || bytes.get(low_at + 1) != Some(&b'u') {
                return Err((Error::IllegalEscape, at));
            }
            let low = hex4(bytes, low_at + 2).map_err(|e| (e, low_at))?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err((Error::IllegalEscape, low_at));
            }
            let scalar = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            let c = char::from_u32(scalar).ok_or((Error::IllegalEscape, at))?;
            Ok((c, 12))
        }
        0xDC00..=0xDFFF => Err((Error::IllegalEscape, at)),
        _ => {
            let c = char::from_u32(unit).ok_or((Error::IllegalEscape, at))?;
            Ok((c, 6))
        }
    }
}

/// Reads exactly four hex digits at `at`.
fn hex4(bytes: &[u8], at: usize) -> Result<u32> {
    let mut unit = 0u32;
    for k in 0..4 {
        let Some(&b) = bytes.get(at + k) else {
            return Err(Error::PrematureEnd);
        };
        let digit = HEX[usize::from(b)];
        if digit == 0xFF {
            return Err(Error::IllegalEscape);
        }
        unit = (unit << 4) | u32::from(digit);
    }
    Ok(unit)
}

/// Converts a byte offset into a 1-based line and column.
///
/// Lines are separated by `\n`; columns count characters, not bytes.
///
/// # Examples
///
/// ```rust
/// use jsondoc::scan::locate;
/// use jsondoc::Position;
///
/// let text = "{\n  \"é\": x\n}";
/// let offset = text.find('x').unwrap();
/// assert_eq!(locate(text.as_bytes(), offset), Position { line: 2, column: 8 });
/// ```
#[must_use]
pub fn locate(bytes: &[u8], offset: usize) -> Position {
    let offset = offset.min(bytes.len());
    let before = &bytes[..offset];
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |nl| nl + 1);
    let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
    let column = 1 + before[line_start..]
        .iter()
        .filter(|&&b| b & 0xC0 != 0x80)
        .count();
    Position { line, column }
}
