//! Recursive-descent construction of a [`Value`] tree from JSON text.
//!
//! Each kind of value has its own attempt. An attempt that does not recognise
//! the first byte answers "not mine" (`Ok(None)`), the cursor is put back and
//! the next attempt runs. Once an attempt has recognised its first byte, any
//! error it reports is final. The first error stops the parse; its byte offset
//! becomes the reported line and column.
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::parse::parse;
//! use jsondoc::{Error, ParseOptions, Position};
//!
//! let value = parse(br#"{"a": [1, 2]}"#, &ParseOptions::default()).unwrap();
//! assert_eq!(value["a"][1].as_f64(), Some(2.0));
//!
//! let err = parse(b"[1,\n 2,]", &ParseOptions::default()).unwrap_err();
//! assert_eq!(err.error, Error::ExpectedValue);
//! assert_eq!(err.position, Some(Position { line: 2, column: 4 }));
//! ```

use crate::scan::{locate, Scanner};
use crate::{number, Error, ObjectMap, ParseError, ParseOptions, Result, Value};
use log::debug;

type Attempt<'a> = fn(&mut Parser<'a>) -> Result<Option<Value>>;

/// Parses a complete document: one value, optionally surrounded by whitespace.
///
/// A single trailing NUL byte is ignored, so C-style terminated buffers can be
/// passed as they are.
///
/// # Errors
///
/// [`Error::TextInvalid`] for empty input, otherwise the first syntax, nesting
/// or allocation error, located in the text.
pub fn parse(bytes: &[u8], options: &ParseOptions) -> std::result::Result<Value, ParseError> {
    let bytes = match bytes.split_last() {
        Some((0, text)) => text,
        _ => bytes,
    };
    if bytes.is_empty() {
        return Err(Error::TextInvalid.into());
    }

    let mut parser = Parser::new(bytes, options);
    match parser.parse_document() {
        Ok(value) => Ok(value),
        Err(error) => {
            let position = locate(bytes, parser.scanner.pos());
            debug!("parse failed: {error} at {position}");
            Err(ParseError::at(error, position))
        }
    }
}

struct Parser<'a> {
    scanner: Scanner<'a>,
    options: &'a ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(bytes: &'a [u8], options: &'a ParseOptions) -> Self {
        Parser {
            scanner: Scanner::new(bytes),
            options,
            depth: 0,
        }
    }

    fn parse_document(&mut self) -> Result<Value> {
        self.scanner.skip_whitespace();
        let value = self.parse_value()?;
        self.scanner.skip_whitespace();
        if !self.scanner.is_at_end() {
            return Err(Error::ExpectedEndOfFile);
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<Value> {
        let attempts: [Attempt<'a>; 6] = [
            Self::try_string,
            Self::try_number,
            Self::try_bool,
            Self::try_null,
            Self::try_array,
            Self::try_object,
        ];
        let start = self.scanner.pos();
        for attempt in attempts {
            if let Some(value) = attempt(self)? {
                return Ok(value);
            }
            self.scanner.restore(start);
        }
        Err(Error::ExpectedValue)
    }

    fn try_string(&mut self) -> Result<Option<Value>> {
        if !self.scanner.eat(b'"') {
            return Ok(None);
        }
        self.scanner.read_string().map(|s| Some(Value::String(s)))
    }

    fn try_number(&mut self) -> Result<Option<Value>> {
        if !matches!(self.scanner.peek(), Some(b'-' | b'0'..=b'9')) {
            return Ok(None);
        }
        let (value, len) = number::read(self.scanner.rest(), self.options.number_policy)?;
        self.scanner.advance(len);
        Ok(Some(Value::Number(value)))
    }

    fn try_bool(&mut self) -> Result<Option<Value>> {
        match self.scanner.peek() {
            Some(b't') if self.scanner.eat_literal(b"true") => Ok(Some(Value::Bool(true))),
            Some(b'f') if self.scanner.eat_literal(b"false") => Ok(Some(Value::Bool(false))),
            Some(b't' | b'f') => Err(Error::ExpectedTrueOrFalse),
            _ => Ok(None),
        }
    }

    fn try_null(&mut self) -> Result<Option<Value>> {
        match self.scanner.peek() {
            Some(b'n') if self.scanner.eat_literal(b"null") => Ok(Some(Value::Null)),
            Some(b'n') => Err(Error::ExpectedNull),
            _ => Ok(None),
        }
    }

    fn try_array(&mut self) -> Result<Option<Value>> {
        if !self.scanner.eat(b'[') {
            return Ok(None);
        }
        self.enter()?;

        let mut elements = Vec::new();
        loop {
            self.scanner.skip_whitespace();
            if elements.is_empty() && self.scanner.eat(b']') {
                break;
            }

            let value = self.parse_value()?;
            elements.try_reserve(1)?;
            elements.push(value);

            self.scanner.skip_whitespace();
            if self.scanner.eat(b',') {
                continue;
            }
            if self.scanner.eat(b']') {
                break;
            }
            return Err(Error::ExpectedClosingBracketOrComma);
        }

        self.depth -= 1;
        Ok(Some(Value::Array(elements)))
    }

    fn try_object(&mut self) -> Result<Option<Value>> {
        if !self.scanner.eat(b'{') {
            return Ok(None);
        }
        self.enter()?;

        let mut members = ObjectMap::new();
        let mut first = true;
        loop {
            self.scanner.skip_whitespace();
            if self.scanner.peek() == Some(b'}') {
                if !first {
                    return Err(Error::ExpectedValue);
                }
                self.scanner.advance(1);
                break;
            }
            if !self.scanner.eat(b'"') {
                return Err(Error::ExpectedOpeningQuote);
            }
            let key = self.scanner.read_string()?;

            self.scanner.skip_whitespace();
            if !self.scanner.eat(b':') {
                return Err(Error::ExpectedColon);
            }
            self.scanner.skip_whitespace();

            let value = self.parse_value()?;
            members.try_insert(key, value)?;
            first = false;

            self.scanner.skip_whitespace();
            if self.scanner.eat(b',') {
                continue;
            }
            if self.scanner.eat(b'}') {
                break;
            }
            return Err(Error::ExpectedClosingBraceOrComma);
        }

        self.depth -= 1;
        Ok(Some(Value::Object(members)))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        match self.options.max_depth {
            Some(max) if self.depth > max => Err(Error::DepthLimitExceeded),
            _ => Ok(()),
        }
    }
}
