//! Recursive-descent JSON parser.
//!
//! A [`Parser`] walks an immutable text buffer with a single byte cursor and builds the
//! whole [`Value`] tree in one pass. Every production either consumes its construct
//! completely or fails, which aborts the parse; no partial tree is ever returned.
//!
//! # Grammar notes
//!
//! - **Numbers**: optional `+`/`-`, digits, optional `.digits`, optional
//!   `e[+-]digits`. A fraction or exponent makes the literal a Double, otherwise it
//!   must fit an `i64`. `+5` is the Int 5.
//! - **Strings**: `\uXXXX` decodes one code point up to U+FFFF (surrogate halves
//!   become U+FFFD; pairs are not combined). An unknown escape keeps the escaped
//!   character and drops the backslash.
//! - **Trailing content**: [`Parser::parse`] stops after the first complete value and
//!   leaves the cursor there; [`Parser::parse_document`] rejects anything but
//!   whitespace after it.

use crate::error::{JsonError, Result};
use crate::value::{Map, Value};
use std::num::IntErrorKind;
use std::str::FromStr;

/// Default container nesting allowed before [`JsonError::DepthLimit`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of nested arrays/objects.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parse the first JSON value in `text`. Content after it is ignored.
///
/// Nesting is capped at [`DEFAULT_MAX_DEPTH`], so a well-formed document with deeper
/// arrays or objects fails with [`JsonError::DepthLimit`]. Use [`parse_with_config`]
/// with a larger [`ParserConfig::max_depth`] to accept it.
pub fn parse(text: &str) -> Result<Value> {
    Parser::new(text).parse()
}

/// Like [`parse`], with explicit settings.
pub fn parse_with_config(text: &str, config: ParserConfig) -> Result<Value> {
    Parser::with_config(text, config).parse()
}

/// Parse raw bytes. Input that is not UTF-8 fails with a syntax error at the first
/// invalid byte.
pub fn parse_bytes(bytes: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| JsonError::syntax(e.valid_up_to(), "input is not valid UTF-8"))?;
    parse(text)
}

impl FromStr for Value {
    type Err = JsonError;

    /// Strict: the whole string must be one JSON value plus optional whitespace.
    fn from_str(s: &str) -> Result<Self> {
        Parser::new(s).parse_document()
    }
}

/// Single-cursor reader over one text buffer.
///
/// Holds mutable cursor state, so one parser serves one caller at a time. Call
/// [`Parser::load`] to reuse it for another buffer.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
    config: ParserConfig,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_config(text, ParserConfig::default())
    }

    pub fn with_config(text: &'a str, config: ParserConfig) -> Self {
        Self {
            text,
            pos: 0,
            depth: 0,
            config,
        }
    }

    /// Replace the buffer and rewind the cursor.
    pub fn load(&mut self, text: &'a str) {
        self.text = text;
        self.pos = 0;
        self.depth = 0;
    }

    /// Byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Parse one value starting at the cursor. On success the cursor sits just past
    /// it, so repeated calls read consecutive values from the same buffer.
    pub fn parse(&mut self) -> Result<Value> {
        self.depth = 0;
        self.parse_value()
    }

    /// Parse one value and require that only whitespace follows it.
    pub fn parse_document(&mut self) -> Result<Value> {
        let value = self.parse()?;
        self.skip_whitespace();
        if self.pos < self.text.len() {
            return Err(JsonError::syntax(
                self.pos,
                format!("unexpected trailing {}", self.describe(self.pos)),
            ));
        }
        Ok(value)
    }

    // ------------------------------------------------------------------
    // Cursor helpers
    // ------------------------------------------------------------------

    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    /// Skip whitespace and consume the next byte.
    fn next_token(&mut self) -> Result<u8> {
        self.skip_whitespace();
        let b = self
            .peek()
            .ok_or_else(|| JsonError::syntax(self.pos, "unexpected end of input"))?;
        self.pos += 1;
        Ok(b)
    }

    /// Skip whitespace and look at the next byte without consuming it.
    fn peek_token(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.peek()
    }

    /// Consume a run of ASCII digits, returning whether there was at least one.
    fn eat_digits(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// Human-readable name of the character at `at`, for error messages.
    fn describe(&self, at: usize) -> String {
        match self.text.get(at..).and_then(|rest| rest.chars().next()) {
            Some(c) => format!("character {:?}", c),
            None => "end of input".to_string(),
        }
    }

    fn enter(&mut self, open: usize) -> Result<()> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(JsonError::DepthLimit {
                offset: open,
                limit: self.config.max_depth,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Productions
    // ------------------------------------------------------------------

    fn parse_value(&mut self) -> Result<Value> {
        let b = self.next_token()?;
        let start = self.pos - 1;
        match b {
            b'n' => self.parse_literal(start, "null", Value::Null),
            b't' => self.parse_literal(start, "true", Value::Bool(true)),
            b'f' => self.parse_literal(start, "false", Value::Bool(false)),
            b'"' => self.parse_string().map(Value::String),
            b'[' => self.parse_array(start),
            b'{' => self.parse_object(start),
            b'+' | b'-' | b'0'..=b'9' => {
                self.pos = start;
                self.parse_number()
            }
            _ => Err(JsonError::syntax(
                start,
                format!("unexpected {}", self.describe(start)),
            )),
        }
    }

    /// Match `literal` exactly at `start`, including when it ends the buffer.
    fn parse_literal(&mut self, start: usize, literal: &str, value: Value) -> Result<Value> {
        if self.bytes()[start..].starts_with(literal.as_bytes()) {
            self.pos = start + literal.len();
            Ok(value)
        } else {
            Err(JsonError::syntax(
                start,
                format!("invalid literal, expected `{literal}`"),
            ))
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        if !self.eat_digits() {
            return Err(JsonError::syntax(self.pos, "expected digit in number"));
        }

        let mut is_double = false;
        if self.peek() == Some(b'.') {
            is_double = true;
            self.pos += 1;
            if !self.eat_digits() {
                return Err(JsonError::syntax(
                    self.pos,
                    "expected digit after decimal point",
                ));
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_double = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !self.eat_digits() {
                return Err(JsonError::syntax(self.pos, "expected digit in exponent"));
            }
        }

        let literal = &self.text[start..self.pos];
        if is_double {
            parse_double(literal, start)
        } else {
            parse_int(literal, start)
        }
    }

    /// Called with the cursor just past the opening quote.
    fn parse_string(&mut self) -> Result<String> {
        let bytes = self.bytes();
        let open = self.pos - 1;
        let mut out: Vec<u8> = Vec::new();

        loop {
            let run = self.pos;
            while matches!(self.peek(), Some(b) if b != b'"' && b != b'\\') {
                self.pos += 1;
            }
            out.extend_from_slice(&bytes[run..self.pos]);

            match self.peek() {
                None => return Err(JsonError::syntax(open, "unterminated string")),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    self.pos += 1;
                    let esc = self.peek().ok_or_else(|| {
                        JsonError::syntax(self.pos, "unterminated escape sequence")
                    })?;
                    self.pos += 1;
                    match esc {
                        b'"' => out.push(b'"'),
                        b'\\' => out.push(b'\\'),
                        b'/' => out.push(b'/'),
                        b'b' => out.push(0x08),
                        b'f' => out.push(0x0C),
                        b'n' => out.push(b'\n'),
                        b'r' => out.push(b'\r'),
                        b't' => out.push(b'\t'),
                        b'u' => {
                            let ch = self.parse_hex4()?;
                            let mut buf = [0u8; 4];
                            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                        }
                        // Unknown escape: keep the character, drop the backslash.
                        other => out.push(other),
                    }
                }
            }
        }

        String::from_utf8(out)
            .map_err(|e| JsonError::syntax(open, format!("string is not valid UTF-8: {e}")))
    }

    /// Four hex digits after `\u`. Surrogate code points decode to U+FFFD.
    fn parse_hex4(&mut self) -> Result<char> {
        let start = self.pos;
        let digits = self
            .bytes()
            .get(start..start + 4)
            .ok_or_else(|| JsonError::syntax(start, "truncated unicode escape"))?;
        let mut code = 0u32;
        for &d in digits {
            let nibble = (d as char)
                .to_digit(16)
                .ok_or_else(|| JsonError::syntax(start, "invalid hex digit in unicode escape"))?;
            code = code * 16 + nibble;
        }
        self.pos += 4;
        Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn parse_array(&mut self, open: usize) -> Result<Value> {
        self.enter(open)?;
        let mut items = Vec::new();

        if self.peek_token() == Some(b']') {
            self.pos += 1;
        } else {
            loop {
                items.push(self.parse_value()?);
                match self.next_token()? {
                    b']' => break,
                    b',' => continue,
                    _ => {
                        return Err(JsonError::syntax(
                            self.pos - 1,
                            format!(
                                "expected ',' or ']' in array, found {}",
                                self.describe(self.pos - 1)
                            ),
                        ))
                    }
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self, open: usize) -> Result<Value> {
        self.enter(open)?;
        let mut map = Map::new();

        if self.peek_token() == Some(b'}') {
            self.pos += 1;
        } else {
            loop {
                if self.next_token()? != b'"' {
                    return Err(JsonError::syntax(
                        self.pos - 1,
                        format!(
                            "expected '\"' to start object key, found {}",
                            self.describe(self.pos - 1)
                        ),
                    ));
                }
                let key = self.parse_string()?;
                if self.next_token()? != b':' {
                    return Err(JsonError::syntax(
                        self.pos - 1,
                        format!(
                            "expected ':' after object key, found {}",
                            self.describe(self.pos - 1)
                        ),
                    ));
                }
                let value = self.parse_value()?;
                // Duplicate keys: last write wins.
                map.insert(key, value);
                match self.next_token()? {
                    b'}' => break,
                    b',' => continue,
                    _ => {
                        return Err(JsonError::syntax(
                            self.pos - 1,
                            format!(
                                "expected ',' or '}}' in object, found {}",
                                self.describe(self.pos - 1)
                            ),
                        ))
                    }
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }
}

fn parse_int(literal: &str, start: usize) -> Result<Value> {
    literal.parse::<i64>().map(Value::Int).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => JsonError::range(
            start,
            format!("integer literal {literal} is outside the 64-bit signed range"),
        ),
        _ => JsonError::syntax(start, format!("invalid integer literal {literal}")),
    })
}

fn parse_double(literal: &str, start: usize) -> Result<Value> {
    let d: f64 = literal
        .parse()
        .map_err(|_| JsonError::syntax(start, format!("invalid number literal {literal}")))?;
    if d.is_infinite() {
        return Err(JsonError::range(
            start,
            format!("number literal {literal} overflows a double"),
        ));
    }
    if d == 0.0 && has_nonzero_mantissa(literal) {
        return Err(JsonError::range(
            start,
            format!("number literal {literal} underflows a double"),
        ));
    }
    Ok(Value::Double(d))
}

fn has_nonzero_mantissa(literal: &str) -> bool {
    literal
        .bytes()
        .take_while(|b| !matches!(b, b'e' | b'E'))
        .any(|b| matches!(b, b'1'..=b'9'))
}
