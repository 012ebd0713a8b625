use crate::error::{ErrorKind, ParseError};
use crate::unicode;
use crate::value::{Member, Value};

/// Recursive-descent maximum container nesting depth. Bounds stack usage on
/// pathological input such as a deep run of `[` bytes.
const MAX_DEPTH: usize = 512;

/// Parses `input` as a single RFC 8259 JSON document and returns the
/// resulting value tree.
///
/// On any error the returned `Err` carries the offending code and byte
/// offset; the caller must not attempt to resume parsing.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    log::trace!("parsing {} bytes", input.len());
    let mut parser = Parser::new(input.as_bytes());
    parser.parse_document()
}

/// Parses a raw byte buffer, validating it as UTF-8 first. JSON text is
/// required to be UTF-8 by RFC 8259; a buffer of unknown provenance (read
/// from a socket or file) is rejected with `InvalidEncoding` rather than
/// silently mangled.
pub fn parse_bytes(input: &[u8]) -> Result<Value, ParseError> {
    let s = simdutf8::basic::from_utf8(input)
        .map_err(|_| ParseError::new(ErrorKind::InvalidEncoding, 0))?;
    parse(s)
}

/// Byte cursor over an immutable input slice. Holds no state beyond the
/// cursor position and the current nesting depth — fully synchronous, no
/// global or thread-local state.
struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    fn advance(&mut self) {
        self.pos += 1;
    }

    fn err(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.pos)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.advance();
        }
    }

    /// Top-level driver: skip leading whitespace, parse one value, then
    /// reject any trailing non-whitespace.
    fn parse_document(&mut self) -> Result<Value, ParseError> {
        self.skip_ws();
        let value = self.parse_value()?;
        self.skip_ws();
        if self.pos < self.input.len() {
            return Err(self.err(ErrorKind::RootNotSingular));
        }
        Ok(value)
    }

    /// Dispatches on the current byte without consuming it.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            Some(b'n') => self.parse_literal(b"null", Value::Null),
            Some(b't') => self.parse_literal(b"true", Value::Bool(true)),
            Some(b'f') => self.parse_literal(b"false", Value::Bool(false)),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(_) => self.parse_number(),
            None => Err(self.err(ErrorKind::ExpectValue)),
        }
    }

    /// Matches `expected` byte-for-byte at the cursor. A longer identifier suffix is not
    /// caught here — `"nullx"` parses the literal and leaves `x` for the
    /// caller to reject.
    fn parse_literal(&mut self, expected: &[u8], value: Value) -> Result<Value, ParseError> {
        if self.input[self.pos..].starts_with(expected) {
            self.pos += expected.len();
            Ok(value)
        } else {
            Err(self.err(ErrorKind::InvalidValue))
        }
    }

    /// Validates the number grammar at the cursor, then converts the span to
    /// a double.
    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let bytes = self.input;
        let len = bytes.len();
        let mut pos = start;

        if pos < len && bytes[pos] == b'-' {
            pos += 1;
        }

        match bytes.get(pos) {
            Some(b'0') => pos += 1,
            Some(b'1'..=b'9') => {
                pos += 1;
                while pos < len && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
            }
            _ => return Err(self.err(ErrorKind::InvalidValue)),
        }

        if pos < len && bytes[pos] == b'.' {
            pos += 1;
            if pos >= len || !bytes[pos].is_ascii_digit() {
                return Err(self.err(ErrorKind::InvalidValue));
            }
            while pos < len && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }

        if pos < len && (bytes[pos] == b'e' || bytes[pos] == b'E') {
            pos += 1;
            if pos < len && (bytes[pos] == b'+' || bytes[pos] == b'-') {
                pos += 1;
            }
            if pos >= len || !bytes[pos].is_ascii_digit() {
                return Err(self.err(ErrorKind::InvalidValue));
            }
            while pos < len && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }

        let span = &bytes[start..pos];
        // Locale-independent, round-to-nearest decimal-to-double conversion.
        let n: f64 = lexical_core::parse(span).map_err(|_| self.err(ErrorKind::InvalidValue))?;
        if n.is_infinite() {
            return Err(ParseError::new(ErrorKind::NumberOverflow, start));
        }

        self.pos = pos;
        Ok(Value::Number(n))
    }

    /// Parses a string body: opening quote, escape processing, closing quote.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let quote_start = self.pos;
        self.advance(); // opening quote
        let mut out = Vec::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::new(ErrorKind::MissingQuotationMark, quote_start)),
                Some(b'"') => {
                    self.advance();
                    break;
                }
                Some(b'\\') => {
                    self.advance();
                    match self.peek() {
                        Some(b'"') => {
                            out.push(b'"');
                            self.advance();
                        }
                        Some(b'\\') => {
                            out.push(b'\\');
                            self.advance();
                        }
                        Some(b'/') => {
                            out.push(b'/');
                            self.advance();
                        }
                        Some(b'b') => {
                            out.push(0x08);
                            self.advance();
                        }
                        Some(b'f') => {
                            out.push(0x0C);
                            self.advance();
                        }
                        Some(b'n') => {
                            out.push(b'\n');
                            self.advance();
                        }
                        Some(b'r') => {
                            out.push(b'\r');
                            self.advance();
                        }
                        Some(b't') => {
                            out.push(b'\t');
                            self.advance();
                        }
                        Some(b'u') => {
                            self.advance();
                            let (code_point, consumed) =
                                unicode::decode_unicode_escape(self.input, self.pos)
                                    .map_err(|kind| self.err(kind))?;
                            unicode::push_utf8(&mut out, code_point);
                            self.pos += consumed;
                        }
                        _ => return Err(self.err(ErrorKind::InvalidStringEscape)),
                    }
                }
                Some(b) if b < 0x20 => return Err(self.err(ErrorKind::InvalidStringChar)),
                Some(b) => {
                    out.push(b);
                    self.advance();
                }
            }
        }

        let s = String::from_utf8(out)
            // Non-escaped bytes are only ever copied verbatim from the input
            // after a UTF-8 validity check at the top level (`parse`), so
            // re-validation here is only reachable via `\u` escapes, which
            // `unicode::push_utf8` always emits as well-formed UTF-8.
            .unwrap_or_else(|e| {
                debug_assert!(false, "string parser produced invalid UTF-8: {e}");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            });
        Ok(s)
    }

    fn enter_container(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.err(ErrorKind::DepthLimitExceeded));
        }
        Ok(())
    }

    /// Parses a `[`-delimited array of comma-separated values.
    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.enter_container()?;
        self.advance(); // '['
        self.skip_ws();

        let mut items = Vec::new();
        if self.peek() == Some(b']') {
            self.advance();
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            let item = self.parse_value()?;
            items.push(item);
            self.skip_ws();
            match self.peek() {
                Some(b']') => {
                    self.advance();
                    break;
                }
                Some(b',') => {
                    self.advance();
                    self.skip_ws();
                }
                _ => return Err(self.err(ErrorKind::MissingCommaOrBracket)),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// Parses a `{`-delimited object of comma-separated `"key":value` members.
    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.enter_container()?;
        self.advance(); // '{'
        self.skip_ws();

        let mut members = Vec::new();
        if self.peek() == Some(b'}') {
            self.advance();
            self.depth -= 1;
            return Ok(Value::Object(members));
        }

        loop {
            if self.peek() != Some(b'"') {
                return Err(self.err(ErrorKind::MissingKey));
            }
            let key = self.parse_string()?;
            self.skip_ws();
            if self.peek() != Some(b':') {
                return Err(self.err(ErrorKind::MissingColon));
            }
            self.advance();
            self.skip_ws();
            let value = self.parse_value()?;
            members.push(Member::new(key, value));
            self.skip_ws();
            match self.peek() {
                Some(b'}') => {
                    self.advance();
                    break;
                }
                Some(b',') => {
                    self.advance();
                    self.skip_ws();
                }
                _ => return Err(self.err(ErrorKind::MissingCommaOrBrace)),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(members))
    }
}
