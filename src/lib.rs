//! A self-contained RFC 8259 JSON value engine: a recursive-descent parser
//! with UTF-16 surrogate handling, and a typed value tree with a
//! beautified/compact stringifier.
//!
//! ```
//! let v = jvalue::parse(r#"{"a":[1,2,3]}"#).unwrap();
//! assert_eq!(v.get("a").unwrap().array_len(), 3);
//! assert_eq!(jvalue::to_string(&v), r#"{"a":[1,2,3]}"#);
//! ```

#![forbid(unsafe_code)]

mod error;
mod parser;
mod stringify;
mod unicode;
mod value;

pub use error::{ErrorKind, ParseError};
pub use value::{Member, Type, Value};

/// Parses a JSON text into a `Value` tree. Returns an error carrying a
/// stable error code and the byte offset it was detected at.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    parser::parse(input)
}

/// Parses a raw byte buffer as JSON text, validating UTF-8 first.
pub fn parse_bytes(input: &[u8]) -> Result<Value, ParseError> {
    parser::parse_bytes(input)
}

/// Serializes a `Value` to compact JSON text (no inserted whitespace).
pub fn to_string(value: &Value) -> String {
    stringify::to_string(value)
}

/// Serializes a `Value` to beautified JSON text, indented with tabs.
pub fn to_string_pretty(value: &Value) -> String {
    stringify::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_round_trips() {
        let v = parse(r#"{"a":[1,2,3]}"#).unwrap();
        assert_eq!(to_string(&v), r#"{"a":[1,2,3]}"#);
    }

    #[test]
    fn parse_bytes_rejects_invalid_utf8() {
        let bad = [b'"', 0xFF, b'"'];
        let err = parse_bytes(&bad).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidEncoding);
    }
}
