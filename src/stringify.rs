use std::io::Write;

use crate::value::Value;

/// Maximum nesting depth the stringifier will recurse to, mirroring the
/// parser's `MAX_DEPTH` guard. A `Value` tree can only reach this depth via
/// the mutator API, which has no depth check of its own, so the stringifier
/// enforces its own limit rather than trust the tree was built by this
/// crate's parser.
const MAX_DEPTH: u32 = 512;

/// Serializes `value` to its compact (no inserted whitespace) JSON text.
pub fn to_string(value: &Value) -> String {
    let mut buf = Vec::new();
    write_value(value, &mut buf, &Options::compact(), 0)
        .expect("writing to a Vec<u8> never fails");
    // The writer only ever emits valid UTF-8: ASCII structural bytes, UTF-8
    // string payloads that were validated on the way in, and `\uXXXX`
    // escapes.
    String::from_utf8(buf).expect("stringifier output is valid UTF-8")
}

/// Serializes `value` to the beautified, tab-indented form.
pub fn to_string_pretty(value: &Value) -> String {
    let mut buf = Vec::new();
    write_value(value, &mut buf, &Options::pretty(), 0).expect("writing to a Vec<u8> never fails");
    String::from_utf8(buf).expect("stringifier output is valid UTF-8")
}

struct Options {
    pretty: bool,
}

impl Options {
    fn compact() -> Self {
        Self { pretty: false }
    }

    fn pretty() -> Self {
        Self { pretty: true }
    }
}

fn write_indent<W: Write>(writer: &mut W, depth: u32) -> std::io::Result<()> {
    for _ in 0..depth {
        writer.write_all(b"\t")?;
    }
    Ok(())
}

fn write_value<W: Write>(
    value: &Value,
    writer: &mut W,
    opts: &Options,
    depth: u32,
) -> std::io::Result<()> {
    if depth > MAX_DEPTH {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "nesting depth exceeds the stringifier's limit",
        ));
    }

    match value {
        Value::Null => writer.write_all(b"null"),
        Value::Bool(true) => writer.write_all(b"true"),
        Value::Bool(false) => writer.write_all(b"false"),
        Value::Number(n) => write_number(*n, writer),
        Value::String(s) => write_string(s, writer),
        Value::Array(items) => write_array(items, writer, opts, depth),
        Value::Object(members) => write_object(members, writer, opts, depth),
    }
}

/// Emits the shortest decimal text that round-trips the double, via `ryu`.
fn write_number<W: Write>(n: f64, writer: &mut W) -> std::io::Result<()> {
    // ryu always emits a trailing ".0" for integral values (e.g. "1.0");
    // JSON has no such requirement, so emit the integer form when the value
    // has no fractional part and fits losslessly in an `i64` (the cast back
    // to `f64` would otherwise lose precision).
    if n == 0.0 && n.is_sign_negative() {
        return writer.write_all(b"-0");
    }
    if n.fract() == 0.0 && n.abs() < 1e18 {
        let mut ibuf = itoa::Buffer::new();
        return writer.write_all(ibuf.format(n as i64).as_bytes());
    }
    let mut buf = ryu::Buffer::new();
    writer.write_all(buf.format_finite(n).as_bytes())
}

fn write_string<W: Write>(s: &str, writer: &mut W) -> std::io::Result<()> {
    writer.write_all(b"\"")?;
    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let escape: Option<&[u8]> = match b {
            b'"' => Some(b"\\\""),
            b'\\' => Some(b"\\\\"),
            b'/' => Some(b"\\/"),
            0x08 => Some(b"\\b"),
            0x0C => Some(b"\\f"),
            b'\n' => Some(b"\\n"),
            b'\r' => Some(b"\\r"),
            b'\t' => Some(b"\\t"),
            _ => None,
        };
        if let Some(escape) = escape {
            writer.write_all(&bytes[start..i])?;
            writer.write_all(escape)?;
            start = i + 1;
        } else if b < 0x20 {
            writer.write_all(&bytes[start..i])?;
            write!(writer, "\\u{:04x}", b)?;
            start = i + 1;
        }
    }
    writer.write_all(&bytes[start..])?;
    writer.write_all(b"\"")
}

fn write_array<W: Write>(
    items: &[Value],
    writer: &mut W,
    opts: &Options,
    depth: u32,
) -> std::io::Result<()> {
    writer.write_all(b"[")?;
    if items.is_empty() {
        return writer.write_all(b"]");
    }
    let mut first = true;
    for item in items {
        if !first {
            writer.write_all(b",")?;
        }
        first = false;
        write_newline(writer, opts, depth + 1)?;
        write_value(item, writer, opts, depth + 1)?;
    }
    write_newline(writer, opts, depth)?;
    writer.write_all(b"]")
}

fn write_object<W: Write>(
    members: &[crate::value::Member],
    writer: &mut W,
    opts: &Options,
    depth: u32,
) -> std::io::Result<()> {
    writer.write_all(b"{")?;
    if members.is_empty() {
        return writer.write_all(b"}");
    }
    let mut first = true;
    for member in members {
        if !first {
            writer.write_all(b",")?;
        }
        first = false;
        write_newline(writer, opts, depth + 1)?;
        write_string(&member.key, writer)?;
        writer.write_all(b":")?;
        write_value(&member.value, writer, opts, depth + 1)?;
    }
    write_newline(writer, opts, depth)?;
    writer.write_all(b"}")
}

fn write_newline<W: Write>(writer: &mut W, opts: &Options, depth: u32) -> std::io::Result<()> {
    if opts.pretty {
        writer.write_all(b"\n")?;
        write_indent(writer, depth)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn null_false_true() {
        assert_eq!(to_string(&Value::Null), "null");
        assert_eq!(to_string(&Value::Bool(false)), "false");
        assert_eq!(to_string(&Value::Bool(true)), "true");
    }

    #[test]
    fn integral_number_has_no_decimal_point() {
        assert_eq!(to_string(&Value::Number(5.0)), "5");
        assert_eq!(to_string(&Value::Number(-5.0)), "-5");
    }

    #[test]
    fn fractional_number_round_trips() {
        assert_eq!(to_string(&Value::Number(0.5)), "0.5");
    }

    #[test]
    fn control_byte_escapes_as_unicode() {
        assert_eq!(to_string(&Value::String("\u{1}".into())), "\"\\u0001\"");
    }

    #[test]
    fn empty_containers_are_compact() {
        assert_eq!(to_string(&Value::array()), "[]");
        assert_eq!(to_string(&Value::object()), "{}");
    }

    #[test]
    fn pretty_array_is_tab_indented() {
        let v = parse("[1,2]").unwrap();
        assert_eq!(to_string_pretty(&v), "[\n\t1,\n\t2\n]");
    }

    #[test]
    fn round_trip_through_parse_equals_original() {
        let v = parse(r#"{"a":1,"b":[true,false,null,"x"]}"#).unwrap();
        let text = to_string(&v);
        let v2 = parse(&text).unwrap();
        assert_eq!(v, v2);
    }

    #[test]
    fn pretty_round_trips_too() {
        let v = parse(r#"[1,"",[0.5,true]]"#).unwrap();
        let text = to_string_pretty(&v);
        let v2 = parse(&text).unwrap();
        assert_eq!(v, v2);
    }
}
