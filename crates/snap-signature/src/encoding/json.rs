use std::io;

use serde::Serialize;
use serde::de::IgnoredAny;
use serde_json::ser::{Formatter, Serializer};

/// Removes insignificant whitespace from JSON text.
///
/// Token text is preserved byte for byte: key order, number spelling and
/// string escapes are left untouched, so two documents that differ only in
/// layout compact to the same bytes. Input must hold exactly one JSON
/// document, so empty and whitespace-only input is an error.
pub fn compact(input: &[u8]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::from_slice::<IgnoredAny>(input)?;

    let mut out = Vec::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for &byte in input {
        if in_string {
            out.push(byte);
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
        } else if byte == b'"' {
            in_string = true;
            out.push(byte);
        } else if !is_json_whitespace(byte) {
            out.push(byte);
        }
    }

    Ok(out)
}

/// Serializes `value` compactly with `<`, `>`, `&`, U+2028 and U+2029
/// escaped as `\u` sequences. Object keys come out sorted.
///
/// Every number is printed as a float64 would be: shortest round-trip
/// digits in plain decimal, with no fractional part when integral, and in
/// exponent form below `1e-6` or from `1e21` on.
pub fn to_html_safe_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, HtmlSafeFormatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

fn is_json_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            let escape = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escape.as_bytes())?;
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn write_i64<W>(&mut self, writer: &mut W, value: i64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        write_float64(writer, value as f64)
    }

    fn write_u64<W>(&mut self, writer: &mut W, value: u64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        write_float64(writer, value as f64)
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        write_float64(writer, value)
    }
}

fn write_float64<W>(writer: &mut W, value: f64) -> io::Result<()>
where
    W: ?Sized + io::Write,
{
    let abs = value.abs();
    if abs == 0.0 || (1e-6..1e21).contains(&abs) {
        return write!(writer, "{value}");
    }

    // Positive exponents carry an explicit sign: 1e+21.
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(writer, "{mantissa}e+{exponent}")
        }
        _ => writer.write_all(text.as_bytes()),
    }
}
