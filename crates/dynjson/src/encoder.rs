//! Canonical JSON serialization.
//!
//! Produces one deterministic text form per value, with no inserted whitespace:
//!
//! - **Integers** as plain decimal
//! - **Doubles** in fixed-point notation with exactly 15 fractional digits, never
//!   exponential (`1e3` → `1000.000000000000000`)
//! - **Strings** double-quoted; `"` `\` and ASCII control characters escaped, every
//!   other character written through as-is
//! - **Objects** in ascending key order, which is the iteration order of [`Map`](crate::Map)
//!
//! # Example
//! ```
//! use dynjson::{serialize, Value};
//! let mut v = Value::Null;
//! v["b"] = Value::from(2);
//! v["a"] = Value::from(1.5);
//! assert_eq!(serialize(&v), r#"{"a":1.500000000000000,"b":2}"#);
//! ```

use crate::value::Value;
use std::fmt::Write;

/// Fractional digits emitted for every Double.
pub const DOUBLE_PRECISION: usize = 15;

/// Serialize `value` into its canonical compact JSON text.
pub fn serialize(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

/// Append the canonical text of `value` to `out`.
pub fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Double(d) => write_double(*d, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_value(item, out);
            }
            out.push('}');
        }
    }
}

/// NaN and infinities have no JSON spelling; they are written as `null`.
fn write_double(d: f64, out: &mut String) {
    if d.is_finite() {
        let _ = write!(out, "{:.*}", DOUBLE_PRECISION, d);
    } else {
        out.push_str("null");
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_uses_fixed_point() {
        assert_eq!(serialize(&Value::Double(0.5)), "0.500000000000000");
        assert_eq!(serialize(&Value::Double(-2.0)), "-2.000000000000000");
        assert_eq!(serialize(&Value::Double(1e3)), "1000.000000000000000");
    }

    #[test]
    fn non_finite_double_is_null() {
        assert_eq!(serialize(&Value::Double(f64::NAN)), "null");
        assert_eq!(serialize(&Value::Double(f64::INFINITY)), "null");
        assert_eq!(serialize(&Value::Double(f64::NEG_INFINITY)), "null");
    }

    #[test]
    fn control_characters_use_lowercase_hex() {
        assert_eq!(serialize(&Value::from("\u{1f}")), "\"\\u001f\"");
        assert_eq!(serialize(&Value::from("\u{01}")), "\"\\u0001\"");
    }

    #[test]
    fn scalars_append_to_existing_buffer() {
        let mut out = String::from("prefix:");
        write_value(&Value::Int(i64::MIN), &mut out);
        write_value(&Value::Double(0.25), &mut out);
        write_value(&Value::from("\u{02}"), &mut out);
        assert_eq!(
            out,
            "prefix:-92233720368547758080.250000000000000\"\\u0002\""
        );
    }

    #[test]
    fn non_ascii_passes_through() {
        assert_eq!(serialize(&Value::from("caf\u{e9}")), "\"caf\u{e9}\"");
        assert_eq!(serialize(&Value::from("\u{7f}")), "\"\u{7f}\"");
    }
}
