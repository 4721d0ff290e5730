//! Compact encoder for interchange text
//!
//! The owned tree cannot contain reference cycles, so encoding always
//! terminates. Non-finite numbers have no interchange form and degrade to
//! the null literal.

use super::value::Value;

/// Largest double that still represents every integer exactly
const MAX_SAFE_INT: f64 = 9_007_199_254_740_992.0;

/// Encode `value` as compact interchange text
///
/// Object keys are written in sorted order, so equal trees always produce
/// identical text.
pub fn encode(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(out, *n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

fn write_number(out: &mut String, n: f64) {
    if !n.is_finite() {
        out.push_str("null");
    } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INT {
        out.push_str(&(n as i64).to_string());
    } else {
        out.push_str(&n.to_string());
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            ch if (ch as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::decode::decode;
    use std::collections::BTreeMap;

    #[test]
    fn test_scalars() {
        assert_eq!(encode(&Value::Null), "null");
        assert_eq!(encode(&Value::Bool(true)), "true");
        assert_eq!(encode(&Value::Bool(false)), "false");
        assert_eq!(encode(&Value::from("hi")), "\"hi\"");
    }

    #[test]
    fn test_integral_numbers_have_no_fraction() {
        assert_eq!(encode(&Value::Number(0.0)), "0");
        assert_eq!(encode(&Value::Number(330.0)), "330");
        assert_eq!(encode(&Value::Number(-12.0)), "-12");
        assert_eq!(encode(&Value::Number(2.5)), "2.5");
        assert_eq!(encode(&Value::Number(-0.125)), "-0.125");
    }

    #[test]
    fn test_non_finite_numbers_become_null() {
        assert_eq!(encode(&Value::Number(f64::NAN)), "null");
        assert_eq!(encode(&Value::Number(f64::INFINITY)), "null");
        assert_eq!(encode(&Value::Number(f64::NEG_INFINITY)), "null");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(encode(&Value::from("a\"b")), r#""a\"b""#);
        assert_eq!(encode(&Value::from("back\\slash")), r#""back\\slash""#);
        assert_eq!(encode(&Value::from("line\nbreak")), r#""line\nbreak""#);
        assert_eq!(encode(&Value::from("\u{1}")), r#""\u0001""#);
        assert_eq!(encode(&Value::from("caf\u{e9}")), "\"caf\u{e9}\"");
    }

    #[test]
    fn test_object_keys_sorted() {
        let mut entries = BTreeMap::new();
        entries.insert("zeta".to_string(), Value::from(1i64));
        entries.insert("alpha".to_string(), Value::from(2i64));
        entries.insert("mid".to_string(), Value::Null);
        assert_eq!(
            encode(&Value::Object(entries)),
            r#"{"alpha":2,"mid":null,"zeta":1}"#
        );
    }

    #[test]
    fn test_compact_nested_output() {
        let mut inner = BTreeMap::new();
        inner.insert("sfx".to_string(), Value::Bool(true));
        let mut root = BTreeMap::new();
        root.insert(
            "edits".to_string(),
            Value::Array(vec![Value::Object(inner), Value::from(5i64)]),
        );
        assert_eq!(
            encode(&Value::Object(root)),
            r#"{"edits":[{"sfx":true},5]}"#
        );
    }

    #[test]
    fn test_round_trip() {
        let text = r#"{"edits":[{"id":"E001","intensity_1_5":4,"start":"00:00:10"},{"end":12.5}],"project_name":"match01","video":{"source_path":"/media/match01.mp4"}}"#;
        let value = decode(text).unwrap();
        let encoded = encode(&value);
        assert_eq!(decode(&encoded).unwrap(), value);
        // Keys already sorted in the source text, so the bytes match too
        assert_eq!(encoded, text);
    }
}
