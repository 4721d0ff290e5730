//! Recursive-descent decoder for interchange text
//!
//! Single left-to-right scan over the input bytes with explicit position
//! tracking. Any structural violation fails with a `DecodeError` carrying the
//! byte offset; no partial value is ever returned.

use super::value::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Nesting limit guarding the parser stack against pathological input
const MAX_DEPTH: usize = 128;

/// Malformed interchange text
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason} at byte {pos}")]
pub struct DecodeError {
    pub pos: usize,
    pub reason: String,
}

/// Decode one complete value from `text`
///
/// Only whitespace may follow the top-level value; anything else is an error.
pub fn decode(text: &str) -> Result<Value, DecodeError> {
    let mut decoder = Decoder {
        bytes: text.as_bytes(),
        pos: 0,
        depth: 0,
    };
    decoder.skip_whitespace();
    let value = decoder.parse_value()?;
    decoder.skip_whitespace();
    if decoder.pos < decoder.bytes.len() {
        return Err(decoder.fail("trailing characters after value"));
    }
    Ok(value)
}

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Decoder<'a> {
    fn fail(&self, reason: &str) -> DecodeError {
        DecodeError {
            pos: self.pos,
            reason: reason.to_string(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self) -> Result<Value, DecodeError> {
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => Ok(Value::String(self.parse_string()?)),
            Some(b't') => self.parse_literal("true", Value::Bool(true)),
            Some(b'f') => self.parse_literal("false", Value::Bool(false)),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(c) => Err(self.fail(&format!("unexpected character '{}'", c as char))),
            None => Err(self.fail("unexpected end of input")),
        }
    }

    fn parse_literal(&mut self, literal: &str, value: Value) -> Result<Value, DecodeError> {
        if self.bytes[self.pos..].starts_with(literal.as_bytes()) {
            self.pos += literal.len();
            Ok(value)
        } else {
            Err(self.fail(&format!("invalid literal, expected '{}'", literal)))
        }
    }

    fn parse_number(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
        ) {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("");
        match text.parse::<f64>() {
            Ok(n) => Ok(Value::Number(n)),
            Err(_) => Err(DecodeError {
                pos: start,
                reason: format!("invalid number '{}'", text),
            }),
        }
    }

    fn parse_string(&mut self) -> Result<String, DecodeError> {
        // opening quote
        self.pos += 1;
        let mut out: Vec<u8> = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.fail("unterminated string")),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(String::from_utf8_lossy(&out).into_owned());
                }
                Some(b'\\') => {
                    self.pos += 1;
                    let escaped = match self.peek() {
                        Some(byte) => byte,
                        None => return Err(self.fail("unterminated string")),
                    };
                    self.pos += 1;
                    match escaped {
                        b'"' => out.push(b'"'),
                        b'\\' => out.push(b'\\'),
                        b'/' => out.push(b'/'),
                        b'b' => out.push(0x08),
                        b'f' => out.push(0x0c),
                        b'n' => out.push(b'\n'),
                        b'r' => out.push(b'\r'),
                        b't' => out.push(b'\t'),
                        b'u' => {
                            let code = self.parse_hex4()?;
                            // Lone surrogates have no scalar form; substitute
                            // the replacement character instead of failing
                            let ch = char::from_u32(code).unwrap_or('\u{FFFD}');
                            let mut buf = [0u8; 4];
                            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                        }
                        other => {
                            return Err(
                                self.fail(&format!("invalid escape '\\{}'", other as char))
                            );
                        }
                    }
                }
                Some(byte) => {
                    out.push(byte);
                    self.pos += 1;
                }
            }
        }
    }

    fn parse_hex4(&mut self) -> Result<u32, DecodeError> {
        let mut code: u32 = 0;
        for _ in 0..4 {
            let digit = match self.peek() {
                Some(c @ b'0'..=b'9') => (c - b'0') as u32,
                Some(c @ b'a'..=b'f') => (c - b'a' + 10) as u32,
                Some(c @ b'A'..=b'F') => (c - b'A' + 10) as u32,
                Some(_) => return Err(self.fail("invalid unicode escape")),
                None => return Err(self.fail("unterminated string")),
            };
            code = code * 16 + digit;
            self.pos += 1;
        }
        Ok(code)
    }

    fn parse_object(&mut self) -> Result<Value, DecodeError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.fail("nesting too deep"));
        }
        // opening brace
        self.pos += 1;
        let mut entries = BTreeMap::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(entries));
        }
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.fail("expected string key in object"));
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.fail("expected ':' after object key"));
            }
            self.pos += 1;
            self.skip_whitespace();
            let value = self.parse_value()?;
            entries.insert(key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    self.depth -= 1;
                    return Ok(Value::Object(entries));
                }
                _ => return Err(self.fail("expected ',' or '}' in object")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, DecodeError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.fail("nesting too deep"));
        }
        // opening bracket
        self.pos += 1;
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Array(items));
        }
        loop {
            self.skip_whitespace();
            let value = self.parse_value()?;
            items.push(value);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    self.depth -= 1;
                    return Ok(Value::Array(items));
                }
                _ => return Err(self.fail("expected ',' or ']' in array")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(decode("null"), Ok(Value::Null));
        assert_eq!(decode("true"), Ok(Value::Bool(true)));
        assert_eq!(decode("false"), Ok(Value::Bool(false)));
        assert_eq!(decode("  null  "), Ok(Value::Null));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(decode("0"), Ok(Value::Number(0.0)));
        assert_eq!(decode("42"), Ok(Value::Number(42.0)));
        assert_eq!(decode("-7.25"), Ok(Value::Number(-7.25)));
        assert_eq!(decode("1e3"), Ok(Value::Number(1000.0)));
        assert_eq!(decode("2.5E-1"), Ok(Value::Number(0.25)));
    }

    #[test]
    fn test_strings_and_escapes() {
        assert_eq!(decode(r#""hello""#), Ok(Value::from("hello")));
        assert_eq!(decode(r#""a\"b""#), Ok(Value::from("a\"b")));
        assert_eq!(decode(r#""line\nbreak""#), Ok(Value::from("line\nbreak")));
        assert_eq!(decode(r#""tab\there""#), Ok(Value::from("tab\there")));
        assert_eq!(decode(r#""slash\/ok""#), Ok(Value::from("slash/ok")));
        assert_eq!(decode(r#""A""#), Ok(Value::from("A")));
        assert_eq!(decode(r#""é""#), Ok(Value::from("\u{e9}")));
    }

    #[test]
    fn test_lone_surrogate_becomes_replacement_char() {
        assert_eq!(decode(r#""\ud800""#), Ok(Value::from("\u{FFFD}")));
        assert_eq!(decode(r#""x\udc00y""#), Ok(Value::from("x\u{FFFD}y")));
    }

    #[test]
    fn test_nested_containers() {
        let value = match decode(r#"{"edits":[{"start":"00:00:10","n":2},null,true]}"#) {
            Ok(v) => v,
            Err(e) => panic!("decode failed: {}", e),
        };
        let edits = value.get("edits").and_then(Value::as_array).unwrap();
        assert_eq!(edits.len(), 3);
        assert_eq!(
            edits[0].get("start").and_then(Value::as_str),
            Some("00:00:10")
        );
        assert_eq!(edits[0].get("n").and_then(Value::as_i64), Some(2));
        assert_eq!(edits[1], Value::Null);
        assert_eq!(edits[2], Value::Bool(true));
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(decode("{}"), Ok(Value::object()));
        assert_eq!(decode("[]"), Ok(Value::Array(vec![])));
        assert_eq!(decode(" { } "), Ok(Value::object()));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let value = decode(r#"{"a":1,"a":2}"#).unwrap();
        assert_eq!(value.get("a").and_then(Value::as_i64), Some(2));
    }

    #[test]
    fn test_unterminated_string() {
        let err = decode(r#""never closed"#).unwrap_err();
        assert!(err.reason.contains("unterminated"));
    }

    #[test]
    fn test_missing_colon() {
        let err = decode(r#"{"key" 1}"#).unwrap_err();
        assert!(err.reason.contains("':'"));
    }

    #[test]
    fn test_missing_comma() {
        assert!(decode(r#"[1 2]"#).is_err());
        assert!(decode(r#"{"a":1 "b":2}"#).is_err());
    }

    #[test]
    fn test_trailing_garbage() {
        let err = decode("null x").unwrap_err();
        assert!(err.reason.contains("trailing"));
        assert_eq!(err.pos, 5);
        assert!(decode("{}{}").is_err());
    }

    #[test]
    fn test_bare_word_rejected() {
        assert!(decode("nope").is_err());
        assert!(decode("truth").is_err());
        assert!(decode("hello").is_err());
    }

    #[test]
    fn test_invalid_number() {
        assert!(decode("-").is_err());
        assert!(decode("1.2.3").is_err());
    }

    #[test]
    fn test_invalid_escape() {
        assert!(decode(r#""\q""#).is_err());
        assert!(decode(r#""\u12g4""#).is_err());
    }

    #[test]
    fn test_depth_limit() {
        let deep = "[".repeat(200) + &"]".repeat(200);
        let err = decode(&deep).unwrap_err();
        assert!(err.reason.contains("nesting"));

        let shallow = "[".repeat(50) + &"]".repeat(50);
        assert!(decode(&shallow).is_ok());
    }

    #[test]
    fn test_error_positions_are_byte_offsets() {
        let err = decode("   @").unwrap_err();
        assert_eq!(err.pos, 3);
    }
}
