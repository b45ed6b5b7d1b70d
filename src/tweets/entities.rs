// Safe parser for the tweet `entities` column.
//
// Tweet dumps store entities as a Python literal, e.g.
//   {'hashtags': [{'text': 'rust', 'indices': [0, 5]}], 'urls': []}
// and sometimes as JSON. This module parses both into a serde_json::Value
// with a small recursive-descent parser. Nothing is ever evaluated: anything
// outside the literal grammar (names, calls, operators) is a parse error.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Maximum nesting of dicts/lists/tuples accepted by the parser.
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntitiesError {
    #[error("malformed entities literal at byte {position}: {reason}")]
    Malformed { position: usize, reason: String },

    #[error("entities record has unexpected shape: {0}")]
    Shape(String),
}

#[derive(Debug, Deserialize)]
struct Entities {
    hashtags: Vec<Hashtag>,
}

#[derive(Debug, Deserialize)]
struct Hashtag {
    text: String,
}

/// Parse an entities literal and return its set of hashtag texts.
///
/// Tags are kept exactly as written (case-sensitive). A tag repeated within
/// one record appears once.
pub fn extract_hashtags(raw: &str) -> Result<BTreeSet<String>, EntitiesError> {
    let value = parse_literal(raw)?;
    let entities: Entities =
        serde_json::from_value(value).map_err(|e| EntitiesError::Shape(e.to_string()))?;
    Ok(entities.hashtags.into_iter().map(|h| h.text).collect())
}

/// Parse a JSON or Python literal into a JSON value.
///
/// Tuples become arrays, `True`/`False`/`None` become booleans and null.
/// Dict keys must be strings.
pub fn parse_literal(input: &str) -> Result<Value, EntitiesError> {
    let mut parser = Parser {
        src: input,
        pos: 0,
        depth: 0,
    };
    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.pos < input.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn error(&self, reason: impl Into<String>) -> EntitiesError {
        EntitiesError::Malformed {
            position: self.pos,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.src[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn value(&mut self) -> Result<Value, EntitiesError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('{') => self.nested(Self::dict),
            Some('[') => self.nested(|p| p.sequence(']')),
            Some('(') => self.nested(|p| p.sequence(')')),
            Some('\'') | Some('"') => self.string().map(Value::String),
            Some('u' | 'U') if matches!(self.peek_second(), Some('\'' | '"')) => {
                self.bump();
                self.string().map(Value::String)
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.keyword(),
            Some(c) => Err(self.error(format!("unexpected character {c:?}"))),
        }
    }

    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Value, EntitiesError>,
    ) -> Result<Value, EntitiesError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(format!("nesting deeper than {MAX_DEPTH} levels")));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn dict(&mut self) -> Result<Value, EntitiesError> {
        self.bump(); // '{'
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Object(map));
            }

            let key_pos = self.pos;
            let key = match self.value()? {
                Value::String(key) => key,
                _ => {
                    return Err(EntitiesError::Malformed {
                        position: key_pos,
                        reason: "dict keys must be strings".to_string(),
                    })
                }
            };

            self.skip_whitespace();
            if self.bump() != Some(':') {
                return Err(self.error("expected ':' after dict key"));
            }
            let value = self.value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                _ => return Err(self.error("expected ',' or '}' in dict")),
            }
        }
    }

    fn sequence(&mut self, close: char) -> Result<Value, EntitiesError> {
        self.bump(); // '[' or '('
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(Value::Array(items));
            }

            items.push(self.value()?);

            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(Value::Array(items)),
                _ => return Err(self.error(format!("expected ',' or '{close}'"))),
            }
        }
    }

    fn string(&mut self) -> Result<String, EntitiesError> {
        let start = self.pos;
        let quote = self.bump().ok_or_else(|| self.error("expected string"))?;
        let mut out = String::new();

        loop {
            let c = self.bump().ok_or_else(|| EntitiesError::Malformed {
                position: start,
                reason: "unterminated string".to_string(),
            })?;
            match c {
                c if c == quote => return Ok(out),
                '\\' => self.escape(&mut out)?,
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), EntitiesError> {
        let c = self
            .bump()
            .ok_or_else(|| self.error("unterminated escape sequence"))?;
        match c {
            '\\' | '\'' | '"' | '/' => out.push(c),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            '0' => out.push('\0'),
            'x' => {
                let code = self.hex(2)?;
                out.push(self.scalar(code)?);
            }
            'u' => {
                let code = self.hex(4)?;
                // JSON encodes astral characters as a surrogate pair
                if (0xD800..0xDC00).contains(&code) && self.src[self.pos..].starts_with("\\u") {
                    self.pos += 2;
                    let low = self.hex(4)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(self.error("invalid low surrogate"));
                    }
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    out.push(self.scalar(combined)?);
                } else {
                    out.push(self.scalar(code)?);
                }
            }
            'U' => {
                let code = self.hex(8)?;
                out.push(self.scalar(code)?);
            }
            // Python keeps unknown escapes verbatim
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex(&mut self, digits: usize) -> Result<u32, EntitiesError> {
        let end = self.pos + digits;
        let chunk = self
            .src
            .get(self.pos..end)
            .filter(|s| s.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.error(format!("expected {digits} hex digits")))?;
        let code = u32::from_str_radix(chunk, 16).map_err(|e| self.error(e.to_string()))?;
        self.pos = end;
        Ok(code)
    }

    fn scalar(&self, code: u32) -> Result<char, EntitiesError> {
        char::from_u32(code).ok_or_else(|| self.error(format!("invalid code point {code:#x}")))
    }

    fn number(&mut self) -> Result<Value, EntitiesError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.' | '_'))
        {
            self.bump();
        }
        let text: String = self.src[start..self.pos].chars().filter(|&c| c != '_').collect();
        let malformed = || EntitiesError::Malformed {
            position: start,
            reason: format!("invalid number {text:?}"),
        };

        let is_float = text.contains(['.', 'e', 'E']);
        if !is_float {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::Number(n.into()));
            }
            if let Ok(n) = text.parse::<u64>() {
                return Ok(Value::Number(n.into()));
            }
        }
        let f: f64 = text.parse().map_err(|_| malformed())?;
        Number::from_f64(f).map(Value::Number).ok_or_else(malformed)
    }

    fn keyword(&mut self) -> Result<Value, EntitiesError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::Null),
            other => Err(EntitiesError::Malformed {
                position: start,
                reason: format!("unexpected identifier `{other}`"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_python_dict() {
        let value = parse_literal("{'a': [1, 2.5, None], 'b': (True, False)}").unwrap();
        assert_eq!(value, json!({"a": [1, 2.5, null], "b": [true, false]}));
    }

    #[test]
    fn test_json_passthrough() {
        let value = parse_literal(r#"{"hashtags": [{"text": "rust"}], "n": -3}"#).unwrap();
        assert_eq!(value, json!({"hashtags": [{"text": "rust"}], "n": -3}));
    }

    #[test]
    fn test_string_escapes() {
        let value = parse_literal(r"['it\'s', 'tab\there', u'caf\xe9', 'é']").unwrap();
        assert_eq!(value, json!(["it's", "tab\there", "café", "é"]));
    }

    #[test]
    fn test_surrogate_pair() {
        let value = parse_literal(r#""\ud83e\udd80""#).unwrap();
        assert_eq!(value, json!("🦀"));
    }

    #[test]
    fn test_trailing_commas() {
        assert_eq!(parse_literal("[1, 2,]").unwrap(), json!([1, 2]));
        assert_eq!(parse_literal("{'a': 1,}").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_rejects_code() {
        let err = parse_literal("__import__('os').system('ls')").unwrap_err();
        assert!(matches!(err, EntitiesError::Malformed { position: 0, .. }));
    }

    #[test]
    fn test_rejects_trailing_input() {
        assert!(parse_literal("{} []").is_err());
    }

    #[test]
    fn test_rejects_unterminated_string() {
        let err = parse_literal("{'text: 1}").unwrap_err();
        assert!(matches!(err, EntitiesError::Malformed { position: 1, .. }));
    }

    #[test]
    fn test_rejects_non_string_key() {
        assert!(parse_literal("{1: 'a'}").is_err());
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        assert!(parse_literal(&deep).is_err());

        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_literal(&ok).is_ok());
    }

    #[test]
    fn test_extract_hashtags_dedups() {
        let raw = "{'hashtags': [{'text': 'rust', 'indices': [0, 5]}, {'text': 'rust', 'indices': [9, 14]}, {'text': 'Go', 'indices': [20, 23]}], 'urls': []}";
        let tags = extract_hashtags(raw).unwrap();
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["Go", "rust"]);
    }

    #[test]
    fn test_extract_hashtags_missing_key() {
        let err = extract_hashtags("{'urls': []}").unwrap_err();
        assert!(matches!(err, EntitiesError::Shape(_)));
    }
}
