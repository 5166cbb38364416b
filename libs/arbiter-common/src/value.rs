/// Structural Value Parser
///
/// Turns a serialized battery into an untyped tree without a schema.
///
/// **Shape:**
/// - Scalars keep their raw text (numbers, booleans, quoted text without quotes)
/// - `[...]` and `{...}` both become a `Sequence`; the `kind` flag tells them apart
/// - Objects are a flat, order-preserving list of alternating key and value nodes
///
/// Interpretation (integer, boolean, ...) is deferred to the typed accessors.
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// `[a, b, c]`
    Positional,
    /// `{k1: v1, k2: v2}` stored as `[k1, v1, k2, v2]`
    KeyValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    /// Invariant: `items.len()` is even when `kind` is `KeyValue`
    Sequence {
        kind: SequenceKind,
        items: Vec<Value>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEnd(usize),

    #[error("unterminated quoted text starting at offset {0}")]
    UnterminatedString(usize),

    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedToken { found: char, offset: usize },
}

impl Value {
    pub fn scalar(raw: impl Into<String>) -> Self {
        Value::Scalar(raw.into())
    }

    pub fn positional(items: Vec<Value>) -> Self {
        Value::Sequence {
            kind: SequenceKind::Positional,
            items,
        }
    }

    pub fn is_positional(&self) -> bool {
        matches!(
            self,
            Value::Sequence {
                kind: SequenceKind::Positional,
                ..
            }
        )
    }

    /// Raw scalar text, `None` for sequences
    pub fn raw(&self) -> Option<&str> {
        match self {
            Value::Scalar(raw) => Some(raw),
            Value::Sequence { .. } => None,
        }
    }

    /// Children of a sequence, `None` for scalars
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Scalar(_) => None,
            Value::Sequence { items, .. } => Some(items),
        }
    }
}

/// Parse one value covering the start of `text`
///
/// Trailing content after the first complete value is ignored.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    Parser::new(text).parse_value()
}

struct Parser<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn skip_if(&mut self, expected: char) {
        if matches!(self.chars.peek(), Some(&(_, c)) if c == expected) {
            self.chars.next();
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        let (start, c) = self
            .chars
            .next()
            .ok_or(ParseError::UnexpectedEnd(self.src.len()))?;

        match c {
            '[' => self.parse_sequence(SequenceKind::Positional, ']'),
            '{' => self.parse_sequence(SequenceKind::KeyValue, '}'),
            '"' => self.parse_quoted(start),
            ',' | ']' | '}' | ':' => Err(ParseError::UnexpectedToken {
                found: c,
                offset: start,
            }),
            _ => Ok(self.parse_bare(start, c)),
        }
    }

    fn parse_sequence(&mut self, kind: SequenceKind, close: char) -> Result<Value, ParseError> {
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                None => return Err(ParseError::UnexpectedEnd(self.src.len())),
                Some(&(_, c)) if c == close => {
                    self.chars.next();
                    break;
                }
                Some(_) => {}
            }

            items.push(self.parse_value()?);

            if kind == SequenceKind::KeyValue {
                self.skip_whitespace();
                self.skip_if(':');
                items.push(self.parse_value()?);
            }

            self.skip_whitespace();
            self.skip_if(',');
        }

        Ok(Value::Sequence { kind, items })
    }

    /// A backslash keeps itself and the next character verbatim
    fn parse_quoted(&mut self, start: usize) -> Result<Value, ParseError> {
        let mut raw = String::new();

        while let Some((_, c)) = self.chars.next() {
            match c {
                '"' => return Ok(Value::Scalar(raw)),
                '\\' => {
                    raw.push(c);
                    match self.chars.next() {
                        Some((_, escaped)) => raw.push(escaped),
                        None => break,
                    }
                }
                _ => raw.push(c),
            }
        }

        Err(ParseError::UnterminatedString(start))
    }

    fn parse_bare(&mut self, start: usize, first: char) -> Value {
        let mut end = start + first.len_utf8();

        while let Some(&(idx, c)) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, ',' | ']' | '}') {
                break;
            }
            end = idx + c.len_utf8();
            self.chars.next();
        }

        Value::Scalar(self.src[start..end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(raw: &[&str]) -> Value {
        Value::positional(raw.iter().map(|r| Value::scalar(*r)).collect())
    }

    #[test]
    fn test_parse_bare_scalars() {
        assert_eq!(parse("42").unwrap(), Value::scalar("42"));
        assert_eq!(parse("  -7 ").unwrap(), Value::scalar("-7"));
        assert_eq!(parse("true").unwrap(), Value::scalar("true"));
        assert_eq!(parse("null").unwrap(), Value::scalar("null"));
    }

    #[test]
    fn test_parse_positional_sequence() {
        assert_eq!(parse("[2,7,11,15]").unwrap(), ints(&["2", "7", "11", "15"]));
        assert_eq!(parse("[ 1 , 2 ]").unwrap(), ints(&["1", "2"]));
        assert_eq!(parse("[]").unwrap(), ints(&[]));
    }

    #[test]
    fn test_parse_key_value_sequence() {
        let value = parse(r#"{"input": [[3,3],6], "expected": [0,1]}"#).unwrap();

        let Value::Sequence { kind, items } = value else {
            panic!("expected a sequence");
        };
        assert_eq!(kind, SequenceKind::KeyValue);
        assert_eq!(items.len(), 4);
        assert_eq!(items[0], Value::scalar("input"));
        assert_eq!(
            items[1],
            Value::positional(vec![ints(&["3", "3"]), Value::scalar("6")])
        );
        assert_eq!(items[2], Value::scalar("expected"));
        assert_eq!(items[3], ints(&["0", "1"]));
    }

    #[test]
    fn test_parse_empty_object() {
        assert_eq!(
            parse("{}").unwrap(),
            Value::Sequence {
                kind: SequenceKind::KeyValue,
                items: vec![]
            }
        );
    }

    #[test]
    fn test_quoted_text_keeps_escapes_raw() {
        assert_eq!(parse(r#""say \"hi\"""#).unwrap(), Value::scalar(r#"say \"hi\""#));
        assert_eq!(parse(r#""a\\""#).unwrap(), Value::scalar(r#"a\\"#));
        assert_eq!(parse(r#""a b, c]""#).unwrap(), Value::scalar("a b, c]"));
    }

    #[test]
    fn test_nested_whitespace_is_insignificant() {
        let compact = parse(r#"[{"input":[[1,2],3],"expected":[0,1]}]"#).unwrap();
        let spaced = parse("[\n  { \"input\" : [ [1, 2], 3 ],\n    \"expected\" : [0, 1] }\n]\n").unwrap();
        assert_eq!(compact, spaced);
    }

    #[test]
    fn test_trailing_content_ignored() {
        assert_eq!(parse("[1] garbage").unwrap(), ints(&["1"]));
    }

    #[test]
    fn test_truncated_input_fails() {
        assert_eq!(parse(""), Err(ParseError::UnexpectedEnd(0)));
        assert_eq!(parse("   "), Err(ParseError::UnexpectedEnd(3)));
        assert_eq!(parse("[1,2"), Err(ParseError::UnexpectedEnd(4)));
        assert!(matches!(parse(r#"{"input""#), Err(ParseError::UnexpectedEnd(_))));
        assert_eq!(parse(r#""open"#), Err(ParseError::UnterminatedString(0)));
    }

    #[test]
    fn test_structural_character_in_value_position() {
        assert_eq!(
            parse("[,1]"),
            Err(ParseError::UnexpectedToken { found: ',', offset: 1 })
        );
        assert!(matches!(
            parse(r#"{"key"}"#),
            Err(ParseError::UnexpectedToken { found: '}', .. })
        ));
    }

    #[test]
    fn test_helpers() {
        let value = parse("[1]").unwrap();
        assert!(value.is_positional());
        assert_eq!(value.items().map(|items| items.len()), Some(1));
        assert_eq!(value.raw(), None);
        assert_eq!(Value::scalar("x").raw(), Some("x"));
        assert!(!parse("{}").unwrap().is_positional());
    }
}
