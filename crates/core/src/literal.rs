//! Restricted literal parser.
//!
//! Accepts scalars (quoted strings, integers, floats, booleans) and flat
//! dictionaries with string keys and scalar values. Anything else is an
//! error; nothing here evaluates expressions.

use indexmap::IndexMap;

use crate::error::{DomainError, DomainResult};
use crate::value::AttrValue;

/// A parsed literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Scalar(AttrValue),
    Dict(IndexMap<String, AttrValue>),
}

/// Parse a complete literal; trailing input is an error.
pub fn parse_literal(src: &str) -> DomainResult<Literal> {
    let mut p = Parser::new(src);
    p.skip_ws();
    let lit = if p.peek() == Some('{') {
        Literal::Dict(p.dict()?)
    } else {
        Literal::Scalar(p.scalar()?)
    };
    p.skip_ws();
    if !p.is_eof() {
        return Err(DomainError::invalid_literal(p.pos, "unexpected trailing input"));
    }
    Ok(lit)
}

/// Parse a flat dictionary literal such as `{"name": "Bob", 'age': 89}`.
pub fn parse_dict(src: &str) -> DomainResult<IndexMap<String, AttrValue>> {
    match parse_literal(src)? {
        Literal::Dict(map) => Ok(map),
        Literal::Scalar(_) => Err(DomainError::invalid_literal(0, "expected a dictionary")),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn expect(&mut self, want: char) -> DomainResult<()> {
        match self.advance() {
            Some(c) if c == want => Ok(()),
            Some(c) => Err(DomainError::invalid_literal(
                self.pos - c.len_utf8(),
                format!("expected '{want}', found '{c}'"),
            )),
            None => Err(DomainError::invalid_literal(
                self.pos,
                format!("expected '{want}', found end of input"),
            )),
        }
    }

    fn dict(&mut self) -> DomainResult<IndexMap<String, AttrValue>> {
        self.expect('{')?;
        let mut map = IndexMap::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.advance();
                return Ok(map);
            }
            let key = match self.peek() {
                Some('"') | Some('\'') => self.string()?,
                _ => {
                    return Err(DomainError::invalid_literal(
                        self.pos,
                        "dictionary keys must be quoted strings",
                    ));
                }
            };
            self.skip_ws();
            self.expect(':')?;
            self.skip_ws();
            let value = self.scalar()?;
            // Later duplicates win, keeping the first key's position.
            map.insert(key, value);
            self.skip_ws();
            match self.advance() {
                Some(',') => continue,
                Some('}') => return Ok(map),
                Some(c) => {
                    return Err(DomainError::invalid_literal(
                        self.pos - c.len_utf8(),
                        format!("expected ',' or '}}', found '{c}'"),
                    ));
                }
                None => {
                    return Err(DomainError::invalid_literal(
                        self.pos,
                        "unterminated dictionary",
                    ));
                }
            }
        }
    }

    fn scalar(&mut self) -> DomainResult<AttrValue> {
        match self.peek() {
            Some('"') | Some('\'') => Ok(AttrValue::Str(self.string()?)),
            Some(c) if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => self.number(),
            Some(c) if c.is_ascii_alphabetic() => self.keyword(),
            Some('{') | Some('[') => Err(DomainError::invalid_literal(
                self.pos,
                "nested containers are not supported",
            )),
            Some(c) => Err(DomainError::invalid_literal(self.pos, format!("unexpected '{c}'"))),
            None => Err(DomainError::invalid_literal(self.pos, "expected a value")),
        }
    }

    fn string(&mut self) -> DomainResult<String> {
        let start = self.pos;
        let quote = self.advance().unwrap_or('"');
        let mut out = String::new();
        loop {
            match self.advance() {
                Some('\\') => match self.advance() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c @ ('\\' | '\'' | '"')) => out.push(c),
                    Some(c) => {
                        out.push('\\');
                        out.push(c);
                    }
                    None => break,
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
                None => break,
            }
        }
        Err(DomainError::invalid_literal(start, "unterminated string"))
    }

    fn number(&mut self) -> DomainResult<AttrValue> {
        let start = self.pos;
        let numeric =
            |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E' | '_');
        while self.peek().is_some_and(numeric) {
            self.advance();
        }
        let text: String = self.src[start..self.pos].chars().filter(|c| *c != '_').collect();
        let is_float = text.contains(['.', 'e', 'E']);
        if is_float {
            match text.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(AttrValue::Float(f)),
                _ => Err(DomainError::invalid_literal(start, format!("invalid float '{text}'"))),
            }
        } else {
            text.parse::<i64>()
                .map(AttrValue::Int)
                .map_err(|_| {
                    DomainError::invalid_literal(start, format!("invalid integer '{text}'"))
                })
        }
    }

    fn keyword(&mut self) -> DomainResult<AttrValue> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        match &self.src[start..self.pos] {
            "True" | "true" => Ok(AttrValue::Bool(true)),
            "False" | "false" => Ok(AttrValue::Bool(false)),
            other => Err(DomainError::invalid_literal(
                start,
                format!("bare name '{other}' is not a literal"),
            )),
        }
    }
}
