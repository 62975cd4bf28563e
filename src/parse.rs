use std::collections::HashMap;

use thiserror::Error;

use crate::limits::Limits;
use crate::tokenize::{Token, TokenKind};
use crate::Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    EmptyInput,

    /// `offset` is `None` when the token sequence ended where a value was due
    #[error("expected a value, found {found}")]
    ValueExpected { found: String, offset: Option<usize> },

    #[error("expected a string key at byte {offset}, found {found}")]
    ExpectedKey { found: String, offset: usize },

    #[error("expected ':' after object key at byte {offset}, found {found}")]
    ExpectedColon { found: String, offset: usize },

    #[error("expected ',' or '{close}' at byte {offset}, found {found}")]
    ExpectedComma {
        close: char,
        found: String,
        offset: usize,
    },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("trailing comma before '{close}' at byte {offset}")]
    TrailingComma { close: char, offset: usize },

    #[error("unexpected {found} at byte {offset} after the top-level value")]
    TrailingContent { found: String, offset: usize },

    /// A number token whose text is not a finite float. Only reachable with
    /// hand-built tokens, the lexer never produces one.
    #[error("invalid number `{text}` at byte {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("nesting deeper than {limit} levels at byte {offset}")]
    NestingTooDeep { limit: usize, offset: usize },
}

type ParseResult = Result<Value, ParseError>;

/// Forward-only position over a token sequence.
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// The next unconsumed token.
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the next token, `None` once the sequence is exhausted.
    pub fn advance(&mut self) -> Option<&'t Token> {
        let token = self.peek()?;
        self.position += 1;
        Some(token)
    }

    fn expect_token(&mut self) -> Result<&'t Token, ParseError> {
        self.advance().ok_or(ParseError::UnexpectedEof)
    }

    fn expect_more(&self) -> Result<&'t Token, ParseError> {
        self.peek().ok_or(ParseError::UnexpectedEof)
    }
}

pub fn parse(tokens: &[Token]) -> Result<Value, ParseError> {
    parse_with_limits(tokens, Limits::default())
}

pub fn parse_with_limits(tokens: &[Token], limits: Limits) -> Result<Value, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut parser = Parser::new(tokens, limits);
    let value = parser.parse_value()?;

    if let Some(token) = parser.cursor.peek() {
        return Err(ParseError::TrailingContent {
            found: describe(token),
            offset: token.offset,
        });
    }

    Ok(value)
}

fn describe(token: &Token) -> String {
    match &token.kind {
        TokenKind::String(raw) => format!("string \"{raw}\""),
        TokenKind::Number(raw) => format!("number {raw}"),
        _ => format!("`{}`", token.text()),
    }
}

struct Parser<'t> {
    cursor: Cursor<'t>,
    limits: Limits,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token], limits: Limits) -> Self {
        Self {
            cursor: Cursor::new(tokens),
            limits,
            depth: 0,
        }
    }

    fn parse_value(&mut self) -> ParseResult {
        let Some(token) = self.cursor.advance() else {
            return Err(ParseError::ValueExpected {
                found: String::from("end of input"),
                offset: None,
            });
        };

        match &token.kind {
            TokenKind::Null => Ok(Value::Null),
            TokenKind::False => Ok(Value::Boolean(false)),
            TokenKind::True => Ok(Value::Boolean(true)),
            TokenKind::Number(raw) => parse_number(raw, token.offset),
            TokenKind::String(raw) => Ok(Value::String(raw.clone())),
            TokenKind::LeftBrace => self.parse_object(token),
            TokenKind::LeftBracket => self.parse_array(token),
            _ => Err(ParseError::ValueExpected {
                found: describe(token),
                offset: Some(token.offset),
            }),
        }
    }

    fn enter(&mut self, open: &Token) -> Result<(), ParseError> {
        if self.depth >= self.limits.max_nesting_depth {
            tracing::debug!(
                limit = self.limits.max_nesting_depth,
                offset = open.offset,
                "nesting limit reached"
            );
            return Err(ParseError::NestingTooDeep {
                limit: self.limits.max_nesting_depth,
                offset: open.offset,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_array(&mut self, open: &Token) -> ParseResult {
        self.enter(open)?;
        let mut array = Vec::new();

        if self.cursor.expect_more()?.kind == TokenKind::RightBracket {
            self.cursor.advance();
            self.depth -= 1;
            return Ok(Value::Array(array));
        }

        loop {
            let value = self.parse_value()?;
            array.push(value);

            let separator = self.cursor.expect_token()?;
            match separator.kind {
                TokenKind::RightBracket => break,
                TokenKind::Comma => {
                    if self.cursor.expect_more()?.kind == TokenKind::RightBracket {
                        return Err(ParseError::TrailingComma {
                            close: ']',
                            offset: separator.offset,
                        });
                    }
                }
                _ => {
                    return Err(ParseError::ExpectedComma {
                        close: ']',
                        found: describe(separator),
                        offset: separator.offset,
                    })
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Array(array))
    }

    fn parse_object(&mut self, open: &Token) -> ParseResult {
        self.enter(open)?;
        let mut map = HashMap::new();

        // consume the LeftBrace's successor, either a key or the RightBrace
        let mut token = self.cursor.expect_token()?;
        if token.kind == TokenKind::RightBrace {
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            let TokenKind::String(key) = &token.kind else {
                return Err(ParseError::ExpectedKey {
                    found: describe(token),
                    offset: token.offset,
                });
            };

            let colon = self.cursor.expect_token()?;
            if colon.kind != TokenKind::Colon {
                return Err(ParseError::ExpectedColon {
                    found: describe(colon),
                    offset: colon.offset,
                });
            }

            self.cursor.expect_more()?;
            let value = self.parse_value()?;
            // a repeated key replaces the earlier value
            map.insert(key.clone(), value);

            let separator = self.cursor.expect_token()?;
            match separator.kind {
                TokenKind::RightBrace => break,
                TokenKind::Comma => {
                    token = self.cursor.expect_token()?;
                    if token.kind == TokenKind::RightBrace {
                        return Err(ParseError::TrailingComma {
                            close: '}',
                            offset: separator.offset,
                        });
                    }
                }
                _ => {
                    return Err(ParseError::ExpectedComma {
                        close: '}',
                        found: describe(separator),
                        offset: separator.offset,
                    })
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }
}

fn parse_number(raw: &str, offset: usize) -> ParseResult {
    match raw.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Value::Number(number)),
        _ => Err(ParseError::InvalidNumber {
            text: raw.to_owned(),
            offset,
        }),
    }
}
