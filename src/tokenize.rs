use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `null`
    Null,
    /// `false`
    False,
    /// `true`
    True,
    /// Raw text of a number literal, already checked against the JSON number grammar
    Number(String),
    /// Raw text between the quotes of a string, escape sequences kept as found
    String(String),
}

/// A token together with the byte offset where it starts in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// The source text of the token. For strings this excludes the quotes.
    pub fn text(&self) -> &str {
        match &self.kind {
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Null => "null",
            TokenKind::False => "false",
            TokenKind::True => "true",
            TokenKind::Number(text) | TokenKind::String(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("unterminated escape sequence at byte {offset}")]
    UnterminatedEscape { offset: usize },

    #[error("illegal backslash escape '\\{escape}' at byte {offset}")]
    IllegalEscape { escape: char, offset: usize },

    /// `\u` followed by something other than four hexadecimal digits
    #[error("invalid unicode escape at byte {offset}")]
    InvalidUnicodeEscape { offset: usize },

    #[error("unescaped control character {byte:#04x} in string at byte {offset}")]
    UnescapedControlChar { byte: u8, offset: usize },

    #[error("unrecognized literal `{text}` at byte {offset}")]
    UnrecognizedLiteral { text: String, offset: usize },

    #[error("unexpected character {ch:?} at byte {offset}")]
    UnexpectedChar { ch: char, offset: usize },
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let bytes = input.as_bytes();
    let mut index = 0;

    let mut tokens = Vec::new();

    while let Some(&byte) = bytes.get(index) {
        if is_whitespace(byte) {
            index += 1;
            continue;
        }

        let offset = index;
        let kind = make_token(input, &mut index)?;
        tokens.push(Token::new(kind, offset));
    }

    Ok(tokens)
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

// `index` is always in bounds and on a char boundary when this is called.
fn make_token(input: &str, index: &mut usize) -> Result<TokenKind, LexError> {
    let kind = match input.as_bytes()[*index] {
        b'{' => TokenKind::LeftBrace,
        b'}' => TokenKind::RightBrace,
        b'[' => TokenKind::LeftBracket,
        b']' => TokenKind::RightBracket,
        b':' => TokenKind::Colon,
        b',' => TokenKind::Comma,
        b'"' => return tokenize_string(input, index),
        b'0'..=b'9' | b'-' | b'.' | b'e' | b'E' | b't' | b'f' | b'n' => {
            return tokenize_literal(input, index)
        }
        _ => {
            return Err(LexError::UnexpectedChar {
                ch: char_at(input, *index),
                offset: *index,
            })
        }
    };

    *index += 1;
    Ok(kind)
}

fn char_at(input: &str, offset: usize) -> char {
    input
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn tokenize_literal(input: &str, index: &mut usize) -> Result<TokenKind, LexError> {
    let bytes = input.as_bytes();
    let start = *index;

    while bytes.get(*index).is_some_and(|&b| is_literal_byte(b)) {
        *index += 1;
    }

    let text = &input[start..*index];
    if is_number(text) {
        return Ok(TokenKind::Number(text.to_owned()));
    }

    match text {
        "true" => Ok(TokenKind::True),
        "false" => Ok(TokenKind::False),
        "null" => Ok(TokenKind::Null),
        _ => Err(LexError::UnrecognizedLiteral {
            text: text.to_owned(),
            offset: start,
        }),
    }
}

fn is_literal_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-' | b'+')
}

/// Whether `text` parses as a finite `f64` without a bad leading zero.
///
/// A leading zero (after an optional `-`) may only be followed by more digits
/// when a `.` or an exponent appears, so `01`, `007` and `-01` are rejected
/// while `0`, `0.5`, `00.5` and `0e1` are accepted.
fn is_number(text: &str) -> bool {
    !has_bad_leading_zero(text) && text.parse::<f64>().is_ok_and(f64::is_finite)
}

fn has_bad_leading_zero(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    match digits.strip_prefix('0') {
        Some(rest) => !rest.is_empty() && !rest.contains(['.', 'e', 'E']),
        None => false,
    }
}

fn tokenize_string(input: &str, index: &mut usize) -> Result<TokenKind, LexError> {
    let bytes = input.as_bytes();
    let opening = *index;
    *index += 1;
    let content_start = *index;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(LexError::UnterminatedString { offset: opening });
        };

        match byte {
            b'"' => break,
            b'\\' => tokenize_escape(input, index)?,
            b if b < 0x20 => {
                return Err(LexError::UnescapedControlChar {
                    byte: b,
                    offset: *index,
                })
            }
            _ => *index += 1,
        }
    }

    let raw = &input[content_start..*index];
    // consume the closing quote
    *index += 1;

    Ok(TokenKind::String(raw.to_owned()))
}

/// Checks the escape sequence whose backslash sits at `index` and moves past it.
fn tokenize_escape(input: &str, index: &mut usize) -> Result<(), LexError> {
    let bytes = input.as_bytes();
    let backslash = *index;
    *index += 1;

    let Some(&escape) = bytes.get(*index) else {
        return Err(LexError::UnterminatedEscape { offset: backslash });
    };

    match escape {
        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => *index += 1,
        b'u' => {
            *index += 1;
            let end = bytes.len().min(*index + 4);
            let digits = &bytes[*index..end];
            if !digits.iter().all(u8::is_ascii_hexdigit) {
                return Err(LexError::InvalidUnicodeEscape { offset: backslash });
            }
            if digits.len() < 4 {
                return Err(LexError::UnterminatedEscape { offset: backslash });
            }
            *index = end;
        }
        _ => {
            return Err(LexError::IllegalEscape {
                escape: char_at(input, *index),
                offset: backslash,
            })
        }
    }

    Ok(())
}
