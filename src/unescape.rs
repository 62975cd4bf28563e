use std::str::Chars;

/// Decodes the escape sequences of a raw JSON string body.
///
/// The input is expected to have passed the lexer. Anything it would have
/// rejected is decoded leniently: an unknown escape yields the escaped
/// character itself, a malformed or unpaired `\u` yields U+FFFD.
pub fn unescape(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(next_char) = chars.next() {
        if next_char != '\\' {
            output.push(next_char);
            continue;
        }

        match chars.next() {
            Some('"') => output.push('"'),
            Some('\\') => output.push('\\'),
            Some('/') => output.push('/'),
            // `\b` (backspace) is a valid escape in JSON, but not Rust
            Some('b') => output.push('\u{8}'),
            // `\f` (formfeed) is a valid escape in JSON, but not Rust
            Some('f') => output.push('\u{c}'),
            Some('n') => output.push('\n'),
            Some('r') => output.push('\r'),
            Some('t') => output.push('\t'),
            Some('u') => output.push(unescape_unicode(&mut chars)),
            Some(other) => output.push(other),
            None => output.push('\\'),
        }
    }

    output
}

fn unescape_unicode(chars: &mut Chars<'_>) -> char {
    let Some(high) = read_hex4(chars) else {
        return char::REPLACEMENT_CHARACTER;
    };

    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER);
    }

    // high surrogate, only meaningful when a `\uDC00`..`\uDFFF` follows
    let mut lookahead = chars.clone();
    if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
        if let Some(low) = read_hex4(&mut lookahead) {
            if (0xDC00..0xE000).contains(&low) {
                *chars = lookahead;
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
            }
        }
    }

    char::REPLACEMENT_CHARACTER
}

fn read_hex4(chars: &mut Chars<'_>) -> Option<u32> {
    let mut sum = 0;
    for _ in 0..4 {
        let digit = chars.next()?.to_digit(16)?;
        sum = sum * 16 + digit;
    }
    Some(sum)
}
