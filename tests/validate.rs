//! End-to-end checks of the public API: the lexer and parser composed, and
//! agreement with `serde_json` on well-formed documents.

use json_validator::{
    from_str, is_valid, parse, tokenize, unescape, validate, validate_with_limits, Error,
    LexError, Limits, ParseError, TokenKind, Value,
};

const VALID: &[&str] = &[
    "{}",
    "[]",
    "0",
    "-0",
    "0.5",
    "0e1",
    "-12.5E-3",
    "\"\"",
    "true",
    "false",
    "null",
    r#"{"key": "value"}"#,
    r#"{"key": true, "key2": false, "key3": null, "key4": "value", "key5": 101}"#,
    r#"{"key": "value", "key-n": 101, "key-o": {}, "key-l": []}"#,
    r#"{"key": "value", "key-n": 101, "key-o": {"inner key": "inner value"}, "key-l": ["list value"]}"#,
    r#"[1, 2.5, -3e2, "four", [5], {"six": 6}, true, false, null]"#,
    r#"{"escapes": "\" \\ \/ \b \f \n \r \t", "unicode": "olá 💩"}"#,
    r#"{"code points": "\u00e9 \uD83D\uDCA9 \u0000"}"#,
    "\n\t {\r\n  \"spaced\" :\t[ 1 , 2 ]\n}\n",
];

const INVALID: &[&str] = &[
    "",
    "   ",
    "{",
    "}",
    "[1, 2",
    r#"{"key": "value",}"#,
    "[1, 2,]",
    r#"{key: "value"}"#,
    r#"{"key": 'value'}"#,
    r#"{"key" "value"}"#,
    r#"{"a": 1 "b": 2}"#,
    "[1 2]",
    "01",
    "[013]",
    "[0x14]",
    "[+1]",
    "[1e999]",
    r#"["illegal \x escape"]"#,
    "[\"tab\tinside\"]",
    "[\"line\nbreak\"]",
    r#"["unterminated]"#,
    "[True]",
    "[nul]",
    "true false",
    "[] []",
    r#"{"a": 1}}"#,
    "[,1]",
    "[1,,2]",
    "{,}",
];

#[test]
fn accepts_valid_documents() {
    for input in VALID {
        assert_eq!(validate(input), Ok(true), "{input:?}");
    }
}

#[test]
fn rejects_invalid_documents() {
    for input in INVALID {
        assert!(validate(input).is_err(), "{input:?}");
        assert!(!is_valid(input), "{input:?}");
    }
}

#[test]
fn empty_input() {
    assert!(tokenize("").unwrap().is_empty());
    assert_eq!(parse(&[]), Err(ParseError::EmptyInput));
    assert_eq!(validate(""), Err(Error::Parse(ParseError::EmptyInput)));
}

#[test]
fn empty_object() {
    let value = parse(&tokenize("{}").unwrap()).unwrap();
    assert_eq!(value, Value::Object(Default::default()));
}

#[test]
fn array_of_numbers() {
    let value = parse(&tokenize("[1,2,3]").unwrap()).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0)
        ])
    );
}

#[test]
fn trailing_comma_in_object() {
    let tokens = tokenize(r#"{"a":1,}"#).unwrap();
    assert!(matches!(
        parse(&tokens),
        Err(ParseError::TrailingComma { close: '}', .. })
    ));
}

#[test]
fn leading_zero_numbers() {
    assert!(matches!(
        tokenize("01"),
        Err(LexError::UnrecognizedLiteral { .. })
    ));
    assert_eq!(
        tokenize("0.1").unwrap()[0].kind,
        TokenKind::Number("0.1".into())
    );
    assert_eq!(
        tokenize("10").unwrap()[0].kind,
        TokenKind::Number("10".into())
    );
}

#[test]
fn numbers_follow_float_parsing_with_leading_zero_rule() {
    let value = from_str("[.5, 1., -.5, 00.5, 0e1]").unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            Value::Number(0.5),
            Value::Number(1.0),
            Value::Number(-0.5),
            Value::Number(0.5),
            Value::Number(0.0),
        ])
    );
    for input in ["[-01]", "[007]", "[nan]", "[-inf]", "[1e999]"] {
        assert!(
            matches!(validate(input), Err(Error::Lex(LexError::UnrecognizedLiteral { .. }))),
            "{input:?}"
        );
    }
}

#[test]
fn illegal_escape() {
    assert!(matches!(
        tokenize(r#""\x""#),
        Err(LexError::IllegalEscape { escape: 'x', .. })
    ));
}

#[test]
fn single_top_level_value() {
    let tokens = tokenize("true false").unwrap();
    assert!(matches!(
        parse(&tokens),
        Err(ParseError::TrailingContent { offset: 5, .. })
    ));
}

#[test]
fn validation_is_idempotent() {
    for input in VALID.iter().chain(INVALID) {
        assert_eq!(validate(input), validate(input), "{input:?}");
        if let Ok(first) = from_str(input) {
            assert_eq!(from_str(input).unwrap(), first, "{input:?}");
        }
    }
}

#[test]
fn serialized_ast_reparses_to_same_value() {
    for input in VALID {
        let value = from_str(input).unwrap();
        let reparsed = from_str(&value.to_string()).unwrap();
        assert_eq!(reparsed, value, "{input:?}");
    }
}

#[test]
fn nesting_limit_is_configurable() {
    let deep = format!("{}{}", "[".repeat(300), "]".repeat(300));
    assert!(matches!(
        validate(&deep),
        Err(Error::Parse(ParseError::NestingTooDeep { limit: 256, .. }))
    ));
    assert_eq!(validate_with_limits(&deep, Limits::new(300)), Ok(true));
    assert_eq!(validate_with_limits(&deep, Limits::unlimited()), Ok(true));
}

#[test]
fn default_nesting_limit_boundary() {
    let nested = |depth: usize| format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert_eq!(validate(&nested(256)), Ok(true));
    assert!(matches!(
        validate(&nested(257)),
        Err(Error::Parse(ParseError::NestingTooDeep { limit: 256, offset: 256 }))
    ));
}

fn assert_same(ours: &Value, theirs: &serde_json::Value, input: &str) {
    match (ours, theirs) {
        (Value::Null, serde_json::Value::Null) => {}
        (Value::Boolean(a), serde_json::Value::Bool(b)) => assert_eq!(a, b, "{input:?}"),
        (Value::Number(a), serde_json::Value::Number(b)) => {
            assert_eq!(Some(*a), b.as_f64(), "{input:?}")
        }
        (Value::String(raw), serde_json::Value::String(s)) => {
            assert_eq!(&unescape(raw), s, "{input:?}")
        }
        (Value::Array(a), serde_json::Value::Array(b)) => {
            assert_eq!(a.len(), b.len(), "{input:?}");
            for (x, y) in a.iter().zip(b) {
                assert_same(x, y, input);
            }
        }
        (Value::Object(a), serde_json::Value::Object(b)) => {
            assert_eq!(a.len(), b.len(), "{input:?}");
            for (key, x) in a {
                let y = b
                    .get(&unescape(key))
                    .unwrap_or_else(|| panic!("missing key {key:?} in {input:?}"));
                assert_same(x, y, input);
            }
        }
        _ => panic!("{} does not match {theirs} for {input:?}", ours.kind_name()),
    }
}

#[test]
fn agrees_with_serde_json() {
    for input in VALID {
        let ours = from_str(input).unwrap();
        let theirs: serde_json::Value = serde_json::from_str(input).unwrap();
        assert_same(&ours, &theirs, input);
    }
}

#[test]
fn serde_json_rejects_what_we_reject() {
    for input in INVALID {
        assert!(
            serde_json::from_str::<serde_json::Value>(input).is_err(),
            "{input:?}"
        );
    }
}
