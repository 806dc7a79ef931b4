// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use qjson5::{
    from_str, parse_value, parse_value_with_options, Error, Number, Object, ParseErrorCode,
    ParseOptions, Value,
};

fn test_parse_err(errors: &[(&str, &'static str)]) {
    for &(s, err) in errors {
        let res = parse_value(s.as_bytes());
        assert!(res.is_err(), "expected error for {s:?}");
        assert_eq!(res.err().unwrap().to_string(), err, "input {s:?}");
    }
}

fn test_parse_ok(tests: Vec<(&str, Value)>) {
    for (s, val) in tests {
        assert_eq!(parse_value(s.as_bytes()).unwrap(), val, "input {s:?}");
    }
}

fn int(v: i64) -> Value {
    Value::Number(Number::Int64(v))
}

fn float(v: f64) -> Value {
    Value::Number(Number::Float64(v))
}

fn string(s: &str) -> Value {
    Value::String(s.to_string())
}

fn object(entries: Vec<(&str, Value)>) -> Value {
    let mut obj = Object::new();
    for (k, v) in entries {
        obj.insert(k.to_string(), v);
    }
    Value::Object(obj)
}

#[test]
fn test_parse_literals() {
    test_parse_err(&[
        ("", "EOF while parsing a value, pos 0"),
        ("  // nothing", "EOF while parsing a value, pos 12"),
        ("nul", "unexpected token, pos 0"),
        ("True", "unexpected token, pos 0"),
        ("Inf", "unexpected token, pos 0"),
        ("truea", "extra data after top-level value, pos 4"),
        ("null null", "extra data after top-level value, pos 5"),
        ("@", "unexpected token, pos 0"),
    ]);

    test_parse_ok(vec![
        ("null", Value::Null),
        (" true ", Value::Bool(true)),
        ("\tfalse\n", Value::Bool(false)),
        ("Infinity", float(f64::INFINITY)),
        ("NaN", float(f64::NAN)),
        ("null\0", Value::Null),
    ]);
}

#[test]
fn test_parse_number_errors() {
    test_parse_err(&[
        ("-", "invalid number literal, pos 1"),
        ("+", "invalid number literal, pos 1"),
        (".", "invalid number literal, pos 1"),
        ("+-1", "invalid number literal, pos 1"),
        ("1e", "invalid number literal, pos 2"),
        ("1e+", "invalid number literal, pos 3"),
        ("0x", "invalid hexadecimal number, pos 2"),
        ("-0xg", "invalid hexadecimal number, pos 3"),
        ("1.2.3", "extra data after top-level value, pos 3"),
        ("1 2", "extra data after top-level value, pos 2"),
    ]);
}

#[test]
fn test_parse_integers() {
    test_parse_ok(vec![
        ("0", int(0)),
        ("-0", int(0)),
        ("+42", int(42)),
        ("-42", int(-42)),
        ("007", int(7)),
        ("9223372036854775807", int(i64::MAX)),
        ("-9223372036854775808", int(i64::MIN)),
        ("0x10", int(16)),
        ("0XfF", int(255)),
        ("-0x10", int(-16)),
        ("+0xA", int(10)),
        ("0x7fffffffffffffff", int(i64::MAX)),
        ("-0x8000000000000000", int(i64::MIN)),
    ]);

    // overflow promotes to a double instead of wrapping
    let v = parse_value(b"9223372036854775808").unwrap();
    assert!(v.is_f64());
    assert_eq!(v.as_f64(), Some(9223372036854775808.0));

    let v = parse_value(b"-9223372036854775809").unwrap();
    assert!(v.is_f64());

    let v = parse_value(b"0xffffffffffffffff").unwrap();
    assert!(v.is_f64());
    assert_eq!(v.as_f64(), Some(18446744073709551615.0));

    let v = parse_value(b"0x10000000000000000").unwrap();
    assert!(v.is_f64());
    assert_eq!(v.as_f64(), Some(18446744073709551616.0));
}

#[test]
fn test_parse_fractions() {
    test_parse_ok(vec![
        (".5", float(0.5)),
        ("-.5", float(-0.5)),
        ("+1.25", float(1.25)),
        ("-1.5e-3", float(-0.0015)),
        ("2.5E+2", float(250.0)),
        ("-Infinity", float(f64::NEG_INFINITY)),
        ("+Infinity", float(f64::INFINITY)),
        ("-NaN", float(f64::NAN)),
    ]);

    // integral values with a fraction or exponent are integers up to 2^53
    for (s, expected) in [
        ("5.", 5),
        ("1.0", 1),
        ("1e3", 1000),
        ("1.5e1", 15),
        ("-2.50e2", -250),
        ("0.0", 0),
        ("12300e-2", 123),
        ("9007199254740992.0", 9007199254740992),
        ("-9007199254740992e0", -9007199254740992),
    ] {
        let v = parse_value(s.as_bytes()).unwrap();
        assert!(v.is_i64(), "{s} should be an integer");
        assert_eq!(v.as_i64(), Some(expected), "input {s}");
    }

    for s in ["9007199254740993.0", "9007199254740994.0", "1e16", "1.5", "1e-1"] {
        let v = parse_value(s.as_bytes()).unwrap();
        assert!(v.is_f64(), "{s} should be a double");
    }

    // plain integer literals keep their exact value beyond 2^53
    let v = parse_value(b"9007199254740993").unwrap();
    assert_eq!(v.as_i64(), Some(9007199254740993));

    // correctly rounded conversion
    let v = parse_value(b"0.1").unwrap();
    assert_eq!(v.as_f64(), Some(0.1));
    let v = parse_value(b"2.2250738585072014e-308").unwrap();
    assert_eq!(v.as_f64(), Some(f64::MIN_POSITIVE));
}

#[test]
fn test_parse_string() {
    test_parse_err(&[
        ("'abc", "unterminated string, pos 4"),
        ("\"abc'", "unterminated string, pos 5"),
        ("\"ab\\", "unterminated string, pos 4"),
    ]);

    test_parse_ok(vec![
        ("''", string("")),
        ("\"\"", string("")),
        ("'single'", string("single")),
        ("\"double\"", string("double")),
        ("'say \"hi\"'", string("say \"hi\"")),
        ("\"it's\"", string("it's")),
        (
            r#"'\n\t\r\b\f\\\"\''"#,
            string("\n\t\r\u{8}\u{c}\\\"'"),
        ),
        (r"'\x41\/\0'", string("x41/0")),
        ("'ab\\\ncd'", string("abcd")),
        ("'ab\\\r\ncd'", string("abcd")),
        ("'ab\\\rcd'", string("abcd")),
        ("'héllo 🎉'", string("héllo 🎉")),
        ("'\\é'", string("é")),
        ("'tab\there'", string("tab\there")),
    ]);

    let err = parse_value(b"'\xff'").unwrap_err();
    assert_eq!(err.to_string(), "invalid string value, pos 0");

    let err = parse_value(b"[1, '\xc3']").unwrap_err();
    assert_eq!(err.to_string(), "invalid string value, pos 4");
}

#[test]
fn test_parse_unicode_escapes() {
    // unicode escapes are not decoded by default
    test_parse_ok(vec![
        ("'\\u0041'", string("u0041")),
        ("'\\ud83d\\ude00'", string("ud83dude00")),
    ]);

    let options = ParseOptions::new().decode_unicode_escapes(true);
    let tests = vec![
        ("'\\u0041'", "A"),
        ("'\\u00e9t\\u00C9'", "étÉ"),
        ("'\\ud83d\\ude00'", "😀"),
        ("'\\ud800x'", "\\ud800x"),
        ("'\\udc00'", "\\udc00"),
        ("'\\ud800\\u0041'", "\\ud800A"),
        ("'\\ud800\\ud83d\\ude00'", "\\ud800😀"),
    ];
    for (s, expected) in tests {
        let value = parse_value_with_options(s.as_bytes(), &options).unwrap();
        assert_eq!(value, string(expected), "input {s:?}");
    }

    let errors = vec![
        ("'\\u12'", "unexpected end of hex escape, pos 3"),
        ("'\\u00G1'", "invalid hex digit `G`, pos 7"),
        ("'\\ud800\\u00G1'", "invalid hex digit `G`, pos 13"),
    ];
    for (s, err) in errors {
        let res = parse_value_with_options(s.as_bytes(), &options);
        assert_eq!(res.unwrap_err().to_string(), err, "input {s:?}");
    }
}

#[test]
fn test_parse_array() {
    test_parse_err(&[
        ("[", "unterminated array, pos 1"),
        ("[1,", "unterminated array, pos 3"),
        ("[1", "unterminated array, pos 2"),
        ("[1 2]", "expected `]` or `,`, pos 3"),
        ("[,]", "unexpected token, pos 1"),
        ("[1,,]", "unexpected token, pos 3"),
        ("[1}", "expected `]` or `,`, pos 2"),
        ("[]]", "extra data after top-level value, pos 2"),
    ]);

    test_parse_ok(vec![
        ("[]", Value::Array(vec![])),
        ("[ /* empty */ ]", Value::Array(vec![])),
        ("[1, 2, 3]", Value::Array(vec![int(1), int(2), int(3)])),
        ("[1,2,]", Value::Array(vec![int(1), int(2)])),
        (
            "[[], [[null]], {}]",
            Value::Array(vec![
                Value::Array(vec![]),
                Value::Array(vec![Value::Array(vec![Value::Null])]),
                Value::Object(Object::new()),
            ]),
        ),
    ]);

    let text = format!("[{}]", (0..1000).map(|i| i.to_string()).collect::<Vec<_>>().join(","));
    let value = parse_value(text.as_bytes()).unwrap();
    assert_eq!(value.array_length(), Some(1000));
    assert_eq!(value.as_array().unwrap()[999], int(999));
}

#[test]
fn test_parse_object() {
    test_parse_err(&[
        ("{", "unterminated object, pos 1"),
        ("{a", "unterminated object, pos 2"),
        ("{a:", "unterminated object, pos 3"),
        ("{a: // value\n", "unterminated object, pos 13"),
        ("{a:1", "unterminated object, pos 4"),
        ("{a:1,", "unterminated object, pos 5"),
        ("{a 1}", "missing colon, pos 3"),
        ("{'a' 1}", "missing colon, pos 5"),
        ("{1a:1}", "invalid unquoted key start, pos 1"),
        ("{a-b:1}", "invalid unquoted key char, pos 2"),
        ("{ab.c:1}", "invalid unquoted key char, pos 3"),
        ("{:1}", "invalid key, pos 1"),
        ("{,}", "invalid key, pos 1"),
        ("{a:1,,}", "invalid key, pos 5"),
        ("{a:1 b:2}", "expected `}` or `,`, pos 5"),
        ("{a:1]", "expected `}` or `,`, pos 4"),
        ("{a:}", "unexpected token, pos 3"),
        ("{'a:1}", "unterminated string, pos 6"),
    ]);

    test_parse_ok(vec![
        ("{}", Value::Object(Object::new())),
        ("{ // empty\n }", Value::Object(Object::new())),
        ("{a:1}", object(vec![("a", int(1))])),
        ("{a:1,}", object(vec![("a", int(1))])),
        (
            "{$id: 1, _x9: 2, 'quoted key': 3, \"k\": 4}",
            object(vec![
                ("$id", int(1)),
                ("_x9", int(2)),
                ("quoted key", int(3)),
                ("k", int(4)),
            ]),
        ),
        (
            "{a/*c*/:/*c*/1/*c*/,/*c*/}",
            object(vec![("a", int(1))]),
        ),
        (
            "{nested: {deep: [1, {x: null}]}}",
            object(vec![(
                "nested",
                object(vec![(
                    "deep",
                    Value::Array(vec![int(1), object(vec![("x", Value::Null)])]),
                )]),
            )]),
        ),
    ]);
}

#[test]
fn test_duplicate_keys() {
    let value = parse_value(b"{a:1, b:2, a:3}").unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    let keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(obj["a"], int(3));
    assert_eq!(obj["b"], int(2));
}

#[test]
fn test_object_order_matters() {
    let v1 = parse_value(b"{a:1, b:2}").unwrap();
    let v2 = parse_value(b"{b:2, a:1}").unwrap();
    assert_ne!(v1, v2);
    assert_eq!(v1, parse_value(b"{'a':1, \"b\":2.0}").unwrap());
}

#[test]
fn test_parse_comments() {
    let text = r#"
        // leading comment
        {
            /* block
               comment */
            name: 'qjson5', // trailing
            list: [1, /* inline */ 2,],
        }
        // final comment"#;
    let value = parse_value(text.as_bytes()).unwrap();
    assert_eq!(value.get("name"), Some(&string("qjson5")));
    assert_eq!(value.get("list"), Some(&Value::Array(vec![int(1), int(2)])));

    // an unclosed block comment runs to the end of input
    assert_eq!(parse_value(b"[1] /* open").unwrap(), Value::Array(vec![int(1)]));
    let err = parse_value(b"[1, /* open").unwrap_err();
    assert_eq!(err.code(), Some(&ParseErrorCode::UnterminatedArray));
    assert_eq!(err.position(), Some(11));

    let strict = ParseOptions::new().allow_unclosed_comments(false);
    let err = parse_value_with_options(b"[1] /* open", &strict).unwrap_err();
    assert_eq!(err.to_string(), "unterminated block comment, pos 4");
    assert_eq!(
        parse_value_with_options(b"[1] /* closed */", &strict).unwrap(),
        Value::Array(vec![int(1)])
    );

    test_parse_err(&[("/ 1", "unexpected token, pos 0"), ("1 /", "extra data after top-level value, pos 2")]);
}

#[test]
fn test_recursion_limit() {
    let depth = ParseOptions::default().max_depth;

    let ok = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert!(parse_value(ok.as_bytes()).is_ok());

    let deep = format!("{}{}", "[".repeat(depth + 1), "]".repeat(depth + 1));
    let err = parse_value(deep.as_bytes()).unwrap_err();
    assert_eq!(err.code(), Some(&ParseErrorCode::RecursionLimitExceeded));
    assert_eq!(err.position(), Some(depth));

    let deep = "{a:".repeat(100_000);
    let err = parse_value(deep.as_bytes()).unwrap_err();
    assert_eq!(err.code(), Some(&ParseErrorCode::RecursionLimitExceeded));

    let shallow = ParseOptions::new().max_depth(1);
    assert!(parse_value_with_options(b"[1, 2]", &shallow).is_ok());
    let err = parse_value_with_options(b"[1, {}]", &shallow).unwrap_err();
    assert_eq!(err.to_string(), "recursion limit exceeded, pos 4");
}

#[test]
fn test_error_accessors() {
    let err = from_str("[1 2]").unwrap_err();
    assert!(err.is_syntax());
    assert!(matches!(err, Error::Syntax(ParseErrorCode::ExpectedArrayCommaOrEnd, 3)));
    assert_eq!(err.position(), Some(3));
}
