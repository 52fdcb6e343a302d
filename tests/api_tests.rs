use num_bigint::BigInt;
use rison::{decode, dump, encode, load, Error, Value};

fn obj(entries: Vec<(&str, Value)>) -> Value {
    Value::Object(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

// ============================================================================
// Literals and empty containers
// ============================================================================

#[test]
fn literals_encode() {
    assert_eq!(encode(&Value::Bool(true)), "!t");
    assert_eq!(encode(&Value::Bool(false)), "!f");
    assert_eq!(encode(&Value::Null), "!n");
}

#[test]
fn literals_decode() {
    assert_eq!(decode("!t"), Value::Bool(true));
    assert_eq!(decode("!f"), Value::Bool(false));
    assert_eq!(decode("!n"), Value::Null);
}

#[test]
fn empty_containers() {
    assert_eq!(encode(&Value::Array(vec![])), "!()");
    assert_eq!(encode(&Value::Object(vec![])), "()");
    assert_eq!(decode("!()"), Value::Array(vec![]));
    assert_eq!(decode("()"), Value::Object(vec![]));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn escaping() {
    assert_eq!(encode(&Value::from("it's!")), "'it!'s!!'");
    assert_eq!(decode("'it!'s!!'"), Value::from("it's!"));
}

#[test]
fn identifier_rendering() {
    assert_eq!(encode(&Value::from("foo_bar")), "foo_bar");
    assert_eq!(decode("foo_bar"), Value::from("foo_bar"));
}

#[test]
fn empty_string_is_quoted() {
    assert_eq!(encode(&Value::from("")), "''");
    assert_eq!(decode("''"), Value::from(""));
}

#[test]
fn non_ascii_passes_through_quoted() {
    let v = Value::from("\u{4f60}\u{597d} \u{1f600}");

    assert_eq!(encode(&v), "'\u{4f60}\u{597d} \u{1f600}'");
    assert_eq!(decode(&encode(&v)), v);
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn number_with_fraction_and_exponent() {
    let v = Value::Number {
        int: BigInt::from(-3),
        frac: Some("50".into()),
        exp: Some(BigInt::from(10)),
    };

    assert_eq!(decode("-3.50e10"), v);
    assert_eq!(encode(&v), "-3.50e10");
}

#[test]
fn fraction_keeps_leading_zeros() {
    assert_ne!(decode("1.007"), decode("1.7"));
    assert_eq!(encode(&decode("1.007")), "1.007");
}

#[test]
fn big_integers_are_exact() {
    let text = "-123456789012345678901234567890123456789012345678901234567890";

    assert_eq!(encode(&decode(text)), text);
    assert_eq!(
        decode("1e123456789012345678901234567890"),
        Value::Number {
            int: BigInt::from(1),
            frac: None,
            exp: Some("123456789012345678901234567890".parse().unwrap()),
        }
    );
}

// ============================================================================
// Nesting
// ============================================================================

#[test]
fn nesting() {
    assert_eq!(
        decode("(a:(b:!(1,2,3)))"),
        obj(vec![(
            "a",
            obj(vec![(
                "b",
                Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)])
            )])
        )])
    );
}

#[test]
fn nested_delimiters_in_strings() {
    let v = obj(vec![
        ("q", Value::from("a,b:(c)!")),
        ("r", Value::Array(vec![obj(vec![]), Value::Array(vec![]), Value::from(")")])),
    ]);
    let text = encode(&v);

    assert_eq!(text, "(q:'a,b:(c)!!',r:!((),!(),')'))");
    assert_eq!(decode(&text), v);
}

#[test]
fn object_order_and_duplicates_survive() {
    let text = "(z:1,a:2,z:3)";

    assert_eq!(encode(&decode(text)), text);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn malformed_input() {
    assert_eq!(load("(a:"), Err(Error::InvalidInput));
    assert_eq!(load(""), Err(Error::InvalidInput));
}

#[test]
fn malformed_input_variants() {
    for input in [
        " ", "!t ", "!(1,2", "!(1,2))", "(a:1,)", "('a':1)", "(0:1)", "'open", "'bad!x'", "00",
        "1.", "1e", "@", "*", "a b",
    ] {
        assert_eq!(load(input), Err(Error::InvalidInput), "{input:?}");
    }
}

#[test]
fn dump_rejects_what_cannot_round_trip() {
    let bad_frac = Value::Number {
        int: BigInt::from(1),
        frac: Some("-2".into()),
        exp: None,
    };
    let bad_key = obj(vec![("has space", Value::Null)]);

    assert_eq!(dump(&bad_frac), Err(Error::InvalidInput));
    assert_eq!(dump(&bad_key), Err(Error::InvalidInput));
}

#[test]
fn error_display() {
    assert_eq!(Error::InvalidInput.to_string(), "invalid rison input");
}
