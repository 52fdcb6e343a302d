use num_bigint::BigInt;

use crate::error::{Code, ErrorImpl, Fallible, Result};
use crate::read::{is_ident_char, is_ident_start};
use crate::de::RECURSION_LIMIT;
use crate::Value;

/// Render a value as rison text.
///
/// # Panics
///
/// Panics if the value cannot be rendered: a `Number` whose fraction is not a
/// non-empty run of digits, a `Number` with neither fraction nor exponent, or an
/// object key that is not an identifier. Use [`dump`] to get an error instead.
pub fn encode(value: &Value) -> String {
    dump(value).unwrap_or_else(|err| panic!("{err}"))
}

/// Render a value as rison text, failing with [`Error::InvalidInput`] if the
/// value cannot be rendered.
///
/// [`Error::InvalidInput`]: crate::Error::InvalidInput
pub fn dump(value: &Value) -> Result<String> {
    let mut out = String::new();
    write_value(value, &mut out).map_err(ErrorImpl::collapse)?;
    Ok(out)
}

pub(crate) fn write_value(value: &Value, out: &mut String) -> Fallible<()> {
    write_nested(value, out, RECURSION_LIMIT)
}

/// Fails on containers nested deeper than the parser accepts.
fn write_nested(value: &Value, out: &mut String, remaining_depth: u8) -> Fallible<()> {
    let is_container = matches!(value, Value::Array(_) | Value::Object(_));
    if is_container && remaining_depth == 0 {
        return Err(ErrorImpl::unencodable(Code::RecursionLimitExceeded));
    }
    match value {
        Value::Null => out.push_str("!n"),
        Value::Bool(true) => out.push_str("!t"),
        Value::Bool(false) => out.push_str("!f"),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Number { int, frac, exp } => write_number(int, frac.as_deref(), exp.as_ref(), out)?,
        Value::Str(s) => write_str(s, out),
        Value::Array(items) => {
            out.push_str("!(");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_nested(item, out, remaining_depth - 1)?;
            }
            out.push(')');
        }
        Value::Object(entries) => {
            out.push('(');
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if !is_ident(key) {
                    return Err(ErrorImpl::unencodable(Code::InvalidKey));
                }
                out.push_str(key);
                out.push(':');
                write_nested(value, out, remaining_depth - 1)?;
            }
            out.push(')');
        }
    }
    Ok(())
}

pub(crate) fn write_number(
    int: &BigInt,
    frac: Option<&str>,
    exp: Option<&BigInt>,
    out: &mut String,
) -> Fallible<()> {
    if frac.is_none() && exp.is_none() {
        return Err(ErrorImpl::unencodable(Code::BareNumber));
    }
    out.push_str(&int.to_string());
    if let Some(frac) = frac {
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ErrorImpl::unencodable(Code::InvalidFraction));
        }
        out.push('.');
        out.push_str(frac);
    }
    if let Some(exp) = exp {
        out.push('e');
        out.push_str(&exp.to_string());
    }
    Ok(())
}

fn write_str(s: &str, out: &mut String) {
    if is_ident(s) {
        out.push_str(s);
        return;
    }
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' || ch == '!' {
            out.push('!');
        }
        out.push(ch);
    }
    out.push('\'');
}

/// Whether `s` can be written without quotes.
pub(crate) fn is_ident(s: &str) -> bool {
    match s.as_bytes().split_first() {
        Some((&first, rest)) => is_ident_start(first) && rest.iter().all(|&b| is_ident_char(b)),
        None => false,
    }
}

#[cfg(test)]
mod test {
    use super::{dump, encode, is_ident};
    use crate::{Error, Value};

    fn number(int: i64, frac: Option<&str>, exp: Option<i64>) -> Value {
        Value::Number {
            int: int.into(),
            frac: frac.map(Into::into),
            exp: exp.map(Into::into),
        }
    }

    #[test]
    fn serialize_literals() {
        assert_eq!(encode(&Value::Bool(true)), "!t");
        assert_eq!(encode(&Value::Bool(false)), "!f");
        assert_eq!(encode(&Value::Null), "!n");
    }
    #[test]
    fn serialize_ints() {
        assert_eq!(encode(&Value::from(0)), "0");
        assert_eq!(encode(&Value::from(-42)), "-42");
        let big: num_bigint::BigInt = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(encode(&Value::Int(big)), "123456789012345678901234567890");
    }
    #[test]
    fn serialize_numbers() {
        assert_eq!(encode(&number(-3, Some("50"), Some(10))), "-3.50e10");
        assert_eq!(encode(&number(1, Some("007"), None)), "1.007");
        assert_eq!(encode(&number(2, None, Some(-5))), "2e-5");
    }
    #[test]
    fn serialize_ident_string() {
        assert_eq!(encode(&Value::from("foo_bar")), "foo_bar");
        assert_eq!(encode(&Value::from("~a/b.c-1")), "~a/b.c-1");
    }
    #[test]
    fn serialize_quoted_strings() {
        assert_eq!(encode(&Value::from("")), "''");
        assert_eq!(encode(&Value::from("it's!")), "'it!'s!!'");
        assert_eq!(encode(&Value::from("hello, rison")), "'hello, rison'");
        assert_eq!(encode(&Value::from("1abc")), "'1abc'");
        assert_eq!(encode(&Value::from("-a")), "'-a'");
        assert_eq!(encode(&Value::from("caf\u{e9}")), "'caf\u{e9}'");
        assert_eq!(encode(&Value::from("a\nb")), "'a\nb'");
    }
    #[test]
    fn serialize_containers() {
        assert_eq!(encode(&Value::Array(vec![])), "!()");
        assert_eq!(encode(&Value::Object(vec![])), "()");
        let v = Value::Object(vec![
            ("a".into(), Value::from(vec![Value::from(1), Value::from("x y")])),
            ("b".into(), Value::Object(vec![])),
        ]);
        assert_eq!(encode(&v), "(a:!(1,'x y'),b:())");
    }
    #[test]
    fn dump_rejects_bad_fraction() {
        assert_eq!(dump(&number(1, Some("1a"), None)), Err(Error::InvalidInput));
        assert_eq!(dump(&number(1, Some(""), None)), Err(Error::InvalidInput));
    }
    #[test]
    fn dump_rejects_bare_number() {
        assert_eq!(dump(&number(1, None, None)), Err(Error::InvalidInput));
    }
    #[test]
    fn dump_rejects_quoted_key() {
        let v = Value::Object(vec![("not an ident".into(), Value::Null)]);

        assert_eq!(dump(&v), Err(Error::InvalidInput));
    }
    #[test]
    fn dump_rejects_nested_violation() {
        let v = Value::Array(vec![Value::Null, number(1, Some("."), None)]);

        assert_eq!(dump(&v), Err(Error::InvalidInput));
    }
    #[test]
    fn dump_rejects_too_deep() {
        fn nest(depth: usize) -> Value {
            (0..depth).fold(Value::Null, |inner, i| {
                if i % 2 == 0 {
                    Value::Array(vec![inner])
                } else {
                    Value::Object(vec![("a".into(), inner)])
                }
            })
        }

        let text = dump(&nest(128)).unwrap();
        assert_eq!(crate::load(&text), Ok(nest(128)));

        assert_eq!(dump(&nest(129)), Err(Error::InvalidInput));
        assert_eq!(dump(&nest(200)), Err(Error::InvalidInput));
    }
    #[test]
    #[should_panic(expected = "invalid rison input")]
    fn encode_panics_on_violation() {
        encode(&number(1, None, None));
    }
    #[test]
    fn ident_grammar() {
        assert!(is_ident("a"));
        assert!(is_ident("_"));
        assert!(is_ident("."));
        assert!(is_ident("/x"));
        assert!(!is_ident(""));
        assert!(!is_ident("1a"));
        assert!(!is_ident("a b"));
        assert!(!is_ident("a!"));
        assert!(!is_ident("\u{e9}"));
    }
}
