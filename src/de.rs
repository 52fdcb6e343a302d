use num_bigint::BigInt;

use crate::error::{Code, ErrorImpl, Fallible, Result};
use crate::read::{self, is_ident_start, Read};
use crate::Value;

/// Maximum number of nested arrays and objects the parser and encoder will descend into.
pub(crate) const RECURSION_LIMIT: u8 = 128;

pub(crate) struct Parser<R> {
    read: R,
    scratch: Vec<u8>,
    remaining_depth: u8,
}

impl<R: Read> Parser<R> {
    fn new(read: R) -> Self {
        Self {
            read,
            scratch: Vec::new(),
            remaining_depth: RECURSION_LIMIT,
        }
    }

    fn peek(&mut self) -> Fallible<Option<u8>> {
        self.read.peek()
    }

    fn eat_char(&mut self) {
        self.read.discard();
    }

    fn next_char(&mut self) -> Fallible<Option<u8>> {
        self.read.next()
    }

    fn error(&self, code: Code) -> ErrorImpl {
        ErrorImpl::at(code, self.read.offset())
    }

    fn end(&mut self) -> Fallible<()> {
        match self.peek()? {
            Some(_) => Err(self.error(Code::TrailingChars)),
            None => Ok(()),
        }
    }

    fn parse_value(&mut self) -> Fallible<Value> {
        match self.peek()? {
            Some(b'!') => {
                self.eat_char();
                match self.next_char()? {
                    Some(b'n') => Ok(Value::Null),
                    Some(b't') => Ok(Value::Bool(true)),
                    Some(b'f') => Ok(Value::Bool(false)),
                    Some(b'(') => self.nested(Self::parse_array),
                    Some(_) => Err(self.error(Code::InvalidMarker)),
                    None => Err(self.error(Code::EofValue)),
                }
            }
            Some(b'-') => {
                self.eat_char();
                match self.peek()? {
                    Some(b'1'..=b'9') => self.parse_number(true),
                    _ => Err(self.error(Code::InvalidNumber)),
                }
            }
            Some(b'0'..=b'9') => self.parse_number(false),
            Some(b'\'') => {
                self.eat_char();
                Ok(Value::Str(self.read.parse_str(&mut self.scratch)?))
            }
            Some(b'(') => {
                self.eat_char();
                self.nested(Self::parse_object)
            }
            Some(c) if is_ident_start(c) => {
                Ok(Value::Str(self.read.parse_ident(&mut self.scratch)?))
            }
            Some(_) => Err(self.error(Code::ExpectedValue)),
            None => Err(self.error(Code::EofValue)),
        }
    }

    fn nested(&mut self, f: fn(&mut Self) -> Fallible<Value>) -> Fallible<Value> {
        if self.remaining_depth == 0 {
            return Err(self.error(Code::RecursionLimitExceeded));
        }
        self.remaining_depth -= 1;
        let ret = f(self);
        self.remaining_depth += 1;
        ret
    }

    /// Parse a number once the sign, if any, has been consumed.
    fn parse_number(&mut self, negative: bool) -> Fallible<Value> {
        let int = self.parse_integer(negative)?;

        let frac = if self.peek()? == Some(b'.') {
            self.eat_char();
            let digits = self.parse_digits()?;
            if digits.is_empty() {
                return Err(self.error(Code::InvalidNumber));
            }
            Some(digits)
        } else {
            None
        };

        let exp = if self.peek()? == Some(b'e') {
            self.eat_char();
            let exp_negative = self.peek()? == Some(b'-');
            if exp_negative {
                self.eat_char();
                if !matches!(self.peek()?, Some(b'1'..=b'9')) {
                    return Err(self.error(Code::InvalidNumber));
                }
            }
            Some(self.parse_integer(exp_negative)?)
        } else {
            None
        };

        Ok(match (frac, exp) {
            (None, None) => Value::Int(int),
            (frac, exp) => Value::Number { int, frac, exp },
        })
    }

    /// Parse a run of digits with no leading zero, other than `0` itself.
    fn parse_integer(&mut self, negative: bool) -> Fallible<BigInt> {
        let digits = self.parse_digits()?;
        if digits.is_empty() || (digits.len() > 1 && digits.starts_with('0')) {
            return Err(self.error(Code::InvalidNumber));
        }
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| self.error(Code::InvalidNumber))?;
        Ok(if negative { -magnitude } else { magnitude })
    }

    fn parse_digits(&mut self) -> Fallible<String> {
        let mut digits = String::new();
        while let Some(ch @ b'0'..=b'9') = self.peek()? {
            digits.push(char::from(ch));
            self.eat_char();
        }
        Ok(digits)
    }

    /// Parse array elements once `!(` has been consumed.
    fn parse_array(&mut self) -> Fallible<Value> {
        let mut items = Vec::new();
        if self.peek()? == Some(b')') {
            self.eat_char();
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            match self.next_char()? {
                Some(b',') => {}
                Some(b')') => return Ok(Value::Array(items)),
                Some(_) => return Err(self.error(Code::ExpectedListSepOrEnd)),
                None => return Err(self.error(Code::EofList)),
            }
        }
    }

    /// Parse object entries once `(` has been consumed.
    fn parse_object(&mut self) -> Fallible<Value> {
        let mut entries = Vec::new();
        if self.peek()? == Some(b')') {
            self.eat_char();
            return Ok(Value::Object(entries));
        }
        loop {
            let key = match self.peek()? {
                Some(c) if is_ident_start(c) => self.read.parse_ident(&mut self.scratch)?,
                Some(_) => return Err(self.error(Code::ExpectedIdent)),
                None => return Err(self.error(Code::EofObject)),
            };
            match self.next_char()? {
                Some(b':') => {}
                Some(_) => return Err(self.error(Code::ExpectedColon)),
                None => return Err(self.error(Code::EofObject)),
            }
            let value = self.parse_value()?;
            entries.push((key, value));
            match self.next_char()? {
                Some(b',') => {}
                Some(b')') => return Ok(Value::Object(entries)),
                Some(_) => return Err(self.error(Code::ExpectedObjectSepOrEnd)),
                None => return Err(self.error(Code::EofObject)),
            }
        }
    }
}

fn from_trait<R: Read>(read: R) -> Result<Value> {
    let mut parser = Parser::new(read);
    let value = parser
        .parse_value()
        .and_then(|value| parser.end().map(|()| value))
        .map_err(ErrorImpl::collapse)?;

    Ok(value)
}

/// Parse rison text into a [`Value`].
///
/// # Panics
///
/// Panics if `text` is not well-formed rison. Use [`load`] to get an error instead.
pub fn decode(text: &str) -> Value {
    load(text).unwrap_or_else(|err| panic!("{err}"))
}

/// Parse rison text into a [`Value`], failing with [`Error::InvalidInput`] on
/// malformed input.
///
/// [`Error::InvalidInput`]: crate::Error::InvalidInput
pub fn load(text: &str) -> Result<Value> {
    from_trait(read::StrRead::new(text))
}

/// Like [`load`], for bytes that are UTF-8 inside quoted strings.
pub fn load_slice(bytes: &[u8]) -> Result<Value> {
    from_trait(read::SliceRead::new(bytes))
}

/// Like [`load`], reading the whole of `reader`.
pub fn load_reader<I: std::io::Read>(reader: I) -> Result<Value> {
    from_trait(read::IoRead::new(reader))
}

pub fn from_str<T>(v: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde::de::Deserialize::deserialize(load(v)?)
}

pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde::de::Deserialize::deserialize(load_slice(v)?)
}

pub fn from_reader<T, I>(v: I) -> Result<T>
where
    T: serde::de::DeserializeOwned,
    I: std::io::Read,
{
    serde::de::Deserialize::deserialize(load_reader(v)?)
}
