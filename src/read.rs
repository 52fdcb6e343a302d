use crate::error::{Code, ErrorImpl, Fallible};

/// Can this byte begin a bare identifier?
pub(crate) fn is_ident_start(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'.' | b'/' | b'~')
}

/// Can this byte continue a bare identifier?
pub(crate) fn is_ident_char(b: u8) -> bool {
    is_ident_start(b) || matches!(b, b'0'..=b'9' | b'-')
}

/// Source of bytes for the parser.
///
/// All grammar-significant characters are ASCII, so the parser works on bytes and
/// only has to validate UTF-8 for the contents of quoted strings.
pub(crate) trait Read {
    fn next(&mut self) -> Fallible<Option<u8>> {
        let next = self.peek()?;
        if next.is_some() {
            self.discard();
        }
        Ok(next)
    }
    fn peek(&mut self) -> Fallible<Option<u8>>;
    fn discard(&mut self);
    /// Number of bytes consumed so far.
    fn offset(&self) -> usize;
    /// Parse the body of a quoted string. The opening `'` must already be consumed.
    fn parse_str(&mut self, scratch: &mut Vec<u8>) -> Fallible<String>;
    /// Parse the longest run of identifier characters.
    fn parse_ident(&mut self, scratch: &mut Vec<u8>) -> Fallible<String>;
}

pub(crate) struct SliceRead<'a> {
    slice: &'a [u8],
    /// Index of the *next* byte that will be returned by next() or peek().
    index: usize,
}

impl<'a> SliceRead<'a> {
    pub fn new(slice: &'a [u8]) -> Self {
        SliceRead { slice, index: 0 }
    }

    fn error(&self, code: Code) -> ErrorImpl {
        ErrorImpl::at(code, self.index)
    }

    /// Unescape a quoted string body into `scratch`, consuming the closing quote.
    ///
    /// Escapes only ever replace ASCII with ASCII, so valid UTF-8 in the input
    /// stays valid in the output.
    fn parse_str_bytes(&mut self, scratch: &mut Vec<u8>) -> Fallible<()> {
        let mut start = self.index;
        loop {
            while self.index < self.slice.len() && !is_quote_or_escape(self.slice[self.index]) {
                self.index += 1;
            }
            if self.index == self.slice.len() {
                return Err(self.error(Code::EofString));
            }
            scratch.extend_from_slice(&self.slice[start..self.index]);
            if self.slice[self.index] == b'\'' {
                self.index += 1;
                return Ok(());
            }
            self.index += 1;
            match self.next()? {
                Some(c @ (b'!' | b'\'')) => scratch.push(c),
                Some(_) => return Err(self.error(Code::InvalidEscape)),
                None => return Err(self.error(Code::EofString)),
            }
            start = self.index;
        }
    }

    fn parse_ident_bytes(&mut self) -> &'a [u8] {
        let start = self.index;
        while self.index < self.slice.len() && is_ident_char(self.slice[self.index]) {
            self.index += 1;
        }

        &self.slice[start..self.index]
    }
}

impl<'a> Read for SliceRead<'a> {
    fn peek(&mut self) -> Fallible<Option<u8>> {
        Ok(self.slice.get(self.index).copied())
    }

    fn discard(&mut self) {
        self.index += 1;
    }

    fn offset(&self) -> usize {
        self.index
    }

    fn parse_str(&mut self, scratch: &mut Vec<u8>) -> Fallible<String> {
        scratch.clear();
        self.parse_str_bytes(scratch)?;
        let start = self.index;
        String::from_utf8(std::mem::take(scratch))
            .map_err(|_| ErrorImpl::at(Code::InvalidUnicode, start))
    }

    fn parse_ident(&mut self, _scratch: &mut Vec<u8>) -> Fallible<String> {
        Ok(ascii_to_string(self.parse_ident_bytes()))
    }
}

pub(crate) struct StrRead<'a> {
    delegate: SliceRead<'a>,
}

impl<'a> StrRead<'a> {
    pub fn new(s: &'a str) -> Self {
        StrRead {
            delegate: SliceRead::new(s.as_bytes()),
        }
    }
}

impl<'a> Read for StrRead<'a> {
    fn peek(&mut self) -> Fallible<Option<u8>> {
        self.delegate.peek()
    }

    fn discard(&mut self) {
        self.delegate.discard()
    }

    fn offset(&self) -> usize {
        self.delegate.offset()
    }

    fn parse_str(&mut self, scratch: &mut Vec<u8>) -> Fallible<String> {
        self.delegate.parse_str(scratch)
    }

    fn parse_ident(&mut self, scratch: &mut Vec<u8>) -> Fallible<String> {
        self.delegate.parse_ident(scratch)
    }
}

pub(crate) struct IoRead<I> {
    io: std::io::Bytes<I>,
    peeked: Option<u8>,
    offset: usize,
}

impl<I: std::io::Read> IoRead<I> {
    pub fn new(reader: I) -> Self {
        IoRead {
            io: reader.bytes(),
            peeked: None,
            offset: 0,
        }
    }
}

impl<I> Read for IoRead<I>
where
    I: std::io::Read,
{
    fn peek(&mut self) -> Fallible<Option<u8>> {
        if let Some(ch) = self.peeked {
            return Ok(Some(ch));
        }

        let ch = self
            .io
            .next()
            .transpose()
            .map_err(|e| ErrorImpl::at(e.into(), self.offset))?;

        self.peeked = ch;

        Ok(ch)
    }

    fn discard(&mut self) {
        if self.peeked.take().is_some() {
            self.offset += 1;
        }
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn parse_str(&mut self, scratch: &mut Vec<u8>) -> Fallible<String> {
        scratch.clear();
        loop {
            while let Some(ch) = self.peek()? {
                if is_quote_or_escape(ch) {
                    break;
                }
                scratch.push(ch);
                self.discard();
            }

            let Some(ch) = self.next()? else {
                return Err(ErrorImpl::at(Code::EofString, self.offset));
            };

            if ch == b'\'' {
                return String::from_utf8(std::mem::take(scratch))
                    .map_err(|_| ErrorImpl::at(Code::InvalidUnicode, self.offset));
            }

            match self.next()? {
                Some(c @ (b'!' | b'\'')) => scratch.push(c),
                Some(_) => return Err(ErrorImpl::at(Code::InvalidEscape, self.offset)),
                None => return Err(ErrorImpl::at(Code::EofString, self.offset)),
            }
        }
    }

    fn parse_ident(&mut self, scratch: &mut Vec<u8>) -> Fallible<String> {
        scratch.clear();
        while let Some(ch) = self.peek()? {
            if !is_ident_char(ch) {
                break;
            }
            scratch.push(ch);
            self.discard();
        }

        Ok(ascii_to_string(scratch))
    }
}

fn is_quote_or_escape(b: u8) -> bool {
    b == b'\'' || b == b'!'
}

fn ascii_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
