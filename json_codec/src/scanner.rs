use crate::{
    token::{Token, TokenKind},
    utf8,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScannerErr {
    pub kind: ScannerErrKind,
    pub position: usize,
    pub line: usize,
    pub lexeme: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScannerErrKind {
    UnexpectedEndOfSource,
    UnterminatedString,
    ControlCharacterInString,
    UnrecognisedSymbol,
    UnrecognisedKeyword,
    InvalidNumber,
    InvalidEscapeSequence,
    Internal,
}

/// Splits a byte buffer into tokens, one at a time.
#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    source: &'a [u8],
    token_start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn init(source: &'a [u8]) -> Self {
        Self {
            source,
            current: 0,
            token_start: 0,
            line: 1,
        }
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn line(&self) -> usize {
        self.line
    }

    fn make_token(&mut self, kind: TokenKind) -> Token {
        let start = self.token_start;
        self.token_start = self.current;

        Token::init(kind, start..self.current, self.line)
    }

    /// The raw text of `token`, with invalid UTF-8 replaced.
    pub fn lexeme(&self, token: &Token) -> String {
        String::from_utf8_lossy(self.source.get(token.span.clone()).unwrap_or_default())
            .into_owned()
    }

    fn make_err(&self, kind: ScannerErrKind) -> ScannerErr {
        self.make_err_at(kind, self.token_start)
    }

    fn make_err_at(&self, kind: ScannerErrKind, position: usize) -> ScannerErr {
        ScannerErr {
            kind,
            position,
            line: self.line,
            lexeme: String::from_utf8_lossy(&self.source[self.token_start..self.current])
                .into_owned(),
        }
    }

    fn advance(&mut self) -> Result<u8, ScannerErr> {
        let byte = self
            .peek()
            .ok_or_else(|| self.make_err_at(ScannerErrKind::UnexpectedEndOfSource, self.current))?;

        self.current += 1;
        Ok(byte)
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.current).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            match byte {
                b' ' | b'\t' | b'\r' => {}
                b'\n' => self.line += 1,
                _ => return,
            }
            self.current += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn matches(&mut self, byte: u8) -> bool {
        self.matches_any(&[byte])
    }

    fn matches_any(&mut self, bytes: &[u8]) -> bool {
        match self.peek() {
            Some(byte) if bytes.contains(&byte) => {
                self.current += 1;
                true
            }
            _ => false,
        }
    }

    /// Consumes a run of ASCII digits, returning how many there were.
    fn digits(&mut self) -> usize {
        let start = self.current;
        while matches!(self.peek(), Some(byte) if byte.is_ascii_digit()) {
            self.current += 1;
        }

        self.current - start
    }

    fn number(&mut self, first: u8) -> Result<Token, ScannerErr> {
        // A sign must be followed by the integer part
        let leading = if first == b'-' {
            match self.peek() {
                Some(byte) if byte.is_ascii_digit() => {
                    self.current += 1;
                    byte
                }
                _ => return Err(self.make_err(ScannerErrKind::InvalidNumber)),
            }
        } else {
            first
        };

        // No leading zeros, `0` stands alone
        if leading == b'0' {
            if matches!(self.peek(), Some(byte) if byte.is_ascii_digit()) {
                return Err(self.make_err(ScannerErrKind::InvalidNumber));
            }
        } else {
            self.digits();
        }

        if self.matches(b'.') && self.digits() == 0 {
            return Err(self.make_err(ScannerErrKind::InvalidNumber));
        }

        // Allow scientific notation e.g. 10e5
        if self.matches_any(b"eE") {
            self.matches_any(b"-+");
            if self.digits() == 0 {
                return Err(self.make_err(ScannerErrKind::InvalidNumber));
            }
        }

        if matches!(self.peek(), Some(byte) if byte.is_ascii_alphabetic()) {
            return Err(self.make_err(ScannerErrKind::InvalidNumber));
        }

        let lexeme = &self.source[self.token_start..self.current];
        let value: f64 = std::str::from_utf8(lexeme)
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or_else(|| self.make_err(ScannerErrKind::Internal))?;

        // Out of range for a double, either way
        let underflow = value == 0.0
            && lexeme
                .iter()
                .take_while(|byte| !matches!(byte, b'e' | b'E'))
                .any(|byte| (b'1'..=b'9').contains(byte));
        if value.is_infinite() || underflow {
            return Err(self.make_err(ScannerErrKind::InvalidNumber));
        }

        Ok(self.make_token(TokenKind::Number(value)))
    }

    fn string(&mut self) -> Result<Token, ScannerErr> {
        let mut bytes = Vec::new();
        loop {
            let byte = self.advance()?;
            match byte {
                b'"' => break,
                b'\n' => {
                    return Err(
                        self.make_err_at(ScannerErrKind::UnterminatedString, self.current - 1)
                    );
                }
                0x00..=0x1F => {
                    return Err(self.make_err_at(
                        ScannerErrKind::ControlCharacterInString,
                        self.current - 1,
                    ));
                }
                b'\\' => self.escape(&mut bytes)?,
                _ => bytes.push(byte),
            }
        }

        Ok(self.make_token(TokenKind::String(bytes)))
    }

    /// Decodes the escape after a backslash that has just been consumed.
    fn escape(&mut self, out: &mut Vec<u8>) -> Result<(), ScannerErr> {
        let escape_start = self.current - 1;
        let invalid = |scanner: &Self| {
            scanner.make_err_at(ScannerErrKind::InvalidEscapeSequence, escape_start)
        };

        let next = self.advance()?;
        if next != b'u' {
            let value = utf8::simple_escape(next).ok_or_else(|| invalid(self))?;
            out.push(value);
            return Ok(());
        }

        // Unicode escape, exactly 4 hex digits. Surrogate halves are encoded
        // as is and rejected when the string value is built
        let code_point = self
            .source
            .get(self.current..self.current + 4)
            .and_then(utf8::decode_hex4)
            .ok_or_else(|| invalid(self))?;
        self.current += 4;

        utf8::encode_code_point(code_point, out);
        Ok(())
    }

    fn keyword(&mut self) -> Result<Token, ScannerErr> {
        while matches!(self.peek(), Some(byte) if byte.is_ascii_alphabetic()) {
            self.current += 1;
        }

        let kind = match &self.source[self.token_start..self.current] {
            b"null" => TokenKind::Null,
            b"true" => TokenKind::Bool(true),
            b"false" => TokenKind::Bool(false),
            _ => return Err(self.make_err(ScannerErrKind::UnrecognisedKeyword)),
        };

        Ok(self.make_token(kind))
    }

    fn symbol(&mut self, byte: u8) -> Result<Token, ScannerErr> {
        let kind = match byte {
            b'{' => TokenKind::LCurlyBracket,
            b'}' => TokenKind::RCurlyBracket,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b':' => TokenKind::Colon,
            b',' => TokenKind::Comma,
            _ => return Err(self.make_err(ScannerErrKind::UnrecognisedSymbol)),
        };

        Ok(self.make_token(kind))
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, ScannerErr> {
        self.skip_whitespace();

        if self.is_at_end() {
            return Ok(None);
        }

        self.token_start = self.current;

        let byte = self.advance()?;
        let token = match byte {
            b'0'..=b'9' | b'-' => self.number(byte)?,
            b'"' => self.string()?,
            _ if byte.is_ascii_alphabetic() => self.keyword()?,
            _ => self.symbol(byte)?,
        };

        Ok(Some(token))
    }
}
