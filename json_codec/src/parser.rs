use log::{debug, trace};
use thiserror::Error;

use crate::{
    error::ErrorKind,
    options::ParseOptions,
    scanner::{Scanner, ScannerErr, ScannerErrKind},
    token::{Token, TokenKind},
    utf8,
    value::{Array, Object, Value},
};

/// Why a document was rejected, with the location of the offending token.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason} at line {line}, byte {position}")]
pub struct ParseError {
    pub reason: ParseErrorReason,
    /// Byte offset into the input
    pub position: usize,
    /// 1-based
    pub line: usize,
    pub lexeme: String,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self.reason {
            ParseErrorReason::InvalidUtf8 => ErrorKind::ParseError,
            ParseErrorReason::Internal => ErrorKind::UnknownError,
            _ => ErrorKind::SyntaxError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorReason {
    // Scanner specific errors
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unescaped control character in string")]
    ControlCharacterInString,
    #[error("unrecognised symbol")]
    UnrecognisedSymbol,
    #[error("unrecognised keyword")]
    UnrecognisedKeyword,
    #[error("invalid number")]
    InvalidNumber,
    #[error("invalid escape sequence")]
    InvalidEscapeSequence,

    // Parser specific errors
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    #[error("expected end of input")]
    ExpectedEndOfSource,
    #[error("expected {0}")]
    ExpectedToken(TokenKind),
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("nesting exceeds the maximum depth of {max_depth}")]
    NestingTooDeep { max_depth: usize },

    // Both
    #[error("unexpected end of input")]
    UnexpectedEndOfSource,
    #[error("internal parser error")]
    Internal,
}

impl From<ScannerErr> for ParseError {
    fn from(err: ScannerErr) -> Self {
        let reason = match err.kind {
            ScannerErrKind::UnexpectedEndOfSource => ParseErrorReason::UnexpectedEndOfSource,
            ScannerErrKind::UnterminatedString => ParseErrorReason::UnterminatedString,
            ScannerErrKind::ControlCharacterInString => ParseErrorReason::ControlCharacterInString,
            ScannerErrKind::UnrecognisedSymbol => ParseErrorReason::UnrecognisedSymbol,
            ScannerErrKind::UnrecognisedKeyword => ParseErrorReason::UnrecognisedKeyword,
            ScannerErrKind::InvalidNumber => ParseErrorReason::InvalidNumber,
            ScannerErrKind::InvalidEscapeSequence => ParseErrorReason::InvalidEscapeSequence,
            ScannerErrKind::Internal => ParseErrorReason::Internal,
        };

        Self {
            reason,
            position: err.position,
            line: err.line,
            lexeme: err.lexeme,
        }
    }
}

/// Parses a complete JSON document with the default [`ParseOptions`].
///
/// ```
/// let value = json_codec::parse(r#"{"tags": ["a", "b"]}"#).unwrap();
/// assert_eq!(2, value.object_value().unwrap().get("tags").unwrap().array_value().unwrap().size());
/// ```
pub fn parse(input: impl AsRef<[u8]>) -> Result<Value, ParseError> {
    parse_with_options(input, ParseOptions::default())
}

/// Parses a complete JSON document.
///
/// The input must hold exactly one value, optionally surrounded by
/// whitespace. Nothing is returned on failure, not even the part of the tree
/// built so far.
pub fn parse_with_options(
    input: impl AsRef<[u8]>,
    options: ParseOptions,
) -> Result<Value, ParseError> {
    let source = input.as_ref();
    debug!("parsing {} bytes", source.len());

    let result = Parser::parse(source, options);
    match &result {
        Ok(value) => debug!("parsed {} bytes into {}", source.len(), value.json_type()),
        Err(err) => debug!("parse failed: {err}"),
    }

    result
}

#[derive(Debug, Clone)]
struct Parser<'a> {
    scanner: Scanner<'a>,
    options: ParseOptions,
    depth: usize,

    prev: Option<Token>,
    current: Option<Token>,
}

impl<'a> Parser<'a> {
    fn parse(source: &'a [u8], options: ParseOptions) -> Result<Value, ParseError> {
        let mut scanner = Scanner::init(source);
        let current = scanner.next_token()?;

        let mut parser = Parser {
            scanner,
            options,
            depth: 0,
            current,
            prev: None,
        };

        let value = parser.value()?;
        if parser.current.is_some() {
            return Err(parser.make_err(ParseErrorReason::ExpectedEndOfSource));
        }

        Ok(value)
    }

    fn err_at(&self, reason: ParseErrorReason, token: &Token) -> ParseError {
        ParseError {
            reason,
            position: token.position(),
            line: token.line,
            lexeme: self.scanner.lexeme(token),
        }
    }

    fn make_err(&self, reason: ParseErrorReason) -> ParseError {
        match &self.current {
            Some(token) => self.err_at(reason, token),
            // Out of tokens, so report the end of the input
            None => ParseError {
                reason,
                position: self.scanner.position(),
                line: self.scanner.line(),
                lexeme: String::new(),
            },
        }
    }

    // Make err with prev token instead of current
    fn make_err_prev(&self, reason: ParseErrorReason) -> ParseError {
        match &self.prev {
            Some(token) => self.err_at(reason, token),
            None => self.make_err(reason),
        }
    }

    fn consume(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.check(&kind)? {
            self.advance()?;
            return Ok(());
        }

        Err(self.make_err(ParseErrorReason::ExpectedToken(kind)))
    }

    fn check(&self, kind: &TokenKind) -> Result<bool, ParseError> {
        Ok(self.peek()?.kind == *kind)
    }

    fn peek(&self) -> Result<&Token, ParseError> {
        self.current
            .as_ref()
            .ok_or_else(|| self.make_err(ParseErrorReason::UnexpectedEndOfSource))
    }

    fn advance(&mut self) -> Result<TokenKind, ParseError> {
        let next = self.scanner.next_token()?;
        self.prev = std::mem::replace(&mut self.current, next);

        self.prev
            .as_ref()
            .map(|token| token.kind.clone())
            .ok_or_else(|| self.make_err(ParseErrorReason::Internal))
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(self.make_err(ParseErrorReason::NestingTooDeep {
                max_depth: self.options.max_depth,
            }));
        }

        self.depth += 1;
        trace!("opening container at depth {}", self.depth);
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        let value = match self.peek()?.kind {
            TokenKind::LCurlyBracket => Value::Object(self.object()?),
            TokenKind::LBracket => Value::Array(self.array()?),
            TokenKind::String(_) | TokenKind::Number(_) | TokenKind::Bool(_) | TokenKind::Null => {
                match self.advance()? {
                    TokenKind::String(bytes) => Value::String(self.text(bytes)?.into()),
                    TokenKind::Number(value) => Value::Number(value),
                    TokenKind::Bool(value) => Value::Boolean(value),
                    TokenKind::Null => Value::Null,
                    _ => return Err(self.make_err_prev(ParseErrorReason::Internal)),
                }
            }
            _ => return Err(self.make_err(ParseErrorReason::UnexpectedToken)),
        };

        Ok(value)
    }

    /// Checks a decoded string token, reporting failures at that token.
    fn text(&self, bytes: Vec<u8>) -> Result<String, ParseError> {
        if !utf8::validate(&bytes) {
            return Err(self.make_err_prev(ParseErrorReason::InvalidUtf8));
        }

        String::from_utf8(bytes).map_err(|_| self.make_err_prev(ParseErrorReason::InvalidUtf8))
    }

    fn array(&mut self) -> Result<Array, ParseError> {
        self.enter()?;
        self.consume(TokenKind::LBracket)?;

        let mut array = Array::new();
        let mut had_comma = false;

        // Loop through all elements, until reaching closing bracket
        while !self.check(&TokenKind::RBracket)? {
            array.push_back(self.value()?);

            // Once no comma at end, we have reached end of array
            had_comma = self.check(&TokenKind::Comma)?;
            if had_comma {
                self.advance()?;
            } else {
                break;
            }
        }

        // No trailing comma
        if had_comma {
            return Err(self.make_err(ParseErrorReason::UnexpectedToken));
        }

        self.consume(TokenKind::RBracket)?;
        self.leave();

        Ok(array)
    }

    fn object(&mut self) -> Result<Object, ParseError> {
        self.enter()?;
        self.consume(TokenKind::LCurlyBracket)?;

        let mut object = Object::new();
        let mut had_comma = false;

        // Loop through all members, until reaching closing bracket
        while !self.check(&TokenKind::RCurlyBracket)? {
            let TokenKind::String(bytes) = self.advance()? else {
                return Err(self.make_err_prev(ParseErrorReason::UnexpectedToken));
            };
            let key = self.text(bytes)?;

            self.consume(TokenKind::Colon)?;

            // A repeated key keeps its first position and its last value
            let value = self.value()?;
            object.set(key, value);

            // Once no comma at end, we have reached end of object
            had_comma = self.check(&TokenKind::Comma)?;
            if had_comma {
                self.advance()?;
            } else {
                break;
            }
        }

        // No trailing comma
        if had_comma {
            return Err(self.make_err(ParseErrorReason::UnexpectedToken));
        }

        self.consume(TokenKind::RCurlyBracket)?;
        self.leave();

        Ok(object)
    }
}
