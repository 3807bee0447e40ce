use std::{fmt, ops::Range};

/// A token's place in the source. The raw text is only looked up when an
/// error needs it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte range of the lexeme
    pub span: Range<usize>,
    pub line: usize,
}

impl Token {
    pub fn init(kind: TokenKind, span: Range<usize>, line: usize) -> Self {
        Self { kind, span, line }
    }

    pub fn position(&self) -> usize {
        self.span.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LCurlyBracket,
    RCurlyBracket,

    LBracket,
    RBracket,

    Colon,
    Comma,

    /// Decoded string contents, not yet checked for valid UTF-8
    String(Vec<u8>),
    Number(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LCurlyBracket => "'{'",
            TokenKind::RCurlyBracket => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::String(_) => "string",
            TokenKind::Number(_) => "number",
            TokenKind::Bool(_) => "boolean",
            TokenKind::Null => "null",
        };

        f.write_str(name)
    }
}
