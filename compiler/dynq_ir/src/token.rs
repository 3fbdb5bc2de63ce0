//! Tokens produced by the lexer.
//!
//! A token is a kind plus a span. Identifier and literal text is never copied
//! out of the source; the parser slices it back out when it needs it.

use std::fmt;
use std::ops::Index;

use crate::Span;

/// Token classification.
///
/// Word operators (`and`, `or`, `not`, `mod`, `has`) and keywords are plain
/// identifiers at this level; the parser recognizes them case-insensitively.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Words and literals
    Ident,
    Str,
    Int,
    Real,

    // Punctuation
    Bang,
    NotEq,
    Percent,
    Amp,
    AmpAmp,
    LParen,
    RParen,
    Star,
    Plus,
    Comma,
    Minus,
    Dot,
    Slash,
    Colon,
    Lt,
    LtEq,
    LtGt,
    Eq,
    EqEq,
    Gt,
    GtEq,
    Question,
    LBracket,
    RBracket,
    Pipe,
    PipePipe,

    /// End of input. Always the last token of a `TokenList`.
    Eof,
}

impl TokenKind {
    /// Human-readable description used in "expected X" messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Ident => "identifier",
            Self::Str => "string literal",
            Self::Int => "integer literal",
            Self::Real => "real literal",
            Self::Bang => "'!'",
            Self::NotEq => "'!='",
            Self::Percent => "'%'",
            Self::Amp => "'&'",
            Self::AmpAmp => "'&&'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Star => "'*'",
            Self::Plus => "'+'",
            Self::Comma => "','",
            Self::Minus => "'-'",
            Self::Dot => "'.'",
            Self::Slash => "'/'",
            Self::Colon => "':'",
            Self::Lt => "'<'",
            Self::LtEq => "'<='",
            Self::LtGt => "'<>'",
            Self::Eq => "'='",
            Self::EqEq => "'=='",
            Self::Gt => "'>'",
            Self::GtEq => "'>='",
            Self::Question => "'?'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Pipe => "'|'",
            Self::PipePipe => "'||'",
            Self::Eof => "end of expression",
        }
    }

    /// Is this a numeric literal token?
    #[inline]
    pub const fn is_number(self) -> bool {
        matches!(self, Self::Int | Self::Real)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token: kind plus source location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Byte offset where the token starts.
    #[inline]
    pub const fn start(&self) -> u32 {
        self.span.start
    }

    /// Length of the token in bytes.
    #[inline]
    pub const fn length(&self) -> u32 {
        self.span.len()
    }
}

crate::static_assert_size!(Token, 12);

/// Lexer output: every token of one expression, terminated by `Eof`.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Token kinds in order, for compact assertions.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
