//! Lexer for dynq expressions using logos.
//!
//! Produces position-tagged tokens without copying any text out of the
//! source. Word operators (`and`, `or`, `not`, `mod`, `has`) come out as
//! identifiers; the parser gives them meaning.

mod escape;
mod lex_error;

use dynq_ir::{Span, Token, TokenKind, TokenList};
use logos::Logos;

pub use escape::{is_char_literal, unescape_literal};
pub use lex_error::{LexError, LexErrorKind};

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
enum RawToken {
    /// A leading `@` escapes keywords and introduces positional values.
    #[regex(r"[\p{L}_@][\p{L}\p{Nd}_]*")]
    Ident,

    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    #[regex(r"'([^'\\]|\\(.|\n))*'")]
    Str,

    /// Opening quote with no closing one before the end of input.
    #[regex(r#""([^"\\]|\\(.|\n))*\\?"#)]
    #[regex(r"'([^'\\]|\\(.|\n))*\\?")]
    UnterminatedStr,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?[fFmMdD]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFmMdD]?")]
    #[regex(r"[0-9]+[fFmMdD]")]
    Real,

    /// Exponent marker with no digits after it.
    #[regex(r"[0-9]+(\.[0-9]+)?[eE][+-]?")]
    BadExponent,

    #[token("!")]
    Bang,
    #[token("!=")]
    NotEq,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("&&")]
    AmpAmp,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token(",")]
    Comma,
    #[token("-")]
    Minus,
    #[token(".")]
    Dot,
    #[token("/")]
    Slash,
    #[token(":")]
    Colon,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token("<>")]
    LtGt,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("?")]
    Question,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
}

/// Streaming lexer over one expression.
///
/// Once the input is exhausted every further call to `next_token` returns an
/// `Eof` token, so the parser can never read past the end.
pub struct Lexer<'src> {
    source: &'src str,
    raw: logos::Lexer<'src, RawToken>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            raw: RawToken::lexer(source),
        }
    }

    /// Skip whitespace and return the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let Some(result) = self.raw.next() else {
            let end = self.end_span()?;
            return Ok(Token::new(TokenKind::Eof, end));
        };
        let span = to_span(self.raw.span())?;

        match result {
            Ok(RawToken::UnterminatedStr) => Err(LexError::new(
                LexErrorKind::UnterminatedString,
                self.end_span()?,
            )),
            Ok(RawToken::BadExponent) => Err(LexError::new(
                LexErrorKind::DigitExpected,
                Span::point(span.end),
            )),
            Ok(raw) => Ok(Token::new(convert_token(raw), span)),
            Err(()) => {
                let ch = self.raw.slice().chars().next().unwrap_or('\0');
                Err(LexError::new(LexErrorKind::InvalidCharacter(ch), span))
            }
        }
    }

    /// The source text this lexer reads.
    pub fn source(&self) -> &'src str {
        self.source
    }

    fn end_span(&self) -> Result<Span, LexError> {
        to_span(self.source.len()..self.source.len())
    }
}

/// Lex a whole expression. The returned list always ends with `Eof`.
#[tracing::instrument(level = "trace", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = TokenList::with_capacity(source.len() / 2 + 1);
    loop {
        let token = lexer.next_token()?;
        tokens.push(token);
        if token.kind == TokenKind::Eof {
            return Ok(tokens);
        }
    }
}

fn to_span(range: std::ops::Range<usize>) -> Result<Span, LexError> {
    Span::try_from_range(range)
        .map_err(|_| LexError::new(LexErrorKind::SourceTooLong, Span::point(u32::MAX)))
}

fn convert_token(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Ident => TokenKind::Ident,
        RawToken::Str | RawToken::UnterminatedStr => TokenKind::Str,
        RawToken::Int | RawToken::BadExponent => TokenKind::Int,
        RawToken::Real => TokenKind::Real,
        RawToken::Bang => TokenKind::Bang,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Amp => TokenKind::Amp,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::Star => TokenKind::Star,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::LtGt => TokenKind::LtGt,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Question => TokenKind::Question,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::PipePipe => TokenKind::PipePipe,
    }
}
