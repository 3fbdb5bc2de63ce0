//! Token cursor for navigating the token stream.
//!
//! The cursor owns the lexed tokens of one expression and the source text
//! they point into. Identifier keywords (`and`, `mod`, `asc`, ...) are not
//! separate token kinds, so the cursor also answers "is the current token
//! this word?" case-insensitively.

use dynq_ir::{Span, Token, TokenKind, TokenList};

use crate::{ParseError, ParseErrorKind};

pub(crate) struct Cursor<'src> {
    source: &'src str,
    tokens: TokenList,
    pos: usize,
}

impl<'src> Cursor<'src> {
    /// `tokens` must end with `Eof`.
    pub(crate) fn new(source: &'src str, tokens: TokenList) -> Self {
        debug_assert!(
            tokens.iter().last().map(|t| t.kind) == Some(TokenKind::Eof),
            "token list must end with Eof"
        );
        Cursor {
            source,
            tokens,
            pos: 0,
        }
    }

    pub(crate) fn source(&self) -> &'src str {
        self.source
    }

    /// The current token. Past the end this keeps returning `Eof`.
    #[inline]
    pub(crate) fn current(&self) -> Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.iter().last())
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, Span::DUMMY))
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    /// Source text of the current token.
    pub(crate) fn current_text(&self) -> &'src str {
        self.current_span().slice(self.source)
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Is the current token the identifier `word` (ASCII case-insensitive)?
    pub(crate) fn check_word(&self, word: &str) -> bool {
        self.check(TokenKind::Ident) && self.current_text().eq_ignore_ascii_case(word)
    }

    /// Move to the next token. Never moves past `Eof`.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume a token of `kind`, or fail with "`what` expected".
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &'static str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(ParseErrorKind::Expected { what }))
        }
    }

    /// Error positioned at the current token.
    #[cold]
    pub(crate) fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(self.current_span(), kind)
    }

    /// Error positioned at the start of `span`.
    #[cold]
    pub(crate) fn error_at(&self, span: Span, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, span.char_offset(self.source))
    }
}
