//! Lexer error types.

use dynq_ir::Span;
use thiserror::Error;

/// A lexer error: what went wrong and where.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{kind}")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    /// Missing closing quote. Reported at the end of input.
    #[error("Unterminated string literal")]
    UnterminatedString,
    /// A character that starts no token.
    #[error("Syntax error '{0}'")]
    InvalidCharacter(char),
    /// Exponent marker not followed by digits (`1e`, `2.5E+`).
    #[error("Digit expected")]
    DigitExpected,
    /// Input offsets no longer fit a `Span`.
    #[error("Expression text is too long")]
    SourceTooLong,
}

impl LexError {
    #[cold]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }
}
