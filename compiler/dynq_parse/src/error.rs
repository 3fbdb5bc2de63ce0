//! Parse error types.
//!
//! Every failure of a parse call is a `ParseError`: a `ParseErrorKind`
//! describing what went wrong plus the character offset where it was
//! detected. Type names inside messages are rendered up front so errors
//! outlive the type universe they were produced against.

use dynq_lexer::{LexError, LexErrorKind};
use thiserror::Error;

/// A positioned parse failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} (at index {position})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 0-based character (not byte) offset into the expression text.
    pub position: usize,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        ParseError { kind, position }
    }

    /// The human-readable message, without the position suffix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Convert a lexer error, translating its byte span into a character
    /// offset within `source`.
    pub(crate) fn from_lex(err: LexError, source: &str) -> Self {
        let kind = match err.kind {
            LexErrorKind::UnterminatedString => ParseErrorKind::UnterminatedString,
            LexErrorKind::InvalidCharacter(ch) => ParseErrorKind::InvalidCharacter(ch),
            LexErrorKind::DigitExpected => ParseErrorKind::DigitExpected,
            LexErrorKind::SourceTooLong => ParseErrorKind::SourceTooLong,
        };
        ParseError::new(kind, err.span.char_offset(source))
    }
}

/// What kind of parse error occurred.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    // Lexical
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Syntax error '{0}'")]
    InvalidCharacter(char),
    #[error("Digit expected")]
    DigitExpected,
    #[error("Expression text is too long")]
    SourceTooLong,
    #[error("Invalid integer literal '{0}'")]
    InvalidIntegerLiteral(String),
    #[error("Invalid real literal '{0}'")]
    InvalidRealLiteral(String),
    #[error("Character literal must contain exactly one character")]
    InvalidCharLiteral,

    // Syntactic
    /// A specific token was required (`what` names it, e.g. `"')' or ','"`).
    #[error("{what} expected")]
    Expected { what: &'static str },
    #[error("Expression expected")]
    ExpressionExpected,
    /// Input left over after a complete expression.
    #[error("Syntax error")]
    SyntaxError,

    // Name resolution
    #[error("Unknown identifier '{0}'")]
    UnknownIdentifier(String),
    #[error("No property or field '{member}' exists in type '{ty}'")]
    UnknownPropertyOrField { member: String, ty: String },
    #[error("The identifier '{0}' was defined more than once")]
    DuplicateIdentifier(String),
    #[error("No 'it' is in scope")]
    NoItInScope,
    #[error("No value was supplied for '@{0}'")]
    UnknownSubstitutionValue(usize),

    // Overload resolution
    #[error("No applicable method '{method}' exists in type '{ty}'")]
    NoApplicableMethod { method: String, ty: String },
    #[error("Ambiguous invocation of method '{method}' in type '{ty}'")]
    AmbiguousMethodInvocation { method: String, ty: String },
    #[error("Method '{method}' in type '{ty}' does not return a value")]
    MethodIsVoid { method: String, ty: String },
    #[error("No matching constructor in type '{0}'")]
    NoMatchingConstructor(String),
    #[error("Ambiguous invocation of '{0}' constructor")]
    AmbiguousConstructorInvocation(String),
    #[error("No applicable indexer exists in type '{0}'")]
    NoApplicableIndexer(String),
    #[error("Ambiguous invocation of indexer in type '{0}'")]
    AmbiguousIndexerInvocation(String),
    #[error("No applicable aggregate method '{0}' exists")]
    NoApplicableAggregate(String),

    // Typing
    #[error("Operator '{op}' incompatible with operand type '{ty}'")]
    IncompatibleOperand { op: String, ty: String },
    #[error("Operator '{op}' incompatible with operand types '{left}' and '{right}'")]
    IncompatibleOperands {
        op: String,
        left: String,
        right: String,
    },
    #[error("Expression of type '{0}' expected")]
    ExpressionTypeMismatch(String),
    #[error("The first expression must be of type 'Boolean'")]
    FirstExprMustBeBool,
    #[error("Neither of the types '{0}' and '{1}' converts to the other")]
    NeitherTypeConvertsToOther(String, String),
    #[error("Both of the types '{0}' and '{1}' convert to the other")]
    BothTypesConvertToOther(String, String),
    #[error("Type '{0}' has no nullable form")]
    TypeHasNoNullableForm(String),
    #[error("A value of type '{0}' cannot be converted to type '{1}'")]
    CannotConvertValue(String, String),
    #[error("The 'iif' function requires three arguments")]
    IifRequiresThreeArgs,
    #[error("Indexing of multi-dimensional arrays is not supported")]
    CannotIndexMultiDimArray,
    #[error("Array index must be an integer expression")]
    InvalidIndex,
}
