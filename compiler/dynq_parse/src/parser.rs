//! Parser state shared by the grammar modules.

use dynq_ir::{Expr, ParamRef, Span, Ty, TokenKind};
use dynq_types::{promote, TypeCx, TypeIntrospect};
use tracing::debug;

use crate::cursor::Cursor;
use crate::symbols::SymbolTable;
use crate::{MemberHook, ParseError, ParseErrorKind, ParseOptions};

/// Recursive-descent parser for one expression.
///
/// Grammar productions live in `grammar/`; this type only holds state.
pub(crate) struct Parser<'a, 'src> {
    pub(crate) cursor: Cursor<'src>,
    pub(crate) cx: TypeCx<'a>,
    symbols: SymbolTable,
    /// The implicit element, if any. Aggregates temporarily replace it.
    pub(crate) it: Option<Expr>,
    values: &'a [Expr],
    hook: Option<&'a dyn MemberHook>,
    result_type: Option<&'a Ty>,
    next_param: u32,
}

impl<'a, 'src> Parser<'a, 'src> {
    /// Lex `source` and bind the declared parameters.
    pub(crate) fn new(
        host: &'a dyn TypeIntrospect,
        source: &'src str,
        options: &'a ParseOptions<'a>,
    ) -> Result<Self, ParseError> {
        let tokens = dynq_lexer::lex(source).map_err(|err| ParseError::from_lex(err, source))?;
        let params = options.params();
        let mut parser = Parser {
            cursor: Cursor::new(source, tokens),
            cx: TypeCx::new(host),
            symbols: SymbolTable::new(),
            it: None,
            values: options.values(),
            hook: options.member_hook(),
            result_type: options.required_result(),
            next_param: u32::try_from(params.len()).unwrap_or(u32::MAX),
        };
        parser.bind_params(params)?;
        Ok(parser)
    }

    fn bind_params(&mut self, params: &[ParamRef]) -> Result<(), ParseError> {
        for param in params {
            if let Some(name) = &param.name {
                let value = Expr::parameter(param.clone(), Span::DUMMY);
                if !self.symbols.insert(name, value) {
                    return Err(ParseError::new(
                        ParseErrorKind::DuplicateIdentifier(name.clone()),
                        0,
                    ));
                }
            }
        }
        let mut unnamed = params.iter().filter(|p| p.name.is_none());
        if let (Some(only), None) = (unnamed.next(), unnamed.next()) {
            self.it = Some(Expr::parameter(only.clone(), Span::DUMMY));
        }
        debug!(
            symbols = ?self.symbols.names().collect::<Vec<_>>(),
            implicit = self.it.is_some(),
            "bound parameters"
        );
        Ok(())
    }

    /// A parameter that does not clash with any declared one.
    pub(crate) fn fresh_param(&mut self, ty: Ty) -> ParamRef {
        let id = self.next_param;
        self.next_param = self.next_param.saturating_add(1);
        ParamRef { id, name: None, ty }
    }

    pub(crate) fn symbol(&self, name: &str) -> Option<&Expr> {
        self.symbols.get(name)
    }

    /// Positional substitution value `@index`.
    pub(crate) fn value(&self, index: usize) -> Option<&Expr> {
        self.values.get(index)
    }

    pub(crate) fn hook(&self) -> Option<&'a dyn MemberHook> {
        self.hook
    }

    /// Parse the whole input as a single expression, enforce the required
    /// result type, and require end of input.
    pub(crate) fn parse_root(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let mut expr = self.parse_expression()?;
        if let Some(target) = self.result_type {
            expr = promote(self.cx, &expr, target, true).ok_or_else(|| {
                self.cursor.error_at(
                    start,
                    ParseErrorKind::ExpressionTypeMismatch(self.cx.type_name(target)),
                )
            })?;
        }
        self.expect_end()?;
        Ok(expr)
    }

    pub(crate) fn expect_end(&self) -> Result<(), ParseError> {
        if self.cursor.check(TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.cursor.error(ParseErrorKind::SyntaxError))
        }
    }

    /// Rendered type name for diagnostics.
    pub(crate) fn type_name(&self, ty: &Ty) -> String {
        self.cx.type_name(ty)
    }
}
