//! Primary expressions: literals, identifiers, keywords, parenthesized
//! expressions and type access (`Int32(x)`, `DateTime.Now`, `Int32?`).

use dynq_ir::{Expr, Span, Token, TokenKind, Ty, Value};
use dynq_lexer::{is_char_literal, unescape_literal};
use dynq_types::{
    explicit_conversion, find_constructor, guess_int_literal, guess_real_literal, prim_by_name,
    Resolution,
};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_, '_> {
    /// Parse a primary expression and its postfix chain.
    ///
    /// `minus` is the span of a `-` already consumed in front of a numeric
    /// literal; it is folded into the literal text.
    pub(crate) fn parse_primary(&mut self, minus: Option<Span>) -> Result<Expr, ParseError> {
        let start = match self.cursor.current_kind() {
            TokenKind::Int | TokenKind::Real => self.parse_number_literal(minus)?,
            TokenKind::Str => self.parse_string_literal()?,
            TokenKind::Ident => self.parse_identifier()?,
            TokenKind::LParen => self.parse_paren()?,
            _ => return Err(self.cursor.error(ParseErrorKind::ExpressionExpected)),
        };
        self.parse_postfix(start)
    }

    fn parse_number_literal(&mut self, minus: Option<Span>) -> Result<Expr, ParseError> {
        let token = self.cursor.advance();
        let digits = token.span.slice(self.cursor.source());
        let (text, span) = match minus {
            Some(sign) => (format!("-{digits}"), sign.merge(token.span)),
            None => (digits.to_owned(), token.span),
        };
        let guess = if token.kind == TokenKind::Int {
            guess_int_literal(&text)
        } else {
            guess_real_literal(&text)
        };
        match guess {
            Some((value, ty)) => Ok(Expr::literal(value, ty, text, span)),
            None if token.kind == TokenKind::Int => Err(self
                .cursor
                .error_at(span, ParseErrorKind::InvalidIntegerLiteral(text))),
            None => Err(self
                .cursor
                .error_at(span, ParseErrorKind::InvalidRealLiteral(text))),
        }
    }

    /// `"..."` is a string, `'.'` a single character.
    fn parse_string_literal(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.advance();
        let raw = token.span.slice(self.cursor.source());
        let text = unescape_literal(raw);
        if !is_char_literal(raw) {
            return Ok(Expr::literal(
                Value::String(text.clone()),
                Ty::STRING,
                text,
                token.span,
            ));
        }
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(Expr::constant(Value::Char(ch), Ty::CHAR, token.span)),
            _ => Err(self
                .cursor
                .error_at(token.span, ParseErrorKind::InvalidCharLiteral)),
        }
    }

    fn parse_paren(&mut self) -> Result<Expr, ParseError> {
        self.cursor.advance();
        let expr = self.parse_expression()?;
        self.cursor.expect(TokenKind::RParen, "')' or operator")?;
        Ok(expr)
    }

    /// Resolve an identifier: `@N` substitution values, keywords and type
    /// names, declared symbols, then a member of `it`.
    ///
    /// A leading `@` on any other name escapes keyword handling.
    fn parse_identifier(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let raw = self.cursor.current_text();
        if let Some(escaped) = raw.strip_prefix('@') {
            if !escaped.is_empty() && escaped.bytes().all(|b| b.is_ascii_digit()) {
                return self.parse_substitution(token, escaped);
            }
            return self.resolve_name(token, escaped);
        }
        if let Some(expr) = self.parse_keyword(token, raw)? {
            return Ok(expr);
        }
        self.resolve_name(token, raw)
    }

    fn parse_substitution(&mut self, token: Token, digits: &str) -> Result<Expr, ParseError> {
        let index = digits.parse::<usize>().unwrap_or(usize::MAX);
        let Some(value) = self.value(index) else {
            return Err(self
                .cursor
                .error_at(token.span, ParseErrorKind::UnknownSubstitutionValue(index)));
        };
        let value = Expr {
            span: token.span,
            ..value.clone()
        };
        self.cursor.advance();
        Ok(value)
    }

    fn parse_keyword(&mut self, token: Token, word: &str) -> Result<Option<Expr>, ParseError> {
        let expr = match word.to_ascii_lowercase().as_str() {
            "true" => Expr::constant(Value::Bool(true), Ty::BOOL, token.span),
            "false" => Expr::constant(Value::Bool(false), Ty::BOOL, token.span),
            "null" => Expr::null_literal(token.span),
            "it" => {
                let Some(it) = &self.it else {
                    return Err(self.cursor.error(ParseErrorKind::NoItInScope));
                };
                Expr {
                    span: token.span,
                    ..it.clone()
                }
            }
            "iif" => return self.parse_iif().map(Some),
            _ => {
                let ty = match prim_by_name(word) {
                    Some(prim) => Ty::Prim(prim),
                    None => match self.cx.host().lookup_type_name(word) {
                        Some(ty) => ty,
                        None => return Ok(None),
                    },
                };
                return self.parse_type_access(ty).map(Some);
            }
        };
        self.cursor.advance();
        Ok(Some(expr))
    }

    /// A declared symbol, or failing that a member of `it`.
    fn resolve_name(&mut self, token: Token, name: &str) -> Result<Expr, ParseError> {
        if let Some(symbol) = self.symbol(name) {
            let expr = Expr {
                span: token.span,
                ..symbol.clone()
            };
            self.cursor.advance();
            return Ok(expr);
        }
        if let Some(it) = self.it.clone() {
            let ty = it.ty.clone();
            let it = Expr {
                span: token.span,
                ..it
            };
            return self.parse_member_access(ty, Some(it));
        }
        Err(self
            .cursor
            .error_at(token.span, ParseErrorKind::UnknownIdentifier(name.to_owned())))
    }

    /// `iif(test, a, b)`
    fn parse_iif(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.advance();
        let (args, _) = self.parse_argument_list()?;
        let Ok([test, if_true, if_false]) = <[Expr; 3]>::try_from(args) else {
            return Err(self
                .cursor
                .error_at(token.span, ParseErrorKind::IifRequiresThreeArgs));
        };
        self.generate_conditional(test, if_true, if_false, token.span)
    }

    /// A type name, optionally made nullable with `?`, followed by either a
    /// constructor call / conversion `(args)` or a static member `.Name`.
    fn parse_type_access(&mut self, ty: Ty) -> Result<Expr, ParseError> {
        let token = self.cursor.advance();
        let mut ty = ty;
        if self.cursor.check(TokenKind::Question) {
            if !self.cx.is_value_type(&ty) || ty.is_nullable() {
                return Err(self.cursor.error_at(
                    token.span,
                    ParseErrorKind::TypeHasNoNullableForm(self.type_name(&ty)),
                ));
            }
            ty = ty.nullable();
            self.cursor.advance();
        }

        if self.cursor.check(TokenKind::LParen) {
            let (args, close) = self.parse_argument_list()?;
            let span = token.span.merge(close);
            return match find_constructor(self.cx, &ty, &args) {
                Resolution::Unique { item, args } => Ok(Expr::new_object(item, args, span)),
                Resolution::Ambiguous { .. } => Err(self.cursor.error_at(
                    token.span,
                    ParseErrorKind::AmbiguousConstructorInvocation(self.type_name(&ty)),
                )),
                Resolution::NotFound => match args.as_slice() {
                    [arg] => explicit_conversion(self.cx, arg, &ty).ok_or_else(|| {
                        self.cursor.error_at(
                            token.span,
                            ParseErrorKind::CannotConvertValue(
                                self.type_name(&arg.ty),
                                self.type_name(&ty),
                            ),
                        )
                    }),
                    _ => Err(self.cursor.error_at(
                        token.span,
                        ParseErrorKind::NoMatchingConstructor(self.type_name(&ty)),
                    )),
                },
            };
        }

        self.cursor.expect(TokenKind::Dot, "'.' or '('")?;
        self.parse_member_access(ty, None)
    }
}
