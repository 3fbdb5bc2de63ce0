//! Expression parsing.
//!
//! Precedence, lowest to highest:
//!
//! | level          | operators                          |
//! |----------------|------------------------------------|
//! | conditional    | `?:`                               |
//! | logical or     | `\|\|`, `or`                       |
//! | logical and    | `&&`, `and`                        |
//! | has            | `has`                              |
//! | comparison     | `= == != <> < <= > >=`             |
//! | additive       | `+ - &`                            |
//! | multiplicative | `* / % mod`                        |
//! | unary          | `- ! not`                          |
//! | primary        | literals, names, `(...)`, postfix  |
//!
//! Every production type-checks as it builds: operands are promoted through
//! the operator tables and the returned `Expr` is fully typed.
//!
//! # Module Structure
//!
//! - `mod.rs`: entry point and the binary/unary precedence chain
//! - `operators.rs`: operator matching and operand checking helpers
//! - `primary.rs`: literals, identifiers, keywords, type access
//! - `postfix.rs`: member access, calls, aggregates, indexers

mod operators;
mod postfix;
mod primary;

use dynq_ir::{BinaryOp, Expr, Prim, Span, Token, TokenKind, Ty, UnaryOp, Value};
use dynq_types::{promote, OperatorSet};

use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_, '_> {
    /// Parse an expression.
    ///
    /// Uses `ensure_sufficient_stack` to prevent stack overflow on deeply
    /// nested expressions.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_conditional())
    }

    /// `test ? a : b`
    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let test = self.parse_logical_or()?;
        if !self.cursor.check(TokenKind::Question) {
            return Ok(test);
        }
        self.cursor.advance();
        let if_true = self.parse_expression()?;
        self.cursor.expect(TokenKind::Colon, "':'")?;
        let if_false = self.parse_expression()?;
        self.generate_conditional(test, if_true, if_false, start)
    }

    /// Build a conditional, unifying the branch types.
    ///
    /// When the branch types differ, exactly one of them must promote to
    /// the other. A `null` literal branch never serves as a promotion target.
    pub(crate) fn generate_conditional(
        &self,
        test: Expr,
        if_true: Expr,
        if_false: Expr,
        span: Span,
    ) -> Result<Expr, ParseError> {
        if test.ty != Ty::BOOL {
            return Err(self
                .cursor
                .error_at(span, ParseErrorKind::FirstExprMustBeBool));
        }
        if if_true.ty == if_false.ty {
            return Ok(Expr::conditional(test, if_true, if_false));
        }
        let true_as_false = if if_false.is_null_literal() {
            None
        } else {
            promote(self.cx, &if_true, &if_false.ty, true)
        };
        let false_as_true = if if_true.is_null_literal() {
            None
        } else {
            promote(self.cx, &if_false, &if_true.ty, true)
        };
        match (true_as_false, false_as_true) {
            (Some(if_true), None) => Ok(Expr::conditional(test, if_true, if_false)),
            (None, Some(if_false)) => Ok(Expr::conditional(test, if_true, if_false)),
            (Some(_), Some(_)) => Err(self.cursor.error_at(
                span,
                ParseErrorKind::BothTypesConvertToOther(
                    self.type_name(&if_true.ty),
                    self.type_name(&if_false.ty),
                ),
            )),
            (None, None) => Err(self.cursor.error_at(
                span,
                ParseErrorKind::NeitherTypeConvertsToOther(
                    self.type_name(&if_true.ty),
                    self.type_name(&if_false.ty),
                ),
            )),
        }
    }

    /// `||`, `or`
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;
        while self.match_or_op() {
            let token = self.cursor.advance();
            let right = self.parse_logical_and()?;
            let (left_op, right_op, ty) =
                self.check_operands(OperatorSet::Logical, token, left, right)?;
            left = Expr::binary(BinaryOp::OrElse, left_op, right_op, ty);
        }
        Ok(left)
    }

    /// `&&`, `and`
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_has()?;
        while self.match_and_op() {
            let token = self.cursor.advance();
            let right = self.parse_has()?;
            let (left_op, right_op, ty) =
                self.check_operands(OperatorSet::Logical, token, left, right)?;
            left = Expr::binary(BinaryOp::AndAlso, left_op, right_op, ty);
        }
        Ok(left)
    }

    /// `flags has flag`, rewritten to `(flags & flag) == flag` over the
    /// underlying integral type.
    fn parse_has(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        while self.cursor.check_word("has") {
            let token = self.cursor.advance();
            let right = self.parse_comparison()?;

            let (unified_left, unified_right) = self.unify_enums(left, right);
            let flags = self.lower_enum(unified_left);
            let flag = self.lower_enum(unified_right);
            let Some((flags, flag)) = self.promote_pair(&flags, &flag) else {
                return Err(self.incompatible_operands(token, &flags, &flag));
            };
            let integral = flags
                .ty
                .non_nullable()
                .as_prim()
                .is_some_and(Prim::is_integral);
            if !integral {
                return Err(self.incompatible_operands(token, &flags, &flag));
            }

            let ty = flags.ty.clone();
            let masked = Expr::binary(BinaryOp::BitAnd, flags, flag.clone(), ty);
            left = Expr::binary(BinaryOp::Eq, masked, flag, Ty::BOOL);
        }
        Ok(left)
    }

    /// `= == != <> < <= > >=`
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.match_comparison_op() {
            let token = self.cursor.advance();
            let right = self.parse_additive()?;
            let equality = matches!(op, BinaryOp::Eq | BinaryOp::NotEq);

            let (left_op, right_op) = if equality
                && !self.cx.is_value_type(&left.ty)
                && !self.cx.is_value_type(&right.ty)
            {
                self.unify_references(token, left, right)?
            } else {
                let (left, right) = if self.cx.is_enum(&left.ty) || self.cx.is_enum(&right.ty) {
                    let (left, right) = self.unify_enums(left, right);
                    (self.lower_enum(left), self.lower_enum(right))
                } else {
                    (left, right)
                };
                let set = if equality {
                    OperatorSet::Equality
                } else {
                    OperatorSet::Relational
                };
                let (left, right, _) = self.check_operands(set, token, left, right)?;
                (left, right)
            };
            left = Expr::binary(op, left_op, right_op, Ty::BOOL);
        }
        Ok(left)
    }

    /// Reference equality: both sides must be the same type, or one side
    /// assignable to the other. A `null` literal takes the other side's type.
    fn unify_references(
        &self,
        token: Token,
        left: Expr,
        right: Expr,
    ) -> Result<(Expr, Expr), ParseError> {
        if left.ty == right.ty {
            return Ok((left, right));
        }
        if right.is_null_literal() {
            let right = Expr::constant(Value::Null, left.ty.clone(), right.span);
            return Ok((left, right));
        }
        if left.is_null_literal() {
            let left = Expr::constant(Value::Null, right.ty.clone(), left.span);
            return Ok((left, right));
        }
        if self.cx.is_assignable(&left.ty, &right.ty) {
            let ty = left.ty.clone();
            return Ok((left, right.convert(ty)));
        }
        if self.cx.is_assignable(&right.ty, &left.ty) {
            let ty = right.ty.clone();
            return Ok((left.convert(ty), right));
        }
        Err(self.incompatible_operands(token, &left, &right))
    }

    /// `+ - &`
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op() {
            let token = self.cursor.advance();
            let right = self.parse_multiplicative()?;
            left = match op {
                BinaryOp::Add if left.ty == Ty::STRING || right.ty == Ty::STRING => {
                    Expr::binary(BinaryOp::Concat, left, right, Ty::STRING)
                }
                BinaryOp::Add => {
                    let (left, right, ty) =
                        self.check_operands(OperatorSet::Add, token, left, right)?;
                    Expr::binary(BinaryOp::Add, left, right, ty)
                }
                BinaryOp::Sub => {
                    let (left, right, ty) =
                        self.check_operands(OperatorSet::Subtract, token, left, right)?;
                    Expr::binary(BinaryOp::Sub, left, right, ty)
                }
                _ => Expr::binary(BinaryOp::Concat, left, right, Ty::STRING),
            };
        }
        Ok(left)
    }

    /// `* / % mod`
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.match_multiplicative_op() {
            let token = self.cursor.advance();
            let right = self.parse_unary()?;
            let (left_op, right_op, ty) =
                self.check_operands(OperatorSet::Arithmetic, token, left, right)?;
            left = Expr::binary(op, left_op, right_op, ty);
        }
        Ok(left)
    }

    /// `- ! not`
    ///
    /// A minus directly before a numeric literal is folded into the literal,
    /// so `-2147483648` is a single `Int32` constant.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let Some(op) = self.match_unary_op() else {
            return self.parse_primary(None);
        };
        let token = self.cursor.advance();
        if op == UnaryOp::Negate && self.cursor.current_kind().is_number() {
            return self.parse_primary(Some(token.span));
        }
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let set = match op {
            UnaryOp::Negate => OperatorSet::Negation,
            _ => OperatorSet::Not,
        };
        let (operand, ty) = self.check_operand(set, token, operand)?;
        let mut expr = Expr::unary(op, operand, ty);
        expr.span = token.span.merge(expr.span);
        Ok(expr)
    }
}
