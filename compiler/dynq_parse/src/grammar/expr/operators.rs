//! Operator matching and operand checking helpers.

use dynq_ir::{BinaryOp, Expr, Token, TokenKind, Ty, UnaryOp, Value};
use dynq_types::{promote, resolve_operator, OperatorSet, Resolution};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_, '_> {
    pub(crate) fn match_or_op(&self) -> bool {
        self.cursor.check(TokenKind::PipePipe) || self.cursor.check_word("or")
    }

    pub(crate) fn match_and_op(&self) -> bool {
        self.cursor.check(TokenKind::AmpAmp) || self.cursor.check_word("and")
    }

    pub(crate) fn match_comparison_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Eq | TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq | TokenKind::LtGt => Some(BinaryOp::NotEq),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    /// `&` is string concatenation, reported as `Concat`.
    pub(crate) fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Amp => Some(BinaryOp::Concat),
            _ => None,
        }
    }

    pub(crate) fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            TokenKind::Ident if self.cursor.check_word("mod") => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    pub(crate) fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Minus => Some(UnaryOp::Negate),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Ident if self.cursor.check_word("not") => Some(UnaryOp::Not),
            _ => None,
        }
    }

    /// Resolve a binary operator against `set`, returning the promoted
    /// operands and the result type.
    pub(crate) fn check_operands(
        &self,
        set: OperatorSet,
        token: Token,
        left: Expr,
        right: Expr,
    ) -> Result<(Expr, Expr, Ty), ParseError> {
        let args = [left, right];
        if let Resolution::Unique { item, args: promoted } = resolve_operator(self.cx, set, &args) {
            let ty = item.result_type(&promoted);
            let mut promoted = promoted.into_iter();
            if let (Some(left), Some(right)) = (promoted.next(), promoted.next()) {
                return Ok((left, right, ty));
            }
        }
        let [left, right] = args;
        Err(self.incompatible_operands(token, &left, &right))
    }

    /// Resolve a unary operator against `set`.
    pub(crate) fn check_operand(
        &self,
        set: OperatorSet,
        token: Token,
        operand: Expr,
    ) -> Result<(Expr, Ty), ParseError> {
        let args = [operand];
        if let Resolution::Unique { item, args: promoted } = resolve_operator(self.cx, set, &args) {
            let ty = item.result_type(&promoted);
            if let Some(operand) = promoted.into_iter().next() {
                return Ok((operand, ty));
            }
        }
        let [operand] = args;
        Err(self.cursor.error_at(
            token.span,
            ParseErrorKind::IncompatibleOperand {
                op: token.span.slice(self.cursor.source()).to_owned(),
                ty: self.type_name(&operand.ty),
            },
        ))
    }

    #[cold]
    pub(crate) fn incompatible_operands(&self, token: Token, left: &Expr, right: &Expr) -> ParseError {
        self.cursor.error_at(
            token.span,
            ParseErrorKind::IncompatibleOperands {
                op: token.span.slice(self.cursor.source()).to_owned(),
                left: self.type_name(&left.ty),
                right: self.type_name(&right.ty),
            },
        )
    }

    /// Bring two operands to one type by promoting either side to the
    /// other's type.
    pub(crate) fn promote_pair(&self, left: &Expr, right: &Expr) -> Option<(Expr, Expr)> {
        if left.ty == right.ty {
            return Some((left.clone(), right.clone()));
        }
        if let Some(right) = promote(self.cx, right, &left.ty, true) {
            return Some((left.clone(), right));
        }
        promote(self.cx, left, &right.ty, true).map(|left| (left, right.clone()))
    }

    /// If either operand is an enum, try to give both the same enum type.
    /// Operands that cannot be unified are returned unchanged.
    pub(crate) fn unify_enums(&self, left: Expr, right: Expr) -> (Expr, Expr) {
        if left.ty == right.ty || !(self.cx.is_enum(&left.ty) || self.cx.is_enum(&right.ty)) {
            return (left, right);
        }
        self.promote_pair(&left, &right).unwrap_or((left, right))
    }

    /// Rewrite an enum-typed operand to its underlying integral type.
    /// Enum constants fold into integral constants.
    pub(crate) fn lower_enum(&self, expr: Expr) -> Expr {
        if !self.cx.is_enum(&expr.ty) {
            return expr;
        }
        let underlying = self.cx.underlying(&expr.ty);
        if let Some(Value::Enum { value, .. }) = expr.as_constant() {
            let folded = underlying
                .non_nullable()
                .as_prim()
                .and_then(|prim| Value::integral(prim, *value));
            if let Some(folded) = folded {
                return Expr::constant(folded, underlying, expr.span);
            }
        }
        expr.convert(underlying)
    }
}
