//! Postfix chains: `.Member`, `.Method(args)`, aggregates over sequences,
//! and `[index]` element access.

use dynq_ir::{AggregateOp, Expr, ExprKind, Span, Token, TokenKind, Ty, Value};
use dynq_types::{
    aggregate_result_type, find_indexer, find_method, promote, resolve_aggregate, Resolution,
};
use tracing::debug;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_, '_> {
    pub(crate) fn parse_postfix(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        loop {
            match self.cursor.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance();
                    let ty = expr.ty.clone();
                    expr = self.parse_member_access(ty, Some(expr))?;
                }
                TokenKind::LBracket => expr = self.parse_element_access(expr)?,
                _ => return Ok(expr),
            }
        }
    }

    /// Member or method of `ty`. The cursor is on the member name.
    ///
    /// `instance` is `None` for static access through a type name.
    pub(crate) fn parse_member_access(
        &mut self,
        ty: Ty,
        instance: Option<Expr>,
    ) -> Result<Expr, ParseError> {
        let token = self.cursor.expect(TokenKind::Ident, "Identifier")?;
        let raw = token.span.slice(self.cursor.source());
        let name = raw.strip_prefix('@').unwrap_or(raw);
        let static_access = instance.is_none();

        if self.cursor.check(TokenKind::LParen) {
            if let Some(source) = instance {
                let aggregate = self
                    .cx
                    .find_sequence_element(&ty)
                    .zip(AggregateOp::from_name(name));
                if let Some((element, op)) = aggregate {
                    return self.parse_aggregate(source, element, op, token);
                }
                return self.parse_method_call(ty, Some(source), name, token);
            }
            return self.parse_method_call(ty, None, name, token);
        }

        let span = instance
            .as_ref()
            .map_or(token.span, |inst| inst.span.merge(token.span));

        if static_access {
            if let (Some(def), Some(type_ref)) = (self.cx.enum_def(&ty), ty.as_named()) {
                if let Some((member, value)) = def.find(name) {
                    let value = Value::Enum {
                        ty: type_ref,
                        name: member.to_owned(),
                        value,
                    };
                    return Ok(Expr::constant(value, ty, span));
                }
            }
        }

        if let Some(member) = self.cx.find_member(&ty, name, static_access) {
            return Ok(Expr::member(instance, member, span));
        }

        if let Some(hook) = self.hook() {
            if let Some(expr) = hook.resolve_member(&ty, name, instance.as_ref()) {
                debug!(member = name, ty = %ty, "member resolved by hook");
                return Ok(expr);
            }
        }

        Err(self.cursor.error_at(
            token.span,
            ParseErrorKind::UnknownPropertyOrField {
                member: name.to_owned(),
                ty: self.type_name(&ty),
            },
        ))
    }

    fn parse_method_call(
        &mut self,
        ty: Ty,
        instance: Option<Expr>,
        name: &str,
        token: Token,
    ) -> Result<Expr, ParseError> {
        let (args, close) = self.parse_argument_list()?;
        match find_method(self.cx, &ty, name, instance.is_none(), &args) {
            Resolution::Unique { item, args } => {
                if item.ret == Ty::VOID {
                    return Err(self.cursor.error_at(
                        token.span,
                        ParseErrorKind::MethodIsVoid {
                            method: name.to_owned(),
                            ty: self.type_name(&ty),
                        },
                    ));
                }
                let span = instance
                    .as_ref()
                    .map_or(token.span, |inst| inst.span)
                    .merge(close);
                Ok(Expr::call(instance, item, args, span))
            }
            Resolution::Ambiguous { .. } => Err(self.cursor.error_at(
                token.span,
                ParseErrorKind::AmbiguousMethodInvocation {
                    method: name.to_owned(),
                    ty: self.type_name(&ty),
                },
            )),
            Resolution::NotFound => Err(self.cursor.error_at(
                token.span,
                ParseErrorKind::NoApplicableMethod {
                    method: name.to_owned(),
                    ty: self.type_name(&ty),
                },
            )),
        }
    }

    /// `seq.Any(...)`, `seq.Sum(...)` and friends.
    ///
    /// The argument, if any, is parsed with a fresh `it` bound to the
    /// element type and becomes the body of a one-parameter lambda.
    fn parse_aggregate(
        &mut self,
        source: Expr,
        element: Ty,
        op: AggregateOp,
        token: Token,
    ) -> Result<Expr, ParseError> {
        let param = self.fresh_param(element.clone());
        let inner = Expr::parameter(param.clone(), token.span);
        let outer = self.it.replace(inner);
        let parsed = self.parse_argument_list();
        self.it = outer;
        let (bodies, close) = parsed?;

        let Resolution::Unique { item, args } = resolve_aggregate(self.cx, op, &bodies) else {
            return Err(self.cursor.error_at(
                token.span,
                ParseErrorKind::NoApplicableAggregate(op.name().to_owned()),
            ));
        };

        // Min and Max keep the selector's own type rather than the
        // `Object` formal they resolve against.
        let (type_args, bodies, ty) = match (op, bodies.first()) {
            (AggregateOp::Min | AggregateOp::Max, Some(body)) => {
                let ty = body.ty.clone();
                (vec![element.clone(), ty.clone()], bodies, ty)
            }
            _ => {
                let ty = aggregate_result_type(op, &element, &item, &args);
                (vec![element.clone()], args, ty)
            }
        };
        let args = bodies
            .into_iter()
            .map(|body| Expr::lambda(vec![param.clone()], body))
            .collect();

        let span = source.span.merge(close);
        let kind = ExprKind::Aggregate {
            source: Box::new(source),
            element,
            op,
            type_args,
            args,
        };
        Ok(Expr::new(kind, ty, span))
    }

    /// `expr[args]`
    fn parse_element_access(&mut self, collection: Expr) -> Result<Expr, ParseError> {
        let open = self.cursor.advance();
        let args = self.parse_arguments()?;
        let close = self.cursor.expect(TokenKind::RBracket, "']' or ','")?;
        let span = collection.span.merge(close.span);

        if let Ty::Array(element) = &collection.ty {
            let element = (**element).clone();
            let [index] = args.as_slice() else {
                return Err(self
                    .cursor
                    .error_at(open.span, ParseErrorKind::CannotIndexMultiDimArray));
            };
            let Some(index) = promote(self.cx, index, &Ty::INT32, true) else {
                return Err(self.cursor.error_at(open.span, ParseErrorKind::InvalidIndex));
            };
            let kind = ExprKind::Index {
                collection: Box::new(collection),
                indexer: None,
                args: vec![index],
            };
            return Ok(Expr::new(kind, element, span));
        }

        match find_indexer(self.cx, &collection.ty, &args) {
            Resolution::Unique { item, args } => {
                let ty = item.ty.clone();
                let kind = ExprKind::Index {
                    collection: Box::new(collection),
                    indexer: Some(item),
                    args,
                };
                Ok(Expr::new(kind, ty, span))
            }
            Resolution::Ambiguous { .. } => Err(self.cursor.error_at(
                open.span,
                ParseErrorKind::AmbiguousIndexerInvocation(self.type_name(&collection.ty)),
            )),
            Resolution::NotFound => Err(self.cursor.error_at(
                open.span,
                ParseErrorKind::NoApplicableIndexer(self.type_name(&collection.ty)),
            )),
        }
    }

    /// `( [expr {, expr}] )`, returning the arguments and the span of `)`.
    pub(crate) fn parse_argument_list(&mut self) -> Result<(Vec<Expr>, Span), ParseError> {
        self.cursor.expect(TokenKind::LParen, "'('")?;
        let args = if self.cursor.check(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_arguments()?
        };
        let close = self.cursor.expect(TokenKind::RParen, "')' or ','")?;
        Ok((args, close.span))
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = vec![self.parse_expression()?];
        while self.cursor.check(TokenKind::Comma) {
            self.cursor.advance();
            args.push(self.parse_expression()?);
        }
        Ok(args)
    }
}
