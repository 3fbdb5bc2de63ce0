//! Per-call parse configuration.

use dynq_ir::{Expr, ParamRef, Span, Ty, Value};

/// Fallback for member names the type introspection facility does not know.
///
/// Consulted after ordinary lookup fails for a property or field access.
/// Returning `None` keeps the original "unknown property or field" error.
pub trait MemberHook {
    /// `instance` is `None` for static access through a type name.
    fn resolve_member(&self, ty: &Ty, name: &str, instance: Option<&Expr>) -> Option<Expr>;
}

impl<F> MemberHook for F
where
    F: Fn(&Ty, &str, Option<&Expr>) -> Option<Expr>,
{
    fn resolve_member(&self, ty: &Ty, name: &str, instance: Option<&Expr>) -> Option<Expr> {
        self(ty, name, instance)
    }
}

/// Options for one `parse`, `parse_lambda` or `parse_ordering` call.
///
/// ```text
/// let options = ParseOptions::new()
///     .implicit(Ty::Named(person))
///     .result_type(Ty::BOOL)
///     .value(Expr::constant(Value::Int32(18), Ty::INT32, Span::DUMMY));
/// ```
#[derive(Default)]
pub struct ParseOptions<'a> {
    params: Vec<ParamRef>,
    result_type: Option<Ty>,
    values: Vec<Expr>,
    hook: Option<&'a dyn MemberHook>,
}

impl<'a> ParseOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a named parameter.
    #[must_use]
    pub fn param(self, name: impl Into<String>, ty: Ty) -> Self {
        self.push_param(Some(name.into()), ty)
    }

    /// Declare an unnamed parameter. A lone unnamed parameter becomes `it`.
    #[must_use]
    pub fn implicit(self, ty: Ty) -> Self {
        self.push_param(None, ty)
    }

    fn push_param(mut self, name: Option<String>, ty: Ty) -> Self {
        let id = u32::try_from(self.params.len()).unwrap_or(u32::MAX);
        self.params.push(ParamRef { id, name, ty });
        self
    }

    /// Require the parsed expression to be promotable to `ty`.
    #[must_use]
    pub fn result_type(mut self, ty: Ty) -> Self {
        self.result_type = Some(ty);
        self
    }

    /// Supply the next positional substitution value (`@0`, `@1`, ...).
    #[must_use]
    pub fn value(mut self, value: Expr) -> Self {
        self.values.push(value);
        self
    }

    /// Supply a constant substitution value.
    #[must_use]
    pub fn constant(self, value: Value, ty: Ty) -> Self {
        self.value(Expr::constant(value, ty, Span::DUMMY))
    }

    #[must_use]
    pub fn hook(mut self, hook: &'a dyn MemberHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Declared parameters in declaration order. Their ids are their
    /// positions.
    pub fn params(&self) -> &[ParamRef] {
        &self.params
    }

    pub(crate) fn required_result(&self) -> Option<&Ty> {
        self.result_type.as_ref()
    }

    pub(crate) fn values(&self) -> &[Expr] {
        &self.values
    }

    pub(crate) fn member_hook(&self) -> Option<&'a dyn MemberHook> {
        self.hook
    }
}
