//! Overload resolution.
//!
//! One algorithm serves methods, constructors, indexers, operators and
//! enumerable aggregates: keep the candidates every argument promotes to,
//! then discard each candidate some other applicable candidate is better
//! than. One survivor is a match; more than one is ambiguous.

use std::cmp::Ordering;

use dynq_ir::{Expr, IndexerSig, MethodSig, Ty};
use smallvec::SmallVec;

use crate::{promote, TypeCx};

/// Anything with a formal parameter list.
pub trait Candidate {
    fn formals(&self) -> SmallVec<[Ty; 4]>;

    /// Output parameters cannot be bound by an expression.
    fn has_out_params(&self) -> bool {
        false
    }
}

impl Candidate for MethodSig {
    fn formals(&self) -> SmallVec<[Ty; 4]> {
        self.param_types().cloned().collect()
    }

    fn has_out_params(&self) -> bool {
        self.params.iter().any(|p| p.is_out)
    }
}

impl Candidate for IndexerSig {
    fn formals(&self) -> SmallVec<[Ty; 4]> {
        self.params.iter().map(|p| p.ty.clone()).collect()
    }

    fn has_out_params(&self) -> bool {
        self.params.iter().any(|p| p.is_out)
    }
}

impl<T: Candidate + ?Sized> Candidate for &T {
    fn formals(&self) -> SmallVec<[Ty; 4]> {
        (**self).formals()
    }

    fn has_out_params(&self) -> bool {
        (**self).has_out_params()
    }
}

/// Outcome of overload resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution<T> {
    /// No candidate is applicable.
    NotFound,
    /// Exactly one best candidate, with the arguments promoted to its formals.
    Unique { item: T, args: Vec<Expr> },
    /// Several applicable candidates, none better than the others.
    Ambiguous { count: usize },
}

impl<T> Resolution<T> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::NotFound => Resolution::NotFound,
            Resolution::Unique { item, args } => Resolution::Unique {
                item: f(item),
                args,
            },
            Resolution::Ambiguous { count } => Resolution::Ambiguous { count },
        }
    }
}

struct Applicable<T> {
    item: T,
    formals: SmallVec<[Ty; 4]>,
    args: Vec<Expr>,
}

/// Pick the best candidate for `args`.
pub fn find_best<T: Candidate>(
    cx: TypeCx<'_>,
    candidates: impl IntoIterator<Item = T>,
    args: &[Expr],
) -> Resolution<T> {
    let applicable: Vec<Applicable<T>> = candidates
        .into_iter()
        .filter_map(|item| applicable(cx, item, args))
        .collect();

    let survivors: Vec<usize> = (0..applicable.len())
        .filter(|&i| {
            !applicable.iter().enumerate().any(|(j, other)| {
                i != j && is_better_than(cx, args, &other.formals, &applicable[i].formals)
            })
        })
        .collect();

    tracing::trace!(
        applicable = applicable.len(),
        survivors = survivors.len(),
        "overload resolution"
    );

    match survivors.as_slice() {
        [] => Resolution::NotFound,
        [index] => {
            let index = *index;
            match applicable.into_iter().nth(index) {
                Some(winner) => Resolution::Unique {
                    item: winner.item,
                    args: winner.args,
                },
                None => Resolution::NotFound,
            }
        }
        many => Resolution::Ambiguous { count: many.len() },
    }
}

fn applicable<T: Candidate>(cx: TypeCx<'_>, item: T, args: &[Expr]) -> Option<Applicable<T>> {
    let formals = item.formals();
    if formals.len() != args.len() || item.has_out_params() {
        return None;
    }
    let promoted = args
        .iter()
        .zip(&formals)
        .map(|(arg, formal)| promote(cx, arg, formal, false))
        .collect::<Option<Vec<_>>>()?;
    Some(Applicable {
        item,
        formals,
        args: promoted,
    })
}

/// Is the candidate with formals `m1` better than the one with `m2`?
///
/// Better means no argument converts worse and at least one converts
/// strictly better.
fn is_better_than(cx: TypeCx<'_>, args: &[Expr], m1: &[Ty], m2: &[Ty]) -> bool {
    let mut better = false;
    for ((arg, t1), t2) in args.iter().zip(m1).zip(m2) {
        match compare_conversions(cx, &arg.ty, t1, t2) {
            Ordering::Less => return false,
            Ordering::Greater => better = true,
            Ordering::Equal => {}
        }
    }
    better
}

/// Which of two conversions of `source` is better: to `t1` (`Greater`) or
/// to `t2` (`Less`)?
pub fn compare_conversions(cx: TypeCx<'_>, source: &Ty, t1: &Ty, t2: &Ty) -> Ordering {
    if t1 == t2 {
        return Ordering::Equal;
    }
    if source == t1 {
        return Ordering::Greater;
    }
    if source == t2 {
        return Ordering::Less;
    }
    let t1_to_t2 = cx.is_compatible(t1, t2);
    let t2_to_t1 = cx.is_compatible(t2, t1);
    if t1_to_t2 && !t2_to_t1 {
        return Ordering::Greater;
    }
    if t2_to_t1 && !t1_to_t2 {
        return Ordering::Less;
    }
    if cx.is_signed_integral(t1) && cx.is_unsigned_integral(t2) {
        return Ordering::Greater;
    }
    if cx.is_signed_integral(t2) && cx.is_unsigned_integral(t1) {
        return Ordering::Less;
    }
    Ordering::Equal
}

/// Resolve a method call on `ty`.
///
/// Each ancestor level is tried in turn; the first level with any applicable
/// method decides, even if that decision is "ambiguous".
pub fn find_method(
    cx: TypeCx<'_>,
    ty: &Ty,
    name: &str,
    static_access: bool,
    args: &[Expr],
) -> Resolution<MethodSig> {
    for level in cx.self_and_base_types(ty) {
        let candidates = cx.methods_named(&level, name, static_access);
        let resolution = find_best(cx, candidates, args);
        if !resolution.is_not_found() {
            return resolution.map(MethodSig::clone);
        }
    }
    Resolution::NotFound
}

/// Resolve a constructor of `ty`.
pub fn find_constructor(cx: TypeCx<'_>, ty: &Ty, args: &[Expr]) -> Resolution<MethodSig> {
    find_best(cx, cx.constructors(ty), args).map(MethodSig::clone)
}

/// Resolve an indexer of `ty`, level by level like `find_method`.
pub fn find_indexer(cx: TypeCx<'_>, ty: &Ty, args: &[Expr]) -> Resolution<IndexerSig> {
    for level in cx.self_and_base_types(ty) {
        let resolution = find_best(cx, cx.indexers(&level), args);
        if !resolution.is_not_found() {
            return resolution.map(IndexerSig::clone);
        }
    }
    Resolution::NotFound
}
