//! Relations between types: value-ness, assignability, implicit
//! compatibility and ancestry.
//!
//! `TypeCx` wraps the host's `TypeIntrospect` and adds the rules the host
//! does not need to know about: nullable forms, sequence types, the numeric
//! widening table and the synthesized members of nullable and array types.

use dynq_ir::{IndexerSig, MemberSig, MethodSig, Prim, Ty};
use smallvec::SmallVec;

use crate::registry::{EnumDef, TypeDef, TypeIntrospect, TypeKind};

/// Type context: relation queries over a host type universe.
#[derive(Copy, Clone)]
pub struct TypeCx<'a> {
    host: &'a dyn TypeIntrospect,
}

impl<'a> TypeCx<'a> {
    pub fn new(host: &'a dyn TypeIntrospect) -> Self {
        TypeCx { host }
    }

    pub fn host(&self) -> &'a dyn TypeIntrospect {
        self.host
    }

    pub fn type_def(&self, ty: &Ty) -> Option<&'a TypeDef> {
        self.host.type_def(ty)
    }

    /// Value types have a nullable form and are never assignable from
    /// anything but themselves.
    pub fn is_value_type(&self, ty: &Ty) -> bool {
        match ty {
            Ty::Prim(prim) => prim.is_value_type(),
            Ty::Nullable(_) => true,
            Ty::Named(_) => matches!(
                self.type_def(ty).map(|def| &def.kind),
                Some(TypeKind::Struct | TypeKind::Enum(_))
            ),
            Ty::Array(_) | Ty::Seq(_) | Ty::Queryable(_) | Ty::Func(..) => false,
        }
    }

    /// Sequence and queryable types count as interfaces.
    pub fn is_interface(&self, ty: &Ty) -> bool {
        match ty {
            Ty::Seq(_) | Ty::Queryable(_) => true,
            Ty::Named(_) => matches!(
                self.type_def(ty).map(|def| &def.kind),
                Some(TypeKind::Interface)
            ),
            _ => false,
        }
    }

    /// Enum definition of `ty` itself (not of its nullable form).
    pub fn enum_def(&self, ty: &Ty) -> Option<&'a EnumDef> {
        self.type_def(ty).and_then(TypeDef::enum_def)
    }

    /// Is `ty`, or the type it makes nullable, an enum?
    pub fn is_enum(&self, ty: &Ty) -> bool {
        self.enum_def(ty.non_nullable()).is_some()
    }

    /// Integral, floating point, decimal or character type, nullable or not.
    pub fn is_numeric(&self, ty: &Ty) -> bool {
        ty.non_nullable()
            .as_prim()
            .is_some_and(|p| p.is_numeric() || p == Prim::Char)
    }

    pub fn is_signed_integral(&self, ty: &Ty) -> bool {
        ty.non_nullable()
            .as_prim()
            .is_some_and(Prim::is_signed_integral)
    }

    pub fn is_unsigned_integral(&self, ty: &Ty) -> bool {
        ty.non_nullable()
            .as_prim()
            .is_some_and(Prim::is_unsigned_integral)
    }

    /// Underlying integral type of an enum, keeping nullability.
    /// Non-enum types are returned unchanged.
    pub fn underlying(&self, ty: &Ty) -> Ty {
        match self.enum_def(ty.non_nullable()) {
            Some(def) if ty.is_nullable() => Ty::Prim(def.underlying).nullable(),
            Some(def) => Ty::Prim(def.underlying),
            None => ty.clone(),
        }
    }

    /// Element type of a sequence-like type.
    ///
    /// Strings are not treated as sequences of characters.
    pub fn find_sequence_element(&self, ty: &Ty) -> Option<Ty> {
        match ty {
            Ty::Seq(elem) | Ty::Queryable(elem) | Ty::Array(elem) => Some((**elem).clone()),
            Ty::Named(_) => self.self_and_base_types(ty).into_iter().find_map(|level| {
                self.type_def(&level)?
                    .interfaces
                    .iter()
                    .find_map(|iface| match iface {
                        Ty::Seq(elem) => Some((**elem).clone()),
                        _ => None,
                    })
            }),
            _ => None,
        }
    }

    /// Can a value of type `source` be stored in a location of type
    /// `target` without conversion (identity, boxing, inheritance, interface
    /// implementation or sequence covariance)?
    pub fn is_assignable(&self, target: &Ty, source: &Ty) -> bool {
        if target == source || *target == Ty::OBJECT {
            return true;
        }
        match target {
            Ty::Seq(target_elem) => self
                .find_sequence_element(source)
                .is_some_and(|elem| self.is_covariant_element(target_elem, &elem)),
            Ty::Named(_) => {
                if *source == Ty::OBJECT || self.is_value_type(target) {
                    return false;
                }
                if self.is_interface(target) {
                    self.interface_closure_of(source).contains(target)
                } else {
                    self.base_chain(source).contains(target)
                }
            }
            _ => false,
        }
    }

    fn is_covariant_element(&self, target: &Ty, source: &Ty) -> bool {
        target == source || (!self.is_value_type(source) && self.is_assignable(target, source))
    }

    /// Implicit compatibility: may an expression of type `source` be used
    /// where `target` is expected?
    pub fn is_compatible(&self, source: &Ty, target: &Ty) -> bool {
        if source == target {
            return true;
        }
        if !self.is_value_type(target) {
            return self.is_assignable(target, source);
        }
        let source_inner = source.non_nullable();
        let target_inner = target.non_nullable();
        if source.is_nullable() && !target.is_nullable() {
            return false;
        }
        match (source_inner.as_prim(), target_inner.as_prim()) {
            (Some(s), Some(t)) => widens_to(s, t),
            _ => source_inner == target_inner,
        }
    }

    /// The type followed by its ancestors, in lookup order.
    ///
    /// Interfaces yield their deduplicated inherited-interface closure;
    /// everything else yields its base chain ending in `Object`.
    pub fn self_and_base_types(&self, ty: &Ty) -> Vec<Ty> {
        if self.is_interface(ty) {
            self.interface_closure(ty)
        } else {
            self.base_chain(ty)
        }
    }

    fn base_chain(&self, ty: &Ty) -> Vec<Ty> {
        let mut chain = vec![ty.clone()];
        let mut current = ty.clone();
        while let Some(base) = self.type_def(&current).and_then(|def| def.base.clone()) {
            if chain.contains(&base) {
                break;
            }
            chain.push(base.clone());
            current = base;
        }
        if !chain.contains(&Ty::OBJECT) {
            chain.push(Ty::OBJECT);
        }
        chain
    }

    /// `ty` followed by every interface it inherits, without duplicates.
    fn interface_closure(&self, ty: &Ty) -> Vec<Ty> {
        let mut closure = Vec::new();
        self.add_interface(&mut closure, ty);
        closure
    }

    fn add_interface(&self, closure: &mut Vec<Ty>, ty: &Ty) {
        if closure.contains(ty) {
            return;
        }
        closure.push(ty.clone());
        if let Some(def) = self.type_def(ty) {
            for iface in &def.interfaces {
                self.add_interface(closure, iface);
            }
        }
    }

    /// Every interface implemented by `ty` or one of its base types.
    fn interface_closure_of(&self, ty: &Ty) -> Vec<Ty> {
        let mut closure = Vec::new();
        for level in self.base_chain(ty) {
            if self.is_interface(&level) {
                self.add_interface(&mut closure, &level);
            }
            if let Some(def) = self.type_def(&level) {
                for iface in &def.interfaces {
                    self.add_interface(&mut closure, iface);
                }
            }
        }
        closure
    }

    /// Find a field or property by name (case-insensitive) on `ty` or one of
    /// its ancestors.
    pub fn find_member(&self, ty: &Ty, name: &str, static_access: bool) -> Option<MemberSig> {
        if !static_access {
            if let Some(member) = synthesized_member(ty, name) {
                return Some(member);
            }
        }
        self.self_and_base_types(ty).into_iter().find_map(|level| {
            self.type_def(&level)?
                .members
                .iter()
                .find(|m| m.name.eq_ignore_ascii_case(name) && m.flags.is_reachable(static_access))
                .cloned()
        })
    }

    /// Methods named `name` declared directly on `ty`.
    pub fn methods_named(
        &self,
        ty: &Ty,
        name: &str,
        static_access: bool,
    ) -> SmallVec<[&'a MethodSig; 4]> {
        self.type_def(ty)
            .map(|def| {
                def.methods
                    .iter()
                    .filter(|m| {
                        m.name.eq_ignore_ascii_case(name) && m.flags.is_reachable(static_access)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Does `ty` or an ancestor declare any method named `name`?
    pub fn has_method_named(&self, ty: &Ty, name: &str, static_access: bool) -> bool {
        self.self_and_base_types(ty)
            .iter()
            .any(|level| !self.methods_named(level, name, static_access).is_empty())
    }

    /// Public constructors of `ty`.
    pub fn constructors(&self, ty: &Ty) -> &'a [MethodSig] {
        self.type_def(ty)
            .map(|def| def.constructors.as_slice())
            .unwrap_or_default()
    }

    /// Public instance indexers declared directly on `ty`.
    pub fn indexers(&self, ty: &Ty) -> SmallVec<[&'a IndexerSig; 2]> {
        self.type_def(ty)
            .map(|def| {
                def.indexers
                    .iter()
                    .filter(|i| i.flags.is_reachable(false))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// User-facing name of a type, for messages.
    pub fn type_name(&self, ty: &Ty) -> String {
        match ty {
            Ty::Prim(prim) => prim.name().to_owned(),
            Ty::Named(_) => self
                .type_def(ty)
                .map_or_else(|| ty.to_string(), |def| def.name.clone()),
            Ty::Nullable(inner) => format!("{}?", self.type_name(inner)),
            Ty::Array(inner) => format!("{}[]", self.type_name(inner)),
            Ty::Seq(inner) => format!("IEnumerable<{}>", self.type_name(inner)),
            Ty::Queryable(inner) => format!("IQueryable<{}>", self.type_name(inner)),
            Ty::Func(params, result) => {
                let mut name = String::from("Func<");
                for param in params {
                    name.push_str(&self.type_name(param));
                    name.push_str(", ");
                }
                name.push_str(&self.type_name(result));
                name.push('>');
                name
            }
        }
    }
}

/// Members the compiler knows about without asking the host.
fn synthesized_member(ty: &Ty, name: &str) -> Option<MemberSig> {
    match ty {
        Ty::Nullable(_) if name.eq_ignore_ascii_case("HasValue") => {
            Some(MemberSig::property(ty.clone(), "HasValue", Ty::BOOL))
        }
        Ty::Nullable(inner) if name.eq_ignore_ascii_case("Value") => {
            Some(MemberSig::property(ty.clone(), "Value", (**inner).clone()))
        }
        Ty::Array(_) if name.eq_ignore_ascii_case("Length") => {
            Some(MemberSig::property(ty.clone(), "Length", Ty::INT32))
        }
        _ => None,
    }
}

/// The implicit numeric widening table (identity included).
pub(crate) fn widens_to(source: Prim, target: Prim) -> bool {
    use Prim::{Byte, Decimal, Double, Int16, Int32, Int64, SByte, Single, UInt16, UInt32, UInt64};

    if source == target {
        return true;
    }
    match source {
        SByte => matches!(target, Int16 | Int32 | Int64 | Single | Double | Decimal),
        Byte => matches!(
            target,
            Int16 | UInt16 | Int32 | UInt32 | Int64 | UInt64 | Single | Double | Decimal
        ),
        Int16 => matches!(target, Int32 | Int64 | Single | Double | Decimal),
        UInt16 => matches!(
            target,
            Int32 | UInt32 | Int64 | UInt64 | Single | Double | Decimal
        ),
        Int32 => matches!(target, Int64 | Single | Double | Decimal),
        UInt32 => matches!(target, Int64 | UInt64 | Single | Double | Decimal),
        Int64 => matches!(target, Single | Double | Decimal),
        UInt64 => matches!(target, Single | Double | Decimal),
        Single => target == Double,
        _ => false,
    }
}

#[cfg(test)]
mod tests;
