//! Host-declared types and the introspection seam.
//!
//! The parser never asks the host anything directly; it goes through the
//! `TypeIntrospect` trait. `TypeRegistry` is the stock implementation: an
//! index of named type definitions plus member tables for the primitive
//! types, pre-populated with the built-in members expressions commonly use.
//!
//! # Design
//!
//! - Named types are stored densely and addressed by `TypeRef`
//! - Name lookup is case-insensitive (`FxHashMap` keyed by lowercased name)
//! - Types are declared first and filled in afterwards, so definitions can
//!   refer to themselves and to each other

mod builtins;

use dynq_ir::{IndexerSig, MemberFlags, MemberSig, MethodSig, Prim, Ty, TypeRef};
use rustc_hash::FxHashMap;

/// Read-only view of the host's type universe.
///
/// Implementations must be safe to share between concurrent parses; the
/// compiler never mutates them.
pub trait TypeIntrospect {
    /// Definition of a primitive or named type. Composite types (nullable,
    /// arrays, sequences, functions) have no definition.
    fn type_def(&self, ty: &Ty) -> Option<&TypeDef>;

    /// Resolve a type name usable in expressions (case-insensitive).
    fn lookup_type_name(&self, name: &str) -> Option<Ty>;
}

/// The kind of a type definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum(EnumDef),
}

/// Definition of an enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDef {
    /// Underlying integral type.
    pub underlying: Prim,
    /// Values are bit flags meant to be combined.
    pub flags: bool,
    pub values: Vec<(String, i64)>,
}

impl EnumDef {
    pub fn new(underlying: Prim) -> Self {
        EnumDef {
            underlying,
            flags: false,
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn flags(mut self) -> Self {
        self.flags = true;
        self
    }

    #[must_use]
    pub fn value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.values.push((name.into(), value));
        self
    }

    /// Case-insensitive lookup of a named value.
    pub fn find(&self, name: &str) -> Option<(&str, i64)> {
        self.values
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(n, v)| (n.as_str(), *v))
    }
}

/// A type definition: kind, ancestry and members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDef {
    pub name: String,
    /// The type this definition describes.
    pub ty: Ty,
    pub kind: TypeKind,
    /// Base class. `None` means `Object` (or nothing, for `Object` itself and
    /// interfaces).
    pub base: Option<Ty>,
    /// Directly implemented (or, for interfaces, inherited) interfaces.
    pub interfaces: Vec<Ty>,
    /// Can expressions name this type (`Type.Member`, `Type(...)`)?
    pub accessible: bool,
    pub members: Vec<MemberSig>,
    pub methods: Vec<MethodSig>,
    pub constructors: Vec<MethodSig>,
    pub indexers: Vec<IndexerSig>,
}

impl TypeDef {
    fn new(name: impl Into<String>, ty: Ty, kind: TypeKind) -> Self {
        TypeDef {
            name: name.into(),
            ty,
            kind,
            base: None,
            interfaces: Vec::new(),
            accessible: false,
            members: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            indexers: Vec::new(),
        }
    }

    pub fn enum_def(&self) -> Option<&EnumDef> {
        match &self.kind {
            TypeKind::Enum(def) => Some(def),
            _ => None,
        }
    }

    pub fn base(&mut self, base: Ty) -> &mut Self {
        self.base = Some(base);
        self
    }

    pub fn implements(&mut self, interface: Ty) -> &mut Self {
        self.interfaces.push(interface);
        self
    }

    pub fn accessible(&mut self) -> &mut Self {
        self.accessible = true;
        self
    }

    pub fn property(&mut self, name: &str, ty: Ty) -> &mut Self {
        let member = MemberSig::property(self.ty.clone(), name, ty);
        self.members.push(member);
        self
    }

    pub fn field(&mut self, name: &str, ty: Ty) -> &mut Self {
        let member = MemberSig::field(self.ty.clone(), name, ty);
        self.members.push(member);
        self
    }

    pub fn static_property(&mut self, name: &str, ty: Ty) -> &mut Self {
        let member =
            MemberSig::property(self.ty.clone(), name, ty).with_flags(MemberFlags::STATIC);
        self.members.push(member);
        self
    }

    /// Add a fully specified member (for non-public or special members).
    pub fn member(&mut self, member: MemberSig) -> &mut Self {
        self.members.push(member);
        self
    }

    pub fn method(&mut self, name: &str, params: &[Ty], ret: Ty) -> &mut Self {
        let method = MethodSig::of(self.ty.clone(), name, params, ret);
        self.methods.push(method);
        self
    }

    pub fn static_method(&mut self, name: &str, params: &[Ty], ret: Ty) -> &mut Self {
        let method = MethodSig::of(self.ty.clone(), name, params, ret).into_static();
        self.methods.push(method);
        self
    }

    /// Add a fully specified method (out parameters, flags).
    pub fn method_sig(&mut self, method: MethodSig) -> &mut Self {
        self.methods.push(method);
        self
    }

    pub fn constructor(&mut self, params: &[Ty]) -> &mut Self {
        let ctor = MethodSig::constructor(self.ty.clone(), params);
        self.constructors.push(ctor);
        self
    }

    pub fn indexer(&mut self, params: &[Ty], ty: Ty) -> &mut Self {
        let indexer = IndexerSig::of(self.ty.clone(), params, ty);
        self.indexers.push(indexer);
        self
    }
}

/// Registry of type definitions.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    /// Named types indexed by `TypeRef`.
    types: Vec<TypeDef>,
    /// Lowercased name -> type.
    by_name: FxHashMap<String, TypeRef>,
    /// Member tables of the primitive types.
    prims: FxHashMap<Prim, TypeDef>,
}

impl TypeRegistry {
    /// A registry with the built-in members of the primitive types and the
    /// `Math` and `Convert` helper classes.
    pub fn new() -> Self {
        let mut registry = TypeRegistry {
            types: Vec::new(),
            by_name: FxHashMap::default(),
            prims: FxHashMap::default(),
        };
        for prim in Prim::ALL {
            let kind = if prim.is_value_type() {
                TypeKind::Struct
            } else {
                TypeKind::Class
            };
            registry
                .prims
                .insert(prim, TypeDef::new(prim.name(), Ty::Prim(prim), kind));
        }
        builtins::install(&mut registry);
        registry
    }

    /// Declare a named type and return its handle. Fill in its members
    /// through `def_mut`.
    pub fn declare(&mut self, name: &str, kind: TypeKind) -> TypeRef {
        let index = u32::try_from(self.types.len()).unwrap_or(u32::MAX);
        let type_ref = TypeRef::from_raw(index);
        self.types
            .push(TypeDef::new(name, Ty::Named(type_ref), kind));
        self.by_name.insert(name.to_ascii_lowercase(), type_ref);
        type_ref
    }

    /// Definition of a named type.
    pub fn def(&self, type_ref: TypeRef) -> Option<&TypeDef> {
        self.types.get(type_ref.index())
    }

    /// Mutable definition of a type declared by this registry.
    ///
    /// # Panics
    ///
    /// Panics if `type_ref` was not returned by this registry's `declare`.
    pub fn def_mut(&mut self, type_ref: TypeRef) -> &mut TypeDef {
        &mut self.types[type_ref.index()]
    }

    /// Mutable member table of a primitive type.
    pub fn prim_def_mut(&mut self, prim: Prim) -> &mut TypeDef {
        self.prims
            .entry(prim)
            .or_insert_with(|| TypeDef::new(prim.name(), Ty::Prim(prim), TypeKind::Struct))
    }

    /// Look up a named type by name (ASCII case-insensitive), accessible or
    /// not.
    pub fn named(&self, name: &str) -> Option<TypeRef> {
        self.by_name.get(&name.to_ascii_lowercase()).copied()
    }

    /// Number of named types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeIntrospect for TypeRegistry {
    fn type_def(&self, ty: &Ty) -> Option<&TypeDef> {
        match ty {
            Ty::Prim(prim) => self.prims.get(prim),
            Ty::Named(type_ref) => self.def(*type_ref),
            _ => None,
        }
    }

    fn lookup_type_name(&self, name: &str) -> Option<Ty> {
        let type_ref = self.named(name)?;
        self.def(type_ref)
            .filter(|def| def.accessible)
            .map(|def| def.ty.clone())
    }
}

#[cfg(test)]
mod tests;
