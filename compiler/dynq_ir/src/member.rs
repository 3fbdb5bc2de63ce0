//! Member, method and indexer signatures.
//!
//! The host describes its types with these signatures; resolved IR nodes
//! embed a copy of the signature they bind to.

use bitflags::bitflags;

use crate::Ty;

bitflags! {
    /// Accessibility and binding flags of a member.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MemberFlags: u8 {
        /// Bound to the type rather than an instance.
        const STATIC = 1 << 0;
        /// Not visible to expressions.
        const NON_PUBLIC = 1 << 1;
        /// Compiler-generated accessor or operator method.
        const SPECIAL_NAME = 1 << 2;
    }
}

impl MemberFlags {
    /// Can an expression reach a member with these flags through the given
    /// access mode?
    #[inline]
    pub fn is_reachable(self, static_access: bool) -> bool {
        !self.intersects(MemberFlags::NON_PUBLIC | MemberFlags::SPECIAL_NAME)
            && self.contains(MemberFlags::STATIC) == static_access
    }
}

/// Is a data member a field or a property?
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    Field,
    Property,
}

/// A field or property.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberSig {
    /// Declaring type.
    pub owner: Ty,
    pub name: String,
    pub ty: Ty,
    pub kind: MemberKind,
    pub flags: MemberFlags,
}

impl MemberSig {
    pub fn property(owner: Ty, name: impl Into<String>, ty: Ty) -> Self {
        MemberSig {
            owner,
            name: name.into(),
            ty,
            kind: MemberKind::Property,
            flags: MemberFlags::empty(),
        }
    }

    pub fn field(owner: Ty, name: impl Into<String>, ty: Ty) -> Self {
        MemberSig {
            kind: MemberKind::Field,
            ..Self::property(owner, name, ty)
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }
}

/// A formal parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamSig {
    pub name: String,
    pub ty: Ty,
    /// Output parameters make a method inapplicable to expressions.
    pub is_out: bool,
}

impl ParamSig {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        ParamSig {
            name: name.into(),
            ty,
            is_out: false,
        }
    }

    #[must_use]
    pub fn out(mut self) -> Self {
        self.is_out = true;
        self
    }
}

/// A method or constructor.
///
/// Constructors are named `.ctor` and return their owner type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodSig {
    pub owner: Ty,
    pub name: String,
    pub params: Vec<ParamSig>,
    pub ret: Ty,
    pub flags: MemberFlags,
}

impl MethodSig {
    pub const CONSTRUCTOR_NAME: &'static str = ".ctor";

    pub fn new(owner: Ty, name: impl Into<String>, params: Vec<ParamSig>, ret: Ty) -> Self {
        MethodSig {
            owner,
            name: name.into(),
            params,
            ret,
            flags: MemberFlags::empty(),
        }
    }

    /// Method whose parameters are only known by type (`arg0`, `arg1`, ...).
    pub fn of(owner: Ty, name: impl Into<String>, params: &[Ty], ret: Ty) -> Self {
        let params = params
            .iter()
            .enumerate()
            .map(|(i, ty)| ParamSig::new(format!("arg{i}"), ty.clone()))
            .collect();
        Self::new(owner, name, params, ret)
    }

    pub fn constructor(owner: Ty, params: &[Ty]) -> Self {
        Self::of(owner.clone(), Self::CONSTRUCTOR_NAME, params, owner)
    }

    #[must_use]
    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn into_static(mut self) -> Self {
        self.flags |= MemberFlags::STATIC;
        self
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    pub fn param_types(&self) -> impl Iterator<Item = &Ty> + '_ {
        self.params.iter().map(|p| &p.ty)
    }
}

/// An indexer (`value[args]`).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexerSig {
    pub owner: Ty,
    pub params: Vec<ParamSig>,
    pub ty: Ty,
    pub flags: MemberFlags,
}

impl IndexerSig {
    pub fn of(owner: Ty, params: &[Ty], ty: Ty) -> Self {
        let params = params
            .iter()
            .enumerate()
            .map(|(i, ty)| ParamSig::new(format!("index{i}"), ty.clone()))
            .collect();
        IndexerSig {
            owner,
            params,
            ty,
            flags: MemberFlags::empty(),
        }
    }
}
