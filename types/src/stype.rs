//! Type descriptors.
//!
//! An [SType] is a finite tree describing the shape of a [crate::Value]: a primitive kind, a
//! homogeneous collection, or a pair. Every descriptor has a canonical name derived purely from its
//! structure (`Coll[Byte]`, `(Byte, Long)`, ...), exposed through [std::fmt::Display].

use std::fmt::{self, Display, Formatter};

/// Largest code an embeddable primitive may use.
pub(crate) const MAX_PRIM_CODE: u8 = 11;

/// The primitive kinds a value may have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    BigInt,
    GroupElement,
    SigmaProp,
    AvlTree,
}

impl PrimKind {
    /// All primitive kinds, in code order.
    pub const ALL: [PrimKind; 9] = [
        PrimKind::Boolean,
        PrimKind::Byte,
        PrimKind::Short,
        PrimKind::Int,
        PrimKind::Long,
        PrimKind::BigInt,
        PrimKind::GroupElement,
        PrimKind::SigmaProp,
        PrimKind::AvlTree,
    ];

    /// Returns the reserved single-byte type code of this kind.
    pub const fn code(self) -> u8 {
        match self {
            PrimKind::Boolean => 1,
            PrimKind::Byte => 2,
            PrimKind::Short => 3,
            PrimKind::Int => 4,
            PrimKind::Long => 5,
            PrimKind::BigInt => 6,
            PrimKind::GroupElement => 7,
            PrimKind::SigmaProp => 8,
            PrimKind::AvlTree => 100,
        }
    }

    /// Returns the kind with the given type code, if any.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Returns true if the code of this kind can be folded into a compound type tag.
    pub const fn is_embeddable(self) -> bool {
        self.code() <= MAX_PRIM_CODE
    }

    /// Returns the canonical name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            PrimKind::Boolean => "Boolean",
            PrimKind::Byte => "Byte",
            PrimKind::Short => "Short",
            PrimKind::Int => "Int",
            PrimKind::Long => "Long",
            PrimKind::BigInt => "BigInt",
            PrimKind::GroupElement => "GroupElement",
            PrimKind::SigmaProp => "SigmaProp",
            PrimKind::AvlTree => "AvlTree",
        }
    }

    /// Returns the inclusive bounds of fixed-width integer kinds.
    pub const fn int_bounds(self) -> Option<(i128, i128)> {
        match self {
            PrimKind::Byte => Some((i8::MIN as i128, i8::MAX as i128)),
            PrimKind::Short => Some((i16::MIN as i128, i16::MAX as i128)),
            PrimKind::Int => Some((i32::MIN as i128, i32::MAX as i128)),
            PrimKind::Long => Some((i64::MIN as i128, i64::MAX as i128)),
            _ => None,
        }
    }
}

impl Display for PrimKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Describes the shape of a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SType {
    /// A primitive kind.
    Prim(PrimKind),
    /// A homogeneous collection whose elements all have the boxed type.
    Coll(Box<SType>),
    /// An ordered pair.
    Pair(Box<SType>, Box<SType>),
}

impl SType {
    pub const BOOLEAN: SType = SType::Prim(PrimKind::Boolean);
    pub const BYTE: SType = SType::Prim(PrimKind::Byte);
    pub const SHORT: SType = SType::Prim(PrimKind::Short);
    pub const INT: SType = SType::Prim(PrimKind::Int);
    pub const LONG: SType = SType::Prim(PrimKind::Long);
    pub const BIG_INT: SType = SType::Prim(PrimKind::BigInt);
    pub const GROUP_ELEMENT: SType = SType::Prim(PrimKind::GroupElement);
    pub const SIGMA_PROP: SType = SType::Prim(PrimKind::SigmaProp);
    pub const AVL_TREE: SType = SType::Prim(PrimKind::AvlTree);

    /// Returns `Coll[elem]`.
    pub fn coll(elem: SType) -> Self {
        SType::Coll(Box::new(elem))
    }

    /// Returns `(first, second)`.
    pub fn pair(first: SType, second: SType) -> Self {
        SType::Pair(Box::new(first), Box::new(second))
    }

    /// Returns the primitive kind, if this is a primitive type.
    pub fn prim(&self) -> Option<PrimKind> {
        match self {
            SType::Prim(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the primitive kind if it can be folded into a compound type tag.
    pub(crate) fn embeddable(&self) -> Option<PrimKind> {
        self.prim().filter(|kind| kind.is_embeddable())
    }

    /// Returns the number of collection and pair constructors on the longest path to a primitive.
    pub fn depth(&self) -> usize {
        match self {
            SType::Prim(_) => 0,
            SType::Coll(elem) => 1 + elem.depth(),
            SType::Pair(first, second) => 1 + first.depth().max(second.depth()),
        }
    }

    /// Returns the canonical name of this type.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl From<PrimKind> for SType {
    fn from(kind: PrimKind) -> Self {
        SType::Prim(kind)
    }
}

impl Display for SType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SType::Prim(kind) => Display::fmt(kind, f),
            SType::Coll(elem) => write!(f, "Coll[{elem}]"),
            SType::Pair(first, second) => write!(f, "({first}, {second})"),
        }
    }
}
