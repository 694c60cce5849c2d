//! Typed values.
//!
//! A [Value] is a closed sum type with one variant per kind. Each variant carries a natively typed
//! payload, so width and signedness always come from the kind rather than from a literal's runtime
//! form. Values are immutable once built: constructors validate their input and there is no way to
//! mutate a value in place.

use crate::{
    avl::AvlTreeData,
    bigint::BigInt256,
    group::GroupElement,
    sigma::{SigmaBoolean, SigmaProp},
    stype::{PrimKind, SType},
};
use num_bigint::BigInt;
use sigma_codec::{config::DEFAULT_MAX_DEPTH, Error};

/// A typed value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    BigInt(BigInt256),
    GroupElement(GroupElement),
    SigmaProp(SigmaProp),
    AvlTree(AvlTreeData),
    Coll(Coll),
    Pair(Box<Value>, Box<Value>),
}

/// A homogeneous collection.
///
/// The element type is stored explicitly so that an empty collection still knows its type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coll {
    elem: SType,
    items: Vec<Value>,
}

impl Coll {
    /// Creates a collection, checking that every item has type `elem`.
    ///
    /// `Coll[elem]` may nest at most [DEFAULT_MAX_DEPTH] levels deep.
    pub fn new(elem: SType, items: Vec<Value>) -> Result<Self, Error> {
        check_depth(1 + elem.depth())?;
        if items.len() > usize::from(u16::MAX) {
            return Err(Error::TooManyItems(items.len()));
        }
        if let Some(item) = items.iter().find(|item| !item.has_type(&elem)) {
            return Err(Error::TypeMismatch {
                expected: elem.name(),
                found: item.tpe().name(),
            });
        }
        Ok(Self { elem, items })
    }

    /// Creates a collection whose items are known to have type `elem`.
    pub(crate) fn new_unchecked(elem: SType, items: Vec<Value>) -> Self {
        Self { elem, items }
    }

    /// Returns the element type.
    pub fn elem_type(&self) -> &SType {
        &self.elem
    }

    /// Returns the items in order.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Coll {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Converts `value` to the native type of an integer kind, or reports it as out of range.
fn checked<T: TryFrom<i128>>(kind: PrimKind, value: i128) -> Result<T, Error> {
    let in_range = kind
        .int_bounds()
        .is_some_and(|(min, max)| (min..=max).contains(&value));
    match T::try_from(value) {
        Ok(value) if in_range => Ok(value),
        _ => Err(Error::OutOfRange {
            kind: kind.name(),
            value: value.to_string(),
        }),
    }
}

/// Rejects types nested deeper than the default decoder accepts.
fn check_depth(depth: usize) -> Result<(), Error> {
    if depth > DEFAULT_MAX_DEPTH {
        return Err(Error::DepthExceeded);
    }
    Ok(())
}

impl Value {
    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    /// Returns a Byte, or [Error::OutOfRange] outside `[-128, 127]`.
    pub fn byte(value: i128) -> Result<Self, Error> {
        checked(PrimKind::Byte, value).map(Value::Byte)
    }

    /// Returns a Short, or [Error::OutOfRange] outside `[-32768, 32767]`.
    pub fn short(value: i128) -> Result<Self, Error> {
        checked(PrimKind::Short, value).map(Value::Short)
    }

    /// Returns an Int, or [Error::OutOfRange] outside the 32-bit signed range.
    pub fn int(value: i128) -> Result<Self, Error> {
        checked(PrimKind::Int, value).map(Value::Int)
    }

    /// Returns a Long, or [Error::OutOfRange] outside the 64-bit signed range.
    pub fn long(value: i128) -> Result<Self, Error> {
        checked(PrimKind::Long, value).map(Value::Long)
    }

    /// Returns a BigInt, or [Error::OutOfRange] if it does not fit in 256 bits.
    pub fn big_int(value: impl Into<BigInt>) -> Result<Self, Error> {
        BigInt256::try_from(value.into()).map(Value::BigInt)
    }

    /// Returns a GroupElement from its 33-byte compressed form.
    pub fn group_element(bytes: &[u8]) -> Result<Self, Error> {
        GroupElement::try_from(bytes).map(Value::GroupElement)
    }

    /// Returns a SigmaProp, checking the tree's structural limits.
    pub fn sigma_prop(prop: SigmaBoolean) -> Result<Self, Error> {
        SigmaProp::new(prop).map(Value::SigmaProp)
    }

    pub fn avl_tree(tree: AvlTreeData) -> Self {
        Value::AvlTree(tree)
    }

    /// Returns the pair `(first, second)`, or [Error::DepthExceeded] if its type would nest
    /// more than [DEFAULT_MAX_DEPTH] levels deep.
    pub fn pair(first: Value, second: Value) -> Result<Self, Error> {
        check_depth(1 + first.depth().max(second.depth()))?;
        Ok(Value::Pair(Box::new(first), Box::new(second)))
    }

    /// Returns a collection of `items`, each of which must have type `elem`.
    pub fn coll(elem: SType, items: Vec<Value>) -> Result<Self, Error> {
        Coll::new(elem, items).map(Value::Coll)
    }

    /// Returns the type of this value.
    pub fn tpe(&self) -> SType {
        match self {
            Value::Boolean(_) => SType::BOOLEAN,
            Value::Byte(_) => SType::BYTE,
            Value::Short(_) => SType::SHORT,
            Value::Int(_) => SType::INT,
            Value::Long(_) => SType::LONG,
            Value::BigInt(_) => SType::BIG_INT,
            Value::GroupElement(_) => SType::GROUP_ELEMENT,
            Value::SigmaProp(_) => SType::SIGMA_PROP,
            Value::AvlTree(_) => SType::AVL_TREE,
            Value::Coll(coll) => SType::coll(coll.elem.clone()),
            Value::Pair(first, second) => SType::pair(first.tpe(), second.tpe()),
        }
    }

    /// Returns true if this value has type `tpe`, without building the value's type.
    pub fn has_type(&self, tpe: &SType) -> bool {
        match (self, tpe) {
            (Value::Coll(coll), SType::Coll(elem)) => coll.elem == **elem,
            (Value::Pair(first, second), SType::Pair(t1, t2)) => {
                first.has_type(t1) && second.has_type(t2)
            }
            (_, SType::Prim(kind)) => self.prim_kind() == Some(*kind),
            _ => false,
        }
    }

    /// Returns the nesting depth of this value's type, without building the type.
    fn depth(&self) -> usize {
        match self {
            Value::Coll(coll) => 1 + coll.elem.depth(),
            Value::Pair(first, second) => 1 + first.depth().max(second.depth()),
            _ => 0,
        }
    }

    fn prim_kind(&self) -> Option<PrimKind> {
        Some(match self {
            Value::Boolean(_) => PrimKind::Boolean,
            Value::Byte(_) => PrimKind::Byte,
            Value::Short(_) => PrimKind::Short,
            Value::Int(_) => PrimKind::Int,
            Value::Long(_) => PrimKind::Long,
            Value::BigInt(_) => PrimKind::BigInt,
            Value::GroupElement(_) => PrimKind::GroupElement,
            Value::SigmaProp(_) => PrimKind::SigmaProp,
            Value::AvlTree(_) => PrimKind::AvlTree,
            Value::Coll(_) | Value::Pair(..) => return None,
        })
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the payload of a Byte, Short, Int, or Long, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(value) => Some(i64::from(*value)),
            Value::Short(value) => Some(i64::from(*value)),
            Value::Int(value) => Some(i64::from(*value)),
            Value::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_big_int(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(value) => Some(value.value()),
            _ => None,
        }
    }

    pub fn as_group_element(&self) -> Option<&GroupElement> {
        match self {
            Value::GroupElement(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_sigma_prop(&self) -> Option<&SigmaBoolean> {
        match self {
            Value::SigmaProp(value) => Some(value.tree()),
            _ => None,
        }
    }

    pub fn as_avl_tree(&self) -> Option<&AvlTreeData> {
        match self {
            Value::AvlTree(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_coll(&self) -> Option<&Coll> {
        match self {
            Value::Coll(coll) => Some(coll),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(&Value, &Value)> {
        match self {
            Value::Pair(first, second) => Some((first.as_ref(), second.as_ref())),
            _ => None,
        }
    }
}

macro_rules! impl_from_native {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Value {
            fn from(value: $type) -> Self {
                Value::$variant(value)
            }
        }
    };
}

impl_from_native!(bool, Boolean);
impl_from_native!(i8, Byte);
impl_from_native!(i16, Short);
impl_from_native!(i32, Int);
impl_from_native!(i64, Long);
impl_from_native!(BigInt256, BigInt);
impl_from_native!(GroupElement, GroupElement);
impl_from_native!(SigmaProp, SigmaProp);
impl_from_native!(AvlTreeData, AvlTree);
impl_from_native!(Coll, Coll);

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;
    use sigma_codec::ErrorKind;

    macro_rules! range_test {
        ($kind:ident, $ctor:ident, $native:ty) => {
            paste! {
                #[test]
                fn [<test_ $ctor _range>]() {
                    let (min, max) = (<$native>::MIN as i128, <$native>::MAX as i128);
                    assert_eq!(Value::$ctor(max).unwrap(), Value::$kind(<$native>::MAX));
                    assert_eq!(Value::$ctor(min).unwrap(), Value::$kind(<$native>::MIN));
                    assert_eq!(Value::$ctor(-1).unwrap().as_i64(), Some(-1));
                    assert_eq!(Value::$ctor(0).unwrap().tpe(), SType::Prim(PrimKind::$kind));

                    let err = Value::$ctor(max + 1).unwrap_err();
                    assert_eq!(err.kind(), ErrorKind::Range);
                    assert_eq!(
                        err,
                        Error::OutOfRange {
                            kind: stringify!($kind),
                            value: (max + 1).to_string(),
                        }
                    );
                    assert_eq!(Value::$ctor(min - 1).unwrap_err().kind(), ErrorKind::Range);
                }
            }
        };
    }

    range_test!(Byte, byte, i8);
    range_test!(Short, short, i16);
    range_test!(Int, int, i32);
    range_test!(Long, long, i64);

    #[test]
    fn test_pair_type() {
        let pair = Value::pair(Value::byte(10).unwrap(), Value::long(20).unwrap()).unwrap();
        assert_eq!(pair.tpe().name(), "(Byte, Long)");
        let (first, second) = pair.as_pair().unwrap();
        assert_eq!(first.as_i64(), Some(10));
        assert_eq!(second.as_i64(), Some(20));
    }

    #[test]
    fn test_coll_type() {
        let items = [-10, 0, 10].map(|v| Value::byte(v).unwrap()).to_vec();
        let coll = Value::coll(SType::BYTE, items).unwrap();
        assert_eq!(coll.tpe().name(), "Coll[Byte]");
        assert_eq!(coll.as_coll().unwrap().len(), 3);

        let empty = Value::coll(SType::coll(SType::LONG), vec![]).unwrap();
        assert_eq!(empty.tpe().name(), "Coll[Coll[Long]]");
        assert!(empty.as_coll().unwrap().is_empty());
    }

    #[test]
    fn test_coll_type_mismatch() {
        let items = vec![Value::Byte(1), Value::Long(2)];
        assert_eq!(
            Value::coll(SType::BYTE, items),
            Err(Error::TypeMismatch {
                expected: "Byte".into(),
                found: "Long".into(),
            })
        );

        // Collections with the same shape but a different element type are distinct.
        let inner = Value::coll(SType::INT, vec![]).unwrap();
        let err = Value::coll(SType::coll(SType::LONG), vec![inner]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_coll_too_many_items() {
        let items = vec![Value::Boolean(true); usize::from(u16::MAX) + 1];
        assert_eq!(
            Value::coll(SType::BOOLEAN, items),
            Err(Error::TooManyItems(65_536))
        );
    }

    #[test]
    fn test_big_int() {
        let value = Value::big_int(0xfffffffffffffffeu64).unwrap();
        assert_eq!(value.tpe(), SType::BIG_INT);
        assert_eq!(value.as_big_int(), Some(&BigInt::from(0xfffffffffffffffeu64)));
        let too_big: BigInt = BigInt::from(1) << 300;
        assert_eq!(Value::big_int(too_big).unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn test_has_type() {
        let value = Value::pair(
            Value::coll(SType::BYTE, vec![]).unwrap(),
            Value::Boolean(false),
        )
        .unwrap();
        assert!(value.has_type(&SType::pair(SType::coll(SType::BYTE), SType::BOOLEAN)));
        assert!(!value.has_type(&SType::pair(SType::coll(SType::INT), SType::BOOLEAN)));
        assert!(!value.has_type(&SType::BOOLEAN));
    }

    fn nested_coll_type(levels: usize) -> SType {
        (0..levels).fold(SType::AVL_TREE, |tpe, _| SType::coll(tpe))
    }

    #[test]
    fn test_coll_depth_limit() {
        let deepest = Value::coll(nested_coll_type(DEFAULT_MAX_DEPTH - 1), vec![]).unwrap();
        assert_eq!(deepest.tpe().depth(), DEFAULT_MAX_DEPTH);
        assert_eq!(Value::from_hex(&deepest.to_hex()).unwrap(), deepest);

        assert_eq!(
            Value::coll(nested_coll_type(DEFAULT_MAX_DEPTH), vec![]),
            Err(Error::DepthExceeded)
        );
    }

    #[test]
    fn test_pair_depth_limit() {
        let mut value = Value::Boolean(true);
        for _ in 0..DEFAULT_MAX_DEPTH {
            value = Value::pair(Value::Byte(1), value).unwrap();
        }
        assert_eq!(value.tpe().depth(), DEFAULT_MAX_DEPTH);
        assert_eq!(Value::from_hex(&value.to_hex()).unwrap(), value);

        assert_eq!(
            Value::pair(value.clone(), Value::Byte(1)),
            Err(Error::DepthExceeded)
        );
    }

    #[test]
    fn test_sigma_prop_depth_limit() {
        let mut tree = SigmaBoolean::ProveDlog(GroupElement::INFINITY);
        for _ in 0..DEFAULT_MAX_DEPTH {
            tree = SigmaBoolean::Or(vec![tree]);
        }
        let value = Value::sigma_prop(tree.clone()).unwrap();
        assert_eq!(Value::from_hex(&value.to_hex()).unwrap(), value);

        let deeper = SigmaBoolean::And(vec![tree]);
        assert_eq!(Value::sigma_prop(deeper), Err(Error::DepthExceeded));
    }

    #[test]
    fn test_sigma_prop_too_many_children() {
        let leaf = SigmaBoolean::ProveDlog(GroupElement::INFINITY);
        let tree = SigmaBoolean::And(vec![leaf; usize::from(u16::MAX) + 1]);
        assert_eq!(
            Value::sigma_prop(tree).unwrap_err().kind(),
            ErrorKind::Range
        );
    }
}
