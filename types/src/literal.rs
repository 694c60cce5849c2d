//! Building values from native literal trees.
//!
//! A [Literal] is an untyped tree of booleans, integers, sequences, and pairs. It only becomes a
//! [Value] once paired with an explicit [SType], which decides the width of every integer and the
//! element type of every (possibly empty) sequence.

use crate::{
    stype::{PrimKind, SType},
    value::Value,
};
use sigma_codec::Error;

/// An untyped literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Bool(bool),
    Int(i128),
    Seq(Vec<Literal>),
    Pair(Box<Literal>, Box<Literal>),
    /// An already-typed value, for kinds that have no literal syntax.
    Value(Value),
}

impl Literal {
    fn describe(&self) -> String {
        match self {
            Literal::Bool(_) => "boolean literal".into(),
            Literal::Int(_) => "integer literal".into(),
            Literal::Seq(_) => "sequence literal".into(),
            Literal::Pair(..) => "pair literal".into(),
            Literal::Value(value) => value.tpe().name(),
        }
    }
}

macro_rules! impl_from_int {
    ($($type:ty),*) => {
        $(
            impl From<$type> for Literal {
                fn from(value: $type) -> Self {
                    Literal::Int(i128::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<Value> for Literal {
    fn from(value: Value) -> Self {
        Literal::Value(value)
    }
}

impl<T: Into<Literal>> From<Vec<T>> for Literal {
    fn from(items: Vec<T>) -> Self {
        Literal::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Literal>, const N: usize> From<[T; N]> for Literal {
    fn from(items: [T; N]) -> Self {
        Literal::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Literal>, B: Into<Literal>> From<(A, B)> for Literal {
    fn from((first, second): (A, B)) -> Self {
        Literal::Pair(Box::new(first.into()), Box::new(second.into()))
    }
}

impl Value {
    /// Builds a value of type `tpe` from a literal tree, range-checking every integer against the
    /// kind it is declared with.
    pub fn from_literal(literal: &Literal, tpe: &SType) -> Result<Self, Error> {
        match (literal, tpe) {
            (Literal::Value(value), _) if value.has_type(tpe) => Ok(value.clone()),
            (Literal::Bool(value), SType::Prim(PrimKind::Boolean)) => Ok(Value::Boolean(*value)),
            (Literal::Int(value), SType::Prim(kind)) => match kind {
                PrimKind::Byte => Value::byte(*value),
                PrimKind::Short => Value::short(*value),
                PrimKind::Int => Value::int(*value),
                PrimKind::Long => Value::long(*value),
                PrimKind::BigInt => Value::big_int(*value),
                _ => Err(mismatch(literal, tpe)),
            },
            (Literal::Seq(items), SType::Coll(elem)) => {
                let items = items
                    .iter()
                    .map(|item| Value::from_literal(item, elem))
                    .collect::<Result<Vec<_>, _>>()?;
                Value::coll(elem.as_ref().clone(), items)
            }
            (Literal::Pair(first, second), SType::Pair(t1, t2)) => Value::pair(
                Value::from_literal(first, t1)?,
                Value::from_literal(second, t2)?,
            ),
            _ => Err(mismatch(literal, tpe)),
        }
    }

    /// Builds a collection whose elements have type `elem` from a sequence literal.
    ///
    /// ```
    /// use sigma_types::{SType, Value};
    ///
    /// let coll = Value::coll_of(&vec![vec![1, 2, 3], vec![10, 20]].into(), &SType::coll(SType::BYTE))
    ///     .unwrap();
    /// assert_eq!(coll.tpe().name(), "Coll[Coll[Byte]]");
    /// assert_eq!(coll.to_hex(), "1a0203010203020a14");
    /// ```
    pub fn coll_of(literal: &Literal, elem: &SType) -> Result<Self, Error> {
        Value::from_literal(literal, &SType::coll(elem.clone()))
    }
}

fn mismatch(literal: &Literal, tpe: &SType) -> Error {
    Error::TypeMismatch {
        expected: tpe.name(),
        found: literal.describe(),
    }
}
