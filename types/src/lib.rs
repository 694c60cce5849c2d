//! Encode and decode typed sigma values.
//!
//! # Overview
//!
//! A [Value] is one of a small, closed set of kinds: booleans, fixed-width integers, 256-bit
//! integers, compressed curve points, sigma propositions, authenticated tree digests, homogeneous
//! collections, and pairs. Its canonical encoding is its type tag ([SType]) followed by its payload,
//! with no outer length framing:
//!
//! ```text
//! 3e 05 0a 28
//! |  |  |  `-- Long payload: zigzag varint of 20
//! |  |  `----- Byte payload: 10
//! |  `-------- second element type: Long
//! `----------- pair whose first element is a Byte
//! ```
//!
//! Shallow collection and pair types over primitives collapse into a single tag byte; anything
//! else is written recursively (see [tag]).
//!
//! # Example
//!
//! ```
//! use sigma_types::{SType, Value};
//!
//! let pair = Value::pair(Value::byte(10).unwrap(), Value::long(20).unwrap()).unwrap();
//! assert_eq!(pair.tpe().name(), "(Byte, Long)");
//! assert_eq!(pair.to_hex(), "3e050a28");
//!
//! let decoded = Value::from_hex("3e050a28").unwrap();
//! assert_eq!(decoded, pair);
//!
//! // Integers are range-checked against the kind they are declared with.
//! assert!(Value::byte(128).is_err());
//! ```

pub mod avl;
pub mod bigint;
mod constant;
pub mod data;
pub mod group;
pub mod hex;
pub mod literal;
pub mod sigma;
pub mod stype;
pub mod tag;
pub mod value;

pub use avl::{AvlTreeData, AvlTreeFlags};
pub use bigint::BigInt256;
pub use group::GroupElement;
pub use literal::Literal;
pub use sigma::{SigmaBoolean, SigmaProp};
pub use sigma_codec::{Config, Error, ErrorKind};
pub use stype::{PrimKind, SType};
pub use value::{Coll, Value};
