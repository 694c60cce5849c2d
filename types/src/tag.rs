//! Type tag serialization.
//!
//! Every primitive kind has a reserved code. Compound types are written as a constructor code,
//! which is a multiple of [PRIM_RANGE], plus an optional embedded primitive code:
//!
//! | constructor | code | layout |
//! |---|---|---|
//! | `Coll[T]` | 12 | `12 + code(T)`, or `12` followed by `T` |
//! | `Coll[Coll[T]]` | 24 | `24 + code(T)`, or (if `T` is not embeddable) `12` followed by `Coll[T]` |
//! | `(T1, T2)` | 60 | `60 + code(T1)` followed by `T2`, or `60` followed by `T1` and `T2` |
//! | `(T1, T2)` | 72 | `72 + code(T2)` followed by `T1` |
//! | `(T, T)` | 84 | `84 + code(T)` |
//!
//! Only embeddable primitives (codes `1..=11`) can be folded into a constructor code. A
//! non-embeddable primitive such as `AvlTree` always appears as its own byte.
//!
//! Every collection or pair level counts once against [Config::max_depth], whether or not it was
//! folded into a single byte, so the limit is a bound on [SType::depth].

use crate::stype::{PrimKind, SType, MAX_PRIM_CODE};
use bytes::{Buf, BufMut};
use sigma_codec::{Config, EncodeSize, Error, Read, ReadExt, Write};

/// Number of codes reserved per type constructor.
pub const PRIM_RANGE: u8 = MAX_PRIM_CODE + 1;

const COLL_ID: u8 = 1;
const NESTED_COLL_ID: u8 = 2;
// Ids 3 and 4 (`Option[T]`, `Option[Coll[T]]`) have no counterpart in this type system.
const PAIR1_ID: u8 = 5;
const PAIR2_ID: u8 = 6;
const PAIR_SYMMETRIC_ID: u8 = 7;

/// Code of `Coll[T]` when `T` follows explicitly.
pub const COLL: u8 = COLL_ID * PRIM_RANGE;
/// Code of `Coll[Coll[T]]` for embeddable `T`.
pub const NESTED_COLL: u8 = NESTED_COLL_ID * PRIM_RANGE;
/// Code of a pair whose first element is embedded (or, alone, of a fully explicit pair).
pub const PAIR1: u8 = PAIR1_ID * PRIM_RANGE;
/// Code of a pair whose second element is embedded.
pub const PAIR2: u8 = PAIR2_ID * PRIM_RANGE;
/// Code of a pair whose elements are the same embeddable type.
pub const PAIR_SYMMETRIC: u8 = PAIR_SYMMETRIC_ID * PRIM_RANGE;

impl Write for SType {
    fn write(&self, buf: &mut impl BufMut) {
        match self {
            SType::Prim(kind) => buf.put_u8(kind.code()),
            SType::Coll(elem) => {
                if let Some(kind) = elem.embeddable() {
                    buf.put_u8(COLL + kind.code());
                } else if let Some(kind) = nested_embeddable(elem) {
                    buf.put_u8(NESTED_COLL + kind.code());
                } else {
                    buf.put_u8(COLL);
                    elem.write(buf);
                }
            }
            SType::Pair(first, second) => match (first.embeddable(), second.embeddable()) {
                (Some(kind), _) if first == second => buf.put_u8(PAIR_SYMMETRIC + kind.code()),
                (Some(kind), _) => {
                    buf.put_u8(PAIR1 + kind.code());
                    second.write(buf);
                }
                (None, Some(kind)) => {
                    buf.put_u8(PAIR2 + kind.code());
                    first.write(buf);
                }
                (None, None) => {
                    buf.put_u8(PAIR1);
                    first.write(buf);
                    second.write(buf);
                }
            },
        }
    }
}

impl EncodeSize for SType {
    fn encode_size(&self) -> usize {
        match self {
            SType::Prim(_) => 1,
            SType::Coll(elem) => {
                if elem.embeddable().is_some() || nested_embeddable(elem).is_some() {
                    1
                } else {
                    1 + elem.encode_size()
                }
            }
            SType::Pair(first, second) => match (first.embeddable(), second.embeddable()) {
                (Some(_), _) if first == second => 1,
                (Some(_), _) => 1 + second.encode_size(),
                (None, Some(_)) => 1 + first.encode_size(),
                (None, None) => 1 + first.encode_size() + second.encode_size(),
            },
        }
    }
}

impl Read for SType {
    type Cfg = Config;

    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        let code = u8::read(buf)?;
        let prim = code % PRIM_RANGE;
        match code / PRIM_RANGE {
            0 => embedded(code, code),
            COLL_ID => {
                let cfg = cfg.nested()?;
                Ok(SType::coll(argument(buf, code, prim, &cfg)?))
            }
            NESTED_COLL_ID => {
                let cfg = cfg.nested()?.nested()?;
                Ok(SType::coll(SType::coll(argument(buf, code, prim, &cfg)?)))
            }
            PAIR1_ID => {
                let cfg = cfg.nested()?;
                let first = argument(buf, code, prim, &cfg)?;
                let second = SType::read_cfg(buf, &cfg)?;
                Ok(SType::pair(first, second))
            }
            // With no embedded code, 72 and 84 denote quadruples and triples.
            PAIR2_ID if prim != 0 => {
                let cfg = cfg.nested()?;
                let first = SType::read_cfg(buf, &cfg)?;
                Ok(SType::pair(first, embedded(code, prim)?))
            }
            PAIR_SYMMETRIC_ID if prim != 0 => {
                cfg.nested()?;
                let elem = embedded(code, prim)?;
                Ok(SType::pair(elem.clone(), elem))
            }
            _ if code == PrimKind::AvlTree.code() => Ok(SType::AVL_TREE),
            _ => Err(Error::UnknownType(code)),
        }
    }
}

/// Returns `T` if `elem` is `Coll[T]` for an embeddable `T`.
fn nested_embeddable(elem: &SType) -> Option<PrimKind> {
    match elem {
        SType::Coll(inner) => inner.embeddable(),
        _ => None,
    }
}

/// Resolves an embedded primitive code, reporting the whole tag `code` on failure.
fn embedded(code: u8, prim: u8) -> Result<SType, Error> {
    PrimKind::from_code(prim)
        .filter(|kind| kind.is_embeddable())
        .map(SType::Prim)
        .ok_or(Error::UnknownType(code))
}

/// Reads a constructor argument: the embedded primitive, or an explicit type if none is embedded.
fn argument(buf: &mut impl Buf, code: u8, prim: u8, cfg: &Config) -> Result<SType, Error> {
    if prim == 0 {
        SType::read_cfg(buf, cfg)
    } else {
        embedded(code, prim)
    }
}
