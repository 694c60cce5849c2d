//! Sigma propositions.
//!
//! A proposition is a tree whose leaves are provable statements about group elements and whose
//! inner nodes combine sub-propositions with AND, OR, or k-out-of-n threshold logic. Each node is
//! written as a one-byte discriminator followed by its body; combinators list their children in
//! order after a varint count.

use crate::group::GroupElement;
use bytes::{Buf, BufMut};
use sigma_codec::{
    config::DEFAULT_MAX_DEPTH, util::bounded_capacity, varint, Config, EncodeSize, Error,
    FixedSize, Read, ReadExt, Write,
};

/// Discriminator of [SigmaBoolean::ProveDlog].
pub const PROVE_DLOG: u8 = 0xcd;
/// Discriminator of [SigmaBoolean::ProveDhTuple].
pub const PROVE_DH_TUPLE: u8 = 0xce;
/// Discriminator of [SigmaBoolean::And].
pub const AND: u8 = 0x96;
/// Discriminator of [SigmaBoolean::Or].
pub const OR: u8 = 0x97;
/// Discriminator of [SigmaBoolean::Threshold].
pub const THRESHOLD: u8 = 0x98;

/// A sigma proposition tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SigmaBoolean {
    /// Knowledge of the discrete logarithm of the element.
    ProveDlog(GroupElement),
    /// Knowledge of `x` such that `u = g^x` and `v = h^x`.
    ProveDhTuple {
        g: GroupElement,
        h: GroupElement,
        u: GroupElement,
        v: GroupElement,
    },
    /// Every child holds.
    And(Vec<SigmaBoolean>),
    /// At least one child holds.
    Or(Vec<SigmaBoolean>),
    /// At least `k` children hold.
    Threshold { k: u16, children: Vec<SigmaBoolean> },
}

impl SigmaBoolean {
    /// Returns the discriminator byte of this node.
    pub fn discriminator(&self) -> u8 {
        match self {
            SigmaBoolean::ProveDlog(_) => PROVE_DLOG,
            SigmaBoolean::ProveDhTuple { .. } => PROVE_DH_TUPLE,
            SigmaBoolean::And(_) => AND,
            SigmaBoolean::Or(_) => OR,
            SigmaBoolean::Threshold { .. } => THRESHOLD,
        }
    }

    /// Checks the structural limits the wire format imposes on this tree.
    ///
    /// Combinators may nest at most [DEFAULT_MAX_DEPTH] deep, so that every accepted tree can be
    /// read back with the default [Config].
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_within(DEFAULT_MAX_DEPTH)
    }

    fn validate_within(&self, depth: usize) -> Result<(), Error> {
        match self {
            SigmaBoolean::ProveDlog(_) | SigmaBoolean::ProveDhTuple { .. } => Ok(()),
            SigmaBoolean::And(children) | SigmaBoolean::Or(children) => {
                validate_children(children, depth)
            }
            SigmaBoolean::Threshold { k, children } => {
                validate_children(children, depth)?;
                if usize::from(*k) > children.len() {
                    return Err(Error::Invalid("SigmaProp", "threshold exceeds child count"));
                }
                Ok(())
            }
        }
    }

    fn write_node(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.discriminator());
        match self {
            SigmaBoolean::ProveDlog(point) => point.write(buf),
            SigmaBoolean::ProveDhTuple { g, h, u, v } => {
                g.write(buf);
                h.write(buf);
                u.write(buf);
                v.write(buf);
            }
            SigmaBoolean::And(children) | SigmaBoolean::Or(children) => {
                write_children(children, buf)
            }
            SigmaBoolean::Threshold { k, children } => {
                varint::write(*k, buf);
                write_children(children, buf);
            }
        }
    }

    fn node_size(&self) -> usize {
        1 + match self {
            SigmaBoolean::ProveDlog(_) => GroupElement::SIZE,
            SigmaBoolean::ProveDhTuple { .. } => 4 * GroupElement::SIZE,
            SigmaBoolean::And(children) | SigmaBoolean::Or(children) => children_size(children),
            SigmaBoolean::Threshold { k, children } => {
                varint::size(*k) + children_size(children)
            }
        }
    }

    fn read_node(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        match u8::read(buf)? {
            PROVE_DLOG => Ok(SigmaBoolean::ProveDlog(GroupElement::read(buf)?)),
            PROVE_DH_TUPLE => Ok(SigmaBoolean::ProveDhTuple {
                g: GroupElement::read(buf)?,
                h: GroupElement::read(buf)?,
                u: GroupElement::read(buf)?,
                v: GroupElement::read(buf)?,
            }),
            AND => Ok(SigmaBoolean::And(read_children(buf, &cfg.nested()?)?)),
            OR => Ok(SigmaBoolean::Or(read_children(buf, &cfg.nested()?)?)),
            THRESHOLD => {
                let k = varint::read::<u16>(buf)?;
                let children = read_children(buf, &cfg.nested()?)?;
                if usize::from(k) > children.len() {
                    return Err(Error::Invalid("SigmaProp", "threshold exceeds child count"));
                }
                Ok(SigmaBoolean::Threshold { k, children })
            }
            _ => Err(Error::Invalid("SigmaProp", "unknown node discriminator")),
        }
    }
}

fn validate_children(children: &[SigmaBoolean], depth: usize) -> Result<(), Error> {
    let depth = depth.checked_sub(1).ok_or(Error::DepthExceeded)?;
    if children.len() > usize::from(u16::MAX) {
        return Err(Error::TooManyItems(children.len()));
    }
    children
        .iter()
        .try_for_each(|child| child.validate_within(depth))
}

fn write_children(children: &[SigmaBoolean], buf: &mut impl BufMut) {
    varint::write_len(children.len(), buf);
    for child in children {
        child.write_node(buf);
    }
}

fn children_size(children: &[SigmaBoolean]) -> usize {
    varint::size_len(children.len()) + children.iter().map(SigmaBoolean::node_size).sum::<usize>()
}

fn read_children(buf: &mut impl Buf, cfg: &Config) -> Result<Vec<SigmaBoolean>, Error> {
    let len = varint::read_len(buf)?;
    cfg.check_items(len)?;
    let mut children = Vec::with_capacity(bounded_capacity(buf, len, 1 + GroupElement::SIZE));
    for _ in 0..len {
        children.push(SigmaBoolean::read_node(buf, cfg)?);
    }
    Ok(children)
}

/// A [SigmaBoolean] that satisfies [SigmaBoolean::validate].
///
/// Only validated trees (or trees read from the wire) can be encoded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SigmaProp(SigmaBoolean);

impl SigmaProp {
    /// Wraps `tree` after checking its structural limits.
    pub fn new(tree: SigmaBoolean) -> Result<Self, Error> {
        tree.validate()?;
        Ok(Self(tree))
    }

    /// Returns the proposition tree.
    pub fn tree(&self) -> &SigmaBoolean {
        &self.0
    }
}

impl TryFrom<SigmaBoolean> for SigmaProp {
    type Error = Error;

    fn try_from(tree: SigmaBoolean) -> Result<Self, Self::Error> {
        Self::new(tree)
    }
}

impl Write for SigmaProp {
    fn write(&self, buf: &mut impl BufMut) {
        self.0.write_node(buf);
    }
}

impl EncodeSize for SigmaProp {
    fn encode_size(&self) -> usize {
        self.0.node_size()
    }
}

impl Read for SigmaProp {
    type Cfg = Config;

    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        SigmaBoolean::read_node(buf, cfg).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::{from_hex, hex};
    use sigma_codec::{Decode, DecodeExt, Encode};

    const DLOG: &str = "cd0297c44a12f4eb99a85d298fa3ba829b5b42b9f63798c980ece801cc663cc5fc9e";

    fn point(prefix: u8, fill: u8) -> GroupElement {
        let mut bytes = [fill; 33];
        bytes[0] = prefix;
        GroupElement::try_from(bytes).unwrap()
    }

    fn nested_or(levels: usize) -> SigmaBoolean {
        let mut tree = SigmaBoolean::ProveDlog(point(0x02, 1));
        for _ in 0..levels {
            tree = SigmaBoolean::Or(vec![tree]);
        }
        tree
    }

    #[test]
    fn test_prove_dlog() {
        let bytes = from_hex(DLOG).unwrap();
        let prop = SigmaProp::decode(&bytes[..]).unwrap();
        assert!(matches!(prop.tree(), SigmaBoolean::ProveDlog(_)));
        assert_eq!(prop.encode_size(), bytes.len());
        assert_eq!(hex(&prop.encode()), DLOG);
    }

    #[test]
    fn test_combinators() {
        let dlog = SigmaBoolean::ProveDlog(point(0x02, 1));
        let dht = SigmaBoolean::ProveDhTuple {
            g: point(0x02, 2),
            h: point(0x03, 3),
            u: point(0x02, 4),
            v: point(0x03, 5),
        };
        let tree = SigmaBoolean::Threshold {
            k: 2,
            children: vec![
                dlog.clone(),
                SigmaBoolean::And(vec![dlog.clone(), dht.clone()]),
                SigmaBoolean::Or(vec![dht]),
            ],
        };
        let prop = SigmaProp::new(tree).unwrap();

        let encoded = prop.encode();
        assert_eq!(encoded[..3], [THRESHOLD, 0x02, 0x03]);
        assert_eq!(encoded[3], PROVE_DLOG);
        assert_eq!(SigmaProp::decode(encoded).unwrap(), prop);

        let empty = SigmaProp::new(SigmaBoolean::And(vec![])).unwrap();
        assert_eq!(empty.encode().as_ref(), &[AND, 0x00]);
    }

    #[test]
    fn test_invalid_threshold() {
        let tree = SigmaBoolean::Threshold {
            k: 2,
            children: vec![SigmaBoolean::ProveDlog(point(0x02, 1))],
        };
        assert!(tree.validate().is_err());
        assert!(SigmaProp::try_from(tree).is_err());

        let mut bytes = vec![THRESHOLD, 0x02, 0x01];
        bytes.extend_from_slice(&from_hex(DLOG).unwrap());
        assert!(matches!(
            SigmaProp::decode(&bytes[..]),
            Err(Error::Invalid("SigmaProp", _))
        ));
    }

    #[test]
    fn test_too_many_children() {
        let leaf = SigmaBoolean::ProveDlog(point(0x02, 1));
        let tree = SigmaBoolean::And(vec![leaf; usize::from(u16::MAX) + 1]);
        assert_eq!(SigmaProp::new(tree), Err(Error::TooManyItems(65_536)));
    }

    #[test]
    fn test_unknown_discriminator() {
        assert!(matches!(
            SigmaProp::decode(&[0x7f][..]),
            Err(Error::Invalid("SigmaProp", "unknown node discriminator"))
        ));
    }

    #[test]
    fn test_depth_limit() {
        let prop = SigmaProp::new(nested_or(10)).unwrap();
        let encoded = prop.encode();
        let cfg = Config::default().with_max_depth(10);
        assert_eq!(SigmaProp::decode_cfg(&encoded[..], &cfg).unwrap(), prop);
        let cfg = Config::default().with_max_depth(9);
        assert!(matches!(
            SigmaProp::decode_cfg(&encoded[..], &cfg),
            Err(Error::DepthExceeded)
        ));
    }

    #[test]
    fn test_validate_depth() {
        let deepest = SigmaProp::new(nested_or(DEFAULT_MAX_DEPTH)).unwrap();
        assert_eq!(SigmaProp::decode(deepest.encode()).unwrap(), deepest);
        assert_eq!(
            SigmaProp::new(nested_or(DEFAULT_MAX_DEPTH + 1)),
            Err(Error::DepthExceeded)
        );
    }
}
