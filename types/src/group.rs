//! Elliptic-curve group elements in compressed form.

use crate::hex::hex;
use bytes::{Buf, BufMut};
use sigma_codec::{Error, FixedSize, Read, Write};
use std::{
    fmt::{Debug, Display},
    ops::Deref,
};

/// Length of a compressed point: one prefix byte followed by the 32-byte x coordinate.
pub const GROUP_ELEMENT_LENGTH: usize = 33;

const INFINITY_PREFIX: u8 = 0x00;
const EVEN_PREFIX: u8 = 0x02;
const ODD_PREFIX: u8 = 0x03;

/// An opaque compressed curve point.
///
/// The prefix byte is `0x02` or `0x03` (parity of y) for a regular point, or `0x00` for the point
/// at infinity, in which case every other byte is zero as well. Whether the coordinate lies on the
/// curve is not checked here.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct GroupElement([u8; GROUP_ELEMENT_LENGTH]);

impl GroupElement {
    /// The point at infinity.
    pub const INFINITY: Self = Self([0; GROUP_ELEMENT_LENGTH]);

    /// Returns true if this is the point at infinity.
    pub fn is_infinity(&self) -> bool {
        self.0[0] == INFINITY_PREFIX
    }
}

fn validate(bytes: &[u8; GROUP_ELEMENT_LENGTH]) -> Result<(), Error> {
    match bytes[0] {
        EVEN_PREFIX | ODD_PREFIX => Ok(()),
        INFINITY_PREFIX if bytes[1..].iter().all(|b| *b == 0) => Ok(()),
        INFINITY_PREFIX => Err(Error::Invalid(
            "GroupElement",
            "point at infinity has a non-zero coordinate",
        )),
        _ => Err(Error::Invalid("GroupElement", "invalid point prefix")),
    }
}

impl TryFrom<[u8; GROUP_ELEMENT_LENGTH]> for GroupElement {
    type Error = Error;

    fn try_from(value: [u8; GROUP_ELEMENT_LENGTH]) -> Result<Self, Self::Error> {
        validate(&value)?;
        Ok(Self(value))
    }
}

impl TryFrom<&[u8]> for GroupElement {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; GROUP_ELEMENT_LENGTH] = value
            .try_into()
            .map_err(|_| Error::Invalid("GroupElement", "expected 33 bytes"))?;
        Self::try_from(array)
    }
}

impl Write for GroupElement {
    fn write(&self, buf: &mut impl BufMut) {
        self.0.write(buf);
    }
}

impl Read for GroupElement {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        let bytes = <[u8; GROUP_ELEMENT_LENGTH]>::read_cfg(buf, &())?;
        Self::try_from(bytes)
    }
}

impl FixedSize for GroupElement {
    const SIZE: usize = GROUP_ELEMENT_LENGTH;
}

impl AsRef<[u8]> for GroupElement {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for GroupElement {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for GroupElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}

impl Debug for GroupElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GroupElement({})", hex(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::from_hex;
    use sigma_codec::{DecodeExt, Encode};

    const POINT: &str = "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";

    #[test]
    fn test_codec() {
        let bytes = from_hex(POINT).unwrap();
        let point = GroupElement::decode(&bytes[..]).unwrap();
        assert!(!point.is_infinity());
        assert_eq!(point.to_string(), POINT);
        assert_eq!(point.encode().as_ref(), &bytes[..]);
    }

    #[test]
    fn test_infinity() {
        let encoded = GroupElement::INFINITY.encode();
        assert_eq!(encoded.as_ref(), &[0u8; GROUP_ELEMENT_LENGTH][..]);
        assert!(GroupElement::decode(encoded).unwrap().is_infinity());

        let mut bytes = [0u8; GROUP_ELEMENT_LENGTH];
        bytes[32] = 1;
        assert!(matches!(
            GroupElement::try_from(bytes),
            Err(Error::Invalid("GroupElement", _))
        ));
    }

    #[test]
    fn test_invalid() {
        let mut bytes = from_hex(POINT).unwrap();
        bytes[0] = 0x04;
        assert!(matches!(
            GroupElement::try_from(&bytes[..]),
            Err(Error::Invalid("GroupElement", "invalid point prefix"))
        ));
        assert!(GroupElement::try_from(&bytes[..32]).is_err());
        assert!(matches!(
            GroupElement::decode(&bytes[..32]),
            Err(Error::EndOfBuffer)
        ));
    }
}
