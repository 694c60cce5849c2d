//! Arbitrary-precision integers bounded to 256 bits.

use bytes::{Buf, BufMut};
use num_bigint::BigInt;
use sigma_codec::{util::at_least, varint, EncodeSize, Error, Read, Write};
use std::fmt::{self, Display, Formatter};

/// Maximum length of the two's-complement encoding, in bytes.
pub const MAX_BIG_INT_BYTES: usize = 32;

/// A signed integer whose minimal two's-complement form fits in [MAX_BIG_INT_BYTES] bytes.
///
/// Encoded as an unsigned varint byte length followed by the big-endian two's-complement bytes.
/// A non-negative value whose top bit would otherwise be set gets a leading `0x00` (and a negative
/// value a leading `0xff`), so `0xfffffffffffffffe` takes nine bytes. Any other leading sign byte
/// is rejected when decoding.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigInt256(BigInt);

impl BigInt256 {
    /// Returns the wrapped integer.
    pub fn value(&self) -> &BigInt {
        &self.0
    }
}

impl TryFrom<BigInt> for BigInt256 {
    type Error = Error;

    fn try_from(value: BigInt) -> Result<Self, Self::Error> {
        if value.to_signed_bytes_be().len() > MAX_BIG_INT_BYTES {
            return Err(Error::OutOfRange {
                kind: "BigInt",
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }
}

impl From<i64> for BigInt256 {
    fn from(value: i64) -> Self {
        Self(BigInt::from(value))
    }
}

impl Display for BigInt256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Write for BigInt256 {
    fn write(&self, buf: &mut impl BufMut) {
        let bytes = self.0.to_signed_bytes_be();
        varint::write_len(bytes.len(), buf);
        buf.put_slice(&bytes);
    }
}

impl EncodeSize for BigInt256 {
    fn encode_size(&self) -> usize {
        let len = self.0.to_signed_bytes_be().len();
        varint::size_len(len) + len
    }
}

impl Read for BigInt256 {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        let len = varint::read_len(buf)?;
        if len == 0 {
            return Err(Error::Invalid("BigInt", "empty encoding"));
        }
        if len > MAX_BIG_INT_BYTES {
            return Err(Error::LengthExceeded(len, MAX_BIG_INT_BYTES));
        }
        at_least(buf, len)?;
        let mut bytes = [0u8; MAX_BIG_INT_BYTES];
        buf.copy_to_slice(&mut bytes[..len]);
        let value = BigInt::from_signed_bytes_be(&bytes[..len]);
        if value.to_signed_bytes_be().len() != len {
            return Err(Error::Invalid("BigInt", "redundant sign byte"));
        }
        Ok(Self(value))
    }
}
