//! Variable-length integer encoding and decoding
//!
//! Each byte uses:
//! - 7 bits for the value
//! - 1 "continuation" bit to indicate if more bytes follow
//!
//! Groups are emitted least-significant first. Signed integers are first mapped to unsigned ones
//! with ZigZag encoding so that values close to zero stay short regardless of sign.
//!
//! Decoding is always performed against a target width: a varint that carries more bits than the
//! width can hold is rejected with [Error::Overflow] instead of being truncated.

use crate::Error;
use bytes::{Buf, BufMut};
use std::ops::{BitOrAssign, Shl, ShrAssign};

const BITS_PER_BYTE: usize = 8;
const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// A trait for unsigned integers that can be varint encoded.
pub trait UInt:
    Copy
    + From<u8>
    + Sized
    + ShrAssign<usize>
    + Shl<usize, Output = Self>
    + BitOrAssign<Self>
    + PartialOrd
{
    /// Returns the number of leading zeros in the integer.
    fn leading_zeros(self) -> u32;

    /// Returns the least significant byte of the integer.
    fn as_u8(self) -> u8;
}

// Implements the `UInt` trait for all unsigned integer types.
macro_rules! impl_uint {
    ($type:ty) => {
        impl UInt for $type {
            #[inline]
            fn leading_zeros(self) -> u32 {
                self.leading_zeros()
            }

            #[inline]
            fn as_u8(self) -> u8 {
                self as u8
            }
        }
    };
}
impl_uint!(u8);
impl_uint!(u16);
impl_uint!(u32);
impl_uint!(u64);

/// A trait for signed integers that can be converted to and from unsigned integers of the
/// equivalent size.
///
/// When converted to unsigned integers, the encoding is done using ZigZag encoding, which moves the
/// sign bit to the least significant bit (shifting all other bits to the left by one).
pub trait SInt<UEq: UInt> {
    /// Converts the signed integer to an unsigned integer using ZigZag encoding.
    fn as_zigzag(&self) -> UEq;

    /// Converts a (ZigZag'ed) unsigned integer back to a signed integer.
    fn un_zigzag(value: UEq) -> Self;
}

// Implements the `SInt` trait for all signed integer types.
macro_rules! impl_sint {
    ($type:ty, $utype:ty) => {
        impl SInt<$utype> for $type {
            #[inline]
            fn as_zigzag(&self) -> $utype {
                let shr = std::mem::size_of::<$utype>() * 8 - 1;
                ((self << 1) ^ (self >> shr)) as $utype
            }
            #[inline]
            fn un_zigzag(value: $utype) -> Self {
                ((value >> 1) as $type) ^ (-((value & 1) as $type))
            }
        }
    };
}
impl_sint!(i16, u16);
impl_sint!(i32, u32);
impl_sint!(i64, u64);

/// Encodes an unsigned integer as a varint.
pub fn write<T: UInt>(value: T, buf: &mut impl BufMut) {
    let continuation_threshold = T::from(CONTINUATION_BIT_MASK);
    if value < continuation_threshold {
        // Fast path for small values (common case for lengths).
        buf.put_u8(value.as_u8());
        return;
    }

    let mut val = value;
    while val >= continuation_threshold {
        buf.put_u8((val.as_u8()) | CONTINUATION_BIT_MASK);
        val >>= DATA_BITS_PER_BYTE;
    }
    buf.put_u8(val.as_u8());
}

/// Decodes an unsigned integer from a varint.
pub fn read<T: UInt>(buf: &mut impl Buf) -> Result<T, Error> {
    let max_bits = std::mem::size_of::<T>() * BITS_PER_BYTE;
    let mut result: T = T::from(0);
    let mut shift = 0;

    loop {
        if !buf.has_remaining() {
            return Err(Error::EndOfBuffer);
        }
        let byte = buf.get_u8();

        // If this must be the last byte, check that no bits (including the continuation bit) are
        // set beyond the width of T. This also bounds `shift` below `max_bits`.
        let remaining_bits = max_bits.saturating_sub(shift);
        if remaining_bits <= DATA_BITS_PER_BYTE {
            let relevant_bits = BITS_PER_BYTE - byte.leading_zeros() as usize;
            if relevant_bits > remaining_bits {
                return Err(Error::Overflow(max_bits));
            }
        }

        result |= T::from(byte & DATA_BITS_MASK) << shift;

        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok(result);
        }
        shift += DATA_BITS_PER_BYTE;
    }
}

/// Calculates the number of bytes needed to encode an unsigned integer as a varint.
pub fn size<T: UInt>(value: T) -> usize {
    let total_bits = std::mem::size_of::<T>() * BITS_PER_BYTE;
    let leading_zeros = value.leading_zeros() as usize;
    let data_bits = total_bits - leading_zeros;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}

/// Encodes a signed integer as a varint using ZigZag encoding.
pub fn write_signed<U: UInt, S: SInt<U>>(value: S, buf: &mut impl BufMut) {
    write(value.as_zigzag(), buf);
}

/// Decodes a signed integer from ZigZag encoding.
pub fn read_signed<U: UInt, S: SInt<U>>(buf: &mut impl Buf) -> Result<S, Error> {
    Ok(S::un_zigzag(read(buf)?))
}

/// Calculates the number of bytes needed to encode a signed integer as a varint.
pub fn size_signed<U: UInt, S: SInt<U>>(value: S) -> usize {
    size(value.as_zigzag())
}

/// Encodes an element count or byte length.
///
/// Panics if `len` does not fit in a `u16`; constructors reject such values up front.
pub fn write_len(len: usize, buf: &mut impl BufMut) {
    let len = u16::try_from(len).expect("length exceeds u16");
    write(len, buf);
}

/// Decodes an element count or byte length.
pub fn read_len(buf: &mut impl Buf) -> Result<usize, Error> {
    read::<u16>(buf).map(usize::from)
}

/// Calculates the number of bytes needed to encode a length with [write_len].
pub fn size_len(len: usize) -> usize {
    let len = u16::try_from(len).expect("length exceeds u16");
    size(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_known_encodings() {
        let cases: [(u64, &[u8]); 5] = [
            (0, &[0x00]),
            (127, &[0x7f]),
            (128, &[0x80, 0x01]),
            (300, &[0xac, 0x02]),
            (2400, &[0xe0, 0x12]),
        ];
        for (value, expected) in cases {
            let mut buf = Vec::new();
            write(value, &mut buf);
            assert_eq!(buf, expected);
            assert_eq!(size(value), expected.len());
        }
    }

    #[test]
    fn test_varint_encoding() {
        let test_cases = [
            0u64,
            1,
            127,
            128,
            129,
            0xFF,
            0x100,
            0x3FFF,
            0x4000,
            0x1FFFFF,
            0xFFFFFF,
            0x1FFFFFFF,
            0xFFFFFFFF,
            0x1FFFFFFFFFF,
            0xFFFFFFFFFFFFFF,
            u64::MAX,
        ];

        for &value in &test_cases {
            let mut buf = Vec::new();
            write(value, &mut buf);

            assert_eq!(buf.len(), size(value));

            let mut read_buf = &buf[..];
            let decoded: u64 = read(&mut read_buf).unwrap();

            assert_eq!(decoded, value);
            assert_eq!(read_buf.len(), 0);
        }
    }

    #[test]
    fn test_zigzag_encoding() {
        let test_cases = [
            0i64,
            1,
            -1,
            2,
            -2,
            127,
            -127,
            128,
            -128,
            0x7FFFFFFF,
            -0x7FFFFFFF,
            i64::MIN,
            i64::MAX,
        ];

        for &value in &test_cases {
            let mut buf = Vec::new();
            write_signed(value, &mut buf);

            assert_eq!(buf.len(), size_signed(value));

            let mut read_buf = &buf[..];
            let decoded = read_signed::<u64, i64>(&mut read_buf).unwrap();

            assert_eq!(decoded, value);
            assert_eq!(read_buf.len(), 0);
        }
    }

    #[test]
    fn test_zigzag_mapping() {
        assert_eq!(0i32.as_zigzag(), 0);
        assert_eq!((-1i32).as_zigzag(), 1);
        assert_eq!(1i32.as_zigzag(), 2);
        assert_eq!((-2i32).as_zigzag(), 3);
        assert_eq!(i16::MIN.as_zigzag(), u16::MAX);
        assert_eq!(i64::MAX.as_zigzag(), u64::MAX - 1);
    }

    #[test]
    fn test_signed_width_bounds() {
        // i16::MIN zigzags to u16::MAX, which needs exactly 16 bits.
        let mut buf = Vec::new();
        write_signed(i16::MIN, &mut buf);
        assert_eq!(buf, [0xff, 0xff, 0x03]);
        assert_eq!(read_signed::<u16, i16>(&mut &buf[..]).unwrap(), i16::MIN);

        // One more bit does not fit in a Short.
        let mut buf = Vec::new();
        write(u32::from(u16::MAX) + 1, &mut buf);
        assert!(matches!(
            read_signed::<u16, i16>(&mut &buf[..]),
            Err(Error::Overflow(16))
        ));

        // But it does fit in an Int.
        assert_eq!(read_signed::<u32, i32>(&mut &buf[..]).unwrap(), 32768);
    }

    #[test]
    fn test_varint_insufficient_buffer() {
        let mut buf = Bytes::from_static(&[0x80]);
        assert!(matches!(read::<u64>(&mut buf), Err(Error::EndOfBuffer)));

        let mut buf = Bytes::from_static(&[0xff, 0xff]);
        assert!(matches!(read::<u16>(&mut buf), Err(Error::EndOfBuffer)));
    }

    #[test]
    fn test_varint_overflow() {
        let mut buf =
            Bytes::from_static(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x02]);
        assert!(matches!(read::<u64>(&mut buf), Err(Error::Overflow(64))));

        // A continuation bit on the last byte the width permits.
        let mut buf = Bytes::from_static(&[0xff, 0xff, 0xff, 0xff, 0xff, 0x01]);
        assert!(matches!(read::<u32>(&mut buf), Err(Error::Overflow(32))));
    }

    #[test]
    fn test_len() {
        let mut buf = Vec::new();
        write_len(300, &mut buf);
        assert_eq!(size_len(300), buf.len());
        assert_eq!(read_len(&mut &buf[..]).unwrap(), 300);

        let mut buf = Vec::new();
        write(70_000u32, &mut buf);
        assert!(matches!(read_len(&mut &buf[..]), Err(Error::Overflow(16))));
    }

    #[test]
    #[should_panic(expected = "length exceeds u16")]
    fn test_write_len_too_long() {
        write_len(u16::MAX as usize + 1, &mut Vec::new());
    }
}
