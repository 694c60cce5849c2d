//! Helpers shared by codec implementations.

use crate::Error;
use bytes::Buf;

/// Checks that at least `len` bytes remain in the buffer.
#[inline]
pub fn at_least(buf: &mut impl Buf, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}

/// Returns the capacity to reserve for `items` elements that each take at least `min_size`
/// bytes, never more than the buffer could possibly hold.
#[inline]
pub fn bounded_capacity(buf: &mut impl Buf, items: usize, min_size: usize) -> usize {
    items.min(buf.remaining() / min_size.max(1))
}
