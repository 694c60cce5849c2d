//! Serialize sigma values.
//!
//! # Overview
//!
//! The binary plumbing shared by the sigma value format:
//! - [Write], [Read], and [EncodeSize] traits over [bytes::Buf] / [bytes::BufMut]
//! - Variable-length integers ([varint]), with ZigZag for signed widths and strict width checks
//! - A single [Error] type whose [ErrorKind] classifies every failure
//! - Decoding limits ([Config]) for untrusted input
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, BufMut};
//! use sigma_codec::{varint, DecodeExt, Encode, EncodeSize, Error, Read, Write};
//!
//! // A height that is always written as a zigzag varint.
//! #[derive(Debug, PartialEq)]
//! struct Height(i32);
//!
//! impl Write for Height {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         varint::write_signed(self.0, buf);
//!     }
//! }
//!
//! impl EncodeSize for Height {
//!     fn encode_size(&self) -> usize {
//!         varint::size_signed(self.0)
//!     }
//! }
//!
//! impl Read for Height {
//!     type Cfg = ();
//!
//!     fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
//!         varint::read_signed(buf).map(Self)
//!     }
//! }
//!
//! let encoded = Height(-1200).encode();
//! assert_eq!(encoded.as_ref(), &[0xdf, 0x12]);
//! assert_eq!(Height::decode(encoded).unwrap(), Height(-1200));
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod types;
pub mod util;
pub mod varint;

// Re-export main types and traits
pub use codec::{Codec, Decode, DecodeExt, Encode, EncodeSize, FixedSize, Read, ReadExt, Write};
pub use config::Config;
pub use error::{Error, ErrorKind};
