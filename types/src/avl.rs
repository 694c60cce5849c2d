//! Authenticated AVL+ tree digests.
//!
//! Layout: 33-byte digest (32-byte root hash followed by the tree height), one flags byte, the key
//! length as an unsigned varint, then an optional value length (a `0x00`/`0x01` marker followed,
//! when present, by an unsigned varint).

use crate::hex::hex;
use bytes::{Buf, BufMut};
use sigma_codec::{varint, EncodeSize, Error, Read, ReadExt, Write};
use std::fmt::{self, Debug, Formatter};

/// Length of the digest: root hash plus one height byte.
pub const DIGEST_LENGTH: usize = 33;

/// Operations permitted on the tree.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AvlTreeFlags(u8);

impl AvlTreeFlags {
    const INSERT: u8 = 0x01;
    const UPDATE: u8 = 0x02;
    const REMOVE: u8 = 0x04;
    const ALL: u8 = Self::INSERT | Self::UPDATE | Self::REMOVE;

    /// Returns flags permitting the selected operations.
    pub fn new(insert_allowed: bool, update_allowed: bool, remove_allowed: bool) -> Self {
        let mut bits = 0;
        if insert_allowed {
            bits |= Self::INSERT;
        }
        if update_allowed {
            bits |= Self::UPDATE;
        }
        if remove_allowed {
            bits |= Self::REMOVE;
        }
        Self(bits)
    }

    pub fn insert_allowed(&self) -> bool {
        self.0 & Self::INSERT != 0
    }

    pub fn update_allowed(&self) -> bool {
        self.0 & Self::UPDATE != 0
    }

    pub fn remove_allowed(&self) -> bool {
        self.0 & Self::REMOVE != 0
    }

    /// Returns the serialized flags byte.
    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for AvlTreeFlags {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if bits & !Self::ALL != 0 {
            return Err(Error::Invalid("AvlTree", "unknown flag bits"));
        }
        Ok(Self(bits))
    }
}

impl Debug for AvlTreeFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTreeFlags")
            .field("insert", &self.insert_allowed())
            .field("update", &self.update_allowed())
            .field("remove", &self.remove_allowed())
            .finish()
    }
}

/// Commitment to an authenticated dictionary plus the metadata needed to operate on it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AvlTreeData {
    /// Root hash followed by the tree height.
    pub digest: [u8; DIGEST_LENGTH],
    /// Permitted operations.
    pub flags: AvlTreeFlags,
    /// Length of every key, in bytes.
    pub key_length: u32,
    /// Length of every value, in bytes, if values are fixed-size.
    pub value_length: Option<u32>,
}

impl AvlTreeData {
    /// Returns the 32-byte root hash.
    pub fn root_hash(&self) -> &[u8] {
        &self.digest[..DIGEST_LENGTH - 1]
    }

    /// Returns the height of the tree.
    pub fn height(&self) -> u8 {
        self.digest[DIGEST_LENGTH - 1]
    }
}

impl Write for AvlTreeData {
    fn write(&self, buf: &mut impl BufMut) {
        self.digest.write(buf);
        buf.put_u8(self.flags.bits());
        varint::write(self.key_length, buf);
        self.value_length.is_some().write(buf);
        if let Some(value_length) = self.value_length {
            varint::write(value_length, buf);
        }
    }
}

impl EncodeSize for AvlTreeData {
    fn encode_size(&self) -> usize {
        DIGEST_LENGTH
            + 1
            + varint::size(self.key_length)
            + 1
            + self.value_length.map_or(0, varint::size)
    }
}

impl Read for AvlTreeData {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        let digest = <[u8; DIGEST_LENGTH]>::read(buf)?;
        let flags = AvlTreeFlags::try_from(u8::read(buf)?)?;
        let key_length = varint::read::<u32>(buf)?;
        let value_length = if bool::read(buf)? {
            Some(varint::read::<u32>(buf)?)
        } else {
            None
        };
        Ok(Self {
            digest,
            flags,
            key_length,
            value_length,
        })
    }
}

impl Debug for AvlTreeData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTreeData")
            .field("digest", &hex(&self.digest))
            .field("flags", &self.flags)
            .field("key_length", &self.key_length)
            .field("value_length", &self.value_length)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::from_hex;
    use sigma_codec::{DecodeExt, Encode};

    // Payload of the reference AvlTree constant (without its `64` type tag).
    const TREE: &str =
        "3100d2e101ff01fc047c7f6f00ff80129df69a5090012f01ffca99f5bfff0c803601800100";

    #[test]
    fn test_reference_payload() {
        let bytes = from_hex(TREE).unwrap();
        let tree = AvlTreeData::decode(&bytes[..]).unwrap();
        assert_eq!(tree.height(), 0x36);
        assert_eq!(tree.root_hash().len(), 32);
        assert!(tree.flags.insert_allowed());
        assert!(!tree.flags.update_allowed());
        assert!(!tree.flags.remove_allowed());
        assert_eq!(tree.key_length, 128);
        assert_eq!(tree.value_length, None);
        assert_eq!(tree.encode_size(), bytes.len());
        assert_eq!(tree.encode().as_ref(), &bytes[..]);
    }

    #[test]
    fn test_value_length() {
        let tree = AvlTreeData {
            digest: [7; DIGEST_LENGTH],
            flags: AvlTreeFlags::new(true, true, true),
            key_length: 32,
            value_length: Some(300),
        };
        let encoded = tree.encode();
        assert_eq!(encoded[DIGEST_LENGTH..], [0x07, 0x20, 0x01, 0xac, 0x02]);
        assert_eq!(AvlTreeData::decode(encoded).unwrap(), tree);
    }

    #[test]
    fn test_invalid_flags() {
        let mut bytes = from_hex(TREE).unwrap();
        bytes[DIGEST_LENGTH] = 0x08;
        assert!(matches!(
            AvlTreeData::decode(&bytes[..]),
            Err(Error::Invalid("AvlTree", "unknown flag bits"))
        ));
    }

    #[test]
    fn test_invalid_option_marker() {
        let mut bytes = from_hex(TREE).unwrap();
        let last = bytes.len() - 1;
        bytes[last] = 0x02;
        assert!(matches!(
            AvlTreeData::decode(&bytes[..]),
            Err(Error::Invalid("bool", _))
        ));
    }
}
