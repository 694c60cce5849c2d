//! Self-describing values: a type tag followed by the payload.
//!
//! This is the canonical form of a value, with no outer length framing. Its hexadecimal rendering
//! (lowercase, no prefix) is what [Value::to_hex] produces and [Value::from_hex] accepts.

use crate::{
    data,
    hex::{from_hex, hex},
    stype::SType,
    value::Value,
};
use bytes::{Buf, BufMut};
use sigma_codec::{Config, Decode, Encode, EncodeSize, Error, Read, Write};
use tracing::{debug, trace};

impl Write for Value {
    fn write(&self, buf: &mut impl BufMut) {
        self.tpe().write(buf);
        data::write(self, buf);
    }
}

impl EncodeSize for Value {
    fn encode_size(&self) -> usize {
        self.tpe().encode_size() + data::size(self)
    }
}

impl Read for Value {
    type Cfg = Config;

    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        let tpe = SType::read_cfg(buf, cfg)?;
        data::read(buf, &tpe, cfg)
    }
}

impl Value {
    /// Returns the canonical encoding of this value.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().to_vec()
    }

    /// Returns the canonical encoding of this value as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex(&self.encode())
    }

    /// Decodes exactly one value from `bytes` using the default [Config].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_bytes_cfg(bytes, &Config::default())
    }

    /// Decodes exactly one value from `bytes`.
    pub fn from_bytes_cfg(bytes: &[u8], cfg: &Config) -> Result<Self, Error> {
        match Self::decode_cfg(bytes, cfg) {
            Ok(value) => {
                trace!(tpe = %value.tpe(), len = bytes.len(), "decoded value");
                Ok(value)
            }
            Err(err) => {
                debug!(?err, len = bytes.len(), "failed to decode value");
                Err(err)
            }
        }
    }

    /// Decodes exactly one value from its hex encoding.
    pub fn from_hex(text: &str) -> Result<Self, Error> {
        let Some(bytes) = from_hex(text) else {
            debug!(len = text.len(), "invalid hex");
            return Err(Error::InvalidHex);
        };
        Self::from_bytes(&bytes)
    }

    /// Decodes exactly one value from `bytes`, requiring its type tag to be `expected`.
    ///
    /// The tag is checked before any of the payload is read.
    pub fn decode_as(bytes: &[u8], expected: &SType) -> Result<Self, Error> {
        let cfg = Config::default();
        let mut buf = bytes;
        let tpe = SType::read_cfg(&mut buf, &cfg)?;
        if tpe != *expected {
            debug!(expected = %expected, found = %tpe, "unexpected type");
            return Err(Error::TypeMismatch {
                expected: expected.name(),
                found: tpe.name(),
            });
        }
        data::decode(buf, &tpe, &cfg)
    }
}
