//! Value payload serialization.
//!
//! A payload is written without its type; the reader must already know the [SType]. Integers wider
//! than a byte are zigzag varints, collections are a varint count followed by their elements, and
//! pairs are simply their two payloads back to back. `Coll[Boolean]` packs its elements into bits,
//! least-significant bit first.

use crate::{
    bigint::BigInt256,
    group::GroupElement,
    sigma::SigmaProp,
    stype::{PrimKind, SType},
    value::{Coll, Value},
    AvlTreeData,
};
use bytes::{Buf, BufMut};
use sigma_codec::{
    util::{at_least, bounded_capacity},
    varint, Config, EncodeSize, Error, Read, ReadExt, Write,
};

/// Writes the payload of `value`.
pub fn write(value: &Value, buf: &mut impl BufMut) {
    match value {
        Value::Boolean(value) => value.write(buf),
        Value::Byte(value) => value.write(buf),
        Value::Short(value) => varint::write_signed(*value, buf),
        Value::Int(value) => varint::write_signed(*value, buf),
        Value::Long(value) => varint::write_signed(*value, buf),
        Value::BigInt(value) => value.write(buf),
        Value::GroupElement(value) => value.write(buf),
        Value::SigmaProp(value) => value.write(buf),
        Value::AvlTree(value) => value.write(buf),
        Value::Coll(coll) => {
            varint::write_len(coll.len(), buf);
            if *coll.elem_type() == SType::BOOLEAN {
                write_bits(coll, buf);
            } else {
                for item in coll {
                    write(item, buf);
                }
            }
        }
        Value::Pair(first, second) => {
            write(first, buf);
            write(second, buf);
        }
    }
}

/// Returns the exact number of bytes [write] produces for `value`.
pub fn size(value: &Value) -> usize {
    match value {
        Value::Boolean(_) | Value::Byte(_) => 1,
        Value::Short(value) => varint::size_signed(*value),
        Value::Int(value) => varint::size_signed(*value),
        Value::Long(value) => varint::size_signed(*value),
        Value::BigInt(value) => value.encode_size(),
        Value::GroupElement(value) => value.encode_size(),
        Value::SigmaProp(value) => value.encode_size(),
        Value::AvlTree(value) => value.encode_size(),
        Value::Coll(coll) => {
            let items = if *coll.elem_type() == SType::BOOLEAN {
                coll.len().div_ceil(8)
            } else {
                coll.iter().map(size).sum()
            };
            varint::size_len(coll.len()) + items
        }
        Value::Pair(first, second) => size(first) + size(second),
    }
}

/// Reads the payload of a value of type `tpe`.
pub fn read(buf: &mut impl Buf, tpe: &SType, cfg: &Config) -> Result<Value, Error> {
    match tpe {
        SType::Prim(kind) => read_prim(buf, *kind, cfg),
        SType::Coll(elem) => {
            let len = varint::read_len(buf)?;
            cfg.check_items(len)?;
            let items = match elem.as_ref() {
                SType::Prim(PrimKind::Boolean) => read_bits(buf, len)?,
                SType::Prim(PrimKind::Byte) => {
                    at_least(buf, len)?;
                    (0..len).map(|_| Value::Byte(buf.get_i8())).collect()
                }
                elem => {
                    let mut items = Vec::with_capacity(bounded_capacity(buf, len, 1));
                    for _ in 0..len {
                        items.push(read(buf, elem, cfg)?);
                    }
                    items
                }
            };
            Ok(Value::Coll(Coll::new_unchecked(elem.as_ref().clone(), items)))
        }
        SType::Pair(first, second) => {
            let first = read(buf, first, cfg)?;
            let second = read(buf, second, cfg)?;
            Ok(Value::Pair(Box::new(first), Box::new(second)))
        }
    }
}

/// Reads the payload of a value of type `tpe`, ensuring the buffer is fully consumed.
pub fn decode(mut buf: impl Buf, tpe: &SType, cfg: &Config) -> Result<Value, Error> {
    let value = read(&mut buf, tpe, cfg)?;
    let remaining = buf.remaining();
    if remaining > 0 {
        return Err(Error::ExtraData(remaining));
    }
    Ok(value)
}

fn read_prim(buf: &mut impl Buf, kind: PrimKind, cfg: &Config) -> Result<Value, Error> {
    Ok(match kind {
        PrimKind::Boolean => Value::Boolean(bool::read(buf)?),
        PrimKind::Byte => Value::Byte(i8::read(buf)?),
        PrimKind::Short => Value::Short(varint::read_signed(buf)?),
        PrimKind::Int => Value::Int(varint::read_signed(buf)?),
        PrimKind::Long => Value::Long(varint::read_signed(buf)?),
        PrimKind::BigInt => Value::BigInt(BigInt256::read(buf)?),
        PrimKind::GroupElement => Value::GroupElement(GroupElement::read(buf)?),
        PrimKind::SigmaProp => Value::SigmaProp(SigmaProp::read_cfg(buf, cfg)?),
        PrimKind::AvlTree => Value::AvlTree(AvlTreeData::read(buf)?),
    })
}

fn write_bits(coll: &Coll, buf: &mut impl BufMut) {
    for chunk in coll.items().chunks(8) {
        let mut byte = 0u8;
        for (i, item) in chunk.iter().enumerate() {
            if item.as_bool() == Some(true) {
                byte |= 1 << i;
            }
        }
        buf.put_u8(byte);
    }
}

fn read_bits(buf: &mut impl Buf, len: usize) -> Result<Vec<Value>, Error> {
    let bytes = len.div_ceil(8);
    at_least(buf, bytes)?;
    let mut items = Vec::with_capacity(len);
    for i in 0..bytes {
        let byte = buf.get_u8();
        let bits = (len - i * 8).min(8);
        if bits < 8 && byte >> bits != 0 {
            return Err(Error::Invalid("Coll[Boolean]", "non-zero padding bits"));
        }
        items.extend((0..bits).map(|bit| Value::Boolean(byte & (1 << bit) != 0)));
    }
    Ok(items)
}
