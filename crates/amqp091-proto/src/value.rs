//! `FieldValue`: the tagged value grammar shared by field tables and field
//! arrays.
//!
//! Every value is preceded on the wire by a single tag octet identifying its
//! type. Encoding always emits the canonical tag for a given Rust variant;
//! decoding accepts the small set of historical aliases the corpus exercises
//! (`U` as well as `s`, `L` as well as `l`).

use bytes::BufMut;

use crate::error::{ProtocolError, Result};
use crate::primitive::{self, Timestamp};
use crate::table::FieldTable;

/// One tagged value inside a field table or field array.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// `t` — boolean.
    Boolean(bool),
    /// `b` — signed 8-bit integer.
    ShortShortInt(i8),
    /// `B` — unsigned 8-bit integer.
    ShortShortUint(u8),
    /// `s` (encode) / `U` (decode alias) — signed 16-bit integer.
    ShortInt(i16),
    /// `u` — unsigned 16-bit integer.
    ShortUint(u16),
    /// `I` — signed 32-bit integer.
    LongInt(i32),
    /// `i` — unsigned 32-bit integer.
    LongUint(u32),
    /// `l` (encode) / `L` (decode alias) — signed 64-bit integer.
    LongLongInt(i64),
    /// `f` — 32-bit IEEE float.
    Float(f32),
    /// `d` — 64-bit IEEE double.
    Double(f64),
    /// `D` — fixed-point decimal.
    Decimal(primitive::Decimal),
    /// `S` — long string (UTF-8).
    LongString(String),
    /// `A` — field array.
    Array(Vec<FieldValue>),
    /// `T` — timestamp.
    Timestamp(Timestamp),
    /// `F` — nested field table.
    Table(FieldTable),
    /// `V` — void/absent value.
    Void,
    /// `x` — opaque byte array (not necessarily UTF-8).
    ByteArray(Vec<u8>),
}

const TAG_BOOLEAN: u8 = b't';
const TAG_SHORT_SHORT_INT: u8 = b'b';
const TAG_SHORT_SHORT_UINT: u8 = b'B';
const TAG_SHORT_INT: u8 = b's';
const TAG_SHORT_INT_ALIAS: u8 = b'U';
const TAG_SHORT_UINT: u8 = b'u';
const TAG_LONG_INT: u8 = b'I';
const TAG_LONG_UINT: u8 = b'i';
const TAG_LONG_LONG_INT: u8 = b'l';
const TAG_LONG_LONG_INT_ALIAS: u8 = b'L';
const TAG_FLOAT: u8 = b'f';
const TAG_DOUBLE: u8 = b'd';
const TAG_DECIMAL: u8 = b'D';
const TAG_LONG_STRING: u8 = b'S';
const TAG_ARRAY: u8 = b'A';
const TAG_TIMESTAMP: u8 = b'T';
const TAG_TABLE: u8 = b'F';
const TAG_VOID: u8 = b'V';
const TAG_BYTE_ARRAY: u8 = b'x';

impl FieldValue {
    /// Encode the tag octet followed by the value's own representation.
    ///
    /// # Errors
    ///
    /// Propagates a nested [`FieldTable`]'s encode error (an oversize key).
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        match self {
            Self::Boolean(value) => {
                dst.put_u8(TAG_BOOLEAN);
                dst.put_u8(u8::from(*value));
            }
            Self::ShortShortInt(value) => {
                dst.put_u8(TAG_SHORT_SHORT_INT);
                primitive::encode_short_short_int(dst, *value);
            }
            Self::ShortShortUint(value) => {
                dst.put_u8(TAG_SHORT_SHORT_UINT);
                primitive::encode_octet(dst, *value);
            }
            Self::ShortInt(value) => {
                dst.put_u8(TAG_SHORT_INT);
                primitive::encode_short_int(dst, *value);
            }
            Self::ShortUint(value) => {
                dst.put_u8(TAG_SHORT_UINT);
                primitive::encode_short(dst, *value);
            }
            Self::LongInt(value) => {
                dst.put_u8(TAG_LONG_INT);
                primitive::encode_long_int(dst, *value);
            }
            Self::LongUint(value) => {
                dst.put_u8(TAG_LONG_UINT);
                primitive::encode_long(dst, *value);
            }
            Self::LongLongInt(value) => {
                dst.put_u8(TAG_LONG_LONG_INT);
                primitive::encode_long_long_int(dst, *value);
            }
            Self::Float(value) => {
                dst.put_u8(TAG_FLOAT);
                primitive::encode_float(dst, *value);
            }
            Self::Double(value) => {
                dst.put_u8(TAG_DOUBLE);
                primitive::encode_double(dst, *value);
            }
            Self::Decimal(value) => {
                dst.put_u8(TAG_DECIMAL);
                primitive::encode_decimal(dst, *value);
            }
            Self::LongString(value) => {
                dst.put_u8(TAG_LONG_STRING);
                primitive::encode_longstr(dst, value);
            }
            Self::Array(values) => {
                dst.put_u8(TAG_ARRAY);
                encode_array(dst, values)?;
            }
            Self::Timestamp(value) => {
                dst.put_u8(TAG_TIMESTAMP);
                primitive::encode_timestamp(dst, *value);
            }
            Self::Table(table) => {
                dst.put_u8(TAG_TABLE);
                table.encode(dst)?;
            }
            Self::Void => {
                dst.put_u8(TAG_VOID);
            }
            Self::ByteArray(bytes) => {
                dst.put_u8(TAG_BYTE_ARRAY);
                primitive::encode_longstr_bytes(dst, bytes);
            }
        }
        Ok(())
    }

    /// Decode a tag octet followed by its value, returning the new offset.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnknownFieldTag`] if the tag octet has no defined
    /// meaning; the buffer's own `need`-style errors if a value is truncated.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (tag, offset) = primitive::decode_octet(buf, offset)?;
        match tag {
            TAG_BOOLEAN => {
                let (byte, offset) = primitive::decode_octet(buf, offset)?;
                Ok((Self::Boolean(byte != 0), offset))
            }
            TAG_SHORT_SHORT_INT => {
                let (value, offset) = primitive::decode_short_short_int(buf, offset)?;
                Ok((Self::ShortShortInt(value), offset))
            }
            TAG_SHORT_SHORT_UINT => {
                let (value, offset) = primitive::decode_octet(buf, offset)?;
                Ok((Self::ShortShortUint(value), offset))
            }
            TAG_SHORT_INT | TAG_SHORT_INT_ALIAS => {
                let (value, offset) = primitive::decode_short_int(buf, offset)?;
                Ok((Self::ShortInt(value), offset))
            }
            TAG_SHORT_UINT => {
                let (value, offset) = primitive::decode_short(buf, offset)?;
                Ok((Self::ShortUint(value), offset))
            }
            TAG_LONG_INT => {
                let (value, offset) = primitive::decode_long_int(buf, offset)?;
                Ok((Self::LongInt(value), offset))
            }
            TAG_LONG_UINT => {
                let (value, offset) = primitive::decode_long(buf, offset)?;
                Ok((Self::LongUint(value), offset))
            }
            TAG_LONG_LONG_INT | TAG_LONG_LONG_INT_ALIAS => {
                let (value, offset) = primitive::decode_long_long_int(buf, offset)?;
                Ok((Self::LongLongInt(value), offset))
            }
            TAG_FLOAT => {
                let (value, offset) = primitive::decode_float(buf, offset)?;
                Ok((Self::Float(value), offset))
            }
            TAG_DOUBLE => {
                let (value, offset) = primitive::decode_double(buf, offset)?;
                Ok((Self::Double(value), offset))
            }
            TAG_DECIMAL => {
                let (value, offset) = primitive::decode_decimal(buf, offset)?;
                Ok((Self::Decimal(value), offset))
            }
            TAG_LONG_STRING => {
                let (value, offset) = primitive::decode_longstr(buf, offset)?;
                Ok((Self::LongString(value), offset))
            }
            TAG_ARRAY => {
                let (values, offset) = decode_array(buf, offset)?;
                Ok((Self::Array(values), offset))
            }
            TAG_TIMESTAMP => {
                let (value, offset) = primitive::decode_timestamp(buf, offset)?;
                Ok((Self::Timestamp(value), offset))
            }
            TAG_TABLE => {
                let (table, offset) = FieldTable::decode(buf, offset)?;
                Ok((Self::Table(table), offset))
            }
            TAG_VOID => Ok((Self::Void, offset)),
            TAG_BYTE_ARRAY => {
                let (bytes, offset) = primitive::decode_longstr_bytes(buf, offset)?;
                Ok((Self::ByteArray(bytes), offset))
            }
            other => Err(ProtocolError::UnknownFieldTag { tag: other }),
        }
    }
}

/// Encode a `field-array`: u32 byte length followed by tagged values.
///
/// # Errors
///
/// Propagates any element's encode error.
pub fn encode_array(dst: &mut impl BufMut, values: &[FieldValue]) -> Result<()> {
    let mut body = Vec::new();
    for value in values {
        value.encode(&mut body)?;
    }
    #[allow(clippy::cast_possible_truncation)]
    primitive::encode_long(dst, body.len() as u32);
    dst.put_slice(&body);
    Ok(())
}

/// Decode a `field-array`.
///
/// # Errors
///
/// [`ProtocolError::OversizeLength`] if the declared byte length runs past
/// the buffer; propagates any per-value decode error.
pub fn decode_array(buf: &[u8], offset: usize) -> Result<(Vec<FieldValue>, usize)> {
    let (len, offset) = primitive::decode_long(buf, offset)?;
    let len = len as usize;
    if buf.len().saturating_sub(offset) < len {
        return Err(ProtocolError::OversizeLength {
            declared: len,
            remaining: buf.len().saturating_sub(offset),
        });
    }
    let end = offset + len;
    let mut cursor = offset;
    let mut values = Vec::new();
    while cursor < end {
        let (value, next) = FieldValue::decode(buf, cursor)?;
        values.push(value);
        cursor = next;
    }
    Ok((values, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn boolean_round_trip() {
        let mut buf = Vec::new();
        FieldValue::Boolean(true).encode(&mut buf).unwrap();
        assert_eq!(buf, vec![b't', 0x01]);
        let (value, consumed) = FieldValue::decode(&buf, 0).unwrap();
        assert_eq!(value, FieldValue::Boolean(true));
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn short_int_decodes_both_tag_aliases() {
        let mut canonical = Vec::new();
        FieldValue::ShortInt(-7).encode(&mut canonical).unwrap();
        assert_eq!(canonical[0], b's');

        let mut alias = canonical.clone();
        alias[0] = b'U';
        let (value, _) = FieldValue::decode(&alias, 0).unwrap();
        assert_eq!(value, FieldValue::ShortInt(-7));
    }

    #[test]
    fn long_long_int_decodes_both_tag_aliases() {
        let mut canonical = Vec::new();
        FieldValue::LongLongInt(-99).encode(&mut canonical).unwrap();
        assert_eq!(canonical[0], b'l');

        let mut alias = canonical.clone();
        alias[0] = b'L';
        let (value, _) = FieldValue::decode(&alias, 0).unwrap();
        assert_eq!(value, FieldValue::LongLongInt(-99));
    }

    #[test]
    fn nested_table_round_trip() {
        let mut inner = BTreeMap::new();
        inner.insert("redelivered".to_owned(), FieldValue::Boolean(false));
        let table = FieldTable::from(inner);

        let mut buf = Vec::new();
        FieldValue::Table(table.clone()).encode(&mut buf).unwrap();
        let (value, consumed) = FieldValue::decode(&buf, 0).unwrap();
        assert_eq!(value, FieldValue::Table(table));
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let buf = [b'?', 0x00];
        let err = FieldValue::decode(&buf, 0).unwrap_err();
        assert_eq!(err, ProtocolError::UnknownFieldTag { tag: b'?' });
    }

    #[test]
    fn array_round_trip() {
        let values = vec![
            FieldValue::LongUint(1),
            FieldValue::LongString("two".to_owned()),
            FieldValue::Void,
        ];
        let mut buf = Vec::new();
        encode_array(&mut buf, &values).unwrap();
        let (decoded, consumed) = decode_array(&buf, 0).unwrap();
        assert_eq!(decoded, values);
        assert_eq!(consumed, buf.len());
    }
}
