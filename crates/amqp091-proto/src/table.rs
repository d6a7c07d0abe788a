//! `FieldTable`: the `field-table` wire type, a length-prefixed sequence of
//! `(shortstr name, tagged value)` pairs.
//!
//! The in-memory representation is a `BTreeMap` rather than an
//! insertion-ordered map: table order carries no semantic meaning on the
//! wire, so lexical key order gives deterministic, diffable encode output
//! instead of preserving an arbitrary peer's insertion order.

use std::collections::BTreeMap;

use bytes::BufMut;

use crate::error::{ProtocolError, Result};
use crate::primitive;
use crate::value::FieldValue;

/// A field table: named, tagged values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldTable(BTreeMap<String, FieldValue>);

impl FieldTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Insert or replace a field, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.0.insert(name.into(), value)
    }

    /// Iterate over entries in lexical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encode as a `field-table`: u32 byte length followed by
    /// `(shortstr, tagged value)` pairs in lexical key order.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::OversizeShortString`] if a key exceeds 255 UTF-8
    /// bytes; propagates any nested value's encode error.
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        let mut body = Vec::new();
        for (name, value) in &self.0 {
            primitive::encode_shortstr(&mut body, name)?;
            value.encode(&mut body)?;
        }
        #[allow(clippy::cast_possible_truncation)]
        primitive::encode_long(dst, body.len() as u32);
        dst.put_slice(&body);
        Ok(())
    }

    /// Decode a `field-table`.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::OversizeLength`] if the declared byte length runs
    /// past the buffer; propagates any per-entry decode error.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
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
        let mut table = BTreeMap::new();
        while cursor < end {
            let (name, next) = primitive::decode_shortstr(buf, cursor)?;
            let (value, next) = FieldValue::decode(buf, next)?;
            table.insert(name, value);
            cursor = next;
        }
        Ok((Self(table), end))
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldTable {
    fn from(map: BTreeMap<String, FieldValue>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, FieldValue)> for FieldTable {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_round_trips_to_four_zero_bytes() {
        let table = FieldTable::new();
        let mut buf = Vec::new();
        table.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0x00, 0x00, 0x00, 0x00]);
        let (decoded, consumed) = FieldTable::decode(&buf, 0).unwrap();
        assert_eq!(decoded, table);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn table_round_trip_preserves_values_in_lexical_order() {
        let mut table = FieldTable::new();
        table.insert("copyright", FieldValue::LongString("pivotal".to_owned()));
        table.insert("capabilities", FieldValue::Table(FieldTable::new()));

        let mut buf = Vec::new();
        table.encode(&mut buf).unwrap();
        let (decoded, consumed) = FieldTable::decode(&buf, 0).unwrap();
        assert_eq!(decoded, table);
        assert_eq!(consumed, buf.len());

        let names: Vec<&str> = decoded.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["capabilities", "copyright"]);
    }

    #[test]
    fn oversize_declared_length_is_rejected() {
        let buf = [0x00, 0x00, 0x00, 0x10];
        let err = FieldTable::decode(&buf, 0).unwrap_err();
        assert_eq!(err, ProtocolError::OversizeLength { declared: 16, remaining: 0 });
    }
}
