//! `Basic` content-properties codec: the 14-field property list carried by
//! every content-header frame for `class_id = 60`.
//!
//! Each property is independently optional. Presence is recorded in a
//! sparse, chained bitmap (the "property flags") rather than per-field
//! sentinel values: one or more 16-bit words, high-to-low bit order, bit 0
//! of each word a continuation flag meaning "another flags word follows".

use bytes::BufMut;

use crate::error::Result;
use crate::primitive::{self, Timestamp};
use crate::table::FieldTable;

const FLAG_CONTINUATION: u16 = 0x0001;

/// The 14 properties `Basic.Publish`/`Basic.Deliver`/etc. carry alongside a
/// message body, in their fixed wire declaration order. Every field is
/// optional; encoding emits only the ones that are `Some`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicProperties {
    /// MIME content type, e.g. `"application/json"`.
    pub content_type: Option<String>,
    /// MIME content encoding, e.g. `"gzip"`.
    pub content_encoding: Option<String>,
    /// Application-specific message headers.
    pub headers: Option<FieldTable>,
    /// Non-persistent (1) or persistent (2); any other value is
    /// application-defined.
    pub delivery_mode: Option<u8>,
    /// Message priority, 0-9.
    pub priority: Option<u8>,
    /// Application correlation identifier, e.g. for RPC.
    pub correlation_id: Option<String>,
    /// Address to reply to.
    pub reply_to: Option<String>,
    /// Message expiration spec (milliseconds, as a decimal string per the
    /// AMQP convention).
    pub expiration: Option<String>,
    /// Application message identifier.
    pub message_id: Option<String>,
    /// Application-supplied timestamp.
    pub timestamp: Option<Timestamp>,
    /// Message type name.
    pub message_type: Option<String>,
    /// Creating user id; servers may validate this against the connection's
    /// authenticated identity.
    pub user_id: Option<String>,
    /// Creating application id.
    pub app_id: Option<String>,
    /// Deprecated cluster identifier, kept for wire compatibility.
    pub cluster_id: Option<String>,
}

/// One bit position per property, matching the order they are declared in
/// `BasicProperties` and the high-to-low bit layout of the first (and only,
/// for this class) flags word.
const PROPERTY_BITS: usize = 14;

impl BasicProperties {
    /// Encode the property-flags word(s) followed by the present
    /// properties' values, in declaration order.
    ///
    /// # Errors
    ///
    /// [`crate::error::ProtocolError::OversizeShortString`] if a string
    /// property exceeds 255 UTF-8 bytes.
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        let presence = [
            self.content_type.is_some(),
            self.content_encoding.is_some(),
            self.headers.is_some(),
            self.delivery_mode.is_some(),
            self.priority.is_some(),
            self.correlation_id.is_some(),
            self.reply_to.is_some(),
            self.expiration.is_some(),
            self.message_id.is_some(),
            self.timestamp.is_some(),
            self.message_type.is_some(),
            self.user_id.is_some(),
            self.app_id.is_some(),
            self.cluster_id.is_some(),
        ];
        encode_flags(dst, &presence);

        if let Some(value) = &self.content_type {
            primitive::encode_shortstr(dst, value)?;
        }
        if let Some(value) = &self.content_encoding {
            primitive::encode_shortstr(dst, value)?;
        }
        if let Some(value) = &self.headers {
            value.encode(dst)?;
        }
        if let Some(value) = self.delivery_mode {
            primitive::encode_octet(dst, value);
        }
        if let Some(value) = self.priority {
            primitive::encode_octet(dst, value);
        }
        if let Some(value) = &self.correlation_id {
            primitive::encode_shortstr(dst, value)?;
        }
        if let Some(value) = &self.reply_to {
            primitive::encode_shortstr(dst, value)?;
        }
        if let Some(value) = &self.expiration {
            primitive::encode_shortstr(dst, value)?;
        }
        if let Some(value) = &self.message_id {
            primitive::encode_shortstr(dst, value)?;
        }
        if let Some(value) = self.timestamp {
            primitive::encode_timestamp(dst, value);
        }
        if let Some(value) = &self.message_type {
            primitive::encode_shortstr(dst, value)?;
        }
        if let Some(value) = &self.user_id {
            primitive::encode_shortstr(dst, value)?;
        }
        if let Some(value) = &self.app_id {
            primitive::encode_shortstr(dst, value)?;
        }
        if let Some(value) = &self.cluster_id {
            primitive::encode_shortstr(dst, value)?;
        }
        Ok(())
    }

    /// Decode property flags followed by the properties they mark present.
    ///
    /// # Errors
    ///
    /// Propagates any field-level decode error (e.g. truncated buffer,
    /// invalid UTF-8 in a string property).
    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (presence, mut offset) = decode_flags(buf, offset)?;
        let mut properties = Self::default();

        if presence[0] {
            let (value, next) = primitive::decode_shortstr(buf, offset)?;
            properties.content_type = Some(value);
            offset = next;
        }
        if presence[1] {
            let (value, next) = primitive::decode_shortstr(buf, offset)?;
            properties.content_encoding = Some(value);
            offset = next;
        }
        if presence[2] {
            let (value, next) = FieldTable::decode(buf, offset)?;
            properties.headers = Some(value);
            offset = next;
        }
        if presence[3] {
            let (value, next) = primitive::decode_octet(buf, offset)?;
            properties.delivery_mode = Some(value);
            offset = next;
        }
        if presence[4] {
            let (value, next) = primitive::decode_octet(buf, offset)?;
            properties.priority = Some(value);
            offset = next;
        }
        if presence[5] {
            let (value, next) = primitive::decode_shortstr(buf, offset)?;
            properties.correlation_id = Some(value);
            offset = next;
        }
        if presence[6] {
            let (value, next) = primitive::decode_shortstr(buf, offset)?;
            properties.reply_to = Some(value);
            offset = next;
        }
        if presence[7] {
            let (value, next) = primitive::decode_shortstr(buf, offset)?;
            properties.expiration = Some(value);
            offset = next;
        }
        if presence[8] {
            let (value, next) = primitive::decode_shortstr(buf, offset)?;
            properties.message_id = Some(value);
            offset = next;
        }
        if presence[9] {
            let (value, next) = primitive::decode_timestamp(buf, offset)?;
            properties.timestamp = Some(value);
            offset = next;
        }
        if presence[10] {
            let (value, next) = primitive::decode_shortstr(buf, offset)?;
            properties.message_type = Some(value);
            offset = next;
        }
        if presence[11] {
            let (value, next) = primitive::decode_shortstr(buf, offset)?;
            properties.user_id = Some(value);
            offset = next;
        }
        if presence[12] {
            let (value, next) = primitive::decode_shortstr(buf, offset)?;
            properties.app_id = Some(value);
            offset = next;
        }
        if presence[13] {
            let (value, next) = primitive::decode_shortstr(buf, offset)?;
            properties.cluster_id = Some(value);
            offset = next;
        }

        Ok((properties, offset))
    }
}

/// Encode a presence bitmap as one or more chained 16-bit flag words.
///
/// Each word reserves bit 0 as a continuation flag (more words follow) and
/// packs presence bits from bit 15 down to bit 1. For `BasicProperties`'s 14
/// properties a single word always suffices, but the chaining logic is
/// written generically so it extends to a content class with more than 15
/// properties without changing shape.
fn encode_flags(dst: &mut impl BufMut, presence: &[bool]) {
    let mut chunks = presence.chunks(15).peekable();
    while let Some(chunk) = chunks.next() {
        let mut word: u16 = 0;
        for (i, &set) in chunk.iter().enumerate() {
            if set {
                word |= 1 << (15 - i);
            }
        }
        if chunks.peek().is_some() {
            word |= FLAG_CONTINUATION;
        }
        primitive::encode_short(dst, word);
    }
}

/// Decode a chained presence bitmap back into one bool per property.
fn decode_flags(buf: &[u8], offset: usize) -> Result<([bool; PROPERTY_BITS], usize)> {
    let mut presence = [false; PROPERTY_BITS];
    let mut offset = offset;
    let mut filled = 0;
    loop {
        let (word, next) = primitive::decode_short(buf, offset)?;
        offset = next;
        for i in 0..15 {
            if filled >= PROPERTY_BITS {
                break;
            }
            presence[filled] = word & (1 << (15 - i)) != 0;
            filled += 1;
        }
        if word & FLAG_CONTINUATION == 0 {
            break;
        }
    }
    Ok((presence, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_properties_encode_to_a_single_zero_word() {
        let properties = BasicProperties::default();
        let mut buf = Vec::new();
        properties.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0x00, 0x00]);
    }

    #[test]
    fn round_trips_a_realistic_json_message() {
        let properties = BasicProperties {
            content_type: Some("application/json".to_owned()),
            delivery_mode: Some(2),
            correlation_id: Some("abc-123".to_owned()),
            timestamp: Some(Timestamp::from(1_700_000_000)),
            ..Default::default()
        };
        let mut buf = Vec::new();
        properties.encode(&mut buf).unwrap();
        let (decoded, consumed) = BasicProperties::decode(&buf, 0).unwrap();
        assert_eq!(decoded, properties);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn flags_word_sets_high_bit_for_content_type() {
        let properties = BasicProperties {
            content_type: Some("text/plain".to_owned()),
            ..Default::default()
        };
        let mut buf = Vec::new();
        properties.encode(&mut buf).unwrap();
        let flags = u16::from_be_bytes([buf[0], buf[1]]);
        assert_eq!(flags, 0b1000_0000_0000_0000);
    }

    #[test]
    fn all_properties_round_trip() {
        let mut headers = FieldTable::new();
        headers.insert("x-retry", crate::value::FieldValue::LongUint(3));

        let properties = BasicProperties {
            content_type: Some("application/json".to_owned()),
            content_encoding: Some("utf-8".to_owned()),
            headers: Some(headers),
            delivery_mode: Some(2),
            priority: Some(5),
            correlation_id: Some("corr-1".to_owned()),
            reply_to: Some("rpc.replies".to_owned()),
            expiration: Some("60000".to_owned()),
            message_id: Some("msg-1".to_owned()),
            timestamp: Some(Timestamp::from(1_234_567_890)),
            message_type: Some("order.created".to_owned()),
            user_id: Some("guest".to_owned()),
            app_id: Some("orders-service".to_owned()),
            cluster_id: Some("legacy".to_owned()),
        };
        let mut buf = Vec::new();
        properties.encode(&mut buf).unwrap();
        let (decoded, consumed) = BasicProperties::decode(&buf, 0).unwrap();
        assert_eq!(decoded, properties);
        assert_eq!(consumed, buf.len());
    }
}
