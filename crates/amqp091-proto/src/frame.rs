//! The framing envelope: the outermost layer of the wire protocol, wrapping
//! methods, content headers, content bodies and heartbeats in a uniform
//! `type + channel + length + payload + frame-end` shell — plus the one
//! exception, the protocol header, which precedes any framing at all.

use bytes::{Bytes, BufMut};

use crate::error::{ProtocolError, Result};
use crate::method::Method;
use crate::primitive;
use crate::properties::BasicProperties;

/// `AMQP\0\0\x09\x01` — the literal byte sequence a client sends before any
/// framing begins, announcing protocol AMQP 0-9-1.
pub const PROTOCOL_HEADER_PREFIX: &[u8; 4] = b"AMQP";

/// Method frame type.
pub const FRAME_TYPE_METHOD: u8 = 1;
/// Content-header frame type.
pub const FRAME_TYPE_CONTENT_HEADER: u8 = 2;
/// Content-body frame type.
pub const FRAME_TYPE_CONTENT_BODY: u8 = 3;
/// Heartbeat frame type.
pub const FRAME_TYPE_HEARTBEAT: u8 = 8;

/// Marks the end of every frame (but not the protocol header).
pub const FRAME_END: u8 = 0xCE;

/// Bytes of envelope overhead around a frame's payload: 1 (type) + 2
/// (channel) + 4 (length) + 1 (end marker).
const FRAME_OVERHEAD: usize = 8;

/// A fully decoded unit of the wire protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// The pseudo-frame a client sends before any channel exists, proposing
    /// a protocol version.
    ProtocolHeader {
        /// Protocol major version (0 for every published AMQP 0-9-1 peer).
        major: u8,
        /// Protocol minor version.
        minor: u8,
        /// Protocol revision.
        revision: u8,
    },
    /// A method invocation on a channel (0 for connection-level methods).
    Method {
        /// Channel the method applies to.
        channel: u16,
        /// The decoded method and its arguments.
        method: Method,
    },
    /// The header that precedes a message body, carrying its total size
    /// and content properties. Only `Basic` (class id 60) is implemented
    /// here; `class_id` is recorded for round-tripping but no other content
    /// class is modeled.
    ContentHeader {
        /// Channel this content belongs to.
        channel: u16,
        /// Class id of the content-bearing method (60 for `Basic`).
        class_id: u16,
        /// Total size of the body across all following content-body frames.
        body_size: u64,
        /// Decoded `Basic` content properties.
        properties: BasicProperties,
    },
    /// A chunk of a message body. A single message may be split across
    /// multiple content-body frames; the codec does not reassemble them.
    ContentBody {
        /// Channel this content belongs to.
        channel: u16,
        /// Raw body bytes for this chunk.
        data: Bytes,
    },
    /// A keepalive frame carrying no payload.
    Heartbeat,
}

impl Frame {
    /// Encode this frame, including its envelope and end marker.
    ///
    /// # Errors
    ///
    /// Propagates any field-level encode error (e.g. an oversize shortstr)
    /// from the method or content-properties it carries.
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        match self {
            Self::ProtocolHeader { major, minor, revision } => {
                dst.put_slice(PROTOCOL_HEADER_PREFIX);
                dst.put_u8(0);
                dst.put_u8(*major);
                dst.put_u8(*minor);
                dst.put_u8(*revision);
            }
            Self::Method { channel, method } => {
                let mut payload = Vec::new();
                let (class_id, method_id) = method.id();
                primitive::encode_short(&mut payload, class_id);
                primitive::encode_short(&mut payload, method_id);
                method.encode(&mut payload)?;
                encode_envelope(dst, FRAME_TYPE_METHOD, *channel, &payload);
            }
            Self::ContentHeader { channel, class_id, body_size, properties } => {
                let mut payload = Vec::new();
                primitive::encode_short(&mut payload, *class_id);
                primitive::encode_short(&mut payload, 0); // weight, always 0
                primitive::encode_longlong(&mut payload, *body_size);
                properties.encode(&mut payload)?;
                encode_envelope(dst, FRAME_TYPE_CONTENT_HEADER, *channel, &payload);
            }
            Self::ContentBody { channel, data } => {
                encode_envelope(dst, FRAME_TYPE_CONTENT_BODY, *channel, data);
            }
            Self::Heartbeat => {
                encode_envelope(dst, FRAME_TYPE_HEARTBEAT, 0, &[]);
            }
        }
        Ok(())
    }

    /// The channel this frame belongs to, or `None` for the protocol header
    /// (which precedes any channel's existence).
    #[must_use]
    pub fn channel(&self) -> Option<u16> {
        match self {
            Self::ProtocolHeader { .. } => None,
            Self::Method { channel, .. }
            | Self::ContentHeader { channel, .. }
            | Self::ContentBody { channel, .. } => Some(*channel),
            Self::Heartbeat => Some(0),
        }
    }

    /// Return this frame with its channel field rewritten to `channel`.
    ///
    /// A no-op for [`Self::ProtocolHeader`] (which has no channel) and for
    /// [`Self::Heartbeat`] (whose channel is always 0).
    #[must_use]
    pub fn with_channel(mut self, channel: u16) -> Self {
        match &mut self {
            Self::Method { channel: c, .. }
            | Self::ContentHeader { channel: c, .. }
            | Self::ContentBody { channel: c, .. } => *c = channel,
            Self::ProtocolHeader { .. } | Self::Heartbeat => {}
        }
        self
    }

    /// Decode one frame from the start of `buf`, returning it along with
    /// the number of bytes consumed.
    ///
    /// Recognizes the protocol header by its literal `AMQP` prefix;
    /// everything else is decoded as a standard envelope.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::NeedMoreData`] if `buf` does not yet hold a whole
    /// frame (not fatal — read more and retry). Any other variant indicates
    /// a malformed peer.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        if buf.starts_with(PROTOCOL_HEADER_PREFIX) {
            return decode_protocol_header(buf);
        }
        decode_envelope(buf)
    }
}

fn encode_envelope(dst: &mut impl BufMut, frame_type: u8, channel: u16, payload: &[u8]) {
    primitive::encode_octet(dst, frame_type);
    primitive::encode_short(dst, channel);
    #[allow(clippy::cast_possible_truncation)]
    primitive::encode_long(dst, payload.len() as u32);
    dst.put_slice(payload);
    primitive::encode_octet(dst, FRAME_END);
}

fn decode_protocol_header(buf: &[u8]) -> Result<(Frame, usize)> {
    const HEADER_LEN: usize = 8;
    if buf.len() < HEADER_LEN {
        return Err(ProtocolError::NeedMoreData { needed: HEADER_LEN });
    }
    let tail = [buf[4], buf[5], buf[6], buf[7]];
    if tail[0] != 0 {
        return Err(ProtocolError::InvalidProtocolHeader { found: tail });
    }
    Ok((
        Frame::ProtocolHeader { major: tail[1], minor: tail[2], revision: tail[3] },
        HEADER_LEN,
    ))
}

fn decode_envelope(buf: &[u8]) -> Result<(Frame, usize)> {
    const PREFIX_LEN: usize = 7; // type(1) + channel(2) + length(4)
    if buf.len() < PREFIX_LEN {
        return Err(ProtocolError::NeedMoreData { needed: FRAME_OVERHEAD });
    }

    let (frame_type, offset) = primitive::decode_octet(buf, 0)?;
    let (channel, offset) = primitive::decode_short(buf, offset)?;
    let (length, offset) = primitive::decode_long(buf, offset)?;
    let length = length as usize;

    let total = offset + length + 1;
    if buf.len() < total {
        return Err(ProtocolError::NeedMoreData { needed: total });
    }

    let payload = &buf[offset..offset + length];
    let end_marker = buf[offset + length];
    if end_marker != FRAME_END {
        return Err(ProtocolError::InvalidFrameEnd { found: end_marker });
    }

    let frame = match frame_type {
        FRAME_TYPE_METHOD => {
            let (class_id, method_offset) = primitive::decode_short(payload, 0)?;
            let (method_id, method_offset) = primitive::decode_short(payload, method_offset)?;
            let (method, _) = Method::decode(class_id, method_id, payload, method_offset)?;
            Frame::Method { channel, method }
        }
        FRAME_TYPE_CONTENT_HEADER => {
            let (class_id, header_offset) = primitive::decode_short(payload, 0)?;
            let (_weight, header_offset) = primitive::decode_short(payload, header_offset)?;
            let (body_size, header_offset) = primitive::decode_longlong(payload, header_offset)?;
            let (properties, _) = BasicProperties::decode(payload, header_offset)?;
            Frame::ContentHeader { channel, class_id, body_size, properties }
        }
        FRAME_TYPE_CONTENT_BODY => {
            Frame::ContentBody { channel, data: Bytes::copy_from_slice(payload) }
        }
        FRAME_TYPE_HEARTBEAT => {
            if channel != 0 {
                return Err(ProtocolError::HeartbeatChannelNonZero { channel });
            }
            Frame::Heartbeat
        }
        other => return Err(ProtocolError::UnknownFrameType { found: other }),
    };

    Ok((frame, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::basic;

    #[test]
    fn protocol_header_round_trip() {
        let frame = Frame::ProtocolHeader { major: 0, minor: 9, revision: 1 };
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        assert_eq!(buf, b"AMQP\x00\x00\x09\x01");
        let (decoded, consumed) = Frame::decode(&buf).unwrap();
        assert_eq!(decoded, frame);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn heartbeat_round_trip() {
        let frame = Frame::Heartbeat;
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![FRAME_TYPE_HEARTBEAT, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, FRAME_END]);
        let (decoded, consumed) = Frame::decode(&buf).unwrap();
        assert_eq!(decoded, frame);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn heartbeat_rejects_non_zero_channel() {
        let mut buf = Vec::new();
        encode_envelope(&mut buf, FRAME_TYPE_HEARTBEAT, 7, &[]);
        let err = Frame::decode(&buf).unwrap_err();
        assert_eq!(err, ProtocolError::HeartbeatChannelNonZero { channel: 7 });
    }

    #[test]
    fn basic_ack_method_frame_round_trip() {
        let frame = Frame::Method {
            channel: 1,
            method: Method::BasicAck(basic::Ack { delivery_tag: 42, multiple: false }),
        };
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        let (decoded, consumed) = Frame::decode(&buf).unwrap();
        assert_eq!(decoded, frame);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn truncated_frame_requests_more_data() {
        let frame = Frame::Method {
            channel: 1,
            method: Method::BasicAck(basic::Ack { delivery_tag: 42, multiple: false }),
        };
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        buf.truncate(buf.len() - 1);
        let err = Frame::decode(&buf).unwrap_err();
        assert!(matches!(err, ProtocolError::NeedMoreData { .. }));
    }

    #[test]
    fn invalid_frame_end_is_rejected() {
        let frame = Frame::Method {
            channel: 1,
            method: Method::BasicAck(basic::Ack { delivery_tag: 42, multiple: false }),
        };
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        let last = buf.len() - 1;
        buf[last] = 0x00;
        let err = Frame::decode(&buf).unwrap_err();
        assert_eq!(err, ProtocolError::InvalidFrameEnd { found: 0x00 });
    }

    #[test]
    fn content_header_round_trip() {
        let properties = BasicProperties {
            content_type: Some("application/json".to_owned()),
            ..Default::default()
        };
        let frame = Frame::ContentHeader {
            channel: 1,
            class_id: basic::CLASS_ID,
            body_size: 11,
            properties,
        };
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        let (decoded, consumed) = Frame::decode(&buf).unwrap();
        assert_eq!(decoded, frame);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn content_body_round_trip() {
        let frame = Frame::ContentBody { channel: 1, data: Bytes::from_static(b"hello world") };
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        let (decoded, consumed) = Frame::decode(&buf).unwrap();
        assert_eq!(decoded, frame);
        assert_eq!(consumed, buf.len());
    }
}
