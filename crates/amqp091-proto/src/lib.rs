//! Pure codec for the AMQP 0-9-1 wire protocol.
//!
//! This crate is the bidirectional, byte-exact serialization and
//! deserialization of every frame, class and method defined by AMQP 0-9-1,
//! plus the `Basic` class's content-header property table. It is synchronous
//! and has no knowledge of sockets, connection state machines, heartbeat
//! timers or authentication: callers feed it bytes and method objects, it
//! returns bytes or method objects.
//!
//! # Layout
//!
//! - [`primitive`] — the scalar field grammar (`octet`, `short`, `longstr`,
//!   bit-packing, ...).
//! - [`value`] and [`table`] — the tagged `field-table`/`field-array` value
//!   grammar.
//! - [`methods`] and [`method`] — the per-class method definitions and the
//!   `(class_id, method_id)` registry that ties them together.
//! - [`properties`] — the `Basic` class's sparse content-property codec.
//! - [`frame`] — the outer framing envelope: type, channel, length, payload,
//!   end marker, plus the protocol header and heartbeat pseudo-frames.
//!
//! [`marshal`] and [`unmarshal`] are the top-level facade: the only two
//! operations most callers need.

pub mod error;
pub mod frame;
pub mod method;
pub mod methods;
pub mod primitive;
pub mod properties;
pub mod table;
pub mod value;

use bytes::Bytes;

pub use error::{ProtocolError, Result};
pub use frame::Frame;
pub use method::{Method, MethodDescriptor};
pub use primitive::{Decimal, Timestamp};
pub use properties::BasicProperties;
pub use table::FieldTable;
pub use value::FieldValue;

/// Decode one frame from the start of `buf`.
///
/// Returns the number of bytes consumed, the channel the frame belongs to
/// (always 0 for a [`Frame::ProtocolHeader`]), and the decoded frame itself.
/// Never mutates `buf`; on error no partial frame is produced and the buffer
/// is left exactly as the caller provided it.
///
/// # Errors
///
/// [`ProtocolError::NeedMoreData`] if `buf` does not yet contain a whole
/// frame — not a failure, the caller should buffer more bytes and retry.
/// Any other [`ProtocolError`] variant indicates a malformed peer.
pub fn unmarshal(buf: &[u8]) -> Result<(usize, u16, Frame)> {
    let (frame, consumed) = Frame::decode(buf)?;
    let channel = frame.channel().unwrap_or(0);
    Ok((consumed, channel, frame))
}

/// Encode `frame` onto `channel`, including its envelope and end marker.
///
/// `channel` is ignored for [`Frame::ProtocolHeader`] (which precedes any
/// channel's existence) and has no effect on [`Frame::Heartbeat`], whose
/// channel for a heartbeat frame is always 0.
///
/// # Errors
///
/// [`ProtocolError::OversizeShortString`] if a string field carried by the
/// frame's method or content properties exceeds 255 UTF-8 bytes. No partial
/// output is returned on error.
pub fn marshal(frame: Frame, channel: u16) -> Result<Bytes> {
    let mut buf = Vec::new();
    frame.with_channel(channel).encode(&mut buf)?;
    Ok(Bytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::basic;

    #[test]
    fn protocol_header_scenario() {
        let buf = [0x41, 0x4D, 0x51, 0x50, 0x00, 0x00, 0x09, 0x01];
        let (consumed, channel, frame) = unmarshal(&buf).unwrap();
        assert_eq!(consumed, 8);
        assert_eq!(channel, 0);
        assert_eq!(frame, Frame::ProtocolHeader { major: 0, minor: 9, revision: 1 });
    }

    #[test]
    fn heartbeat_scenario() {
        let buf = [0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xCE];
        let (consumed, channel, frame) = unmarshal(&buf).unwrap();
        assert_eq!(consumed, 8);
        assert_eq!(channel, 0);
        assert_eq!(frame, Frame::Heartbeat);
    }

    #[test]
    fn basic_ack_scenario() {
        #[rustfmt::skip]
        let buf = [
            0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x0D,
            0x00, 0x3C, 0x00, 0x50,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
            0x00,
            0xCE,
        ];
        let (consumed, channel, frame) = unmarshal(&buf).unwrap();
        assert_eq!(consumed, 21);
        assert_eq!(channel, 1);
        assert_eq!(
            frame,
            Frame::Method {
                channel: 1,
                method: Method::BasicAck(basic::Ack { delivery_tag: 1, multiple: false }),
            }
        );
    }

    #[test]
    fn marshal_round_trips_through_unmarshal() {
        let frame = Frame::Method {
            channel: 0,
            method: Method::BasicAck(basic::Ack { delivery_tag: 7, multiple: true }),
        };
        let bytes = marshal(frame.clone(), 3).unwrap();
        let (consumed, channel, decoded) = unmarshal(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(channel, 3);
        assert_eq!(decoded, frame.with_channel(3));
    }

    #[test]
    fn marshal_ignores_channel_argument_for_protocol_header() {
        let bytes =
            marshal(Frame::ProtocolHeader { major: 0, minor: 9, revision: 1 }, 42).unwrap();
        assert_eq!(&bytes[..], b"AMQP\x00\x00\x09\x01");
    }

    #[test]
    fn need_more_data_is_not_a_hard_failure() {
        let partial = [0x01, 0x00, 0x01, 0x00, 0x00];
        let err = unmarshal(&partial).unwrap_err();
        assert!(matches!(err, ProtocolError::NeedMoreData { .. }));
    }
}
