//! Property-based tests for frame and method encoding/decoding.
//!
//! These verify round-trip correctness across generated inputs, not just
//! the fixed scenarios exercised by the unit tests scattered through `src/`.

use amqp091_proto::methods::basic;
use amqp091_proto::methods::connection;
use amqp091_proto::{unmarshal, Frame, Method};
use bytes::Bytes;
use proptest::prelude::*;

fn arbitrary_basic_ack() -> impl Strategy<Value = basic::Ack> {
    (any::<u64>(), any::<bool>())
        .prop_map(|(delivery_tag, multiple)| basic::Ack { delivery_tag, multiple })
}

fn arbitrary_connection_close() -> impl Strategy<Value = connection::Close> {
    (
        any::<u16>(),
        "[a-zA-Z0-9 .-]{0,60}",
        any::<u16>(),
        any::<u16>(),
    )
        .prop_map(|(reply_code, reply_text, class_id, method_id)| connection::Close {
            reply_code,
            reply_text,
            class_id,
            method_id,
        })
}

fn arbitrary_channel() -> impl Strategy<Value = u16> {
    0_u16..=u16::MAX
}

proptest! {
    #[test]
    fn basic_ack_frame_round_trips(ack in arbitrary_basic_ack(), channel in arbitrary_channel()) {
        let frame = Frame::Method { channel, method: Method::BasicAck(ack) };
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        let (decoded, consumed) = Frame::decode(&buf).unwrap();
        prop_assert_eq!(decoded, frame);
        prop_assert_eq!(consumed, buf.len());
    }

    #[test]
    fn connection_close_frame_round_trips(close in arbitrary_connection_close(), channel in arbitrary_channel()) {
        let frame = Frame::Method { channel, method: Method::ConnectionClose(close) };
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        let (decoded, consumed) = Frame::decode(&buf).unwrap();
        prop_assert_eq!(decoded, frame);
        prop_assert_eq!(consumed, buf.len());
    }

    #[test]
    fn content_body_preserves_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..2048), channel in arbitrary_channel()) {
        let frame = Frame::ContentBody { channel, data: Bytes::from(data) };
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        let (decoded, consumed) = Frame::decode(&buf).unwrap();
        prop_assert_eq!(decoded, frame);
        prop_assert_eq!(consumed, buf.len());
    }

    #[test]
    fn unmarshal_reports_the_frames_own_channel(ack in arbitrary_basic_ack(), channel in arbitrary_channel()) {
        let frame = Frame::Method { channel, method: Method::BasicAck(ack) };
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        let (consumed, reported_channel, decoded) = unmarshal(&buf).unwrap();
        prop_assert_eq!(consumed, buf.len());
        prop_assert_eq!(reported_channel, channel);
        prop_assert_eq!(decoded, frame);
    }

    #[test]
    fn truncating_any_suffix_never_yields_a_wrong_frame(ack in arbitrary_basic_ack(), channel in arbitrary_channel(), drop in 1_usize..=20) {
        let frame = Frame::Method { channel, method: Method::BasicAck(ack) };
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        let cut = buf.len().saturating_sub(drop);
        let truncated = &buf[..cut];
        // A truncated buffer must either report NeedMoreData or, in the rare
        // case the cut lands on a complete inner frame, decode to something
        // that is never silently equal to the original larger frame.
        match Frame::decode(truncated) {
            Ok((decoded, consumed)) => {
                prop_assert!(consumed <= truncated.len());
                prop_assert_ne!((decoded, consumed), (frame.clone(), buf.len()));
            }
            Err(err) => {
                prop_assert!(matches!(err, amqp091_proto::ProtocolError::NeedMoreData { .. }));
            }
        }
    }
}

#[test]
fn scenario_protocol_header() {
    let buf = [0x41, 0x4D, 0x51, 0x50, 0x00, 0x00, 0x09, 0x01];
    let (consumed, channel, frame) = unmarshal(&buf).unwrap();
    assert_eq!(consumed, 8);
    assert_eq!(channel, 0);
    assert_eq!(frame, Frame::ProtocolHeader { major: 0, minor: 9, revision: 1 });
}

#[test]
fn scenario_heartbeat() {
    let buf = [0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xCE];
    let (consumed, channel, frame) = unmarshal(&buf).unwrap();
    assert_eq!(consumed, 8);
    assert_eq!(channel, 0);
    assert_eq!(frame, Frame::Heartbeat);
}

#[test]
fn scenario_basic_consume() {
    let method = Method::BasicConsume(basic::Consume {
        ticket: 0,
        queue: "orders".to_owned(),
        consumer_tag: String::new(),
        no_local: false,
        no_ack: true,
        exclusive: false,
        nowait: false,
        arguments: Default::default(),
    });
    let frame = Frame::Method { channel: 1, method };
    let bytes = amqp091_proto::marshal(frame.clone(), 1).unwrap();
    let (consumed, channel, decoded) = unmarshal(&bytes).unwrap();
    assert_eq!(consumed, bytes.len());
    assert_eq!(channel, 1);
    assert_eq!(decoded, frame);
}

#[test]
fn scenario_connection_close() {
    let method = Method::ConnectionClose(connection::Close {
        reply_code: 320,
        reply_text: "CONNECTION_FORCED".to_owned(),
        class_id: 0,
        method_id: 0,
    });
    let frame = Frame::Method { channel: 0, method };
    let bytes = amqp091_proto::marshal(frame.clone(), 0).unwrap();
    let (consumed, channel, decoded) = unmarshal(&bytes).unwrap();
    assert_eq!(consumed, bytes.len());
    assert_eq!(channel, 0);
    assert_eq!(decoded, frame);
}

#[test]
fn scenario_content_header_with_several_properties() {
    use amqp091_proto::BasicProperties;

    let properties = BasicProperties {
        content_type: Some("application/json".to_owned()),
        content_encoding: Some("utf-8".to_owned()),
        delivery_mode: Some(2),
        priority: Some(0),
        correlation_id: None,
        reply_to: None,
        expiration: None,
        message_id: None,
        timestamp: Some(amqp091_proto::Timestamp::from(1_700_000_000)),
        message_type: None,
        user_id: None,
        app_id: None,
        cluster_id: None,
        headers: None,
    };
    let frame = Frame::ContentHeader { channel: 1, class_id: basic::CLASS_ID, body_size: 11, properties };
    let bytes = amqp091_proto::marshal(frame.clone(), 1).unwrap();
    let (consumed, channel, decoded) = unmarshal(&bytes).unwrap();
    assert_eq!(consumed, bytes.len());
    assert_eq!(channel, 1);
    assert_eq!(decoded, frame);
}

#[test]
fn incomplete_buffer_requests_more_data_rather_than_erroring_hard() {
    let method = Method::BasicAck(basic::Ack { delivery_tag: 1, multiple: false });
    let frame = Frame::Method { channel: 1, method };
    let bytes = amqp091_proto::marshal(frame, 1).unwrap();
    for cut in 1..bytes.len() {
        let partial = &bytes[..cut];
        match unmarshal(partial) {
            Err(amqp091_proto::ProtocolError::NeedMoreData { .. }) | Err(_) => {}
            Ok(_) => panic!("decoded a frame from a truncated buffer of {cut} bytes"),
        }
    }
}
