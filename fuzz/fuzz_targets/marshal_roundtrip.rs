//! Fuzz target asserting `unmarshal(marshal(frame, channel))` round-trips.
//!
//! Builds a `Frame::Method` around `basic.ack` from arbitrary fields,
//! encodes it, decodes it back, and checks the decoded frame and reported
//! channel match what was encoded. Complements the proptest coverage in
//! `crates/amqp091-proto/tests/frame_properties.rs` with libFuzzer's
//! coverage-guided corpus.

#![no_main]

use amqp091_proto::methods::basic;
use amqp091_proto::{marshal, unmarshal, Frame, Method};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    channel: u16,
    delivery_tag: u64,
    multiple: bool,
}

fuzz_target!(|input: Input| {
    let frame = Frame::Method {
        channel: input.channel,
        method: Method::BasicAck(basic::Ack { delivery_tag: input.delivery_tag, multiple: input.multiple }),
    };

    let Ok(bytes) = marshal(frame.clone(), input.channel) else {
        return;
    };
    let Ok((consumed, channel, decoded)) = unmarshal(&bytes) else {
        panic!("failed to decode a frame this process just encoded");
    };

    assert_eq!(consumed, bytes.len());
    assert_eq!(channel, input.channel);
    assert_eq!(decoded, frame);
});
