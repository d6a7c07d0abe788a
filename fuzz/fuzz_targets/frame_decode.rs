//! Fuzz target for `Frame::decode`.
//!
//! Feeds arbitrary byte sequences straight into the frame decoder. It must
//! never panic: either it recognizes a valid envelope (or protocol header)
//! or it returns a `ProtocolError`, including `NeedMoreData` for a buffer
//! that is merely short so far.

#![no_main]

use amqp091_proto::Frame;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = Frame::decode(data);
});
