//! Fuzz target for `Method::decode`.
//!
//! Exercises the `(class_id, method_id)` registry directly with an
//! arbitrary body, independent of any enclosing frame envelope. Covers
//! both registered and unregistered class/method pairs; either path must
//! return cleanly rather than panic.

#![no_main]

use amqp091_proto::Method;
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    class_id: u16,
    method_id: u16,
    body: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let _ = Method::decode(input.class_id, input.method_id, &input.body, 0);
});
