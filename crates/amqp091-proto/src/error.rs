//! Error types for the AMQP 0-9-1 codec.
//!
//! Every error the codec can produce is represented here as a single
//! `thiserror`-derived enum. Decode failures are atomic: on error no partial
//! frame or method is returned and the input buffer is left untouched by the
//! caller's perspective (the codec never mutates its input).
//!
//! `NeedMoreData` is a normal, non-exceptional signal: callers use it to
//! drive their own buffered reads. Every other variant indicates a protocol
//! violation or a malformed peer and should be treated as fatal.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while encoding or decoding AMQP 0-9-1 wire data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The buffer does not yet contain a complete frame.
    ///
    /// `needed` is the total number of bytes the frame will occupy once
    /// fully buffered (header + payload + end marker). This is not a
    /// failure: the caller should read more bytes and retry.
    #[error("need {needed} total bytes to decode this frame")]
    NeedMoreData {
        /// Total frame length (including header and end marker) once complete.
        needed: usize,
    },

    /// Buffer started with `AMQP` but the following version bytes were wrong.
    #[error("invalid protocol header: expected 00 00 09 01 after 'AMQP', found {found:02x?}")]
    InvalidProtocolHeader {
        /// The four bytes that followed the `AMQP` literal.
        found: [u8; 4],
    },

    /// The byte at the expected frame-end position was not `0xCE`.
    #[error("invalid frame end: expected 0xCE, found {found:#04x}")]
    InvalidFrameEnd {
        /// The byte actually found at the terminator position.
        found: u8,
    },

    /// The frame-type byte was not one of `{1, 2, 3, 8}`.
    #[error("unknown frame type: {found:#04x}")]
    UnknownFrameType {
        /// The unrecognized frame-type byte.
        found: u8,
    },

    /// No method is registered for this `(class_id, method_id)` pair.
    #[error("unknown method: class {class_id} method {method_id}")]
    UnknownMethod {
        /// Class id from the wire.
        class_id: u16,
        /// Method id from the wire.
        method_id: u16,
    },

    /// A field-table or field-array entry carried a tag octet with no
    /// defined meaning.
    #[error("unknown field-table tag: {tag:#04x} ({tag:?})")]
    UnknownFieldTag {
        /// The raw tag byte.
        tag: u8,
    },

    /// A `shortstr`/`longstr` marked textual was not valid UTF-8.
    #[error("invalid utf-8 in string field")]
    InvalidUtf8,

    /// A `shortstr` encode input exceeded 255 bytes.
    #[error("short string too long: {len} bytes (max 255)")]
    OversizeShortString {
        /// Length of the string that was rejected.
        len: usize,
    },

    /// A declared inner length (table, array, long string) exceeds the
    /// bytes remaining in the buffer.
    #[error("declared length {declared} exceeds {remaining} remaining bytes")]
    OversizeLength {
        /// Length the wire claimed.
        declared: usize,
        /// Bytes actually remaining in the buffer.
        remaining: usize,
    },

    /// A heartbeat frame was decoded with a non-zero channel.
    #[error("heartbeat frame carried non-zero channel {channel}")]
    HeartbeatChannelNonZero {
        /// The offending channel number.
        channel: u16,
    },

    /// Buffer is too short to contain even a frame header.
    #[error("frame too short: need at least {expected} bytes, have {actual}")]
    FrameTooShort {
        /// Minimum bytes required.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn need_more_data_is_not_a_panic_path() {
        let err = ProtocolError::NeedMoreData { needed: 42 };
        assert_eq!(err.to_string(), "need 42 total bytes to decode this frame");
    }

    #[test]
    fn invalid_frame_end_reports_the_byte_found() {
        let err = ProtocolError::InvalidFrameEnd { found: 0x00 };
        assert_eq!(err.to_string(), "invalid frame end: expected 0xCE, found 0x00");
    }
}
