//! Scalar field codec: the typed grammar of AMQP 0-9-1 field types.
//!
//! Every `encode_*`/`decode_*` pair here is symmetric and big-endian
//! (network byte order), matching the wire format pinned by
//! `original_source/tests/test_frame_unmarshaling.py`. Decoders take a
//! byte slice and an offset and return `(value, new_offset)`; encoders
//! append to a `BufMut`.
//!
//! `bit` fields are the one exception: they are never encoded individually.
//! [`BitWriter`] and [`BitReader`] batch consecutive bit fields into octets,
//! LSB-first, flushing on the first non-bit field or when 8 bits have
//! accumulated.

use bytes::BufMut;

use crate::error::{ProtocolError, Result};

/// Fixed-point decimal: `value * 10^-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal {
    /// Number of digits after the decimal point.
    pub scale: u8,
    /// Signed mantissa.
    pub value: i32,
}

/// POSIX-epoch timestamp (seconds). A plain newtype rather than a
/// calendar-aware type, since no calendar crate is otherwise needed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Seconds since the Unix epoch (UTC).
    #[must_use]
    pub const fn unix_seconds(self) -> u64 {
        self.0
    }
}

impl From<u64> for Timestamp {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

fn need(buf: &[u8], offset: usize, len: usize) -> Result<()> {
    if buf.len().saturating_sub(offset) < len {
        return Err(ProtocolError::FrameTooShort { expected: offset + len, actual: buf.len() });
    }
    Ok(())
}

/// Encode a single `octet` (unsigned byte).
pub fn encode_octet(dst: &mut impl BufMut, value: u8) {
    dst.put_u8(value);
}

/// Decode a single `octet`.
pub fn decode_octet(buf: &[u8], offset: usize) -> Result<(u8, usize)> {
    need(buf, offset, 1)?;
    Ok((buf[offset], offset + 1))
}

/// Encode a `short` (u16, big-endian).
pub fn encode_short(dst: &mut impl BufMut, value: u16) {
    dst.put_u16(value);
}

/// Decode a `short`.
pub fn decode_short(buf: &[u8], offset: usize) -> Result<(u16, usize)> {
    need(buf, offset, 2)?;
    let mut bytes = [0u8; 2];
    bytes.copy_from_slice(&buf[offset..offset + 2]);
    Ok((u16::from_be_bytes(bytes), offset + 2))
}

/// Encode a `long` (u32, big-endian).
pub fn encode_long(dst: &mut impl BufMut, value: u32) {
    dst.put_u32(value);
}

/// Decode a `long`.
pub fn decode_long(buf: &[u8], offset: usize) -> Result<(u32, usize)> {
    need(buf, offset, 4)?;
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    Ok((u32::from_be_bytes(bytes), offset + 4))
}

/// Encode a `longlong` (u64, big-endian).
pub fn encode_longlong(dst: &mut impl BufMut, value: u64) {
    dst.put_u64(value);
}

/// Decode a `longlong`.
pub fn decode_longlong(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
    need(buf, offset, 8)?;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[offset..offset + 8]);
    Ok((u64::from_be_bytes(bytes), offset + 8))
}

/// Encode a `short-short-int` (i8).
pub fn encode_short_short_int(dst: &mut impl BufMut, value: i8) {
    dst.put_i8(value);
}

/// Decode a `short-short-int`.
pub fn decode_short_short_int(buf: &[u8], offset: usize) -> Result<(i8, usize)> {
    need(buf, offset, 1)?;
    Ok((buf[offset] as i8, offset + 1))
}

/// Encode a `short-int` (i16, big-endian).
pub fn encode_short_int(dst: &mut impl BufMut, value: i16) {
    dst.put_i16(value);
}

/// Decode a `short-int`.
pub fn decode_short_int(buf: &[u8], offset: usize) -> Result<(i16, usize)> {
    let (bits, offset) = decode_short(buf, offset)?;
    Ok((bits as i16, offset))
}

/// Encode a `long-int` (i32, big-endian).
pub fn encode_long_int(dst: &mut impl BufMut, value: i32) {
    dst.put_i32(value);
}

/// Decode a `long-int`.
pub fn decode_long_int(buf: &[u8], offset: usize) -> Result<(i32, usize)> {
    let (bits, offset) = decode_long(buf, offset)?;
    Ok((bits as i32, offset))
}

/// Encode a `long-long-int` (i64, big-endian).
pub fn encode_long_long_int(dst: &mut impl BufMut, value: i64) {
    dst.put_i64(value);
}

/// Decode a `long-long-int`.
pub fn decode_long_long_int(buf: &[u8], offset: usize) -> Result<(i64, usize)> {
    let (bits, offset) = decode_longlong(buf, offset)?;
    Ok((bits as i64, offset))
}

/// Encode a 32-bit IEEE `float`.
pub fn encode_float(dst: &mut impl BufMut, value: f32) {
    dst.put_f32(value);
}

/// Decode a 32-bit IEEE `float`.
pub fn decode_float(buf: &[u8], offset: usize) -> Result<(f32, usize)> {
    let (bits, offset) = decode_long(buf, offset)?;
    Ok((f32::from_bits(bits), offset))
}

/// Encode a 64-bit IEEE `double`.
pub fn encode_double(dst: &mut impl BufMut, value: f64) {
    dst.put_f64(value);
}

/// Decode a 64-bit IEEE `double`.
pub fn decode_double(buf: &[u8], offset: usize) -> Result<(f64, usize)> {
    let (bits, offset) = decode_longlong(buf, offset)?;
    Ok((f64::from_bits(bits), offset))
}

/// Encode a `decimal` (scale octet + signed 32-bit mantissa).
pub fn encode_decimal(dst: &mut impl BufMut, value: Decimal) {
    encode_octet(dst, value.scale);
    encode_long_int(dst, value.value);
}

/// Decode a `decimal`.
pub fn decode_decimal(buf: &[u8], offset: usize) -> Result<(Decimal, usize)> {
    let (scale, offset) = decode_octet(buf, offset)?;
    let (value, offset) = decode_long_int(buf, offset)?;
    Ok((Decimal { scale, value }, offset))
}

/// Encode a `timestamp` (u64 POSIX seconds).
pub fn encode_timestamp(dst: &mut impl BufMut, value: Timestamp) {
    encode_longlong(dst, value.0);
}

/// Decode a `timestamp`.
pub fn decode_timestamp(buf: &[u8], offset: usize) -> Result<(Timestamp, usize)> {
    let (secs, offset) = decode_longlong(buf, offset)?;
    Ok((Timestamp(secs), offset))
}

/// Encode a `shortstr`: one length octet followed by UTF-8 bytes.
///
/// # Errors
///
/// [`ProtocolError::OversizeShortString`] if `value` is longer than 255
/// bytes.
pub fn encode_shortstr(dst: &mut impl BufMut, value: &str) -> Result<()> {
    let bytes = value.as_bytes();
    if bytes.len() > u8::MAX as usize {
        return Err(ProtocolError::OversizeShortString { len: bytes.len() });
    }
    #[allow(clippy::cast_possible_truncation)]
    encode_octet(dst, bytes.len() as u8);
    dst.put_slice(bytes);
    Ok(())
}

/// Decode a `shortstr`.
///
/// # Errors
///
/// [`ProtocolError::InvalidUtf8`] if the content is not valid UTF-8.
pub fn decode_shortstr(buf: &[u8], offset: usize) -> Result<(String, usize)> {
    let (len, offset) = decode_octet(buf, offset)?;
    let len = len as usize;
    need(buf, offset, len)?;
    let text = std::str::from_utf8(&buf[offset..offset + len])
        .map_err(|_| ProtocolError::InvalidUtf8)?
        .to_owned();
    Ok((text, offset + len))
}

/// Encode a `longstr` as raw bytes: u32 length followed by the bytes
/// unchanged. The caller decides whether the content is textual.
pub fn encode_longstr_bytes(dst: &mut impl BufMut, value: &[u8]) {
    #[allow(clippy::cast_possible_truncation)]
    encode_long(dst, value.len() as u32);
    dst.put_slice(value);
}

/// Decode a `longstr` as raw bytes.
pub fn decode_longstr_bytes(buf: &[u8], offset: usize) -> Result<(Vec<u8>, usize)> {
    let (len, offset) = decode_long(buf, offset)?;
    let len = len as usize;
    need(buf, offset, len)?;
    Ok((buf[offset..offset + len].to_vec(), offset + len))
}

/// Encode a `longstr` known to carry text.
pub fn encode_longstr(dst: &mut impl BufMut, value: &str) {
    encode_longstr_bytes(dst, value.as_bytes());
}

/// Decode a `longstr` known to carry text.
///
/// # Errors
///
/// [`ProtocolError::InvalidUtf8`] if the content is not valid UTF-8.
pub fn decode_longstr(buf: &[u8], offset: usize) -> Result<(String, usize)> {
    let (bytes, offset) = decode_longstr_bytes(buf, offset)?;
    let text = String::from_utf8(bytes).map_err(|_| ProtocolError::InvalidUtf8)?;
    Ok((text, offset))
}

/// Accumulates consecutive `bit` fields into packed octets, LSB-first,
/// flushing automatically when a non-bit field is written.
///
/// Bit fields are never encoded individually: the method encoder batches
/// consecutive bits and emits one octet per 8 bits.
#[derive(Debug, Default)]
pub struct BitWriter {
    current: u8,
    count: u8,
}

impl BitWriter {
    /// Start a new, empty bit run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one more bit onto the current run.
    pub fn push(&mut self, value: bool) {
        if value {
            self.current |= 1 << self.count;
        }
        self.count += 1;
    }

    /// Flush any partially-filled octet to `dst` and reset the run. A no-op
    /// if no bits have been pushed since the last flush.
    pub fn flush(&mut self, dst: &mut impl BufMut) {
        if self.count > 0 {
            dst.put_u8(self.current);
            self.current = 0;
            self.count = 0;
        }
    }
}

/// Reads consecutive `bit` fields back out of packed octets, LSB-first.
#[derive(Debug, Default)]
pub struct BitReader {
    current: u8,
    count: u8,
}

impl BitReader {
    /// Start a new, empty bit run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the next bit, pulling a fresh octet from `buf` at `offset` when
    /// the current one is exhausted. Returns the bit and the buffer offset
    /// to resume non-bit decoding from (only advances past the octet once
    /// all 8 bits have been consumed).
    pub fn next(&mut self, buf: &[u8], offset: usize) -> Result<(bool, usize)> {
        if self.count == 0 {
            let (byte, _) = decode_octet(buf, offset)?;
            self.current = byte;
            self.count = 8;
            let bit = self.current & 1 != 0;
            self.current >>= 1;
            self.count -= 1;
            return Ok((bit, offset + 1));
        }
        let bit = self.current & 1 != 0;
        self.current >>= 1;
        self.count -= 1;
        Ok((bit, offset))
    }

    /// Discard the remainder of the current octet so the next read starts a
    /// fresh byte. Mirrors `BitWriter::flush` on the decode side.
    pub fn flush(&mut self) {
        self.current = 0;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortstr_round_trip() {
        let mut buf = Vec::new();
        encode_shortstr(&mut buf, "ctag1.0").unwrap();
        let (value, consumed) = decode_shortstr(&buf, 0).unwrap();
        assert_eq!(value, "ctag1.0");
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn shortstr_rejects_oversize_input() {
        let mut buf = Vec::new();
        let oversize = "x".repeat(256);
        let err = encode_shortstr(&mut buf, &oversize).unwrap_err();
        assert_eq!(err, ProtocolError::OversizeShortString { len: 256 });
    }

    #[test]
    fn longstr_round_trip() {
        let mut buf = Vec::new();
        encode_longstr(&mut buf, "Normal shutdown");
        let (value, consumed) = decode_longstr(&buf, 0).unwrap();
        assert_eq!(value, "Normal shutdown");
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn decimal_round_trip() {
        let mut buf = Vec::new();
        let d = Decimal { scale: 2, value: -12345 };
        encode_decimal(&mut buf, d);
        let (decoded, _) = decode_decimal(&buf, 0).unwrap();
        assert_eq!(decoded, d);
    }

    #[test]
    fn bit_writer_packs_lsb_first() {
        let mut writer = BitWriter::new();
        let mut buf = Vec::new();
        // bits: 1,0,1 -> binary 101 read LSB first -> 0b0000_0101 = 5
        writer.push(true);
        writer.push(false);
        writer.push(true);
        writer.flush(&mut buf);
        assert_eq!(buf, vec![0b0000_0101]);
    }

    #[test]
    fn bit_reader_matches_writer() {
        let mut writer = BitWriter::new();
        let mut buf = Vec::new();
        let bits = [true, true, false, true, false, false, true, false];
        for b in bits {
            writer.push(b);
        }
        writer.flush(&mut buf);

        let mut reader = BitReader::new();
        let mut offset = 0;
        let mut decoded = Vec::new();
        for _ in 0..8 {
            let (bit, new_offset) = reader.next(&buf, offset).unwrap();
            offset = new_offset;
            decoded.push(bit);
        }
        assert_eq!(decoded, bits);
    }

    #[test]
    fn truncated_buffer_reports_frame_too_short() {
        let err = decode_long(&[0x00, 0x01], 0).unwrap_err();
        assert_eq!(err, ProtocolError::FrameTooShort { expected: 4, actual: 2 });
    }
}
