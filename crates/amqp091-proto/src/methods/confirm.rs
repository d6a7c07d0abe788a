//! `Confirm` class (class id 85): the RabbitMQ publisher-confirms
//! extension, letting a publisher opt a channel into per-message
//! acknowledgement from the broker.

use bytes::BufMut;

use crate::error::Result;
use crate::primitive::{BitReader, BitWriter};

/// Class id for `Confirm`.
pub const CLASS_ID: u16 = 85;

/// Put the channel into confirm mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Select {
    /// Suppress the `SelectOk` reply.
    pub nowait: bool,
}

impl Select {
    /// Method id.
    pub const METHOD_ID: u16 = 10;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        let mut bits = BitWriter::new();
        bits.push(self.nowait);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut bits = BitReader::new();
        let (nowait, offset) = bits.next(buf, offset)?;
        Ok((Self { nowait }, offset))
    }
}

/// Acknowledges a successful [`Select`]; carries no fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectOk;

impl SelectOk {
    /// Method id.
    pub const METHOD_ID: u16 = 11;

    pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
        Ok(())
    }

    pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok((Self, offset))
    }
}
