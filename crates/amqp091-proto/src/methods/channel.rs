//! `Channel` class (class id 20): opening, flow-controlling and closing a
//! multiplexed channel within a connection.

use bytes::BufMut;

use crate::error::Result;
use crate::primitive::{self, BitReader, BitWriter};

/// Class id for `Channel`.
pub const CLASS_ID: u16 = 20;

/// Open a new channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Open {
    /// Reserved; carried for wire compatibility, always empty in practice.
    pub out_of_band: String,
}

impl Open {
    /// Method id.
    pub const METHOD_ID: u16 = 10;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_shortstr(dst, &self.out_of_band)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (out_of_band, offset) = primitive::decode_shortstr(buf, offset)?;
        Ok((Self { out_of_band }, offset))
    }
}

/// Channel open acknowledgement.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenOk {
    /// Reserved; carried for wire compatibility, always empty in practice.
    pub channel_id: Vec<u8>,
}

impl OpenOk {
    /// Method id.
    pub const METHOD_ID: u16 = 11;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_longstr_bytes(dst, &self.channel_id);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (channel_id, offset) = primitive::decode_longstr_bytes(buf, offset)?;
        Ok((Self { channel_id }, offset))
    }
}

/// Request the peer to pause or resume delivering content on this channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flow {
    /// `true` to resume delivery, `false` to pause it.
    pub active: bool,
}

impl Flow {
    /// Method id.
    pub const METHOD_ID: u16 = 20;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        let mut bits = BitWriter::new();
        bits.push(self.active);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut bits = BitReader::new();
        let (active, offset) = bits.next(buf, offset)?;
        Ok((Self { active }, offset))
    }
}

/// Confirms a [`Flow`] request took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowOk {
    /// The channel's resulting flow state.
    pub active: bool,
}

impl FlowOk {
    /// Method id.
    pub const METHOD_ID: u16 = 21;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        let mut bits = BitWriter::new();
        bits.push(self.active);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut bits = BitReader::new();
        let (active, offset) = bits.next(buf, offset)?;
        Ok((Self { active }, offset))
    }
}

/// Request to close the channel, carrying the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct Close {
    /// AMQP reply code.
    pub reply_code: u16,
    /// Human-readable reason.
    pub reply_text: String,
    /// Class id of the method that caused the close, or 0.
    pub class_id: u16,
    /// Method id of the method that caused the close, or 0.
    pub method_id: u16,
}

impl Close {
    /// Method id.
    pub const METHOD_ID: u16 = 40;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.reply_code);
        primitive::encode_shortstr(dst, &self.reply_text)?;
        primitive::encode_short(dst, self.class_id);
        primitive::encode_short(dst, self.method_id);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (reply_code, offset) = primitive::decode_short(buf, offset)?;
        let (reply_text, offset) = primitive::decode_shortstr(buf, offset)?;
        let (class_id, offset) = primitive::decode_short(buf, offset)?;
        let (method_id, offset) = primitive::decode_short(buf, offset)?;
        Ok((Self { reply_code, reply_text, class_id, method_id }, offset))
    }
}

/// Close acknowledgement; carries no fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloseOk;

impl CloseOk {
    /// Method id.
    pub const METHOD_ID: u16 = 41;

    pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
        Ok(())
    }

    pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok((Self, offset))
    }
}
