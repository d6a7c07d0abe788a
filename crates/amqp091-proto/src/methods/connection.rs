//! `Connection` class (class id 10): the methods that negotiate and tear
//! down the transport-level connection, before any channel exists.

use bytes::BufMut;

use crate::error::Result;
use crate::primitive::{self, BitReader, BitWriter};
use crate::table::FieldTable;

/// Class id for `Connection`.
pub const CLASS_ID: u16 = 10;

/// Server greeting: proposed protocol version, supported security
/// mechanisms and locales.
#[derive(Debug, Clone, PartialEq)]
pub struct Start {
    /// Protocol major version the server implements (always 0 for 0-9-1).
    pub version_major: u8,
    /// Protocol minor version.
    pub version_minor: u8,
    /// Server metadata (product, version, platform, capabilities, ...).
    pub server_properties: FieldTable,
    /// Space-separated list of supported SASL mechanisms.
    pub mechanisms: String,
    /// Space-separated list of supported locales.
    pub locales: String,
}

impl Start {
    /// Method id.
    pub const METHOD_ID: u16 = 10;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_octet(dst, self.version_major);
        primitive::encode_octet(dst, self.version_minor);
        self.server_properties.encode(dst)?;
        primitive::encode_longstr(dst, &self.mechanisms);
        primitive::encode_longstr(dst, &self.locales);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (version_major, offset) = primitive::decode_octet(buf, offset)?;
        let (version_minor, offset) = primitive::decode_octet(buf, offset)?;
        let (server_properties, offset) = FieldTable::decode(buf, offset)?;
        let (mechanisms, offset) = primitive::decode_longstr(buf, offset)?;
        let (locales, offset) = primitive::decode_longstr(buf, offset)?;
        Ok((
            Self { version_major, version_minor, server_properties, mechanisms, locales },
            offset,
        ))
    }
}

/// Client's chosen security mechanism and response, and locale.
#[derive(Debug, Clone, PartialEq)]
pub struct StartOk {
    /// Client metadata.
    pub client_properties: FieldTable,
    /// The single mechanism chosen from `Start::mechanisms`.
    pub mechanism: String,
    /// SASL response bytes (not necessarily UTF-8, e.g. PLAIN with a null
    /// separator).
    pub response: Vec<u8>,
    /// The chosen locale.
    pub locale: String,
}

impl StartOk {
    /// Method id.
    pub const METHOD_ID: u16 = 11;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.client_properties.encode(dst)?;
        primitive::encode_shortstr(dst, &self.mechanism)?;
        primitive::encode_longstr_bytes(dst, &self.response);
        primitive::encode_shortstr(dst, &self.locale)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (client_properties, offset) = FieldTable::decode(buf, offset)?;
        let (mechanism, offset) = primitive::decode_shortstr(buf, offset)?;
        let (response, offset) = primitive::decode_longstr_bytes(buf, offset)?;
        let (locale, offset) = primitive::decode_shortstr(buf, offset)?;
        Ok((Self { client_properties, mechanism, response, locale }, offset))
    }
}

/// Security challenge mid-handshake (used by mechanisms that need more than
/// one round trip).
#[derive(Debug, Clone, PartialEq)]
pub struct Secure {
    /// Opaque challenge bytes.
    pub challenge: Vec<u8>,
}

impl Secure {
    /// Method id.
    pub const METHOD_ID: u16 = 20;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_longstr_bytes(dst, &self.challenge);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (challenge, offset) = primitive::decode_longstr_bytes(buf, offset)?;
        Ok((Self { challenge }, offset))
    }
}

/// Security challenge response.
#[derive(Debug, Clone, PartialEq)]
pub struct SecureOk {
    /// Opaque response bytes.
    pub response: Vec<u8>,
}

impl SecureOk {
    /// Method id.
    pub const METHOD_ID: u16 = 21;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_longstr_bytes(dst, &self.response);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (response, offset) = primitive::decode_longstr_bytes(buf, offset)?;
        Ok((Self { response }, offset))
    }
}

/// Server's proposed tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tune {
    /// Maximum number of channels the server will allow, 0 = unlimited.
    pub channel_max: u16,
    /// Maximum frame payload size the server will accept, 0 = unlimited.
    pub frame_max: u32,
    /// Desired heartbeat interval in seconds, 0 = disabled.
    pub heartbeat: u16,
}

impl Tune {
    /// Method id.
    pub const METHOD_ID: u16 = 30;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.channel_max);
        primitive::encode_long(dst, self.frame_max);
        primitive::encode_short(dst, self.heartbeat);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (channel_max, offset) = primitive::decode_short(buf, offset)?;
        let (frame_max, offset) = primitive::decode_long(buf, offset)?;
        let (heartbeat, offset) = primitive::decode_short(buf, offset)?;
        Ok((Self { channel_max, frame_max, heartbeat }, offset))
    }
}

/// Client's accepted tuning parameters (same shape as [`Tune`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuneOk {
    /// Negotiated channel limit.
    pub channel_max: u16,
    /// Negotiated frame size limit.
    pub frame_max: u32,
    /// Negotiated heartbeat interval in seconds.
    pub heartbeat: u16,
}

impl TuneOk {
    /// Method id.
    pub const METHOD_ID: u16 = 31;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.channel_max);
        primitive::encode_long(dst, self.frame_max);
        primitive::encode_short(dst, self.heartbeat);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (channel_max, offset) = primitive::decode_short(buf, offset)?;
        let (frame_max, offset) = primitive::decode_long(buf, offset)?;
        let (heartbeat, offset) = primitive::decode_short(buf, offset)?;
        Ok((Self { channel_max, frame_max, heartbeat }, offset))
    }
}

/// Open the connection against a virtual host.
#[derive(Debug, Clone, PartialEq)]
pub struct Open {
    /// Virtual host to open against.
    pub virtual_host: String,
    /// Reserved; carried for wire compatibility, always empty in practice.
    pub capabilities: String,
    /// Reserved; carried for wire compatibility, always `false` in practice.
    pub insist: bool,
}

impl Open {
    /// Method id.
    pub const METHOD_ID: u16 = 40;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_shortstr(dst, &self.virtual_host)?;
        primitive::encode_shortstr(dst, &self.capabilities)?;
        let mut bits = BitWriter::new();
        bits.push(self.insist);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (virtual_host, offset) = primitive::decode_shortstr(buf, offset)?;
        let (capabilities, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (insist, offset) = bits.next(buf, offset)?;
        Ok((Self { virtual_host, capabilities, insist }, offset))
    }
}

/// Connection open acknowledgement.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenOk {
    /// Reserved; carried for wire compatibility, always empty in practice.
    pub known_hosts: String,
}

impl OpenOk {
    /// Method id.
    pub const METHOD_ID: u16 = 41;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_shortstr(dst, &self.known_hosts)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (known_hosts, offset) = primitive::decode_shortstr(buf, offset)?;
        Ok((Self { known_hosts }, offset))
    }
}

/// Request to close the connection, carrying the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct Close {
    /// AMQP reply code (mirrors HTTP-style status semantics).
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
    pub const METHOD_ID: u16 = 50;

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
    pub const METHOD_ID: u16 = 51;

    pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
        Ok(())
    }

    pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok((Self, offset))
    }
}

/// RabbitMQ extension: server is about to stop reading from the socket
/// (usually due to a resource alarm).
#[derive(Debug, Clone, PartialEq)]
pub struct Blocked {
    /// Human-readable reason for blocking.
    pub reason: String,
}

impl Blocked {
    /// Method id.
    pub const METHOD_ID: u16 = 60;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_shortstr(dst, &self.reason)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (reason, offset) = primitive::decode_shortstr(buf, offset)?;
        Ok((Self { reason }, offset))
    }
}

/// RabbitMQ extension: the resource alarm from [`Blocked`] has cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unblocked;

impl Unblocked {
    /// Method id.
    pub const METHOD_ID: u16 = 61;

    pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
        Ok(())
    }

    pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok((Self, offset))
    }
}
