//! `Exchange` class (class id 40): declaring, deleting and binding
//! exchanges.

use bytes::BufMut;

use crate::error::Result;
use crate::primitive::{self, BitReader, BitWriter};
use crate::table::FieldTable;

/// Class id for `Exchange`.
pub const CLASS_ID: u16 = 40;

/// Declare an exchange, creating it if it does not already exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Declare {
    /// Reserved, pre-3.0 access-ticket field; always 0 in practice.
    pub ticket: u16,
    /// Exchange name.
    pub exchange: String,
    /// Exchange type (`direct`, `fanout`, `topic`, `headers`, ...).
    pub exchange_type: String,
    /// Only check for existence, don't create.
    pub passive: bool,
    /// Survive a broker restart.
    pub durable: bool,
    /// Delete once the last queue is unbound from it.
    pub auto_delete: bool,
    /// Usable only for exchange-to-exchange bindings.
    pub internal: bool,
    /// Suppress the `DeclareOk` reply.
    pub nowait: bool,
    /// Exchange-type-specific arguments.
    pub arguments: FieldTable,
}

impl Declare {
    /// Method id.
    pub const METHOD_ID: u16 = 10;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.exchange)?;
        primitive::encode_shortstr(dst, &self.exchange_type)?;
        let mut bits = BitWriter::new();
        bits.push(self.passive);
        bits.push(self.durable);
        bits.push(self.auto_delete);
        bits.push(self.internal);
        bits.push(self.nowait);
        bits.flush(dst);
        self.arguments.encode(dst)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (exchange, offset) = primitive::decode_shortstr(buf, offset)?;
        let (exchange_type, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (passive, offset) = bits.next(buf, offset)?;
        let (durable, offset) = bits.next(buf, offset)?;
        let (auto_delete, offset) = bits.next(buf, offset)?;
        let (internal, offset) = bits.next(buf, offset)?;
        let (nowait, offset) = bits.next(buf, offset)?;
        let (arguments, offset) = FieldTable::decode(buf, offset)?;
        Ok((
            Self {
                ticket,
                exchange,
                exchange_type,
                passive,
                durable,
                auto_delete,
                internal,
                nowait,
                arguments,
            },
            offset,
        ))
    }
}

/// Acknowledges a successful [`Declare`]; carries no fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeclareOk;

impl DeclareOk {
    /// Method id.
    pub const METHOD_ID: u16 = 11;

    pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
        Ok(())
    }

    pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok((Self, offset))
    }
}

/// Delete an exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Reserved access-ticket field.
    pub ticket: u16,
    /// Exchange name.
    pub exchange: String,
    /// Only delete if the exchange has no bindings.
    pub if_unused: bool,
    /// Suppress the `DeleteOk` reply.
    pub nowait: bool,
}

impl Delete {
    /// Method id.
    pub const METHOD_ID: u16 = 20;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.exchange)?;
        let mut bits = BitWriter::new();
        bits.push(self.if_unused);
        bits.push(self.nowait);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (exchange, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (if_unused, offset) = bits.next(buf, offset)?;
        let (nowait, offset) = bits.next(buf, offset)?;
        Ok((Self { ticket, exchange, if_unused, nowait }, offset))
    }
}

/// Acknowledges a successful [`Delete`]; carries no fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOk;

impl DeleteOk {
    /// Method id.
    pub const METHOD_ID: u16 = 21;

    pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
        Ok(())
    }

    pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok((Self, offset))
    }
}

/// Bind an exchange to another exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Bind {
    /// Reserved access-ticket field.
    pub ticket: u16,
    /// Destination exchange.
    pub destination: String,
    /// Source exchange.
    pub source: String,
    /// Routing key for the binding.
    pub routing_key: String,
    /// Suppress the `BindOk` reply.
    pub nowait: bool,
    /// Binding arguments.
    pub arguments: FieldTable,
}

impl Bind {
    /// Method id.
    pub const METHOD_ID: u16 = 30;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.destination)?;
        primitive::encode_shortstr(dst, &self.source)?;
        primitive::encode_shortstr(dst, &self.routing_key)?;
        let mut bits = BitWriter::new();
        bits.push(self.nowait);
        bits.flush(dst);
        self.arguments.encode(dst)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (destination, offset) = primitive::decode_shortstr(buf, offset)?;
        let (source, offset) = primitive::decode_shortstr(buf, offset)?;
        let (routing_key, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (nowait, offset) = bits.next(buf, offset)?;
        let (arguments, offset) = FieldTable::decode(buf, offset)?;
        Ok((Self { ticket, destination, source, routing_key, nowait, arguments }, offset))
    }
}

/// Acknowledges a successful [`Bind`]; carries no fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindOk;

impl BindOk {
    /// Method id.
    pub const METHOD_ID: u16 = 31;

    pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
        Ok(())
    }

    pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok((Self, offset))
    }
}

/// Unbind an exchange from another exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Unbind {
    /// Reserved access-ticket field.
    pub ticket: u16,
    /// Destination exchange.
    pub destination: String,
    /// Source exchange.
    pub source: String,
    /// Routing key of the binding to remove.
    pub routing_key: String,
    /// Suppress the `UnbindOk` reply.
    pub nowait: bool,
    /// Binding arguments that identify the binding to remove.
    pub arguments: FieldTable,
}

impl Unbind {
    /// Method id.
    pub const METHOD_ID: u16 = 40;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.destination)?;
        primitive::encode_shortstr(dst, &self.source)?;
        primitive::encode_shortstr(dst, &self.routing_key)?;
        let mut bits = BitWriter::new();
        bits.push(self.nowait);
        bits.flush(dst);
        self.arguments.encode(dst)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (destination, offset) = primitive::decode_shortstr(buf, offset)?;
        let (source, offset) = primitive::decode_shortstr(buf, offset)?;
        let (routing_key, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (nowait, offset) = bits.next(buf, offset)?;
        let (arguments, offset) = FieldTable::decode(buf, offset)?;
        Ok((Self { ticket, destination, source, routing_key, nowait, arguments }, offset))
    }
}

/// Acknowledges a successful [`Unbind`]; carries no fields.
///
/// Registered with method id 51, matching the corpus's pamqp registry
/// (`Exchange.UnbindOk` does not follow the otherwise-contiguous numbering
/// of the other `*Ok` methods in this class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnbindOk;

impl UnbindOk {
    /// Method id.
    pub const METHOD_ID: u16 = 51;

    pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
        Ok(())
    }

    pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok((Self, offset))
    }
}
