//! `Queue` class (class id 50): declaring, binding, purging and deleting
//! queues.

use bytes::BufMut;

use crate::error::Result;
use crate::primitive::{self, BitReader, BitWriter};
use crate::table::FieldTable;

/// Class id for `Queue`.
pub const CLASS_ID: u16 = 50;

/// Declare a queue, creating it if it does not already exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Declare {
    /// Reserved access-ticket field.
    pub ticket: u16,
    /// Queue name; empty requests a server-generated name.
    pub queue: String,
    /// Only check for existence, don't create.
    pub passive: bool,
    /// Survive a broker restart.
    pub durable: bool,
    /// Usable only by the declaring connection.
    pub exclusive: bool,
    /// Delete once the last consumer disconnects.
    pub auto_delete: bool,
    /// Suppress the `DeclareOk` reply.
    pub nowait: bool,
    /// Queue-type-specific arguments (TTL, max length, dead-lettering, ...).
    pub arguments: FieldTable,
}

impl Declare {
    /// Method id.
    pub const METHOD_ID: u16 = 10;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.queue)?;
        let mut bits = BitWriter::new();
        bits.push(self.passive);
        bits.push(self.durable);
        bits.push(self.exclusive);
        bits.push(self.auto_delete);
        bits.push(self.nowait);
        bits.flush(dst);
        self.arguments.encode(dst)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (queue, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (passive, offset) = bits.next(buf, offset)?;
        let (durable, offset) = bits.next(buf, offset)?;
        let (exclusive, offset) = bits.next(buf, offset)?;
        let (auto_delete, offset) = bits.next(buf, offset)?;
        let (nowait, offset) = bits.next(buf, offset)?;
        let (arguments, offset) = FieldTable::decode(buf, offset)?;
        Ok((
            Self { ticket, queue, passive, durable, exclusive, auto_delete, nowait, arguments },
            offset,
        ))
    }
}

/// Acknowledges a successful [`Declare`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareOk {
    /// The (possibly server-generated) queue name.
    pub queue: String,
    /// Number of messages currently in the queue.
    pub message_count: u32,
    /// Number of active consumers.
    pub consumer_count: u32,
}

impl DeclareOk {
    /// Method id.
    pub const METHOD_ID: u16 = 11;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_shortstr(dst, &self.queue)?;
        primitive::encode_long(dst, self.message_count);
        primitive::encode_long(dst, self.consumer_count);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (queue, offset) = primitive::decode_shortstr(buf, offset)?;
        let (message_count, offset) = primitive::decode_long(buf, offset)?;
        let (consumer_count, offset) = primitive::decode_long(buf, offset)?;
        Ok((Self { queue, message_count, consumer_count }, offset))
    }
}

/// Bind a queue to an exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Bind {
    /// Reserved access-ticket field.
    pub ticket: u16,
    /// Queue name.
    pub queue: String,
    /// Exchange to bind to.
    pub exchange: String,
    /// Routing key for the binding.
    pub routing_key: String,
    /// Suppress the `BindOk` reply.
    pub nowait: bool,
    /// Binding arguments.
    pub arguments: FieldTable,
}

impl Bind {
    /// Method id.
    pub const METHOD_ID: u16 = 20;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.queue)?;
        primitive::encode_shortstr(dst, &self.exchange)?;
        primitive::encode_shortstr(dst, &self.routing_key)?;
        let mut bits = BitWriter::new();
        bits.push(self.nowait);
        bits.flush(dst);
        self.arguments.encode(dst)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (queue, offset) = primitive::decode_shortstr(buf, offset)?;
        let (exchange, offset) = primitive::decode_shortstr(buf, offset)?;
        let (routing_key, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (nowait, offset) = bits.next(buf, offset)?;
        let (arguments, offset) = FieldTable::decode(buf, offset)?;
        Ok((Self { ticket, queue, exchange, routing_key, nowait, arguments }, offset))
    }
}

/// Acknowledges a successful [`Bind`]; carries no fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindOk;

impl BindOk {
    /// Method id.
    pub const METHOD_ID: u16 = 21;

    pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
        Ok(())
    }

    pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok((Self, offset))
    }
}

/// Discard all messages in a queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Purge {
    /// Reserved access-ticket field.
    pub ticket: u16,
    /// Queue name.
    pub queue: String,
    /// Suppress the `PurgeOk` reply.
    pub nowait: bool,
}

impl Purge {
    /// Method id.
    pub const METHOD_ID: u16 = 30;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.queue)?;
        let mut bits = BitWriter::new();
        bits.push(self.nowait);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (queue, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (nowait, offset) = bits.next(buf, offset)?;
        Ok((Self { ticket, queue, nowait }, offset))
    }
}

/// Acknowledges a successful [`Purge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeOk {
    /// Number of messages discarded.
    pub message_count: u32,
}

impl PurgeOk {
    /// Method id.
    pub const METHOD_ID: u16 = 31;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_long(dst, self.message_count);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (message_count, offset) = primitive::decode_long(buf, offset)?;
        Ok((Self { message_count }, offset))
    }
}

/// Delete a queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Reserved access-ticket field.
    pub ticket: u16,
    /// Queue name.
    pub queue: String,
    /// Only delete if the queue has no consumers.
    pub if_unused: bool,
    /// Only delete if the queue is empty.
    pub if_empty: bool,
    /// Suppress the `DeleteOk` reply.
    pub nowait: bool,
}

impl Delete {
    /// Method id.
    pub const METHOD_ID: u16 = 40;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.queue)?;
        let mut bits = BitWriter::new();
        bits.push(self.if_unused);
        bits.push(self.if_empty);
        bits.push(self.nowait);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (queue, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (if_unused, offset) = bits.next(buf, offset)?;
        let (if_empty, offset) = bits.next(buf, offset)?;
        let (nowait, offset) = bits.next(buf, offset)?;
        Ok((Self { ticket, queue, if_unused, if_empty, nowait }, offset))
    }
}

/// Acknowledges a successful [`Delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOk {
    /// Number of messages discarded from the deleted queue.
    pub message_count: u32,
}

impl DeleteOk {
    /// Method id.
    pub const METHOD_ID: u16 = 41;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_long(dst, self.message_count);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (message_count, offset) = primitive::decode_long(buf, offset)?;
        Ok((Self { message_count }, offset))
    }
}

/// Unbind a queue from an exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Unbind {
    /// Reserved access-ticket field.
    pub ticket: u16,
    /// Queue name.
    pub queue: String,
    /// Exchange to unbind from.
    pub exchange: String,
    /// Routing key of the binding to remove.
    pub routing_key: String,
    /// Binding arguments that identify the binding to remove.
    pub arguments: FieldTable,
}

impl Unbind {
    /// Method id.
    pub const METHOD_ID: u16 = 50;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.queue)?;
        primitive::encode_shortstr(dst, &self.exchange)?;
        primitive::encode_shortstr(dst, &self.routing_key)?;
        self.arguments.encode(dst)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (queue, offset) = primitive::decode_shortstr(buf, offset)?;
        let (exchange, offset) = primitive::decode_shortstr(buf, offset)?;
        let (routing_key, offset) = primitive::decode_shortstr(buf, offset)?;
        let (arguments, offset) = FieldTable::decode(buf, offset)?;
        Ok((Self { ticket, queue, exchange, routing_key, arguments }, offset))
    }
}

/// Acknowledges a successful [`Unbind`]; carries no fields.
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
