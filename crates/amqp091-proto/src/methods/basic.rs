//! `Basic` class (class id 60): the message-transfer methods. Several of
//! these (`Publish`, `Return`, `Deliver`, `GetOk`) are content-bearing: the
//! method frame is always followed by a content-header frame and zero or
//! more content-body frames, carried at the [`crate::frame::Frame`] level.

use bytes::BufMut;

use crate::error::Result;
use crate::primitive::{self, BitReader, BitWriter};
use crate::table::FieldTable;

/// Class id for `Basic`.
pub const CLASS_ID: u16 = 60;

/// Set the prefetch window for a channel or connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Qos {
    /// Prefetch window in octets; 0 means no octet limit.
    pub prefetch_size: u32,
    /// Maximum number of unacknowledged messages outstanding.
    pub prefetch_count: u16,
    /// Apply the limits connection-wide rather than per-consumer.
    pub global: bool,
}

impl Qos {
    /// Method id.
    pub const METHOD_ID: u16 = 10;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_long(dst, self.prefetch_size);
        primitive::encode_short(dst, self.prefetch_count);
        let mut bits = BitWriter::new();
        bits.push(self.global);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (prefetch_size, offset) = primitive::decode_long(buf, offset)?;
        let (prefetch_count, offset) = primitive::decode_short(buf, offset)?;
        let mut bits = BitReader::new();
        let (global, offset) = bits.next(buf, offset)?;
        Ok((Self { prefetch_size, prefetch_count, global }, offset))
    }
}

/// Acknowledges a successful [`Qos`]; carries no fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QosOk;

impl QosOk {
    /// Method id.
    pub const METHOD_ID: u16 = 11;

    pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
        Ok(())
    }

    pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok((Self, offset))
    }
}

/// Start a consumer on a queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Consume {
    /// Reserved access-ticket field.
    pub ticket: u16,
    /// Queue to consume from.
    pub queue: String,
    /// Consumer tag; empty requests a server-generated tag.
    pub consumer_tag: String,
    /// Don't deliver messages published on this channel back to it.
    pub no_local: bool,
    /// Consumer does not send acknowledgements.
    pub no_ack: bool,
    /// Request exclusive consumer access to the queue.
    pub exclusive: bool,
    /// Suppress the `ConsumeOk` reply.
    pub nowait: bool,
    /// Consumer arguments.
    pub arguments: FieldTable,
}

impl Consume {
    /// Method id.
    pub const METHOD_ID: u16 = 20;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.queue)?;
        primitive::encode_shortstr(dst, &self.consumer_tag)?;
        let mut bits = BitWriter::new();
        bits.push(self.no_local);
        bits.push(self.no_ack);
        bits.push(self.exclusive);
        bits.push(self.nowait);
        bits.flush(dst);
        self.arguments.encode(dst)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (queue, offset) = primitive::decode_shortstr(buf, offset)?;
        let (consumer_tag, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (no_local, offset) = bits.next(buf, offset)?;
        let (no_ack, offset) = bits.next(buf, offset)?;
        let (exclusive, offset) = bits.next(buf, offset)?;
        let (nowait, offset) = bits.next(buf, offset)?;
        let (arguments, offset) = FieldTable::decode(buf, offset)?;
        Ok((
            Self { ticket, queue, consumer_tag, no_local, no_ack, exclusive, nowait, arguments },
            offset,
        ))
    }
}

/// Acknowledges a successful [`Consume`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumeOk {
    /// The (possibly server-generated) consumer tag.
    pub consumer_tag: String,
}

impl ConsumeOk {
    /// Method id.
    pub const METHOD_ID: u16 = 21;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_shortstr(dst, &self.consumer_tag)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (consumer_tag, offset) = primitive::decode_shortstr(buf, offset)?;
        Ok((Self { consumer_tag }, offset))
    }
}

/// Cancel a consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct Cancel {
    /// Tag of the consumer to cancel.
    pub consumer_tag: String,
    /// Suppress the `CancelOk` reply.
    pub nowait: bool,
}

impl Cancel {
    /// Method id.
    pub const METHOD_ID: u16 = 30;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_shortstr(dst, &self.consumer_tag)?;
        let mut bits = BitWriter::new();
        bits.push(self.nowait);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (consumer_tag, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (nowait, offset) = bits.next(buf, offset)?;
        Ok((Self { consumer_tag, nowait }, offset))
    }
}

/// Acknowledges a successful [`Cancel`].
#[derive(Debug, Clone, PartialEq)]
pub struct CancelOk {
    /// Tag of the cancelled consumer.
    pub consumer_tag: String,
}

impl CancelOk {
    /// Method id.
    pub const METHOD_ID: u16 = 31;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_shortstr(dst, &self.consumer_tag)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (consumer_tag, offset) = primitive::decode_shortstr(buf, offset)?;
        Ok((Self { consumer_tag }, offset))
    }
}

/// Publish a message. Content-bearing: always followed by a content-header
/// frame and the message body.
#[derive(Debug, Clone, PartialEq)]
pub struct Publish {
    /// Reserved access-ticket field.
    pub ticket: u16,
    /// Target exchange; empty means the default exchange.
    pub exchange: String,
    /// Routing key.
    pub routing_key: String,
    /// Return the message if it cannot be routed to a queue.
    pub mandatory: bool,
    /// Return the message if it cannot be delivered to a consumer
    /// immediately.
    pub immediate: bool,
}

impl Publish {
    /// Method id.
    pub const METHOD_ID: u16 = 40;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.exchange)?;
        primitive::encode_shortstr(dst, &self.routing_key)?;
        let mut bits = BitWriter::new();
        bits.push(self.mandatory);
        bits.push(self.immediate);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (exchange, offset) = primitive::decode_shortstr(buf, offset)?;
        let (routing_key, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (mandatory, offset) = bits.next(buf, offset)?;
        let (immediate, offset) = bits.next(buf, offset)?;
        Ok((Self { ticket, exchange, routing_key, mandatory, immediate }, offset))
    }
}

/// A message the broker could not route, handed back to the publisher.
/// Content-bearing.
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    /// Reply code explaining why the message was returned.
    pub reply_code: u16,
    /// Human-readable reason.
    pub reply_text: String,
    /// Exchange the message was published to.
    pub exchange: String,
    /// Routing key the message was published with.
    pub routing_key: String,
}

impl Return {
    /// Method id.
    pub const METHOD_ID: u16 = 50;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.reply_code);
        primitive::encode_shortstr(dst, &self.reply_text)?;
        primitive::encode_shortstr(dst, &self.exchange)?;
        primitive::encode_shortstr(dst, &self.routing_key)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (reply_code, offset) = primitive::decode_short(buf, offset)?;
        let (reply_text, offset) = primitive::decode_shortstr(buf, offset)?;
        let (exchange, offset) = primitive::decode_shortstr(buf, offset)?;
        let (routing_key, offset) = primitive::decode_shortstr(buf, offset)?;
        Ok((Self { reply_code, reply_text, exchange, routing_key }, offset))
    }
}

/// A message delivered to a consumer. Content-bearing.
#[derive(Debug, Clone, PartialEq)]
pub struct Deliver {
    /// Tag of the consumer this delivery is for.
    pub consumer_tag: String,
    /// Server-assigned delivery tag, used to ack/nack/reject this message.
    pub delivery_tag: u64,
    /// Whether this message was previously delivered and requeued.
    pub redelivered: bool,
    /// Exchange the message was published to.
    pub exchange: String,
    /// Routing key the message was published with.
    pub routing_key: String,
}

impl Deliver {
    /// Method id.
    pub const METHOD_ID: u16 = 60;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_shortstr(dst, &self.consumer_tag)?;
        primitive::encode_longlong(dst, self.delivery_tag);
        let mut bits = BitWriter::new();
        bits.push(self.redelivered);
        bits.flush(dst);
        primitive::encode_shortstr(dst, &self.exchange)?;
        primitive::encode_shortstr(dst, &self.routing_key)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (consumer_tag, offset) = primitive::decode_shortstr(buf, offset)?;
        let (delivery_tag, offset) = primitive::decode_longlong(buf, offset)?;
        let mut bits = BitReader::new();
        let (redelivered, offset) = bits.next(buf, offset)?;
        let (exchange, offset) = primitive::decode_shortstr(buf, offset)?;
        let (routing_key, offset) = primitive::decode_shortstr(buf, offset)?;
        Ok((Self { consumer_tag, delivery_tag, redelivered, exchange, routing_key }, offset))
    }
}

/// Fetch a single message directly, bypassing consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct Get {
    /// Reserved access-ticket field.
    pub ticket: u16,
    /// Queue to fetch from.
    pub queue: String,
    /// Don't expect an acknowledgement for the fetched message.
    pub no_ack: bool,
}

impl Get {
    /// Method id.
    pub const METHOD_ID: u16 = 70;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_short(dst, self.ticket);
        primitive::encode_shortstr(dst, &self.queue)?;
        let mut bits = BitWriter::new();
        bits.push(self.no_ack);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (ticket, offset) = primitive::decode_short(buf, offset)?;
        let (queue, offset) = primitive::decode_shortstr(buf, offset)?;
        let mut bits = BitReader::new();
        let (no_ack, offset) = bits.next(buf, offset)?;
        Ok((Self { ticket, queue, no_ack }, offset))
    }
}

/// A message fetched by [`Get`]. Content-bearing.
#[derive(Debug, Clone, PartialEq)]
pub struct GetOk {
    /// Server-assigned delivery tag.
    pub delivery_tag: u64,
    /// Whether this message was previously delivered and requeued.
    pub redelivered: bool,
    /// Exchange the message was published to.
    pub exchange: String,
    /// Routing key the message was published with.
    pub routing_key: String,
    /// Number of messages left in the queue after this one.
    pub message_count: u32,
}

impl GetOk {
    /// Method id.
    pub const METHOD_ID: u16 = 71;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_longlong(dst, self.delivery_tag);
        let mut bits = BitWriter::new();
        bits.push(self.redelivered);
        bits.flush(dst);
        primitive::encode_shortstr(dst, &self.exchange)?;
        primitive::encode_shortstr(dst, &self.routing_key)?;
        primitive::encode_long(dst, self.message_count);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (delivery_tag, offset) = primitive::decode_longlong(buf, offset)?;
        let mut bits = BitReader::new();
        let (redelivered, offset) = bits.next(buf, offset)?;
        let (exchange, offset) = primitive::decode_shortstr(buf, offset)?;
        let (routing_key, offset) = primitive::decode_shortstr(buf, offset)?;
        let (message_count, offset) = primitive::decode_long(buf, offset)?;
        Ok((Self { delivery_tag, redelivered, exchange, routing_key, message_count }, offset))
    }
}

/// Reply to [`Get`] when the queue was empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GetEmpty {
    /// Reserved; carried for wire compatibility, always empty in practice.
    pub cluster_id: String,
}

impl GetEmpty {
    /// Method id.
    pub const METHOD_ID: u16 = 72;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_shortstr(dst, &self.cluster_id)
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (cluster_id, offset) = primitive::decode_shortstr(buf, offset)?;
        Ok((Self { cluster_id }, offset))
    }
}

/// Acknowledge one or more delivered messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// Delivery tag to acknowledge.
    pub delivery_tag: u64,
    /// Acknowledge every outstanding message up to and including this tag.
    pub multiple: bool,
}

impl Ack {
    /// Method id.
    pub const METHOD_ID: u16 = 80;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_longlong(dst, self.delivery_tag);
        let mut bits = BitWriter::new();
        bits.push(self.multiple);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (delivery_tag, offset) = primitive::decode_longlong(buf, offset)?;
        let mut bits = BitReader::new();
        let (multiple, offset) = bits.next(buf, offset)?;
        Ok((Self { delivery_tag, multiple }, offset))
    }
}

/// Reject a single delivered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reject {
    /// Delivery tag to reject.
    pub delivery_tag: u64,
    /// Requeue the message instead of discarding or dead-lettering it.
    pub requeue: bool,
}

impl Reject {
    /// Method id.
    pub const METHOD_ID: u16 = 90;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_longlong(dst, self.delivery_tag);
        let mut bits = BitWriter::new();
        bits.push(self.requeue);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (delivery_tag, offset) = primitive::decode_longlong(buf, offset)?;
        let mut bits = BitReader::new();
        let (requeue, offset) = bits.next(buf, offset)?;
        Ok((Self { delivery_tag, requeue }, offset))
    }
}

/// Legacy asynchronous recover request (deprecated in favor of [`Recover`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverAsync {
    /// Requeue unacknowledged messages instead of redelivering them as-is.
    pub requeue: bool,
}

impl RecoverAsync {
    /// Method id.
    pub const METHOD_ID: u16 = 100;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        let mut bits = BitWriter::new();
        bits.push(self.requeue);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut bits = BitReader::new();
        let (requeue, offset) = bits.next(buf, offset)?;
        Ok((Self { requeue }, offset))
    }
}

/// Ask the broker to redeliver all unacknowledged messages on this channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recover {
    /// Requeue unacknowledged messages instead of redelivering them as-is.
    pub requeue: bool,
}

impl Recover {
    /// Method id.
    pub const METHOD_ID: u16 = 110;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        let mut bits = BitWriter::new();
        bits.push(self.requeue);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut bits = BitReader::new();
        let (requeue, offset) = bits.next(buf, offset)?;
        Ok((Self { requeue }, offset))
    }
}

/// Acknowledges a [`Recover`] request; carries no fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecoverOk;

impl RecoverOk {
    /// Method id.
    pub const METHOD_ID: u16 = 111;

    pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
        Ok(())
    }

    pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok((Self, offset))
    }
}

/// RabbitMQ extension: negative acknowledgement, like [`Reject`] but
/// supporting `multiple`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nack {
    /// Delivery tag to negatively acknowledge.
    pub delivery_tag: u64,
    /// Negatively acknowledge every outstanding message up to and including
    /// this tag.
    pub multiple: bool,
    /// Requeue the message(s) instead of discarding or dead-lettering them.
    pub requeue: bool,
}

impl Nack {
    /// Method id.
    pub const METHOD_ID: u16 = 120;

    pub(crate) fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        primitive::encode_longlong(dst, self.delivery_tag);
        let mut bits = BitWriter::new();
        bits.push(self.multiple);
        bits.push(self.requeue);
        bits.flush(dst);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (delivery_tag, offset) = primitive::decode_longlong(buf, offset)?;
        let mut bits = BitReader::new();
        let (multiple, offset) = bits.next(buf, offset)?;
        let (requeue, offset) = bits.next(buf, offset)?;
        Ok((Self { delivery_tag, multiple, requeue }, offset))
    }
}
