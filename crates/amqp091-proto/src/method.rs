//! The method registry: the static map from `(class_id, method_id)` to a
//! concrete method type, and the [`Method`] sum type every decoded method
//! frame collapses into.
//!
//! One variant per wire shape, an exhaustive `descriptor()` match mirroring
//! the decode registry below, and exhaustive `encode`/`decode` matches
//! dispatching to each variant's own codec instead of a shared serializer.

use bytes::BufMut;

use crate::error::{ProtocolError, Result};
use crate::methods::{basic, channel, confirm, connection, exchange, queue, tx};

/// Static metadata about a method, independent of any particular instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// `Class.method` name, e.g. `"basic.publish"`.
    pub name: &'static str,
    /// Class id.
    pub class_id: u16,
    /// Method id within the class.
    pub method_id: u16,
    /// Whether the sender must wait for the paired reply before sending
    /// further methods on the same channel.
    pub synchronous: bool,
    /// Whether this method is always followed by a content-header and
    /// content-body frame sequence.
    pub has_content: bool,
}

/// A decoded AMQP method, tagged by class and method id.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    /// `connection.start`
    ConnectionStart(connection::Start),
    /// `connection.start-ok`
    ConnectionStartOk(connection::StartOk),
    /// `connection.secure`
    ConnectionSecure(connection::Secure),
    /// `connection.secure-ok`
    ConnectionSecureOk(connection::SecureOk),
    /// `connection.tune`
    ConnectionTune(connection::Tune),
    /// `connection.tune-ok`
    ConnectionTuneOk(connection::TuneOk),
    /// `connection.open`
    ConnectionOpen(connection::Open),
    /// `connection.open-ok`
    ConnectionOpenOk(connection::OpenOk),
    /// `connection.close`
    ConnectionClose(connection::Close),
    /// `connection.close-ok`
    ConnectionCloseOk(connection::CloseOk),
    /// `connection.blocked`
    ConnectionBlocked(connection::Blocked),
    /// `connection.unblocked`
    ConnectionUnblocked(connection::Unblocked),

    /// `channel.open`
    ChannelOpen(channel::Open),
    /// `channel.open-ok`
    ChannelOpenOk(channel::OpenOk),
    /// `channel.flow`
    ChannelFlow(channel::Flow),
    /// `channel.flow-ok`
    ChannelFlowOk(channel::FlowOk),
    /// `channel.close`
    ChannelClose(channel::Close),
    /// `channel.close-ok`
    ChannelCloseOk(channel::CloseOk),

    /// `exchange.declare`
    ExchangeDeclare(exchange::Declare),
    /// `exchange.declare-ok`
    ExchangeDeclareOk(exchange::DeclareOk),
    /// `exchange.delete`
    ExchangeDelete(exchange::Delete),
    /// `exchange.delete-ok`
    ExchangeDeleteOk(exchange::DeleteOk),
    /// `exchange.bind`
    ExchangeBind(exchange::Bind),
    /// `exchange.bind-ok`
    ExchangeBindOk(exchange::BindOk),
    /// `exchange.unbind`
    ExchangeUnbind(exchange::Unbind),
    /// `exchange.unbind-ok`
    ExchangeUnbindOk(exchange::UnbindOk),

    /// `queue.declare`
    QueueDeclare(queue::Declare),
    /// `queue.declare-ok`
    QueueDeclareOk(queue::DeclareOk),
    /// `queue.bind`
    QueueBind(queue::Bind),
    /// `queue.bind-ok`
    QueueBindOk(queue::BindOk),
    /// `queue.purge`
    QueuePurge(queue::Purge),
    /// `queue.purge-ok`
    QueuePurgeOk(queue::PurgeOk),
    /// `queue.delete`
    QueueDelete(queue::Delete),
    /// `queue.delete-ok`
    QueueDeleteOk(queue::DeleteOk),
    /// `queue.unbind`
    QueueUnbind(queue::Unbind),
    /// `queue.unbind-ok`
    QueueUnbindOk(queue::UnbindOk),

    /// `basic.qos`
    BasicQos(basic::Qos),
    /// `basic.qos-ok`
    BasicQosOk(basic::QosOk),
    /// `basic.consume`
    BasicConsume(basic::Consume),
    /// `basic.consume-ok`
    BasicConsumeOk(basic::ConsumeOk),
    /// `basic.cancel`
    BasicCancel(basic::Cancel),
    /// `basic.cancel-ok`
    BasicCancelOk(basic::CancelOk),
    /// `basic.publish`
    BasicPublish(basic::Publish),
    /// `basic.return`
    BasicReturn(basic::Return),
    /// `basic.deliver`
    BasicDeliver(basic::Deliver),
    /// `basic.get`
    BasicGet(basic::Get),
    /// `basic.get-ok`
    BasicGetOk(basic::GetOk),
    /// `basic.get-empty`
    BasicGetEmpty(basic::GetEmpty),
    /// `basic.ack`
    BasicAck(basic::Ack),
    /// `basic.reject`
    BasicReject(basic::Reject),
    /// `basic.recover-async`
    BasicRecoverAsync(basic::RecoverAsync),
    /// `basic.recover`
    BasicRecover(basic::Recover),
    /// `basic.recover-ok`
    BasicRecoverOk(basic::RecoverOk),
    /// `basic.nack`
    BasicNack(basic::Nack),

    /// `tx.select`
    TxSelect(tx::Select),
    /// `tx.select-ok`
    TxSelectOk(tx::SelectOk),
    /// `tx.commit`
    TxCommit(tx::Commit),
    /// `tx.commit-ok`
    TxCommitOk(tx::CommitOk),
    /// `tx.rollback`
    TxRollback(tx::Rollback),
    /// `tx.rollback-ok`
    TxRollbackOk(tx::RollbackOk),

    /// `confirm.select`
    ConfirmSelect(confirm::Select),
    /// `confirm.select-ok`
    ConfirmSelectOk(confirm::SelectOk),
}

impl Method {
    /// Static metadata describing this method's wire identity and shape.
    #[must_use]
    pub fn descriptor(&self) -> MethodDescriptor {
        let (name, class_id, method_id, synchronous, has_content) = match self {
            Self::ConnectionStart(_) => ("connection.start", connection::CLASS_ID, connection::Start::METHOD_ID, true, false),
            Self::ConnectionStartOk(_) => ("connection.start-ok", connection::CLASS_ID, connection::StartOk::METHOD_ID, true, false),
            Self::ConnectionSecure(_) => ("connection.secure", connection::CLASS_ID, connection::Secure::METHOD_ID, true, false),
            Self::ConnectionSecureOk(_) => ("connection.secure-ok", connection::CLASS_ID, connection::SecureOk::METHOD_ID, true, false),
            Self::ConnectionTune(_) => ("connection.tune", connection::CLASS_ID, connection::Tune::METHOD_ID, true, false),
            Self::ConnectionTuneOk(_) => ("connection.tune-ok", connection::CLASS_ID, connection::TuneOk::METHOD_ID, true, false),
            Self::ConnectionOpen(_) => ("connection.open", connection::CLASS_ID, connection::Open::METHOD_ID, true, false),
            Self::ConnectionOpenOk(_) => ("connection.open-ok", connection::CLASS_ID, connection::OpenOk::METHOD_ID, true, false),
            Self::ConnectionClose(_) => ("connection.close", connection::CLASS_ID, connection::Close::METHOD_ID, true, false),
            Self::ConnectionCloseOk(_) => ("connection.close-ok", connection::CLASS_ID, connection::CloseOk::METHOD_ID, true, false),
            Self::ConnectionBlocked(_) => ("connection.blocked", connection::CLASS_ID, connection::Blocked::METHOD_ID, false, false),
            Self::ConnectionUnblocked(_) => ("connection.unblocked", connection::CLASS_ID, connection::Unblocked::METHOD_ID, false, false),

            Self::ChannelOpen(_) => ("channel.open", channel::CLASS_ID, channel::Open::METHOD_ID, true, false),
            Self::ChannelOpenOk(_) => ("channel.open-ok", channel::CLASS_ID, channel::OpenOk::METHOD_ID, true, false),
            Self::ChannelFlow(_) => ("channel.flow", channel::CLASS_ID, channel::Flow::METHOD_ID, true, false),
            Self::ChannelFlowOk(_) => ("channel.flow-ok", channel::CLASS_ID, channel::FlowOk::METHOD_ID, true, false),
            Self::ChannelClose(_) => ("channel.close", channel::CLASS_ID, channel::Close::METHOD_ID, true, false),
            Self::ChannelCloseOk(_) => ("channel.close-ok", channel::CLASS_ID, channel::CloseOk::METHOD_ID, true, false),

            Self::ExchangeDeclare(_) => ("exchange.declare", exchange::CLASS_ID, exchange::Declare::METHOD_ID, true, false),
            Self::ExchangeDeclareOk(_) => ("exchange.declare-ok", exchange::CLASS_ID, exchange::DeclareOk::METHOD_ID, true, false),
            Self::ExchangeDelete(_) => ("exchange.delete", exchange::CLASS_ID, exchange::Delete::METHOD_ID, true, false),
            Self::ExchangeDeleteOk(_) => ("exchange.delete-ok", exchange::CLASS_ID, exchange::DeleteOk::METHOD_ID, true, false),
            Self::ExchangeBind(_) => ("exchange.bind", exchange::CLASS_ID, exchange::Bind::METHOD_ID, true, false),
            Self::ExchangeBindOk(_) => ("exchange.bind-ok", exchange::CLASS_ID, exchange::BindOk::METHOD_ID, true, false),
            Self::ExchangeUnbind(_) => ("exchange.unbind", exchange::CLASS_ID, exchange::Unbind::METHOD_ID, true, false),
            Self::ExchangeUnbindOk(_) => ("exchange.unbind-ok", exchange::CLASS_ID, exchange::UnbindOk::METHOD_ID, true, false),

            Self::QueueDeclare(_) => ("queue.declare", queue::CLASS_ID, queue::Declare::METHOD_ID, true, false),
            Self::QueueDeclareOk(_) => ("queue.declare-ok", queue::CLASS_ID, queue::DeclareOk::METHOD_ID, true, false),
            Self::QueueBind(_) => ("queue.bind", queue::CLASS_ID, queue::Bind::METHOD_ID, true, false),
            Self::QueueBindOk(_) => ("queue.bind-ok", queue::CLASS_ID, queue::BindOk::METHOD_ID, true, false),
            Self::QueuePurge(_) => ("queue.purge", queue::CLASS_ID, queue::Purge::METHOD_ID, true, false),
            Self::QueuePurgeOk(_) => ("queue.purge-ok", queue::CLASS_ID, queue::PurgeOk::METHOD_ID, true, false),
            Self::QueueDelete(_) => ("queue.delete", queue::CLASS_ID, queue::Delete::METHOD_ID, true, false),
            Self::QueueDeleteOk(_) => ("queue.delete-ok", queue::CLASS_ID, queue::DeleteOk::METHOD_ID, true, false),
            Self::QueueUnbind(_) => ("queue.unbind", queue::CLASS_ID, queue::Unbind::METHOD_ID, true, false),
            Self::QueueUnbindOk(_) => ("queue.unbind-ok", queue::CLASS_ID, queue::UnbindOk::METHOD_ID, true, false),

            Self::BasicQos(_) => ("basic.qos", basic::CLASS_ID, basic::Qos::METHOD_ID, true, false),
            Self::BasicQosOk(_) => ("basic.qos-ok", basic::CLASS_ID, basic::QosOk::METHOD_ID, true, false),
            Self::BasicConsume(_) => ("basic.consume", basic::CLASS_ID, basic::Consume::METHOD_ID, true, false),
            Self::BasicConsumeOk(_) => ("basic.consume-ok", basic::CLASS_ID, basic::ConsumeOk::METHOD_ID, true, false),
            Self::BasicCancel(_) => ("basic.cancel", basic::CLASS_ID, basic::Cancel::METHOD_ID, true, false),
            Self::BasicCancelOk(_) => ("basic.cancel-ok", basic::CLASS_ID, basic::CancelOk::METHOD_ID, true, false),
            Self::BasicPublish(_) => ("basic.publish", basic::CLASS_ID, basic::Publish::METHOD_ID, false, true),
            Self::BasicReturn(_) => ("basic.return", basic::CLASS_ID, basic::Return::METHOD_ID, false, true),
            Self::BasicDeliver(_) => ("basic.deliver", basic::CLASS_ID, basic::Deliver::METHOD_ID, false, true),
            Self::BasicGet(_) => ("basic.get", basic::CLASS_ID, basic::Get::METHOD_ID, true, false),
            Self::BasicGetOk(_) => ("basic.get-ok", basic::CLASS_ID, basic::GetOk::METHOD_ID, true, true),
            Self::BasicGetEmpty(_) => ("basic.get-empty", basic::CLASS_ID, basic::GetEmpty::METHOD_ID, true, false),
            Self::BasicAck(_) => ("basic.ack", basic::CLASS_ID, basic::Ack::METHOD_ID, false, false),
            Self::BasicReject(_) => ("basic.reject", basic::CLASS_ID, basic::Reject::METHOD_ID, false, false),
            Self::BasicRecoverAsync(_) => ("basic.recover-async", basic::CLASS_ID, basic::RecoverAsync::METHOD_ID, false, false),
            Self::BasicRecover(_) => ("basic.recover", basic::CLASS_ID, basic::Recover::METHOD_ID, true, false),
            Self::BasicRecoverOk(_) => ("basic.recover-ok", basic::CLASS_ID, basic::RecoverOk::METHOD_ID, true, false),
            Self::BasicNack(_) => ("basic.nack", basic::CLASS_ID, basic::Nack::METHOD_ID, false, false),

            Self::TxSelect(_) => ("tx.select", tx::CLASS_ID, tx::Select::METHOD_ID, true, false),
            Self::TxSelectOk(_) => ("tx.select-ok", tx::CLASS_ID, tx::SelectOk::METHOD_ID, true, false),
            Self::TxCommit(_) => ("tx.commit", tx::CLASS_ID, tx::Commit::METHOD_ID, true, false),
            Self::TxCommitOk(_) => ("tx.commit-ok", tx::CLASS_ID, tx::CommitOk::METHOD_ID, true, false),
            Self::TxRollback(_) => ("tx.rollback", tx::CLASS_ID, tx::Rollback::METHOD_ID, true, false),
            Self::TxRollbackOk(_) => ("tx.rollback-ok", tx::CLASS_ID, tx::RollbackOk::METHOD_ID, true, false),

            Self::ConfirmSelect(_) => ("confirm.select", confirm::CLASS_ID, confirm::Select::METHOD_ID, true, false),
            Self::ConfirmSelectOk(_) => ("confirm.select-ok", confirm::CLASS_ID, confirm::SelectOk::METHOD_ID, true, false),
        };
        MethodDescriptor { name, class_id, method_id, synchronous, has_content }
    }

    /// `(class_id, method_id)` for this method.
    #[must_use]
    pub fn id(&self) -> (u16, u16) {
        let descriptor = self.descriptor();
        (descriptor.class_id, descriptor.method_id)
    }

    /// Whether this method is always followed by a content-header/body
    /// frame sequence.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.descriptor().has_content
    }

    /// Encode the method's argument list (not including the class/method id
    /// prefix, which the caller's frame-level encoder writes).
    ///
    /// # Errors
    ///
    /// Propagates any field-level encode error (e.g. an oversize shortstr).
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        match self {
            Self::ConnectionStart(m) => m.encode(dst),
            Self::ConnectionStartOk(m) => m.encode(dst),
            Self::ConnectionSecure(m) => m.encode(dst),
            Self::ConnectionSecureOk(m) => m.encode(dst),
            Self::ConnectionTune(m) => m.encode(dst),
            Self::ConnectionTuneOk(m) => m.encode(dst),
            Self::ConnectionOpen(m) => m.encode(dst),
            Self::ConnectionOpenOk(m) => m.encode(dst),
            Self::ConnectionClose(m) => m.encode(dst),
            Self::ConnectionCloseOk(m) => m.encode(dst),
            Self::ConnectionBlocked(m) => m.encode(dst),
            Self::ConnectionUnblocked(m) => m.encode(dst),

            Self::ChannelOpen(m) => m.encode(dst),
            Self::ChannelOpenOk(m) => m.encode(dst),
            Self::ChannelFlow(m) => m.encode(dst),
            Self::ChannelFlowOk(m) => m.encode(dst),
            Self::ChannelClose(m) => m.encode(dst),
            Self::ChannelCloseOk(m) => m.encode(dst),

            Self::ExchangeDeclare(m) => m.encode(dst),
            Self::ExchangeDeclareOk(m) => m.encode(dst),
            Self::ExchangeDelete(m) => m.encode(dst),
            Self::ExchangeDeleteOk(m) => m.encode(dst),
            Self::ExchangeBind(m) => m.encode(dst),
            Self::ExchangeBindOk(m) => m.encode(dst),
            Self::ExchangeUnbind(m) => m.encode(dst),
            Self::ExchangeUnbindOk(m) => m.encode(dst),

            Self::QueueDeclare(m) => m.encode(dst),
            Self::QueueDeclareOk(m) => m.encode(dst),
            Self::QueueBind(m) => m.encode(dst),
            Self::QueueBindOk(m) => m.encode(dst),
            Self::QueuePurge(m) => m.encode(dst),
            Self::QueuePurgeOk(m) => m.encode(dst),
            Self::QueueDelete(m) => m.encode(dst),
            Self::QueueDeleteOk(m) => m.encode(dst),
            Self::QueueUnbind(m) => m.encode(dst),
            Self::QueueUnbindOk(m) => m.encode(dst),

            Self::BasicQos(m) => m.encode(dst),
            Self::BasicQosOk(m) => m.encode(dst),
            Self::BasicConsume(m) => m.encode(dst),
            Self::BasicConsumeOk(m) => m.encode(dst),
            Self::BasicCancel(m) => m.encode(dst),
            Self::BasicCancelOk(m) => m.encode(dst),
            Self::BasicPublish(m) => m.encode(dst),
            Self::BasicReturn(m) => m.encode(dst),
            Self::BasicDeliver(m) => m.encode(dst),
            Self::BasicGet(m) => m.encode(dst),
            Self::BasicGetOk(m) => m.encode(dst),
            Self::BasicGetEmpty(m) => m.encode(dst),
            Self::BasicAck(m) => m.encode(dst),
            Self::BasicReject(m) => m.encode(dst),
            Self::BasicRecoverAsync(m) => m.encode(dst),
            Self::BasicRecover(m) => m.encode(dst),
            Self::BasicRecoverOk(m) => m.encode(dst),
            Self::BasicNack(m) => m.encode(dst),

            Self::TxSelect(m) => m.encode(dst),
            Self::TxSelectOk(m) => m.encode(dst),
            Self::TxCommit(m) => m.encode(dst),
            Self::TxCommitOk(m) => m.encode(dst),
            Self::TxRollback(m) => m.encode(dst),
            Self::TxRollbackOk(m) => m.encode(dst),

            Self::ConfirmSelect(m) => m.encode(dst),
            Self::ConfirmSelectOk(m) => m.encode(dst),
        }
    }

    /// Decode a method's argument list given its `(class_id, method_id)`.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnknownMethod`] if no method is registered for the
    /// pair; propagates any field-level decode error otherwise.
    pub fn decode(class_id: u16, method_id: u16, buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        match (class_id, method_id) {
            (connection::CLASS_ID, connection::Start::METHOD_ID) => {
                let (m, offset) = connection::Start::decode(buf, offset)?;
                Ok((Self::ConnectionStart(m), offset))
            }
            (connection::CLASS_ID, connection::StartOk::METHOD_ID) => {
                let (m, offset) = connection::StartOk::decode(buf, offset)?;
                Ok((Self::ConnectionStartOk(m), offset))
            }
            (connection::CLASS_ID, connection::Secure::METHOD_ID) => {
                let (m, offset) = connection::Secure::decode(buf, offset)?;
                Ok((Self::ConnectionSecure(m), offset))
            }
            (connection::CLASS_ID, connection::SecureOk::METHOD_ID) => {
                let (m, offset) = connection::SecureOk::decode(buf, offset)?;
                Ok((Self::ConnectionSecureOk(m), offset))
            }
            (connection::CLASS_ID, connection::Tune::METHOD_ID) => {
                let (m, offset) = connection::Tune::decode(buf, offset)?;
                Ok((Self::ConnectionTune(m), offset))
            }
            (connection::CLASS_ID, connection::TuneOk::METHOD_ID) => {
                let (m, offset) = connection::TuneOk::decode(buf, offset)?;
                Ok((Self::ConnectionTuneOk(m), offset))
            }
            (connection::CLASS_ID, connection::Open::METHOD_ID) => {
                let (m, offset) = connection::Open::decode(buf, offset)?;
                Ok((Self::ConnectionOpen(m), offset))
            }
            (connection::CLASS_ID, connection::OpenOk::METHOD_ID) => {
                let (m, offset) = connection::OpenOk::decode(buf, offset)?;
                Ok((Self::ConnectionOpenOk(m), offset))
            }
            (connection::CLASS_ID, connection::Close::METHOD_ID) => {
                let (m, offset) = connection::Close::decode(buf, offset)?;
                Ok((Self::ConnectionClose(m), offset))
            }
            (connection::CLASS_ID, connection::CloseOk::METHOD_ID) => {
                let (m, offset) = connection::CloseOk::decode(buf, offset)?;
                Ok((Self::ConnectionCloseOk(m), offset))
            }
            (connection::CLASS_ID, connection::Blocked::METHOD_ID) => {
                let (m, offset) = connection::Blocked::decode(buf, offset)?;
                Ok((Self::ConnectionBlocked(m), offset))
            }
            (connection::CLASS_ID, connection::Unblocked::METHOD_ID) => {
                let (m, offset) = connection::Unblocked::decode(buf, offset)?;
                Ok((Self::ConnectionUnblocked(m), offset))
            }

            (channel::CLASS_ID, channel::Open::METHOD_ID) => {
                let (m, offset) = channel::Open::decode(buf, offset)?;
                Ok((Self::ChannelOpen(m), offset))
            }
            (channel::CLASS_ID, channel::OpenOk::METHOD_ID) => {
                let (m, offset) = channel::OpenOk::decode(buf, offset)?;
                Ok((Self::ChannelOpenOk(m), offset))
            }
            (channel::CLASS_ID, channel::Flow::METHOD_ID) => {
                let (m, offset) = channel::Flow::decode(buf, offset)?;
                Ok((Self::ChannelFlow(m), offset))
            }
            (channel::CLASS_ID, channel::FlowOk::METHOD_ID) => {
                let (m, offset) = channel::FlowOk::decode(buf, offset)?;
                Ok((Self::ChannelFlowOk(m), offset))
            }
            (channel::CLASS_ID, channel::Close::METHOD_ID) => {
                let (m, offset) = channel::Close::decode(buf, offset)?;
                Ok((Self::ChannelClose(m), offset))
            }
            (channel::CLASS_ID, channel::CloseOk::METHOD_ID) => {
                let (m, offset) = channel::CloseOk::decode(buf, offset)?;
                Ok((Self::ChannelCloseOk(m), offset))
            }

            (exchange::CLASS_ID, exchange::Declare::METHOD_ID) => {
                let (m, offset) = exchange::Declare::decode(buf, offset)?;
                Ok((Self::ExchangeDeclare(m), offset))
            }
            (exchange::CLASS_ID, exchange::DeclareOk::METHOD_ID) => {
                let (m, offset) = exchange::DeclareOk::decode(buf, offset)?;
                Ok((Self::ExchangeDeclareOk(m), offset))
            }
            (exchange::CLASS_ID, exchange::Delete::METHOD_ID) => {
                let (m, offset) = exchange::Delete::decode(buf, offset)?;
                Ok((Self::ExchangeDelete(m), offset))
            }
            (exchange::CLASS_ID, exchange::DeleteOk::METHOD_ID) => {
                let (m, offset) = exchange::DeleteOk::decode(buf, offset)?;
                Ok((Self::ExchangeDeleteOk(m), offset))
            }
            (exchange::CLASS_ID, exchange::Bind::METHOD_ID) => {
                let (m, offset) = exchange::Bind::decode(buf, offset)?;
                Ok((Self::ExchangeBind(m), offset))
            }
            (exchange::CLASS_ID, exchange::BindOk::METHOD_ID) => {
                let (m, offset) = exchange::BindOk::decode(buf, offset)?;
                Ok((Self::ExchangeBindOk(m), offset))
            }
            (exchange::CLASS_ID, exchange::Unbind::METHOD_ID) => {
                let (m, offset) = exchange::Unbind::decode(buf, offset)?;
                Ok((Self::ExchangeUnbind(m), offset))
            }
            (exchange::CLASS_ID, exchange::UnbindOk::METHOD_ID) => {
                let (m, offset) = exchange::UnbindOk::decode(buf, offset)?;
                Ok((Self::ExchangeUnbindOk(m), offset))
            }

            (queue::CLASS_ID, queue::Declare::METHOD_ID) => {
                let (m, offset) = queue::Declare::decode(buf, offset)?;
                Ok((Self::QueueDeclare(m), offset))
            }
            (queue::CLASS_ID, queue::DeclareOk::METHOD_ID) => {
                let (m, offset) = queue::DeclareOk::decode(buf, offset)?;
                Ok((Self::QueueDeclareOk(m), offset))
            }
            (queue::CLASS_ID, queue::Bind::METHOD_ID) => {
                let (m, offset) = queue::Bind::decode(buf, offset)?;
                Ok((Self::QueueBind(m), offset))
            }
            (queue::CLASS_ID, queue::BindOk::METHOD_ID) => {
                let (m, offset) = queue::BindOk::decode(buf, offset)?;
                Ok((Self::QueueBindOk(m), offset))
            }
            (queue::CLASS_ID, queue::Purge::METHOD_ID) => {
                let (m, offset) = queue::Purge::decode(buf, offset)?;
                Ok((Self::QueuePurge(m), offset))
            }
            (queue::CLASS_ID, queue::PurgeOk::METHOD_ID) => {
                let (m, offset) = queue::PurgeOk::decode(buf, offset)?;
                Ok((Self::QueuePurgeOk(m), offset))
            }
            (queue::CLASS_ID, queue::Delete::METHOD_ID) => {
                let (m, offset) = queue::Delete::decode(buf, offset)?;
                Ok((Self::QueueDelete(m), offset))
            }
            (queue::CLASS_ID, queue::DeleteOk::METHOD_ID) => {
                let (m, offset) = queue::DeleteOk::decode(buf, offset)?;
                Ok((Self::QueueDeleteOk(m), offset))
            }
            (queue::CLASS_ID, queue::Unbind::METHOD_ID) => {
                let (m, offset) = queue::Unbind::decode(buf, offset)?;
                Ok((Self::QueueUnbind(m), offset))
            }
            (queue::CLASS_ID, queue::UnbindOk::METHOD_ID) => {
                let (m, offset) = queue::UnbindOk::decode(buf, offset)?;
                Ok((Self::QueueUnbindOk(m), offset))
            }

            (basic::CLASS_ID, basic::Qos::METHOD_ID) => {
                let (m, offset) = basic::Qos::decode(buf, offset)?;
                Ok((Self::BasicQos(m), offset))
            }
            (basic::CLASS_ID, basic::QosOk::METHOD_ID) => {
                let (m, offset) = basic::QosOk::decode(buf, offset)?;
                Ok((Self::BasicQosOk(m), offset))
            }
            (basic::CLASS_ID, basic::Consume::METHOD_ID) => {
                let (m, offset) = basic::Consume::decode(buf, offset)?;
                Ok((Self::BasicConsume(m), offset))
            }
            (basic::CLASS_ID, basic::ConsumeOk::METHOD_ID) => {
                let (m, offset) = basic::ConsumeOk::decode(buf, offset)?;
                Ok((Self::BasicConsumeOk(m), offset))
            }
            (basic::CLASS_ID, basic::Cancel::METHOD_ID) => {
                let (m, offset) = basic::Cancel::decode(buf, offset)?;
                Ok((Self::BasicCancel(m), offset))
            }
            (basic::CLASS_ID, basic::CancelOk::METHOD_ID) => {
                let (m, offset) = basic::CancelOk::decode(buf, offset)?;
                Ok((Self::BasicCancelOk(m), offset))
            }
            (basic::CLASS_ID, basic::Publish::METHOD_ID) => {
                let (m, offset) = basic::Publish::decode(buf, offset)?;
                Ok((Self::BasicPublish(m), offset))
            }
            (basic::CLASS_ID, basic::Return::METHOD_ID) => {
                let (m, offset) = basic::Return::decode(buf, offset)?;
                Ok((Self::BasicReturn(m), offset))
            }
            (basic::CLASS_ID, basic::Deliver::METHOD_ID) => {
                let (m, offset) = basic::Deliver::decode(buf, offset)?;
                Ok((Self::BasicDeliver(m), offset))
            }
            (basic::CLASS_ID, basic::Get::METHOD_ID) => {
                let (m, offset) = basic::Get::decode(buf, offset)?;
                Ok((Self::BasicGet(m), offset))
            }
            (basic::CLASS_ID, basic::GetOk::METHOD_ID) => {
                let (m, offset) = basic::GetOk::decode(buf, offset)?;
                Ok((Self::BasicGetOk(m), offset))
            }
            (basic::CLASS_ID, basic::GetEmpty::METHOD_ID) => {
                let (m, offset) = basic::GetEmpty::decode(buf, offset)?;
                Ok((Self::BasicGetEmpty(m), offset))
            }
            (basic::CLASS_ID, basic::Ack::METHOD_ID) => {
                let (m, offset) = basic::Ack::decode(buf, offset)?;
                Ok((Self::BasicAck(m), offset))
            }
            (basic::CLASS_ID, basic::Reject::METHOD_ID) => {
                let (m, offset) = basic::Reject::decode(buf, offset)?;
                Ok((Self::BasicReject(m), offset))
            }
            (basic::CLASS_ID, basic::RecoverAsync::METHOD_ID) => {
                let (m, offset) = basic::RecoverAsync::decode(buf, offset)?;
                Ok((Self::BasicRecoverAsync(m), offset))
            }
            (basic::CLASS_ID, basic::Recover::METHOD_ID) => {
                let (m, offset) = basic::Recover::decode(buf, offset)?;
                Ok((Self::BasicRecover(m), offset))
            }
            (basic::CLASS_ID, basic::RecoverOk::METHOD_ID) => {
                let (m, offset) = basic::RecoverOk::decode(buf, offset)?;
                Ok((Self::BasicRecoverOk(m), offset))
            }
            (basic::CLASS_ID, basic::Nack::METHOD_ID) => {
                let (m, offset) = basic::Nack::decode(buf, offset)?;
                Ok((Self::BasicNack(m), offset))
            }

            (tx::CLASS_ID, tx::Select::METHOD_ID) => {
                let (m, offset) = tx::Select::decode(buf, offset)?;
                Ok((Self::TxSelect(m), offset))
            }
            (tx::CLASS_ID, tx::SelectOk::METHOD_ID) => {
                let (m, offset) = tx::SelectOk::decode(buf, offset)?;
                Ok((Self::TxSelectOk(m), offset))
            }
            (tx::CLASS_ID, tx::Commit::METHOD_ID) => {
                let (m, offset) = tx::Commit::decode(buf, offset)?;
                Ok((Self::TxCommit(m), offset))
            }
            (tx::CLASS_ID, tx::CommitOk::METHOD_ID) => {
                let (m, offset) = tx::CommitOk::decode(buf, offset)?;
                Ok((Self::TxCommitOk(m), offset))
            }
            (tx::CLASS_ID, tx::Rollback::METHOD_ID) => {
                let (m, offset) = tx::Rollback::decode(buf, offset)?;
                Ok((Self::TxRollback(m), offset))
            }
            (tx::CLASS_ID, tx::RollbackOk::METHOD_ID) => {
                let (m, offset) = tx::RollbackOk::decode(buf, offset)?;
                Ok((Self::TxRollbackOk(m), offset))
            }

            (confirm::CLASS_ID, confirm::Select::METHOD_ID) => {
                let (m, offset) = confirm::Select::decode(buf, offset)?;
                Ok((Self::ConfirmSelect(m), offset))
            }
            (confirm::CLASS_ID, confirm::SelectOk::METHOD_ID) => {
                let (m, offset) = confirm::SelectOk::decode(buf, offset)?;
                Ok((Self::ConfirmSelectOk(m), offset))
            }

            (class_id, method_id) => Err(ProtocolError::UnknownMethod { class_id, method_id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_publish_is_content_bearing() {
        let method = Method::BasicPublish(basic::Publish {
            ticket: 0,
            exchange: String::new(),
            routing_key: "events".to_owned(),
            mandatory: false,
            immediate: false,
        });
        assert!(method.has_content());
        assert_eq!(method.id(), (60, 40));
    }

    #[test]
    fn connection_start_round_trips_through_the_registry() {
        let start = connection::Start {
            version_major: 0,
            version_minor: 9,
            server_properties: crate::table::FieldTable::new(),
            mechanisms: "PLAIN AMQPLAIN".to_owned(),
            locales: "en_US".to_owned(),
        };
        let mut buf = Vec::new();
        start.encode(&mut buf).unwrap();
        let (decoded, consumed) = Method::decode(10, 10, &buf, 0).unwrap();
        assert_eq!(decoded, Method::ConnectionStart(start));
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = Method::decode(10, 999, &[], 0).unwrap_err();
        assert_eq!(err, ProtocolError::UnknownMethod { class_id: 10, method_id: 999 });
    }
}
