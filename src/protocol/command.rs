//! # Command Contract
//!
//! Every command type knows its wire tag and how to move between a typed value
//! and a [`Frame`]. [`MqttCommand`] wraps all known commands in one tagged
//! variant so the dispatcher can hand back a single type.
//!
//! Capabilities beyond the core contract are small separate traits:
//! [`Acked`] for commands correlated by message id, and
//! [`HasHeader`](crate::protocol::header::HasHeader) for commands that embed
//! header flags.

use crate::core::frame::Frame;
use crate::error::Result;
use crate::protocol::commands::{
    Disconnect, Pingreq, Pingresp, Puback, Pubcomp, Publish, Pubrec, Pubrel, Suback, Subscribe,
    Unsuback, Unsubscribe,
};
use crate::protocol::header::{HasHeader, Header};

/// A command with a fixed wire type.
pub trait Command: Sized {
    /// Wire type tag carried in the frame's command type field.
    const TYPE: u8;

    /// Decode a frame whose command type is [`Self::TYPE`].
    ///
    /// The caller is responsible for routing by type; see
    /// [`CommandRegistry`](crate::protocol::dispatcher::CommandRegistry).
    fn decode(frame: &Frame) -> Result<Self>;

    /// Encode into a frame with a single payload buffer.
    ///
    /// Encoding works on in-memory buffers and every field is validated when
    /// it enters the command, so there is no failure path.
    fn encode(&self) -> Frame;

    /// Wire type of this value, always [`Self::TYPE`].
    fn command_type(&self) -> u8 {
        Self::TYPE
    }
}

/// Commands that carry a message id used to match a later acknowledgment.
///
/// The id is always readable in memory. Whether it is written to the wire can
/// depend on the command's QoS.
pub trait Acked {
    fn message_id(&self) -> u16;
    fn set_message_id(&mut self, message_id: u16);
}

/// Any command this crate can decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MqttCommand {
    Publish(Publish),
    Puback(Puback),
    Pubrec(Pubrec),
    Pubrel(Pubrel),
    Pubcomp(Pubcomp),
    Subscribe(Subscribe),
    Suback(Suback),
    Unsubscribe(Unsubscribe),
    Unsuback(Unsuback),
    Pingreq(Pingreq),
    Pingresp(Pingresp),
    Disconnect(Disconnect),
}

macro_rules! for_each_command {
    ($self:expr, $cmd:ident => $body:expr) => {
        match $self {
            MqttCommand::Publish($cmd) => $body,
            MqttCommand::Puback($cmd) => $body,
            MqttCommand::Pubrec($cmd) => $body,
            MqttCommand::Pubrel($cmd) => $body,
            MqttCommand::Pubcomp($cmd) => $body,
            MqttCommand::Subscribe($cmd) => $body,
            MqttCommand::Suback($cmd) => $body,
            MqttCommand::Unsubscribe($cmd) => $body,
            MqttCommand::Unsuback($cmd) => $body,
            MqttCommand::Pingreq($cmd) => $body,
            MqttCommand::Pingresp($cmd) => $body,
            MqttCommand::Disconnect($cmd) => $body,
        }
    };
}

impl MqttCommand {
    pub fn command_type(&self) -> u8 {
        for_each_command!(self, cmd => cmd.command_type())
    }

    pub fn encode(&self) -> Frame {
        for_each_command!(self, cmd => cmd.encode())
    }

    /// Upper-case wire name, e.g. `SUBSCRIBE`.
    pub fn name(&self) -> &'static str {
        match self {
            MqttCommand::Publish(_) => "PUBLISH",
            MqttCommand::Puback(_) => "PUBACK",
            MqttCommand::Pubrec(_) => "PUBREC",
            MqttCommand::Pubrel(_) => "PUBREL",
            MqttCommand::Pubcomp(_) => "PUBCOMP",
            MqttCommand::Subscribe(_) => "SUBSCRIBE",
            MqttCommand::Suback(_) => "SUBACK",
            MqttCommand::Unsubscribe(_) => "UNSUBSCRIBE",
            MqttCommand::Unsuback(_) => "UNSUBACK",
            MqttCommand::Pingreq(_) => "PINGREQ",
            MqttCommand::Pingresp(_) => "PINGRESP",
            MqttCommand::Disconnect(_) => "DISCONNECT",
        }
    }

    /// The acknowledgment capability, if this command has one.
    pub fn as_acked(&self) -> Option<&dyn Acked> {
        match self {
            MqttCommand::Publish(cmd) => Some(cmd),
            MqttCommand::Puback(cmd) => Some(cmd),
            MqttCommand::Pubrec(cmd) => Some(cmd),
            MqttCommand::Pubrel(cmd) => Some(cmd),
            MqttCommand::Pubcomp(cmd) => Some(cmd),
            MqttCommand::Subscribe(cmd) => Some(cmd),
            MqttCommand::Suback(cmd) => Some(cmd),
            MqttCommand::Unsubscribe(cmd) => Some(cmd),
            MqttCommand::Unsuback(cmd) => Some(cmd),
            MqttCommand::Pingreq(_) | MqttCommand::Pingresp(_) | MqttCommand::Disconnect(_) => None,
        }
    }

    /// Header flags, for commands that interpret them.
    pub fn header(&self) -> Option<Header> {
        match self {
            MqttCommand::Publish(cmd) => Some(cmd.header()),
            MqttCommand::Subscribe(cmd) => Some(cmd.header()),
            MqttCommand::Unsubscribe(cmd) => Some(cmd.header()),
            _ => None,
        }
    }
}

macro_rules! impl_from_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for MqttCommand {
                fn from(cmd: $variant) -> Self {
                    MqttCommand::$variant(cmd)
                }
            }
        )*
    };
}

impl_from_command!(
    Publish,
    Puback,
    Pubrec,
    Pubrel,
    Pubcomp,
    Subscribe,
    Suback,
    Unsubscribe,
    Unsuback,
    Pingreq,
    Pingresp,
    Disconnect,
);
