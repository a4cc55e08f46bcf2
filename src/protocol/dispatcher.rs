use crate::core::frame::Frame;
use crate::error::{ProtocolError, Result};
use crate::protocol::command::{Command, MqttCommand};
use crate::protocol::commands::{
    Disconnect, Pingreq, Pingresp, Puback, Pubcomp, Publish, Pubrec, Pubrel, Suback, Subscribe,
    Unsuback, Unsubscribe,
};
use crate::utils::metrics::global_metrics;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::{debug, warn};

type DecodeFn = fn(&Frame) -> Result<MqttCommand>;

fn decode_as<C>(frame: &Frame) -> Result<MqttCommand>
where
    C: Command + Into<MqttCommand>,
{
    C::decode(frame).map(Into::into)
}

/// Immutable map from wire type byte to decoder.
///
/// Built once through [`RegistryBuilder`]; lookups take `&self` only, so a
/// registry can be shared across threads without locking.
pub struct CommandRegistry {
    decoders: HashMap<u8, DecodeFn>,
}

impl CommandRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry holding every command in this crate.
    pub fn with_defaults() -> Self {
        Self::builder()
            .register::<Publish>()
            .register::<Puback>()
            .register::<Pubrec>()
            .register::<Pubrel>()
            .register::<Pubcomp>()
            .register::<Subscribe>()
            .register::<Suback>()
            .register::<Unsubscribe>()
            .register::<Unsuback>()
            .register::<Pingreq>()
            .register::<Pingresp>()
            .register::<Disconnect>()
            .build()
    }

    pub fn contains(&self, command_type: u8) -> bool {
        self.decoders.contains_key(&command_type)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Decode `frame` with the decoder registered for its command type.
    pub fn dispatch(&self, frame: &Frame) -> Result<MqttCommand> {
        let command_type = frame.command_type();
        let metrics = global_metrics();

        let Some(decode) = self.decoders.get(&command_type) else {
            metrics.unknown_command_type();
            warn!(command_type, "No decoder registered for command type");
            return Err(ProtocolError::UnknownCommandType(command_type));
        };

        match decode(frame) {
            Ok(command) => {
                metrics.frame_decoded();
                debug!(command = command.name(), "Decoded command");
                Ok(command)
            }
            Err(e) => {
                metrics.decode_error();
                warn!(command_type, error = %e, "Rejected frame");
                Err(e)
            }
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    decoders: HashMap<u8, DecodeFn>,
}

impl RegistryBuilder {
    /// Route frames tagged `C::TYPE` to `C::decode`. A later registration for
    /// the same type replaces the earlier one.
    pub fn register<C>(mut self) -> Self
    where
        C: Command + Into<MqttCommand>,
    {
        if self.decoders.insert(C::TYPE, decode_as::<C>).is_some() {
            debug!(command_type = C::TYPE, "Replaced decoder");
        }
        self
    }

    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            decoders: self.decoders,
        }
    }
}

/// Process-wide registry, built on first use and read-only afterwards.
static REGISTRY: Lazy<CommandRegistry> = Lazy::new(CommandRegistry::with_defaults);

pub fn registry() -> &'static CommandRegistry {
    &REGISTRY
}

/// Decode a frame through the process-wide registry.
pub fn dispatch(frame: &Frame) -> Result<MqttCommand> {
    registry().dispatch(frame)
}
