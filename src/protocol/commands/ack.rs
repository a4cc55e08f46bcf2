//! Acknowledgments whose payload is nothing but the message id.

use crate::core::frame::Frame;
use crate::error::Result;
use crate::protocol::command::{Acked, Command};
use crate::protocol::wire::PayloadReader;

macro_rules! message_id_command {
    ($(#[$doc:meta])* $name:ident, $type:expr, $header:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            message_id: u16,
        }

        impl $name {
            pub fn new(message_id: u16) -> Self {
                Self { message_id }
            }
        }

        impl Command for $name {
            const TYPE: u8 = $type;

            fn decode(frame: &Frame) -> Result<Self> {
                let mut reader = PayloadReader::new(frame.payload()?);
                Ok(Self {
                    message_id: reader.read_u16()?,
                })
            }

            fn encode(&self) -> Frame {
                let mut frame = Frame::new();
                frame
                    .set_header($header)
                    .set_command_type(Self::TYPE)
                    .buffer(self.message_id.to_be_bytes().to_vec());
                frame
            }
        }

        impl Acked for $name {
            fn message_id(&self) -> u16 {
                self.message_id
            }

            fn set_message_id(&mut self, message_id: u16) {
                self.message_id = message_id;
            }
        }
    };
}

message_id_command!(
    /// Acknowledges an `AtLeastOnce` PUBLISH.
    Puback, 4, 0
);
message_id_command!(
    /// First reply in the `ExactlyOnce` exchange.
    Pubrec, 5, 0
);
message_id_command!(
    /// Release step of the `ExactlyOnce` exchange; sent with qos bits `AtLeastOnce`.
    Pubrel, 6, 0b0010
);
message_id_command!(
    /// Completes the `ExactlyOnce` exchange.
    Pubcomp, 7, 0
);
message_id_command!(
    /// Acknowledges an UNSUBSCRIBE.
    Unsuback, 11, 0
);
