//! Commands with an empty payload.

use crate::core::frame::Frame;
use crate::error::Result;
use crate::protocol::command::Command;
use bytes::Bytes;

macro_rules! empty_command {
    ($(#[$doc:meta])* $name:ident, $type:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Command for $name {
            const TYPE: u8 = $type;

            // Payload bytes, if any, carry no meaning and are ignored.
            fn decode(frame: &Frame) -> Result<Self> {
                frame.payload()?;
                Ok($name)
            }

            fn encode(&self) -> Frame {
                let mut frame = Frame::new();
                frame.set_command_type(Self::TYPE).buffer(Bytes::new());
                frame
            }
        }
    };
}

empty_command!(
    /// Keep-alive probe.
    Pingreq, 12
);
empty_command!(
    /// Keep-alive answer.
    Pingresp, 13
);
empty_command!(
    /// Clean shutdown notice from the client.
    Disconnect, 14
);
