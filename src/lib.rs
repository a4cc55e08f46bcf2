//! # mqtt-codec
//!
//! Binary command frame codec for MQTT-style publish/subscribe protocols.
//!
//! Raw bytes become [`Frame`]s, frames become typed commands through an
//! immutable dispatch registry, and commands encode back into frames.
//!
//! ## Layers
//! - [`core`]: the `Frame` carrier, fixed-header serialization and a
//!   `tokio-util` stream codec
//! - [`protocol`]: QoS, header flags, the command contract and each command
//! - [`service`]: property value conversion for layers that attach typed headers
//! - [`config`], [`error`], [`utils`]: configuration, errors, logging, metrics
//!
//! ## Example
//! ```rust
//! use bytes::BytesMut;
//! use mqtt_codec::{dispatch, Command, FrameCodec, MqttCommand, QoS, Subscribe, Topic};
//! use tokio_util::codec::{Decoder, Encoder};
//!
//! # fn main() -> mqtt_codec::Result<()> {
//! let mut subscribe = Subscribe::new();
//! subscribe.add_topic(Topic::new("sensors/+", QoS::AtLeastOnce)?);
//!
//! let mut codec = FrameCodec::new();
//! let mut wire = BytesMut::new();
//! codec.encode(subscribe.encode(), &mut wire)?;
//!
//! let frame = codec.decode(&mut wire)?.expect("complete frame");
//! assert!(matches!(dispatch(&frame)?, MqttCommand::Subscribe(_)));
//! # Ok(())
//! # }
//! ```

#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod service;
pub mod utils;

pub use crate::core::codec::FrameCodec;
pub use crate::core::frame::Frame;
pub use crate::error::{ProtocolError, Result};
pub use crate::protocol::command::{Acked, Command, MqttCommand};
pub use crate::protocol::commands::{
    Disconnect, Pingreq, Pingresp, Puback, Pubcomp, Publish, Pubrec, Pubrel, Suback, Subscribe,
    Topic, Unsuback, Unsubscribe,
};
pub use crate::protocol::dispatcher::{dispatch, CommandRegistry};
pub use crate::protocol::header::{HasHeader, Header};
pub use crate::protocol::qos::QoS;
