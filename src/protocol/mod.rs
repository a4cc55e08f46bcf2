//! # Command Layer
//!
//! Typed commands and the machinery that maps frames onto them.
//!
//! ## Components
//! - **QoS**: delivery guarantee ordinal codec
//! - **Header**: dup / qos / retain bit packing shared by flagged commands
//! - **Command**: the encode/decode contract and the `MqttCommand` variant
//! - **Commands**: PUBLISH, the acknowledgments, SUBSCRIBE/UNSUBSCRIBE, pings
//! - **Dispatcher**: immutable type-byte registry and dispatch
//!
//! ## Example
//! ```rust
//! use mqtt_codec::protocol::command::{Command, MqttCommand};
//! use mqtt_codec::protocol::commands::{Subscribe, Topic};
//! use mqtt_codec::protocol::dispatcher::dispatch;
//! use mqtt_codec::protocol::qos::QoS;
//!
//! # fn main() -> mqtt_codec::error::Result<()> {
//! let mut subscribe = Subscribe::new();
//! subscribe.add_topic(Topic::new("a/b", QoS::AtMostOnce)?);
//!
//! let frame = subscribe.encode();
//! match dispatch(&frame)? {
//!     MqttCommand::Subscribe(decoded) => assert_eq!(decoded, subscribe),
//!     other => panic!("unexpected {}", other.name()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod commands;
pub mod dispatcher;
pub mod header;
pub mod qos;
pub(crate) mod wire;
