//! # Error Types
//!
//! Error handling for the command frame codec.
//!
//! This module defines every error variant that can surface while turning raw
//! frames into commands and back, from low-level I/O errors raised by the
//! stream codec to wire-format violations found while decoding a payload.
//!
//! ## Error Categories
//! - **Framing Errors**: wrong buffer count, truncated fields, bad length prefixes
//! - **Ordinal Errors**: QoS values outside the defined range
//! - **Dispatch Errors**: command type bytes with no registered decoder
//! - **Construction Errors**: values that can never be put on the wire
//!
//! Decode failures mean the byte stream can no longer be trusted; the transport
//! layer is expected to close the connection rather than skip the frame.
//!
//! ## Example Usage
//! ```rust
//! use mqtt_codec::error::{ProtocolError, Result};
//! use mqtt_codec::protocol::qos::QoS;
//! use tracing::{error, info};
//!
//! fn requested_level(byte: u8) -> Result<QoS> {
//!     QoS::decode(byte)
//! }
//!
//! match requested_level(3) {
//!     Ok(qos) => info!(?qos, "Requested level accepted"),
//!     Err(e) => error!(error = %e, "Rejected level"),
//! }
//! assert!(matches!(requested_level(3), Err(ProtocolError::InvalidOrdinal(3))));
//! ```

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Frame structure errors
    pub const ERR_BUFFER_COUNT: &str = "Frame must carry exactly one payload buffer";
    pub const ERR_TRUNCATED_FIELD: &str = "Payload exhausted before field was fully read";
    pub const ERR_LENGTH_PREFIX: &str = "Length prefix exceeds remaining payload";
    pub const ERR_INVALID_UTF8: &str = "String field is not valid UTF-8";

    /// Fixed header errors
    pub const ERR_TRUNCATED_HEADER: &str = "Fixed header is incomplete";
    pub const ERR_REMAINING_LENGTH: &str = "Remaining length uses more than four bytes";
    pub const ERR_TRUNCATED_PAYLOAD: &str = "Frame payload shorter than remaining length";

    /// Configuration errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
}

// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    #[serde(skip_serializing, skip_deserializing)]
    Io(#[from] io::Error),

    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Invalid QoS ordinal: {0}")]
    InvalidOrdinal(u8),

    #[error("Unknown command type: {0}")]
    UnknownCommandType(u8),

    #[error("Command type does not fit the fixed header: {0}")]
    InvalidCommandType(u8),

    #[error("Frame too large: {0} bytes")]
    OversizedFrame(usize),

    #[error("String field too long: {0} bytes")]
    StringTooLong(usize),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// Build a `MalformedFrame` from one of the static messages in [`constants`].
    pub(crate) fn malformed(reason: &str) -> Self {
        ProtocolError::MalformedFrame(reason.to_string())
    }

    /// True for errors that leave the byte stream desynchronized.
    pub fn is_fatal_to_stream(&self) -> bool {
        matches!(
            self,
            ProtocolError::MalformedFrame(_)
                | ProtocolError::InvalidOrdinal(_)
                | ProtocolError::OversizedFrame(_)
                | ProtocolError::Io(_)
        )
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
