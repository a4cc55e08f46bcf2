//! # Core Framing Components
//!
//! Low-level frame handling and stream framing.
//!
//! This module provides the foundation for the command layer: the `Frame`
//! carrier and the codec that cuts frames out of a byte stream.
//!
//! ## Components
//! - **Frame**: header flags, command type and payload buffers
//! - **Codec**: Tokio codec for framing over byte streams
//!
//! ## Wire Format
//! ```text
//! [Type(4 bits) | Flags(4 bits)] [Remaining Length(1-4)] [Payload(N)]
//! ```
//!
//! ## Security
//! - Maximum frame size is configurable (default 16MB, protocol limit ~256MB)
//! - The size limit is checked before the payload is buffered
//! - Remaining-length varints longer than four bytes are rejected

pub mod codec;
pub mod frame;
