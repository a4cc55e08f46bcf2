//! # Frame
//!
//! The minimal wire unit: a header flag byte, a command type and the payload.
//!
//! A `Frame` is a plain carrier. It knows how to lay itself out as an MQTT
//! fixed header followed by the payload, but it never interprets the payload;
//! that is the job of the command decoders.
//!
//! ## Wire Format
//! ```text
//! [type(4 bits) | flags(4 bits)] [remaining length (1-4 bytes)] [payload(N)]
//! ```
//!
//! The remaining length is a base-128 varint: seven bits per byte, low group
//! first, high bit set on every byte but the last.

use crate::config::MAX_REMAINING_LENGTH;
use crate::error::{constants, ProtocolError, Result};
use bytes::{BufMut, Bytes, BytesMut};

/// Largest command type that fits in the fixed header.
pub const MAX_COMMAND_TYPE: u8 = 0x0F;

/// Header flags occupy the low nibble of the first wire byte.
const FLAGS_MASK: u8 = 0x0F;

/// Most bytes a remaining-length varint may use.
const MAX_LENGTH_BYTES: usize = 4;

/// One command on the wire: flag bits, a 4-bit command type and payload buffers.
///
/// Encoders produce a single buffer. Frames assembled by hand may carry
/// several, which serialize back to back but cannot be decoded as a command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    header: u8,
    command_type: u8,
    buffers: Vec<Bytes>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn header(&self) -> u8 {
        self.header
    }

    pub fn set_header(&mut self, header: u8) -> &mut Self {
        self.header = header;
        self
    }

    #[inline]
    pub fn command_type(&self) -> u8 {
        self.command_type
    }

    pub fn set_command_type(&mut self, command_type: u8) -> &mut Self {
        self.command_type = command_type;
        self
    }

    /// Replace the payload with a single buffer.
    pub fn buffer(&mut self, buffer: impl Into<Bytes>) -> &mut Self {
        self.buffers.clear();
        self.buffers.push(buffer.into());
        self
    }

    /// Append another payload buffer.
    pub fn push_buffer(&mut self, buffer: impl Into<Bytes>) -> &mut Self {
        self.buffers.push(buffer.into());
        self
    }

    pub fn buffers(&self) -> &[Bytes] {
        &self.buffers
    }

    /// The payload of a frame that is about to be decoded as a command.
    ///
    /// Fails with `MalformedFrame` unless the frame holds exactly one buffer.
    pub fn payload(&self) -> Result<&Bytes> {
        match self.buffers.as_slice() {
            [single] => Ok(single),
            _ => Err(ProtocolError::MalformedFrame(format!(
                "{} (found {})",
                constants::ERR_BUFFER_COUNT,
                self.buffers.len()
            ))),
        }
    }

    /// Total payload length across all buffers.
    pub fn payload_len(&self) -> usize {
        self.buffers.iter().map(Bytes::len).sum()
    }

    /// Length of this frame once serialized.
    pub fn encoded_len(&self) -> usize {
        let remaining = self.payload_len();
        1 + remaining_length_size(remaining) + remaining
    }

    /// Append the serialized frame to `dst`.
    pub fn encode_into(&self, dst: &mut BytesMut) -> Result<()> {
        if self.command_type > MAX_COMMAND_TYPE {
            return Err(ProtocolError::InvalidCommandType(self.command_type));
        }

        let remaining = self.payload_len();
        if remaining > MAX_REMAINING_LENGTH {
            return Err(ProtocolError::OversizedFrame(remaining));
        }

        dst.reserve(self.encoded_len());
        dst.put_u8((self.command_type << 4) | (self.header & FLAGS_MASK));
        write_remaining_length(dst, remaining);
        for buffer in &self.buffers {
            dst.put_slice(buffer);
        }
        Ok(())
    }

    /// Serialize the frame into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut dst = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut dst)?;
        Ok(dst.freeze())
    }

    /// Parse one complete frame from the start of `data`.
    ///
    /// The returned frame carries exactly one (possibly empty) buffer.
    /// Bytes after the end of the frame are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let fixed = parse_fixed_header(data)?
            .ok_or_else(|| ProtocolError::malformed(constants::ERR_TRUNCATED_HEADER))?;

        let end = fixed.header_len + fixed.remaining_length;
        if data.len() < end {
            return Err(ProtocolError::malformed(constants::ERR_TRUNCATED_PAYLOAD));
        }

        let mut frame = Frame::new();
        frame
            .set_header(fixed.first_byte & FLAGS_MASK)
            .set_command_type(fixed.first_byte >> 4)
            .buffer(Bytes::copy_from_slice(&data[fixed.header_len..end]));
        Ok(frame)
    }
}

/// A decoded fixed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FixedHeader {
    pub first_byte: u8,
    pub remaining_length: usize,
    /// Bytes used by the first byte plus the length varint.
    pub header_len: usize,
}

/// Read the fixed header at the start of `data`.
///
/// Returns `Ok(None)` when more bytes are needed to finish the header.
pub(crate) fn parse_fixed_header(data: &[u8]) -> Result<Option<FixedHeader>> {
    let Some(&first_byte) = data.first() else {
        return Ok(None);
    };

    let mut remaining_length = 0usize;
    for (i, &byte) in data[1..].iter().enumerate() {
        if i == MAX_LENGTH_BYTES {
            return Err(ProtocolError::malformed(constants::ERR_REMAINING_LENGTH));
        }
        remaining_length |= ((byte & 0x7F) as usize) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(Some(FixedHeader {
                first_byte,
                remaining_length,
                header_len: i + 2,
            }));
        }
    }

    if data.len() > MAX_LENGTH_BYTES {
        return Err(ProtocolError::malformed(constants::ERR_REMAINING_LENGTH));
    }
    Ok(None)
}

fn write_remaining_length(dst: &mut BytesMut, mut remaining: usize) {
    loop {
        let mut byte = (remaining & 0x7F) as u8;
        remaining >>= 7;
        if remaining > 0 {
            byte |= 0x80;
        }
        dst.put_u8(byte);
        if remaining == 0 {
            break;
        }
    }
}

fn remaining_length_size(remaining: usize) -> usize {
    match remaining {
        0..=127 => 1,
        128..=16_383 => 2,
        16_384..=2_097_151 => 3,
        _ => 4,
    }
}
