//! # Header Flags
//!
//! Bit-packed flag byte shared by every command that carries header flags.
//!
//! ```text
//!  bit     3      2..1     0
//!        [dup]   [qos]  [retain]
//! ```
//!
//! The flags share a wire byte with the command type, which takes the high
//! nibble, so a `Header` only ever holds the low four bits. The layout is
//! identical across command types; each command decides which flags it
//! exposes. Low bits a command does not interpret are carried through
//! untouched.

use crate::error::{ProtocolError, Result};
use crate::protocol::qos::QoS;

const FLAGS_MASK: u8 = 0b0000_1111;
const DUP_MASK: u8 = 0b0000_1000;
const QOS_MASK: u8 = 0b0000_0110;
const QOS_SHIFT: u8 = 1;
const RETAIN_MASK: u8 = 0b0000_0001;

/// Header flag byte.
///
/// The qos bits are validated when a `Header` is built from a raw byte, so a
/// `Header` value never holds the undefined ordinal `0b11`. Bits 4 to 7 are
/// dropped at that point since they cannot survive serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Header(u8);

impl Header {
    /// Header with the given qos and every other bit cleared.
    pub fn with_qos(qos: QoS) -> Self {
        let mut header = Header::default();
        header.set_qos(qos);
        header
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn dup(self) -> bool {
        self.0 & DUP_MASK != 0
    }

    pub fn set_dup(&mut self, dup: bool) {
        if dup {
            self.0 |= DUP_MASK;
        } else {
            self.0 &= !DUP_MASK;
        }
    }

    #[inline]
    pub fn qos(self) -> QoS {
        match (self.0 & QOS_MASK) >> QOS_SHIFT {
            0 => QoS::AtMostOnce,
            1 => QoS::AtLeastOnce,
            // 0b11 is rejected by TryFrom<u8>
            _ => QoS::ExactlyOnce,
        }
    }

    pub fn set_qos(&mut self, qos: QoS) {
        self.0 = (self.0 & !QOS_MASK) | ((qos.encode() << QOS_SHIFT) & QOS_MASK);
    }

    #[inline]
    pub fn retain(self) -> bool {
        self.0 & RETAIN_MASK != 0
    }

    pub fn set_retain(&mut self, retain: bool) {
        if retain {
            self.0 |= RETAIN_MASK;
        } else {
            self.0 &= !RETAIN_MASK;
        }
    }
}

impl TryFrom<u8> for Header {
    type Error = ProtocolError;

    fn try_from(bits: u8) -> Result<Self> {
        QoS::decode((bits & QOS_MASK) >> QOS_SHIFT)?;
        Ok(Header(bits & FLAGS_MASK))
    }
}

impl From<Header> for u8 {
    fn from(header: Header) -> Self {
        header.0
    }
}

/// Capability of commands that embed a [`Header`].
pub trait HasHeader {
    fn header(&self) -> Header;
}
