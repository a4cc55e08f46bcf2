//! Delivery guarantee levels.

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quality of service attached to a subscription or a published message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[allow(clippy::enum_variant_names)]
pub enum QoS {
    /// Fire and forget
    AtMostOnce = 0,
    /// Acknowledged delivery, duplicates possible
    AtLeastOnce = 1,
    /// Assured single delivery
    ExactlyOnce = 2,
}

impl QoS {
    /// Decode a wire ordinal. Anything above 2 is rejected.
    pub fn decode(ordinal: u8) -> Result<Self> {
        match ordinal {
            0 => Ok(QoS::AtMostOnce),
            1 => Ok(QoS::AtLeastOnce),
            2 => Ok(QoS::ExactlyOnce),
            other => Err(ProtocolError::InvalidOrdinal(other)),
        }
    }

    #[inline]
    pub fn encode(self) -> u8 {
        self as u8
    }

    /// Whether frames at this level carry a message id.
    #[inline]
    pub fn requires_message_id(self) -> bool {
        self != QoS::AtMostOnce
    }
}

impl TryFrom<u8> for QoS {
    type Error = ProtocolError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        QoS::decode(value)
    }
}

impl From<QoS> for u8 {
    fn from(qos: QoS) -> Self {
        qos.encode()
    }
}

impl fmt::Display for QoS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QoS::AtMostOnce => "AT_MOST_ONCE",
            QoS::AtLeastOnce => "AT_LEAST_ONCE",
            QoS::ExactlyOnce => "EXACTLY_ONCE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_decode() {
        assert_eq!(QoS::decode(0).ok(), Some(QoS::AtMostOnce));
        assert_eq!(QoS::decode(1).ok(), Some(QoS::AtLeastOnce));
        assert_eq!(QoS::decode(2).ok(), Some(QoS::ExactlyOnce));
    }

    #[test]
    fn test_out_of_range_rejected() {
        for ordinal in [3u8, 4, 0x7F, 0xFF] {
            assert!(matches!(
                QoS::decode(ordinal),
                Err(ProtocolError::InvalidOrdinal(o)) if o == ordinal
            ));
        }
    }

    #[test]
    fn test_message_id_requirement() {
        assert!(!QoS::AtMostOnce.requires_message_id());
        assert!(QoS::AtLeastOnce.requires_message_id());
        assert!(QoS::ExactlyOnce.requires_message_id());
    }

    #[test]
    fn test_encode_matches_discriminant() {
        assert_eq!(QoS::ExactlyOnce.encode(), 2);
        assert_eq!(u8::from(QoS::AtMostOnce), 0);
    }
}
