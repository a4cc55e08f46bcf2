//! SUBSCRIBE: request delivery of one or more topics.
//!
//! ```text
//! [message id (2, only if qos != AT_MOST_ONCE)] { [name len (2)] [name] [qos (1)] }*
//! ```

use crate::core::frame::Frame;
use crate::error::Result;
use crate::protocol::command::{Acked, Command};
use crate::protocol::header::{HasHeader, Header};
use crate::protocol::qos::QoS;
use crate::protocol::wire::{check_utf_len, utf_len, write_utf, PayloadReader};
use bytes::{BufMut, BytesMut};
use std::fmt;

/// A topic filter with the QoS the subscriber asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic {
    name: String,
    qos: QoS,
}

impl Topic {
    /// Fails with `StringTooLong` if the name cannot be length-prefixed.
    pub fn new(name: impl Into<String>, qos: QoS) -> Result<Self> {
        let name = name.into();
        check_utf_len(&name)?;
        Ok(Self { name, qos })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qos(&self) -> QoS {
        self.qos
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.qos)
    }
}

/// Subscription request for a list of topic filters.
///
/// The message id is kept in memory at every QoS but only written when the
/// header QoS is above `AtMostOnce`.
#[derive(Debug, Clone, Eq)]
pub struct Subscribe {
    header: Header,
    message_id: u16,
    topics: Vec<Topic>,
}

impl Subscribe {
    /// New subscription request at `AtLeastOnce` with no topics.
    pub fn new() -> Self {
        Self {
            header: Header::with_qos(QoS::AtLeastOnce),
            message_id: 0,
            topics: Vec::new(),
        }
    }

    pub fn dup(&self) -> bool {
        self.header.dup()
    }

    pub fn set_dup(&mut self, dup: bool) -> &mut Self {
        self.header.set_dup(dup);
        self
    }

    pub fn qos(&self) -> QoS {
        self.header.qos()
    }

    pub fn set_qos(&mut self, qos: QoS) -> &mut Self {
        self.header.set_qos(qos);
        self
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn set_topics(&mut self, topics: Vec<Topic>) -> &mut Self {
        self.topics = topics;
        self
    }

    pub fn add_topic(&mut self, topic: Topic) -> &mut Self {
        self.topics.push(topic);
        self
    }

    fn payload_len(&self) -> usize {
        let id_len = if self.qos().requires_message_id() { 2 } else { 0 };
        id_len
            + self
                .topics
                .iter()
                .map(|t| utf_len(t.name()) + 1)
                .sum::<usize>()
    }
}

impl Default for Subscribe {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for Subscribe {
    const TYPE: u8 = 8;

    fn decode(frame: &Frame) -> Result<Self> {
        let payload = frame.payload()?;
        let header = Header::try_from(frame.header())?;
        let mut reader = PayloadReader::new(payload);

        let message_id = if header.qos().requires_message_id() {
            reader.read_u16()?
        } else {
            0
        };

        let mut topics = Vec::new();
        while reader.has_remaining() {
            let name = reader.read_utf()?;
            let qos = reader.read_qos()?;
            topics.push(Topic { name, qos });
        }

        Ok(Self {
            header,
            message_id,
            topics,
        })
    }

    fn encode(&self) -> Frame {
        let mut payload = BytesMut::with_capacity(self.payload_len());
        if self.qos().requires_message_id() {
            payload.put_u16(self.message_id);
        }
        for topic in &self.topics {
            write_utf(&mut payload, topic.name());
            payload.put_u8(topic.qos().encode());
        }

        let mut frame = Frame::new();
        frame
            .set_header(self.header.bits())
            .set_command_type(Self::TYPE)
            .buffer(payload.freeze());
        frame
    }
}

impl Acked for Subscribe {
    fn message_id(&self) -> u16 {
        self.message_id
    }

    fn set_message_id(&mut self, message_id: u16) {
        self.message_id = message_id;
    }
}

impl HasHeader for Subscribe {
    fn header(&self) -> Header {
        self.header
    }
}

// The message id is not on the wire at AT_MOST_ONCE, so it does not take part
// in equality there.
impl PartialEq for Subscribe {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.topics == other.topics
            && (!self.qos().requires_message_id() || self.message_id == other.message_id)
    }
}

impl fmt::Display for Subscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SUBSCRIBE{{dup={}, qos={}, messageId={}, topics=[",
            self.dup(),
            self.qos(),
            self.message_id
        )?;
        for (i, topic) in self.topics.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{topic}")?;
        }
        f.write_str("]}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    fn topic(name: &str, qos: QoS) -> Topic {
        Topic::new(name, qos).expect("short topic name")
    }

    fn frame_with(header: u8, payload: &[u8]) -> Frame {
        let mut frame = Frame::new();
        frame
            .set_header(header)
            .set_command_type(Subscribe::TYPE)
            .buffer(payload.to_vec());
        frame
    }

    #[test]
    fn test_defaults() {
        let subscribe = Subscribe::new();
        assert_eq!(subscribe.qos(), QoS::AtLeastOnce);
        assert!(!subscribe.dup());
        assert_eq!(subscribe.message_id(), 0);
        assert!(subscribe.topics().is_empty());
    }

    #[test]
    fn test_encode_reference_bytes() {
        let mut subscribe = Subscribe::new();
        subscribe.add_topic(topic("a/b", QoS::AtMostOnce));
        subscribe.set_message_id(5);

        let frame = subscribe.encode();
        assert_eq!(frame.command_type(), 8);
        assert_eq!(frame.header(), 0b0010);
        assert_eq!(
            frame.payload().unwrap().as_ref(),
            &[0x00, 0x05, 0x00, 0x03, b'a', b'/', b'b', 0x00]
        );

        let decoded = Subscribe::decode(&frame).unwrap();
        assert_eq!(decoded, subscribe);
        assert_eq!(decoded.message_id(), 5);
    }

    #[test]
    fn test_qos_zero_omits_message_id() {
        let mut subscribe = Subscribe::new();
        subscribe
            .set_qos(QoS::AtMostOnce)
            .add_topic(topic("x", QoS::ExactlyOnce));
        subscribe.set_message_id(99);

        let frame = subscribe.encode();
        assert_eq!(frame.payload().unwrap().as_ref(), &[0x00, 0x01, b'x', 0x02]);

        let decoded = Subscribe::decode(&frame).unwrap();
        assert_eq!(decoded.message_id(), 0);
        assert_eq!(decoded, subscribe);
    }

    #[test]
    fn test_empty_topics() {
        let mut subscribe = Subscribe::new();
        subscribe.set_message_id(7);
        let frame = subscribe.encode();
        assert_eq!(frame.payload().unwrap().as_ref(), &[0x00, 0x07]);
        assert!(Subscribe::decode(&frame).unwrap().topics().is_empty());

        subscribe.set_qos(QoS::AtMostOnce);
        let frame = subscribe.encode();
        assert!(frame.payload().unwrap().is_empty());
        assert_eq!(Subscribe::decode(&frame).unwrap(), subscribe);
    }

    #[test]
    fn test_topic_order_preserved() {
        let frame = frame_with(
            0b0000,
            &[0x00, 0x01, b'a', 0x00, 0x00, 0x01, b'b', 0x01],
        );
        let decoded = Subscribe::decode(&frame).unwrap();
        assert_eq!(
            decoded.topics(),
            &[topic("a", QoS::AtMostOnce), topic("b", QoS::AtLeastOnce)]
        );
    }

    #[test]
    fn test_topic_qos_three_rejected() {
        let frame = frame_with(0b0000, &[0x00, 0x01, b'a', 0x03]);
        assert!(matches!(
            Subscribe::decode(&frame),
            Err(ProtocolError::InvalidOrdinal(3))
        ));
    }

    #[test]
    fn test_two_buffers_rejected() {
        let mut frame = frame_with(0b0010, &[0x00, 0x01]);
        frame.push_buffer(vec![0x00, 0x01, b'a', 0x00]);
        assert!(matches!(
            Subscribe::decode(&frame),
            Err(ProtocolError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_missing_topic_qos_rejected() {
        let frame = frame_with(0b0010, &[0x00, 0x01, 0x00, 0x01, b'a']);
        assert!(matches!(
            Subscribe::decode(&frame),
            Err(ProtocolError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_truncated_message_id_rejected() {
        let frame = frame_with(0b0010, &[0x00]);
        assert!(matches!(
            Subscribe::decode(&frame),
            Err(ProtocolError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_dup_flag_roundtrip() {
        let mut subscribe = Subscribe::new();
        subscribe.set_dup(true).set_qos(QoS::ExactlyOnce);
        subscribe.set_message_id(0xBEEF);

        let frame = subscribe.encode();
        assert_eq!(frame.header(), 0b1100);
        let decoded = Subscribe::decode(&frame).unwrap();
        assert!(decoded.dup());
        assert_eq!(decoded.qos(), QoS::ExactlyOnce);
        assert_eq!(decoded.message_id(), 0xBEEF);
    }

    #[test]
    fn test_reencode_after_mutation() {
        let mut subscribe = Subscribe::new();
        subscribe.add_topic(topic("a", QoS::AtMostOnce));
        let first = subscribe.encode();

        subscribe.add_topic(topic("b", QoS::AtMostOnce));
        let second = subscribe.encode();

        assert_ne!(first, second);
        assert_eq!(Subscribe::decode(&first).unwrap().topics().len(), 1);
        assert_eq!(Subscribe::decode(&second).unwrap().topics().len(), 2);
    }

    #[test]
    fn test_display() {
        let mut subscribe = Subscribe::new();
        subscribe.add_topic(topic("a/b", QoS::AtMostOnce));
        assert_eq!(
            subscribe.to_string(),
            "SUBSCRIBE{dup=false, qos=AT_LEAST_ONCE, messageId=0, topics=[a/b@AT_MOST_ONCE]}"
        );
    }
}
