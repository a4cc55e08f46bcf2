//! UNSUBSCRIBE: stop delivery of one or more topics.
//!
//! Same shape as SUBSCRIBE without the per-topic QoS byte.

use crate::core::frame::Frame;
use crate::error::Result;
use crate::protocol::command::{Acked, Command};
use crate::protocol::header::{HasHeader, Header};
use crate::protocol::qos::QoS;
use crate::protocol::wire::{check_utf_len, utf_len, write_utf, PayloadReader};
use bytes::{BufMut, BytesMut};

#[derive(Debug, Clone, Eq)]
pub struct Unsubscribe {
    header: Header,
    message_id: u16,
    topics: Vec<String>,
}

impl Unsubscribe {
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

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Fails with `StringTooLong` if the name cannot be length-prefixed.
    pub fn add_topic(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        let name = name.into();
        check_utf_len(&name)?;
        self.topics.push(name);
        Ok(self)
    }
}

impl Default for Unsubscribe {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for Unsubscribe {
    const TYPE: u8 = 10;

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
            topics.push(reader.read_utf()?);
        }

        Ok(Self {
            header,
            message_id,
            topics,
        })
    }

    fn encode(&self) -> Frame {
        let len = 2 + self.topics.iter().map(|t| utf_len(t)).sum::<usize>();
        let mut payload = BytesMut::with_capacity(len);
        if self.qos().requires_message_id() {
            payload.put_u16(self.message_id);
        }
        for topic in &self.topics {
            write_utf(&mut payload, topic);
        }

        let mut frame = Frame::new();
        frame
            .set_header(self.header.bits())
            .set_command_type(Self::TYPE)
            .buffer(payload.freeze());
        frame
    }
}

impl Acked for Unsubscribe {
    fn message_id(&self) -> u16 {
        self.message_id
    }

    fn set_message_id(&mut self, message_id: u16) {
        self.message_id = message_id;
    }
}

impl HasHeader for Unsubscribe {
    fn header(&self) -> Header {
        self.header
    }
}

impl PartialEq for Unsubscribe {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.topics == other.topics
            && (!self.qos().requires_message_id() || self.message_id == other.message_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn test_roundtrip() {
        let mut unsubscribe = Unsubscribe::new();
        unsubscribe.add_topic("a/b").unwrap().add_topic("c").unwrap();
        unsubscribe.set_message_id(12);

        let frame = unsubscribe.encode();
        assert_eq!(
            frame.payload().unwrap().as_ref(),
            &[0x00, 0x0C, 0x00, 0x03, b'a', b'/', b'b', 0x00, 0x01, b'c']
        );
        assert_eq!(Unsubscribe::decode(&frame).unwrap(), unsubscribe);
    }

    #[test]
    fn test_qos_zero_has_no_message_id() {
        let mut unsubscribe = Unsubscribe::new();
        unsubscribe.set_qos(QoS::AtMostOnce);
        unsubscribe.add_topic("x").unwrap();
        assert_eq!(
            unsubscribe.encode().payload().unwrap().as_ref(),
            &[0x00, 0x01, b'x']
        );
    }

    #[test]
    fn test_truncated_topic_rejected() {
        let mut frame = Frame::new();
        frame
            .set_header(0b0010)
            .set_command_type(Unsubscribe::TYPE)
            .buffer(vec![0x00, 0x01, 0x00, 0x04, b'a']);
        assert!(matches!(
            Unsubscribe::decode(&frame),
            Err(ProtocolError::MalformedFrame(_))
        ));
    }
}
