//! PUBLISH: deliver an application message to a topic.
//!
//! ```text
//! [topic len (2)] [topic] [message id (2, only if qos != AT_MOST_ONCE)] [payload...]
//! ```
//!
//! Unlike the subscription commands, PUBLISH honours all three header flags.

use crate::core::frame::Frame;
use crate::error::Result;
use crate::protocol::command::{Acked, Command};
use crate::protocol::header::{HasHeader, Header};
use crate::protocol::qos::QoS;
use crate::protocol::wire::{check_utf_len, utf_len, write_utf, PayloadReader};
use bytes::{BufMut, Bytes, BytesMut};

#[derive(Debug, Clone, Default, Eq)]
pub struct Publish {
    header: Header,
    topic_name: String,
    message_id: u16,
    payload: Bytes,
}

impl Publish {
    /// New `AtMostOnce` message. Fails with `StringTooLong` for oversized topic names.
    pub fn new(topic_name: impl Into<String>, payload: impl Into<Bytes>) -> Result<Self> {
        let topic_name = topic_name.into();
        check_utf_len(&topic_name)?;
        Ok(Self {
            header: Header::default(),
            topic_name,
            message_id: 0,
            payload: payload.into(),
        })
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

    pub fn retain(&self) -> bool {
        self.header.retain()
    }

    pub fn set_retain(&mut self, retain: bool) -> &mut Self {
        self.header.set_retain(retain);
        self
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn set_payload(&mut self, payload: impl Into<Bytes>) -> &mut Self {
        self.payload = payload.into();
        self
    }
}

impl Command for Publish {
    const TYPE: u8 = 3;

    fn decode(frame: &Frame) -> Result<Self> {
        let payload = frame.payload()?;
        let header = Header::try_from(frame.header())?;
        let mut reader = PayloadReader::new(payload);

        let topic_name = reader.read_utf()?;
        let message_id = if header.qos().requires_message_id() {
            reader.read_u16()?
        } else {
            0
        };

        Ok(Self {
            header,
            topic_name,
            message_id,
            payload: reader.read_rest(),
        })
    }

    fn encode(&self) -> Frame {
        let mut buf = BytesMut::with_capacity(utf_len(&self.topic_name) + 2 + self.payload.len());
        write_utf(&mut buf, &self.topic_name);
        if self.qos().requires_message_id() {
            buf.put_u16(self.message_id);
        }
        buf.put_slice(&self.payload);

        let mut frame = Frame::new();
        frame
            .set_header(self.header.bits())
            .set_command_type(Self::TYPE)
            .buffer(buf.freeze());
        frame
    }
}

impl Acked for Publish {
    fn message_id(&self) -> u16 {
        self.message_id
    }

    fn set_message_id(&mut self, message_id: u16) {
        self.message_id = message_id;
    }
}

impl HasHeader for Publish {
    fn header(&self) -> Header {
        self.header
    }
}

impl PartialEq for Publish {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.topic_name == other.topic_name
            && self.payload == other.payload
            && (!self.qos().requires_message_id() || self.message_id == other.message_id)
    }
}
