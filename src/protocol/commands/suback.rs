//! SUBACK: the broker's answer to SUBSCRIBE, one granted QoS per topic.

use crate::core::frame::Frame;
use crate::error::Result;
use crate::protocol::command::{Acked, Command};
use crate::protocol::qos::QoS;
use crate::protocol::wire::PayloadReader;
use bytes::{BufMut, BytesMut};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suback {
    message_id: u16,
    granted_qos: Vec<QoS>,
}

impl Suback {
    pub fn new(message_id: u16, granted_qos: Vec<QoS>) -> Self {
        Self {
            message_id,
            granted_qos,
        }
    }

    /// Granted levels, in the order of the SUBSCRIBE topics.
    pub fn granted_qos(&self) -> &[QoS] {
        &self.granted_qos
    }

    pub fn set_granted_qos(&mut self, granted_qos: Vec<QoS>) -> &mut Self {
        self.granted_qos = granted_qos;
        self
    }
}

impl Command for Suback {
    const TYPE: u8 = 9;

    fn decode(frame: &Frame) -> Result<Self> {
        let mut reader = PayloadReader::new(frame.payload()?);
        let message_id = reader.read_u16()?;

        let mut granted_qos = Vec::new();
        while reader.has_remaining() {
            granted_qos.push(reader.read_qos()?);
        }

        Ok(Self {
            message_id,
            granted_qos,
        })
    }

    fn encode(&self) -> Frame {
        let mut payload = BytesMut::with_capacity(2 + self.granted_qos.len());
        payload.put_u16(self.message_id);
        for qos in &self.granted_qos {
            payload.put_u8(qos.encode());
        }

        let mut frame = Frame::new();
        frame.set_command_type(Self::TYPE).buffer(payload.freeze());
        frame
    }
}

impl Acked for Suback {
    fn message_id(&self) -> u16 {
        self.message_id
    }

    fn set_message_id(&mut self, message_id: u16) {
        self.message_id = message_id;
    }
}
