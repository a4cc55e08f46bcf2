use crate::config::DEFAULT_MAX_FRAME_SIZE;
use crate::core::frame::{parse_fixed_header, Frame};
use crate::error::ProtocolError;
use crate::utils::metrics::global_metrics;
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};

/// Splits a byte stream into [`Frame`]s and writes frames back out.
///
/// Decoding hands out the payload as a frozen slice of the read buffer, so no
/// payload bytes are copied.
#[derive(Debug, Clone, Copy)]
pub struct FrameCodec {
    max_frame_size: usize,
}

impl FrameCodec {
    pub fn new() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }

    /// Limit the remaining length accepted or produced by this codec.
    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self { max_frame_size }
    }

    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(fixed) = parse_fixed_header(&src[..])? else {
            return Ok(None);
        };

        if fixed.remaining_length > self.max_frame_size {
            warn!(
                remaining_length = fixed.remaining_length,
                limit = self.max_frame_size,
                "Frame exceeds size limit"
            );
            return Err(ProtocolError::OversizedFrame(fixed.remaining_length));
        }

        let total = fixed.header_len + fixed.remaining_length;
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        let mut raw = src.split_to(total);
        let payload = raw.split_off(fixed.header_len).freeze();

        let mut frame = Frame::new();
        frame
            .set_header(fixed.first_byte & 0x0F)
            .set_command_type(fixed.first_byte >> 4)
            .buffer(payload);

        global_metrics().bytes_received(total as u64);
        debug!(
            command_type = frame.command_type(),
            len = fixed.remaining_length,
            "Read frame"
        );
        Ok(Some(frame))
    }
}

impl Encoder<Frame> for FrameCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let len = item.payload_len();
        if len > self.max_frame_size {
            return Err(ProtocolError::OversizedFrame(len));
        }

        item.encode_into(dst)?;
        global_metrics().frame_encoded(item.encoded_len() as u64);
        Ok(())
    }
}
