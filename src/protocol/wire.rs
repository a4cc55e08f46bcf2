//! Field-level readers and writers shared by the command codecs.
//!
//! All multi-byte integers are big-endian. Strings are a two byte length
//! followed by that many UTF-8 bytes.

use crate::error::{constants, ProtocolError, Result};
use crate::protocol::qos::QoS;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Longest string a two byte length prefix can describe.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Cursor over a single payload buffer.
///
/// Every read checks the remaining length first, so a short buffer turns into
/// `MalformedFrame` instead of a panic inside `bytes`.
pub(crate) struct PayloadReader {
    buf: Bytes,
}

impl PayloadReader {
    pub fn new(buf: &Bytes) -> Self {
        // Bytes::clone is a reference count bump
        Self { buf: buf.clone() }
    }

    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.buf.has_remaining()
    }

    fn require(&self, len: usize, reason: &str) -> Result<()> {
        if self.buf.remaining() < len {
            return Err(ProtocolError::MalformedFrame(format!(
                "{reason} (needed {len}, have {})",
                self.buf.remaining()
            )));
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.require(1, constants::ERR_TRUNCATED_FIELD)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.require(2, constants::ERR_TRUNCATED_FIELD)?;
        Ok(self.buf.get_u16())
    }

    pub fn read_qos(&mut self) -> Result<QoS> {
        QoS::decode(self.read_u8()?)
    }

    pub fn read_utf(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        self.require(len, constants::ERR_LENGTH_PREFIX)?;
        let raw = self.buf.split_to(len);
        String::from_utf8(raw.to_vec())
            .map_err(|_| ProtocolError::malformed(constants::ERR_INVALID_UTF8))
    }

    /// Everything not read yet.
    pub fn read_rest(&mut self) -> Bytes {
        self.buf.split_to(self.buf.remaining())
    }
}

/// Reject strings that cannot be length-prefixed.
pub(crate) fn check_utf_len(value: &str) -> Result<()> {
    if value.len() > MAX_STRING_LEN {
        return Err(ProtocolError::StringTooLong(value.len()));
    }
    Ok(())
}

/// Size of a length-prefixed string on the wire.
#[inline]
pub(crate) fn utf_len(value: &str) -> usize {
    2 + value.len()
}

/// Write a length-prefixed string.
///
/// Callers validate the length with [`check_utf_len`] when the string enters a
/// command, so the cast cannot truncate.
pub(crate) fn write_utf(dst: &mut BytesMut, value: &str) {
    debug_assert!(value.len() <= MAX_STRING_LEN);
    dst.put_u16(value.len() as u16);
    dst.put_slice(value.as_bytes());
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_utf() {
        let buf = Bytes::from_static(&[0x00, 0x03, b'a', b'/', b'b', 0x01]);
        let mut reader = PayloadReader::new(&buf);
        assert_eq!(reader.read_utf().unwrap(), "a/b");
        assert_eq!(reader.read_qos().unwrap(), QoS::AtLeastOnce);
        assert!(!reader.has_remaining());
    }

    #[test]
    fn test_length_prefix_beyond_buffer() {
        let buf = Bytes::from_static(&[0x00, 0x09, b'a']);
        let mut reader = PayloadReader::new(&buf);
        assert!(matches!(
            reader.read_utf(),
            Err(ProtocolError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_half_a_u16() {
        let buf = Bytes::from_static(&[0x00]);
        let mut reader = PayloadReader::new(&buf);
        assert!(matches!(
            reader.read_u16(),
            Err(ProtocolError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let buf = Bytes::from_static(&[0x00, 0x02, 0xC3, 0x28]);
        let mut reader = PayloadReader::new(&buf);
        assert!(matches!(
            reader.read_utf(),
            Err(ProtocolError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_write_utf() {
        let mut dst = BytesMut::new();
        write_utf(&mut dst, "topic");
        assert_eq!(dst.as_ref(), b"\x00\x05topic");
        assert_eq!(utf_len("topic"), dst.len());
    }

    #[test]
    fn test_check_utf_len() {
        assert!(check_utf_len(&"x".repeat(MAX_STRING_LEN)).is_ok());
        assert!(matches!(
            check_utf_len(&"x".repeat(MAX_STRING_LEN + 1)),
            Err(ProtocolError::StringTooLong(65_536))
        ));
    }
}
