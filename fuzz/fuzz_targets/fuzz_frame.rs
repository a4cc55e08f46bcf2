#![no_main]

use libfuzzer_sys::fuzz_target;
use mqtt_codec::Frame;

fuzz_target!(|data: &[u8]| {
    // Fuzz fixed header parsing - test for panics, crashes, infinite loops
    if let Ok(frame) = Frame::from_bytes(data) {
        // Length varints may be non-minimal on input, so compare frames not bytes
        if let Ok(bytes) = frame.to_bytes() {
            assert_eq!(Frame::from_bytes(&bytes).ok(), Some(frame));
        }
    }
});
