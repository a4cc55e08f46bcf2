#![no_main]

use libfuzzer_sys::fuzz_target;
use mqtt_codec::{dispatch, Frame};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte picks type and flags, the rest is the payload
    let mut frame = Frame::new();
    frame
        .set_command_type(data[0] >> 4)
        .set_header(data[0] & 0x0F)
        .buffer(data[1..].to_vec());

    if let Ok(command) = dispatch(&frame) {
        // A successful decode must survive a second trip
        let reencoded = command.encode();
        let _ = dispatch(&reencoded);
    }
});
