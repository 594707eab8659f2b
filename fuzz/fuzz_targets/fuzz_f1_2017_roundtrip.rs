//! Decodes packet-sized inputs and checks re-encoding is byte-identical.
//!
//! Run with:
//!   cargo fuzz run fuzz_f1_2017_roundtrip

#![no_main]

use f1_telemetry_wire::{PACKET_SIZE, decode, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some(raw) = data.get(..PACKET_SIZE) else {
        return;
    };
    if let Ok(packet) = decode(raw) {
        assert_eq!(encode(&packet), raw);
    }
});
