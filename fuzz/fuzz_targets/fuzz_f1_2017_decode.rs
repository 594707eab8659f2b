//! Fuzzes the F1 2017 packet decoder with arbitrary datagrams.
//!
//! Run with:
//!   cargo fuzz run fuzz_f1_2017_decode

#![no_main]

use f1_telemetry_wire::{PACKET_SIZE, decode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let result = decode(data);
    // Length is the only reason to reject.
    assert_eq!(result.is_ok(), data.len() == PACKET_SIZE);
    if let Ok(packet) = result {
        let _ = packet.active_cars();
        let _ = packet.player_car();
    }
});
