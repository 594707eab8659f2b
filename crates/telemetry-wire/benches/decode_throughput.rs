//! Decode throughput for full-size F1 2017 packets.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use f1_telemetry_wire::{PACKET_SIZE, TelemetryPacket, decode, encode};

fn sample_packet() -> Vec<u8> {
    let mut packet = TelemetryPacket {
        time: 512.25,
        speed: 190.0,
        gear: 8.0,
        num_cars: 20,
        player_car_index: 3,
        ..TelemetryPacket::default()
    };
    for (i, car) in packet.car_data.iter_mut().enumerate() {
        car.lap_distance = 100.0 * i as f32;
        car.car_position = i8::try_from(i + 1).unwrap_or(i8::MAX);
    }
    encode(&packet)
}

fn bench_decode(c: &mut Criterion) {
    let raw = sample_packet();
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(PACKET_SIZE as u64));

    group.bench_function("full_packet", |b| {
        b.iter(|| decode(std::hint::black_box(&raw)))
    });

    let short = vec![0u8; PACKET_SIZE - 1];
    group.bench_function("length_reject", |b| {
        b.iter(|| decode(std::hint::black_box(&short)))
    });

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
