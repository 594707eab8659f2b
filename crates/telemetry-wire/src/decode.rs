//! Wire Layout Decoder: raw datagram bytes → [`TelemetryPacket`].

use crate::layout::{CAR_RECORD_SIZE, MAX_CARS, PACKET_SIZE};
use crate::packet::{CarRecord, TelemetryPacket};
use crate::reader::ByteReader;
use crate::WireError;

/// Decode one datagram into a [`TelemetryPacket`].
///
/// The buffer must be exactly [`PACKET_SIZE`] bytes; anything shorter or
/// longer is rejected with [`WireError::MalformedPacket`]. Any byte pattern of
/// the right length decodes successfully.
///
/// # Errors
///
/// Returns [`WireError::MalformedPacket`] on a length mismatch.
pub fn decode(raw: &[u8]) -> Result<TelemetryPacket, WireError> {
    if raw.len() != PACKET_SIZE {
        return Err(WireError::MalformedPacket {
            expected: PACKET_SIZE,
            actual: raw.len(),
        });
    }

    let mut r = ByteReader::new(raw);
    let packet = read_packet(&mut r)?;
    debug_assert_eq!(r.position(), PACKET_SIZE);
    Ok(packet)
}

impl TryFrom<&[u8]> for TelemetryPacket {
    type Error = WireError;

    fn try_from(raw: &[u8]) -> Result<Self, Self::Error> {
        decode(raw)
    }
}

fn read_packet(r: &mut ByteReader<'_>) -> Result<TelemetryPacket, WireError> {
    Ok(TelemetryPacket {
        time: r.f32_le()?, // 0
        lap_time: r.f32_le()?, // 4
        lap_distance: r.f32_le()?, // 8
        total_distance: r.f32_le()?, // 12
        world_position_x: r.f32_le()?, // 16
        world_position_y: r.f32_le()?, // 20
        world_position_z: r.f32_le()?, // 24
        speed: r.f32_le()?, // 28
        world_velocity_x: r.f32_le()?, // 32
        world_velocity_y: r.f32_le()?, // 36
        world_velocity_z: r.f32_le()?, // 40
        right_dir_x: r.f32_le()?, // 44
        right_dir_y: r.f32_le()?, // 48
        right_dir_z: r.f32_le()?, // 52
        forward_dir_x: r.f32_le()?, // 56
        forward_dir_y: r.f32_le()?, // 60
        forward_dir_z: r.f32_le()?, // 64
        suspension_position: r.f32_le_array()?, // 68-83
        suspension_velocity: r.f32_le_array()?, // 84-99
        wheel_speed: r.f32_le_array()?, // 100-115
        throttle: r.f32_le()?, // 116
        steer: r.f32_le()?, // 120
        brake: r.f32_le()?, // 124
        clutch: r.f32_le()?, // 128
        gear: r.f32_le()?, // 132
        g_force_lat: r.f32_le()?, // 136
        g_force_lon: r.f32_le()?, // 140
        lap: r.f32_le()?, // 144
        engine_rate: r.f32_le()?, // 148
        sli_pro_native_support: r.f32_le()?, // 152
        car_position: r.f32_le()?, // 156
        kers_level: r.f32_le()?, // 160
        kers_max_level: r.f32_le()?, // 164
        drs: r.f32_le()?, // 168
        traction_control: r.f32_le()?, // 172
        anti_lock_brakes: r.f32_le()?, // 176
        fuel_in_tank: r.f32_le()?, // 180
        fuel_capacity: r.f32_le()?, // 184
        in_pits: r.f32_le()?, // 188
        sector: r.f32_le()?, // 192
        sector1_time: r.f32_le()?, // 196
        sector2_time: r.f32_le()?, // 200
        brakes_temperature: r.f32_le_array()?, // 204-219
        tyres_pressure: r.f32_le_array()?, // 220-235
        team_info: r.f32_le()?, // 236
        total_laps: r.f32_le()?, // 240
        track_size: r.f32_le()?, // 244
        last_lap_time: r.f32_le()?, // 248
        max_rpm: r.f32_le()?, // 252
        idle_rpm: r.f32_le()?, // 256
        max_gears: r.f32_le()?, // 260
        session_type: r.f32_le()?, // 264
        drs_allowed: r.f32_le()?, // 268
        track_number: r.f32_le()?, // 272
        vehicle_fia_flags: r.f32_le()?, // 276
        era: r.f32_le()?, // 280
        engine_temperature: r.f32_le()?, // 284
        g_force_vert: r.f32_le()?, // 288
        angular_velocity_x: r.f32_le()?, // 292
        angular_velocity_y: r.f32_le()?, // 296
        angular_velocity_z: r.f32_le()?, // 300
        tyres_temperature: r.i8_array()?, // 304-307
        tyres_wear: r.i8_array()?, // 308-311
        tyre_compound: r.i8()?, // 312
        front_brake_bias: r.i8()?, // 313
        fuel_mix: r.i8()?, // 314
        current_lap_invalid: r.i8()?, // 315
        tyres_damage: r.i8_array()?, // 316-319
        front_left_wing_damage: r.i8()?, // 320
        front_right_wing_damage: r.i8()?, // 321
        rear_wing_damage: r.i8()?, // 322
        engine_damage: r.i8()?, // 323
        gear_box_damage: r.i8()?, // 324
        exhaust_damage: r.i8()?, // 325
        pit_limiter_status: r.i8()?, // 326
        pit_speed_limit: r.i8()?, // 327
        session_time_left: r.f32_le()?, // 328
        rev_lights_percent: r.i8()?, // 332
        is_spectating: r.i8()?, // 333
        spectator_car_index: r.i8()?, // 334
        num_cars: r.i8()?, // 335
        player_car_index: r.i8()?, // 336
        car_data: read_car_data(r)?, // 337-1236
        yaw: r.f32_le()?, // 1237
        pitch: r.f32_le()?, // 1241
        roll: r.f32_le()?, // 1245
        local_velocity_x: r.f32_le()?, // 1249
        local_velocity_y: r.f32_le()?, // 1253
        local_velocity_z: r.f32_le()?, // 1257
        suspension_acceleration: r.f32_le_array()?, // 1261-1276
        angular_acceleration_x: r.f32_le()?, // 1277
        angular_acceleration_y: r.f32_le()?, // 1281
        angular_acceleration_z: r.f32_le()?, // 1285
    })
}

fn read_car_data(r: &mut ByteReader<'_>) -> Result<[CarRecord; MAX_CARS], WireError> {
    let mut cars = [CarRecord::default(); MAX_CARS];
    for car in cars.iter_mut() {
        let start = r.position();
        *car = read_car_record(r)?;
        debug_assert_eq!(r.position() - start, CAR_RECORD_SIZE);
    }
    Ok(cars)
}

fn read_car_record(r: &mut ByteReader<'_>) -> Result<CarRecord, WireError> {
    Ok(CarRecord {
        world_position: r.f32_le_array()?, // 0-11
        last_lap_time: r.f32_le()?, // 12
        current_lap_time: r.f32_le()?, // 16
        best_lap_time: r.f32_le()?, // 20
        sector1_time: r.f32_le()?, // 24
        sector2_time: r.f32_le()?, // 28
        lap_distance: r.f32_le()?, // 32
        driver_id: r.i8()?, // 36
        team_id: r.i8()?, // 37
        car_position: r.i8()?, // 38
        current_lap_num: r.i8()?, // 39
        tyre_compound: r.i8()?, // 40
        in_pits: r.i8()?, // 41
        sector: r.i8()?, // 42
        current_lap_invalid: r.i8()?, // 43
        penalties: r.i8()?, // 44
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn put_f32(raw: &mut [u8], offset: usize, value: f32) -> TestResult {
        raw.get_mut(offset..offset + 4)
            .ok_or("offset out of range")?
            .copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn put_byte(raw: &mut [u8], offset: usize, value: u8) -> TestResult {
        *raw.get_mut(offset).ok_or("offset out of range")? = value;
        Ok(())
    }

    #[test]
    fn helpers_reject_out_of_range_offsets() {
        let mut raw = vec![0u8; PACKET_SIZE];
        assert!(put_f32(&mut raw, PACKET_SIZE - 3, 1.0).is_err());
        assert!(put_byte(&mut raw, PACKET_SIZE, 0xFF).is_err());
        assert!(raw.iter().all(|b| *b == 0));
    }

    #[test]
    fn rejects_short_and_long_buffers() {
        for len in [0, 1, PACKET_SIZE - 1, PACKET_SIZE + 1, 2048] {
            let raw = vec![0u8; len];
            assert_eq!(
                decode(&raw),
                Err(WireError::MalformedPacket {
                    expected: PACKET_SIZE,
                    actual: len
                }),
                "len {len} must be rejected"
            );
        }
    }

    #[test]
    fn zeroed_buffer_decodes_to_default() -> TestResult {
        let packet = decode(&[0u8; PACKET_SIZE])?;
        assert_eq!(packet, TelemetryPacket::default());
        Ok(())
    }

    #[test]
    fn time_decodes_little_endian_one() -> TestResult {
        let mut raw = vec![0u8; PACKET_SIZE];
        raw.get_mut(OFF_TIME..OFF_TIME + 4)
            .ok_or("time out of range")?
            .copy_from_slice(&[0x00, 0x00, 0x80, 0x3F]);
        let packet = decode(&raw)?;
        assert_eq!(packet.time.to_bits(), 1.0f32.to_bits());
        Ok(())
    }

    #[test]
    fn signed_bytes_decode_as_negative() -> TestResult {
        let mut raw = vec![0u8; PACKET_SIZE];
        put_byte(&mut raw, OFF_TYRE_COMPOUND, 0xFF)?;
        put_byte(&mut raw, OFF_NUM_CARS, 0x80)?;
        let packet = decode(&raw)?;
        assert_eq!(packet.tyre_compound, -1);
        assert_eq!(packet.num_cars, -128);
        Ok(())
    }

    #[test]
    fn suspension_position_keeps_wheel_order() -> TestResult {
        let mut raw = vec![0u8; PACKET_SIZE];
        for (i, v) in [1.0f32, 2.0, 3.0, 4.0].into_iter().enumerate() {
            put_f32(&mut raw, OFF_SUSPENSION_POSITION + i * 4, v)?;
        }
        let packet = decode(&raw)?;
        assert_eq!(packet.suspension_position, [1.0, 2.0, 3.0, 4.0]);
        Ok(())
    }

    #[test]
    fn last_car_slot_and_trailer_are_not_shifted() -> TestResult {
        let mut raw = vec![0u8; PACKET_SIZE];
        let last = car_record_offset(MAX_CARS - 1).ok_or("no last slot")?;
        put_f32(&mut raw, last + CAR_OFF_LAP_DISTANCE, 4321.5)?;
        put_byte(&mut raw, last + CAR_OFF_PENALTIES, 0xFB)?;
        put_f32(&mut raw, OFF_YAW, 0.25)?;
        put_f32(&mut raw, OFF_ANGULAR_ACCELERATION_Z, -9.5)?;

        let packet = decode(&raw)?;
        let car = packet.car_data.last().ok_or("no cars")?;
        assert_eq!(car.lap_distance.to_bits(), 4321.5f32.to_bits());
        assert_eq!(car.penalties, -5);
        assert_eq!(packet.yaw.to_bits(), 0.25f32.to_bits());
        assert_eq!(packet.angular_acceleration_z.to_bits(), (-9.5f32).to_bits());
        Ok(())
    }

    #[test]
    fn try_from_slice_matches_decode() -> TestResult {
        let mut raw = vec![0u8; PACKET_SIZE];
        put_f32(&mut raw, OFF_GEAR, 5.0)?;
        let packet = TelemetryPacket::try_from(raw.as_slice())?;
        assert_eq!(packet, decode(&raw)?);
        let short = raw.get(..10).ok_or("buffer too short")?;
        assert!(TelemetryPacket::try_from(short).is_err());
        Ok(())
    }
}
