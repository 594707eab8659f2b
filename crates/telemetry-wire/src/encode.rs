//! Inverse of [`crate::decode`], for test harnesses and fuzzing only.
//!
//! Production code never encodes: the simulator is the only writer of this
//! format.

use crate::layout::PACKET_SIZE;
use crate::packet::{CarRecord, TelemetryPacket};

struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn i8(&mut self, value: i8) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn f32_le(&mut self, value: f32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn i8_array<const N: usize>(&mut self, values: &[i8; N]) -> &mut Self {
        for v in values {
            self.i8(*v);
        }
        self
    }

    fn f32_le_array<const N: usize>(&mut self, values: &[f32; N]) -> &mut Self {
        for v in values {
            self.f32_le(*v);
        }
        self
    }
}

/// Serialize `packet` into exactly [`PACKET_SIZE`] wire bytes.
pub fn encode(packet: &TelemetryPacket) -> Vec<u8> {
    let p = packet;
    let mut w = ByteWriter::with_capacity(PACKET_SIZE);
    w.f32_le(p.time)
        .f32_le(p.lap_time)
        .f32_le(p.lap_distance)
        .f32_le(p.total_distance)
        .f32_le(p.world_position_x)
        .f32_le(p.world_position_y)
        .f32_le(p.world_position_z)
        .f32_le(p.speed)
        .f32_le(p.world_velocity_x)
        .f32_le(p.world_velocity_y)
        .f32_le(p.world_velocity_z)
        .f32_le(p.right_dir_x)
        .f32_le(p.right_dir_y)
        .f32_le(p.right_dir_z)
        .f32_le(p.forward_dir_x)
        .f32_le(p.forward_dir_y)
        .f32_le(p.forward_dir_z)
        .f32_le_array(&p.suspension_position)
        .f32_le_array(&p.suspension_velocity)
        .f32_le_array(&p.wheel_speed)
        .f32_le(p.throttle)
        .f32_le(p.steer)
        .f32_le(p.brake)
        .f32_le(p.clutch)
        .f32_le(p.gear)
        .f32_le(p.g_force_lat)
        .f32_le(p.g_force_lon)
        .f32_le(p.lap)
        .f32_le(p.engine_rate)
        .f32_le(p.sli_pro_native_support)
        .f32_le(p.car_position)
        .f32_le(p.kers_level)
        .f32_le(p.kers_max_level)
        .f32_le(p.drs)
        .f32_le(p.traction_control)
        .f32_le(p.anti_lock_brakes)
        .f32_le(p.fuel_in_tank)
        .f32_le(p.fuel_capacity)
        .f32_le(p.in_pits)
        .f32_le(p.sector)
        .f32_le(p.sector1_time)
        .f32_le(p.sector2_time)
        .f32_le_array(&p.brakes_temperature)
        .f32_le_array(&p.tyres_pressure)
        .f32_le(p.team_info)
        .f32_le(p.total_laps)
        .f32_le(p.track_size)
        .f32_le(p.last_lap_time)
        .f32_le(p.max_rpm)
        .f32_le(p.idle_rpm)
        .f32_le(p.max_gears)
        .f32_le(p.session_type)
        .f32_le(p.drs_allowed)
        .f32_le(p.track_number)
        .f32_le(p.vehicle_fia_flags)
        .f32_le(p.era)
        .f32_le(p.engine_temperature)
        .f32_le(p.g_force_vert)
        .f32_le(p.angular_velocity_x)
        .f32_le(p.angular_velocity_y)
        .f32_le(p.angular_velocity_z)
        .i8_array(&p.tyres_temperature)
        .i8_array(&p.tyres_wear)
        .i8(p.tyre_compound)
        .i8(p.front_brake_bias)
        .i8(p.fuel_mix)
        .i8(p.current_lap_invalid)
        .i8_array(&p.tyres_damage)
        .i8(p.front_left_wing_damage)
        .i8(p.front_right_wing_damage)
        .i8(p.rear_wing_damage)
        .i8(p.engine_damage)
        .i8(p.gear_box_damage)
        .i8(p.exhaust_damage)
        .i8(p.pit_limiter_status)
        .i8(p.pit_speed_limit)
        .f32_le(p.session_time_left)
        .i8(p.rev_lights_percent)
        .i8(p.is_spectating)
        .i8(p.spectator_car_index)
        .i8(p.num_cars)
        .i8(p.player_car_index);

    for car in &p.car_data {
        write_car_record(&mut w, car);
    }

    w.f32_le(p.yaw)
        .f32_le(p.pitch)
        .f32_le(p.roll)
        .f32_le(p.local_velocity_x)
        .f32_le(p.local_velocity_y)
        .f32_le(p.local_velocity_z)
        .f32_le_array(&p.suspension_acceleration)
        .f32_le(p.angular_acceleration_x)
        .f32_le(p.angular_acceleration_y)
        .f32_le(p.angular_acceleration_z);

    debug_assert_eq!(w.buf.len(), PACKET_SIZE);
    w.buf
}

fn write_car_record(w: &mut ByteWriter, car: &CarRecord) {
    w.f32_le_array(&car.world_position)
        .f32_le(car.last_lap_time)
        .f32_le(car.current_lap_time)
        .f32_le(car.best_lap_time)
        .f32_le(car.sector1_time)
        .f32_le(car.sector2_time)
        .f32_le(car.lap_distance)
        .i8(car.driver_id)
        .i8(car.team_id)
        .i8(car.car_position)
        .i8(car.current_lap_num)
        .i8(car.tyre_compound)
        .i8(car.in_pits)
        .i8(car.sector)
        .i8(car.current_lap_invalid)
        .i8(car.penalties);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;
    use crate::layout::*;
    use proptest::prelude::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn encoded_length_is_packet_size() {
        assert_eq!(encode(&TelemetryPacket::default()).len(), PACKET_SIZE);
    }

    #[test]
    fn fields_land_at_layout_offsets() -> TestResult {
        let mut packet = TelemetryPacket::default();
        packet.time = 1.0;
        packet.tyres_temperature = [90, 91, 85, 86];
        packet.num_cars = 20;
        packet.player_car_index = 7;
        packet.car_data[1].driver_id = 9;
        packet.angular_acceleration_z = 2.0;

        let raw = encode(&packet);
        assert_eq!(raw.get(OFF_TIME..OFF_TIME + 4), Some(&[0x00, 0x00, 0x80, 0x3F][..]));
        assert_eq!(
            raw.get(OFF_TYRES_TEMPERATURE..OFF_TYRES_TEMPERATURE + 4),
            Some(&[90u8, 91, 85, 86][..])
        );
        assert_eq!(raw.get(OFF_NUM_CARS), Some(&20));
        assert_eq!(raw.get(OFF_PLAYER_CAR_INDEX), Some(&7));
        let car1 = car_record_offset(1).ok_or("no slot 1")?;
        assert_eq!(raw.get(car1 + CAR_OFF_DRIVER_ID), Some(&9));
        assert_eq!(
            raw.get(OFF_ANGULAR_ACCELERATION_Z..PACKET_SIZE),
            Some(&2.0f32.to_le_bytes()[..])
        );
        Ok(())
    }

    #[test]
    fn round_trip_preserves_signed_fields_and_wheel_order() -> TestResult {
        let mut packet = TelemetryPacket::default();
        packet.time = 42.25;
        packet.suspension_position = [1.0, 2.0, 3.0, 4.0];
        packet.suspension_velocity = [-1.0, -2.0, -3.0, -4.0];
        packet.wheel_speed = [10.0, 11.0, 12.0, 13.0];
        packet.brakes_temperature = [400.0, 410.0, 500.0, 510.0];
        packet.tyres_pressure = [21.5, 21.6, 23.0, 23.1];
        packet.suspension_acceleration = [0.1, 0.2, 0.3, 0.4];
        packet.tyres_temperature = [-1, 100, 127, -128];
        packet.tyres_wear = [5, 6, 7, 8];
        packet.tyres_damage = [0, -1, 2, -3];
        packet.tyre_compound = 6;
        packet.pit_speed_limit = -56;
        packet.num_cars = 20;
        packet.car_data[19].penalties = -10;
        packet.car_data[0].world_position = [1.5, -2.5, 3.5];

        let decoded = decode(&encode(&packet))?;
        assert_eq!(decoded, packet);
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Any 1289-byte buffer decodes, and re-encoding reproduces it bit for bit.
        #[test]
        fn prop_decode_encode_is_identity(
            raw in proptest::collection::vec(any::<u8>(), PACKET_SIZE..=PACKET_SIZE)
        ) {
            let packet = decode(&raw);
            prop_assert!(packet.is_ok());
            if let Ok(packet) = packet {
                prop_assert_eq!(encode(&packet), raw);
            }
        }

        #[test]
        fn prop_round_trip_scalar_and_signed_fields(
            time in any::<f32>(),
            gear in any::<f32>(),
            wear in any::<[i8; 4]>(),
            penalties in any::<i8>(),
            slot in 0usize..MAX_CARS,
        ) {
            let mut packet = TelemetryPacket::default();
            packet.time = time;
            packet.gear = gear;
            packet.tyres_wear = wear;
            if let Some(car) = packet.car_data.get_mut(slot) {
                car.penalties = penalties;
            }

            let decoded = decode(&encode(&packet));
            prop_assert!(decoded.is_ok());
            if let Ok(decoded) = decoded {
                prop_assert_eq!(decoded.time.to_bits(), time.to_bits());
                prop_assert_eq!(decoded.gear.to_bits(), gear.to_bits());
                prop_assert_eq!(decoded.tyres_wear, wear);
                prop_assert_eq!(decoded.car_data.get(slot).map(|c| c.penalties), Some(penalties));
            }
        }
    }
}
