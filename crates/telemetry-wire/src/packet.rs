//! Decoded F1 2017 telemetry records.
//!
//! Every field keeps the raw wire value. Enumerated codes such as
//! `tyre_compound` or `in_pits` are not range-checked here; use
//! [`crate::labels`] to turn them into display names.

use crate::layout::MAX_CARS;
use serde::{Deserialize, Serialize};

/// Position of one value inside a per-wheel array.
///
/// All wheel arrays on the wire are ordered RL, RR, FL, FR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wheel {
    RearLeft,
    RearRight,
    FrontLeft,
    FrontRight,
}

impl Wheel {
    /// Wheels in wire order.
    pub const ALL: [Wheel; 4] = [
        Wheel::RearLeft,
        Wheel::RearRight,
        Wheel::FrontLeft,
        Wheel::FrontRight,
    ];

    /// Index of this wheel inside a wire-ordered array.
    pub const fn index(self) -> usize {
        match self {
            Wheel::RearLeft => 0,
            Wheel::RearRight => 1,
            Wheel::FrontLeft => 2,
            Wheel::FrontRight => 3,
        }
    }

    /// Read this wheel's value out of a wire-ordered array.
    pub fn of<T: Copy>(self, values: &[T; 4]) -> T {
        let [rl, rr, fl, fr] = *values;
        match self {
            Wheel::RearLeft => rl,
            Wheel::RearRight => rr,
            Wheel::FrontLeft => fl,
            Wheel::FrontRight => fr,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Wheel::RearLeft => "RL",
            Wheel::RearRight => "RR",
            Wheel::FrontLeft => "FL",
            Wheel::FrontRight => "FR",
        }
    }
}

/// Per-car snapshot; 20 of these are embedded in every packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CarRecord {
    /// World coordinates (x, y, z).
    pub world_position: [f32; 3],
    pub last_lap_time: f32,
    pub current_lap_time: f32,
    pub best_lap_time: f32,
    pub sector1_time: f32,
    pub sector2_time: f32,
    pub lap_distance: f32,
    pub driver_id: i8,
    pub team_id: i8,
    /// Track position of the vehicle.
    pub car_position: i8,
    pub current_lap_num: i8,
    /// 0 = ultra soft … 6 = wet.
    pub tyre_compound: i8,
    /// 0 = none, 1 = pitting, 2 = in pit area.
    pub in_pits: i8,
    /// 0 = sector 1, 1 = sector 2, 2 = sector 3.
    pub sector: i8,
    /// 0 = valid, 1 = invalid.
    pub current_lap_invalid: i8,
    /// Accumulated time penalties in seconds.
    pub penalties: i8,
}

/// One decoded F1 2017 UDP telemetry datagram.
///
/// Field order matches the wire order. Per-wheel arrays are RL, RR, FL, FR
/// (see [`Wheel`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPacket {
    /// Session time in seconds; the stream orders packets by this field.
    pub time: f32,
    pub lap_time: f32,
    pub lap_distance: f32,
    pub total_distance: f32,
    pub world_position_x: f32,
    pub world_position_y: f32,
    pub world_position_z: f32,
    /// Speed of the car in MPH.
    pub speed: f32,
    pub world_velocity_x: f32,
    pub world_velocity_y: f32,
    pub world_velocity_z: f32,
    pub right_dir_x: f32,
    pub right_dir_y: f32,
    pub right_dir_z: f32,
    pub forward_dir_x: f32,
    pub forward_dir_y: f32,
    pub forward_dir_z: f32,
    pub suspension_position: [f32; 4],
    pub suspension_velocity: [f32; 4],
    pub wheel_speed: [f32; 4],
    pub throttle: f32,
    pub steer: f32,
    pub brake: f32,
    pub clutch: f32,
    /// 0 = reverse, 1 = neutral, 2 = first gear, …
    pub gear: f32,
    pub g_force_lat: f32,
    pub g_force_lon: f32,
    pub lap: f32,
    /// Engine speed in RPM.
    pub engine_rate: f32,
    pub sli_pro_native_support: f32,
    pub car_position: f32,
    pub kers_level: f32,
    pub kers_max_level: f32,
    pub drs: f32,
    pub traction_control: f32,
    pub anti_lock_brakes: f32,
    pub fuel_in_tank: f32,
    pub fuel_capacity: f32,
    pub in_pits: f32,
    pub sector: f32,
    pub sector1_time: f32,
    pub sector2_time: f32,
    /// Degrees Celsius.
    pub brakes_temperature: [f32; 4],
    /// PSI.
    pub tyres_pressure: [f32; 4],
    pub team_info: f32,
    pub total_laps: f32,
    pub track_size: f32,
    pub last_lap_time: f32,
    pub max_rpm: f32,
    pub idle_rpm: f32,
    pub max_gears: f32,
    pub session_type: f32,
    pub drs_allowed: f32,
    /// -1 when unknown.
    pub track_number: f32,
    pub vehicle_fia_flags: f32,
    pub era: f32,
    pub engine_temperature: f32,
    pub g_force_vert: f32,
    pub angular_velocity_x: f32,
    pub angular_velocity_y: f32,
    pub angular_velocity_z: f32,
    pub tyres_temperature: [i8; 4],
    pub tyres_wear: [i8; 4],
    pub tyre_compound: i8,
    pub front_brake_bias: i8,
    pub fuel_mix: i8,
    pub current_lap_invalid: i8,
    pub tyres_damage: [i8; 4],
    pub front_left_wing_damage: i8,
    pub front_right_wing_damage: i8,
    pub rear_wing_damage: i8,
    pub engine_damage: i8,
    pub gear_box_damage: i8,
    pub exhaust_damage: i8,
    pub pit_limiter_status: i8,
    pub pit_speed_limit: i8,
    pub session_time_left: f32,
    pub rev_lights_percent: i8,
    pub is_spectating: i8,
    pub spectator_car_index: i8,
    /// Number of meaningful slots at the front of `car_data`.
    pub num_cars: i8,
    pub player_car_index: i8,
    /// Always 20 slots; only the first `num_cars` carry live data.
    pub car_data: [CarRecord; MAX_CARS],
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub local_velocity_x: f32,
    pub local_velocity_y: f32,
    pub local_velocity_z: f32,
    pub suspension_acceleration: [f32; 4],
    pub angular_acceleration_x: f32,
    pub angular_acceleration_y: f32,
    pub angular_acceleration_z: f32,
}

impl TelemetryPacket {
    /// Car slots holding live data, i.e. the first `num_cars` entries.
    ///
    /// Negative counts yield an empty slice; counts above 20 are capped.
    pub fn active_cars(&self) -> &[CarRecord] {
        let count = usize::try_from(self.num_cars)
            .unwrap_or(0)
            .min(MAX_CARS);
        self.car_data.get(..count).unwrap_or(&[])
    }

    /// The player's car record, if `player_car_index` points at an active slot.
    pub fn player_car(&self) -> Option<&CarRecord> {
        let index = usize::try_from(self.player_car_index).ok()?;
        self.active_cars().get(index)
    }
}
