//! Byte layout of the F1 2017 UDP telemetry packet.
//!
//! The packet is a packed little-endian record: no alignment padding between
//! fields, no variable-length sections. Every offset below is an absolute byte
//! offset into the datagram payload unless it carries the `CAR_OFF_` prefix, in
//! which case it is relative to the start of one car record.
//!
//! Wheel arrays always use the order rear-left, rear-right, front-left,
//! front-right.

/// Width of an IEEE-754 single-precision float on the wire.
pub const F32_SIZE: usize = 4;
/// Width of a signed byte field on the wire.
pub const I8_SIZE: usize = 1;
/// Number of entries in every per-wheel array.
pub const WHEEL_COUNT: usize = 4;

// ── Car record (45 bytes) ────────────────────────────────────────────────────

/// Number of car slots carried by every packet, active or not.
pub const MAX_CARS: usize = 20;

pub const CAR_OFF_WORLD_POSITION: usize = 0; // [f32; 3]
pub const CAR_OFF_LAST_LAP_TIME: usize = 12; // f32
pub const CAR_OFF_CURRENT_LAP_TIME: usize = 16; // f32
pub const CAR_OFF_BEST_LAP_TIME: usize = 20; // f32
pub const CAR_OFF_SECTOR1_TIME: usize = 24; // f32
pub const CAR_OFF_SECTOR2_TIME: usize = 28; // f32
pub const CAR_OFF_LAP_DISTANCE: usize = 32; // f32
pub const CAR_OFF_DRIVER_ID: usize = 36; // i8
pub const CAR_OFF_TEAM_ID: usize = 37; // i8
pub const CAR_OFF_CAR_POSITION: usize = 38; // i8
pub const CAR_OFF_CURRENT_LAP_NUM: usize = 39; // i8
pub const CAR_OFF_TYRE_COMPOUND: usize = 40; // i8
pub const CAR_OFF_IN_PITS: usize = 41; // i8
pub const CAR_OFF_SECTOR: usize = 42; // i8
pub const CAR_OFF_CURRENT_LAP_INVALID: usize = 43; // i8
pub const CAR_OFF_PENALTIES: usize = 44; // i8

/// 9 floats (3 world position + 6 timing) followed by 9 signed bytes.
pub const CAR_RECORD_SIZE: usize = 9 * F32_SIZE + 9 * I8_SIZE;
/// Width of the embedded `car_data` array.
pub const CAR_DATA_SIZE: usize = MAX_CARS * CAR_RECORD_SIZE;

// ── Packet sections ──────────────────────────────────────────────────────────

pub const OFF_TIME: usize = 0; // f32
pub const OFF_LAP_TIME: usize = 4; // f32
pub const OFF_LAP_DISTANCE: usize = 8; // f32
pub const OFF_TOTAL_DISTANCE: usize = 12; // f32
pub const OFF_WORLD_POSITION_X: usize = 16; // f32
pub const OFF_SPEED: usize = 28; // f32
pub const OFF_WORLD_VELOCITY_X: usize = 32; // f32
pub const OFF_RIGHT_DIR_X: usize = 44; // f32
pub const OFF_FORWARD_DIR_X: usize = 56; // f32
pub const OFF_SUSPENSION_POSITION: usize = 68; // [f32; 4]
pub const OFF_SUSPENSION_VELOCITY: usize = 84; // [f32; 4]
pub const OFF_WHEEL_SPEED: usize = 100; // [f32; 4]
pub const OFF_THROTTLE: usize = 116; // f32
pub const OFF_GEAR: usize = 132; // f32
pub const OFF_ENGINE_RATE: usize = 148; // f32
pub const OFF_CAR_POSITION: usize = 156; // f32
pub const OFF_FUEL_IN_TANK: usize = 180; // f32
pub const OFF_SECTOR2_TIME: usize = 200; // f32
pub const OFF_BRAKES_TEMPERATURE: usize = 204; // [f32; 4]
pub const OFF_TYRES_PRESSURE: usize = 220; // [f32; 4]
pub const OFF_TEAM_INFO: usize = 236; // f32
pub const OFF_TRACK_NUMBER: usize = 272; // f32
pub const OFF_ANGULAR_VELOCITY_Z: usize = 300; // f32
pub const OFF_TYRES_TEMPERATURE: usize = 304; // [i8; 4]
pub const OFF_TYRES_WEAR: usize = 308; // [i8; 4]
pub const OFF_TYRE_COMPOUND: usize = 312; // i8
pub const OFF_CURRENT_LAP_INVALID: usize = 315; // i8
pub const OFF_TYRES_DAMAGE: usize = 316; // [i8; 4]
pub const OFF_FRONT_LEFT_WING_DAMAGE: usize = 320; // i8
pub const OFF_PIT_SPEED_LIMIT: usize = 327; // i8
pub const OFF_SESSION_TIME_LEFT: usize = 328; // f32
pub const OFF_REV_LIGHTS_PERCENT: usize = 332; // i8
pub const OFF_SPECTATOR_CAR_INDEX: usize = 334; // i8
pub const OFF_NUM_CARS: usize = 335; // i8
pub const OFF_PLAYER_CAR_INDEX: usize = 336; // i8
pub const OFF_CAR_DATA: usize = 337; // [CarRecord; 20]
pub const OFF_YAW: usize = 1237; // f32
pub const OFF_LOCAL_VELOCITY_X: usize = 1249; // f32
pub const OFF_SUSPENSION_ACCELERATION: usize = 1261; // [f32; 4]
pub const OFF_ANGULAR_ACCELERATION_X: usize = 1277; // f32
pub const OFF_ANGULAR_ACCELERATION_Z: usize = 1285; // f32

/// time .. forward direction: 17 scalar floats.
const MOTION_SIZE: usize = 17 * F32_SIZE;
/// Suspension position, suspension velocity, wheel speed.
const WHEEL_DYNAMICS_SIZE: usize = 3 * WHEEL_COUNT * F32_SIZE;
/// throttle .. sector2_time: 22 scalar floats.
const DRIVER_INPUT_SIZE: usize = 22 * F32_SIZE;
/// Brake temperature and tyre pressure.
const WHEEL_THERMAL_SIZE: usize = 2 * WHEEL_COUNT * F32_SIZE;
/// team_info .. angular velocity: 17 scalar floats.
const SESSION_SIZE: usize = 17 * F32_SIZE;
/// Tyre temperature/wear/damage arrays plus 12 standalone status bytes.
const STATUS_BYTES_SIZE: usize = 3 * WHEEL_COUNT * I8_SIZE + 12 * I8_SIZE;
/// session_time_left.
const SESSION_CLOCK_SIZE: usize = F32_SIZE;
/// rev_lights_percent, is_spectating, spectator_car_index.
const SPECTATOR_SIZE: usize = 3 * I8_SIZE;
/// num_cars and player_car_index.
const CAR_HEADER_SIZE: usize = 2 * I8_SIZE;
/// yaw .. angular acceleration: 9 scalar floats and one wheel array.
const ORIENTATION_SIZE: usize = 9 * F32_SIZE + WHEEL_COUNT * F32_SIZE;

/// Total datagram size for the F1 2017 layout.
pub const PACKET_SIZE: usize = MOTION_SIZE
    + WHEEL_DYNAMICS_SIZE
    + DRIVER_INPUT_SIZE
    + WHEEL_THERMAL_SIZE
    + SESSION_SIZE
    + STATUS_BYTES_SIZE
    + SESSION_CLOCK_SIZE
    + SPECTATOR_SIZE
    + CAR_HEADER_SIZE
    + CAR_DATA_SIZE
    + ORIENTATION_SIZE;

const _: () = assert!(CAR_RECORD_SIZE == 45);
const _: () = assert!(PACKET_SIZE == 1289);
const _: () = assert!(OFF_CAR_DATA + CAR_DATA_SIZE == OFF_YAW);
const _: () = assert!(OFF_ANGULAR_ACCELERATION_Z + F32_SIZE == PACKET_SIZE);

/// Absolute byte offset of car slot `index`, or `None` past the last slot.
pub fn car_record_offset(index: usize) -> Option<usize> {
    (index < MAX_CARS).then(|| OFF_CAR_DATA + index * CAR_RECORD_SIZE)
}
