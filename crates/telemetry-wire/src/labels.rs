//! Display names for the integer codes carried in F1 2017 telemetry.
//!
//! These tables belong to consumers; [`crate::decode`] never consults them and
//! never rejects an unknown code. Anything outside a table maps to `"Unknown"`.

const UNKNOWN: &str = "Unknown";

const TRACKS: &[&str] = &[
    "Melbourne",         // 0
    "Sepang",            // 1
    "Shanghai",          // 2
    "Sakhir (Bahrain)",  // 3
    "Catalunya",         // 4
    "Monaco",            // 5
    "Montreal",          // 6
    "Silverstone",       // 7
    "Hockenheim",        // 8
    "Hungaroring",       // 9
    "Spa",               // 10
    "Monza",             // 11
    "Singapore",         // 12
    "Suzuka",            // 13
    "Abu Dhabi",         // 14
    "Texas",             // 15
    "Brazil",            // 16
    "Austria",           // 17
    "Sochi",             // 18
    "Mexico",            // 19
    "Baku (Azerbaijan)", // 20
    "Sakhir Short",      // 21
    "Silverstone Short", // 22
    "Texas Short",       // 23
    "Suzuka Short",      // 24
];

const TYRE_COMPOUNDS: &[&str] = &[
    "Ultra Soft", // 0
    "Super Soft", // 1
    "Soft",       // 2
    "Medium",     // 3
    "Hard",       // 4
    "Inter",      // 5
    "Wet",        // 6
];

/// Converts a float-encoded code to an index, rejecting fractions and NaN.
fn float_code(code: f32) -> Option<i32> {
    if !code.is_finite() || code.fract() != 0.0 {
        return None;
    }
    if !(f32::from(i16::MIN)..=f32::from(i16::MAX)).contains(&code) {
        return None;
    }
    Some(code as i32)
}

fn lookup(table: &'static [&'static str], code: i32) -> &'static str {
    usize::try_from(code)
        .ok()
        .and_then(|index| table.get(index))
        .copied()
        .unwrap_or(UNKNOWN)
}

/// Track name for the packet's `track_number` (-1 means unknown).
pub fn track_name(track_number: f32) -> &'static str {
    float_code(track_number).map_or(UNKNOWN, |code| lookup(TRACKS, code))
}

/// Tyre compound name for a car's or the packet's `tyre_compound`.
pub fn tyre_compound_name(compound: i8) -> &'static str {
    lookup(TYRE_COMPOUNDS, i32::from(compound))
}

/// Team name for a car record's `team_id` (or the packet's `team_info`).
pub fn team_name(team_id: i8) -> &'static str {
    match team_id {
        0 => "Red Bull",
        1 => "Ferrari",
        2 => "McLaren",
        3 => "Renault",
        4 => "Mercedes",
        5 => "Sauber",
        6 => "Force India",
        7 => "Williams",
        8 => "Toro Rosso",
        11 => "Haas",
        _ => UNKNOWN,
    }
}

/// Driver name for a car record's `driver_id`.
pub fn driver_name(driver_id: i8) -> &'static str {
    match driver_id {
        0 => "Sebastian Vettel",
        1 => "Daniil Kvyat",
        2 => "Fernando Alonso",
        3 => "Felipe Massa",
        5 => "Sergio Perez",
        6 => "Kimi Räikkönen",
        7 => "Romain Grosjean",
        9 => "Lewis Hamilton",
        10 => "Nico Hulkenberg",
        14 => "Kevin Magnussen",
        15 => "Valtteri Bottas",
        16 => "Daniel Ricciardo",
        18 => "Marcus Ericsson",
        20 => "Jolyon Palmer",
        22 => "Max Verstappen",
        23 => "Carlos Sainz Jr.",
        31 => "Pascal Wehrlein",
        33 => "Esteban Ocon",
        34 => "Stoffel Vandoorne",
        35 => "Lance Stroll",
        _ => UNKNOWN,
    }
}

/// Session type for the packet's `session_type`.
pub fn session_type_name(session_type: f32) -> &'static str {
    match float_code(session_type) {
        Some(0) => "Unknown",
        Some(1) => "Practice",
        Some(2) => "Qualifying",
        Some(3) => "Race",
        _ => UNKNOWN,
    }
}

/// Flag shown to the vehicle, from `vehicle_fia_flags`.
pub fn fia_flag_name(flags: f32) -> &'static str {
    match float_code(flags) {
        Some(0) => "None",
        Some(1) => "Green",
        Some(2) => "Blue",
        Some(3) => "Yellow",
        Some(4) => "Red",
        _ => UNKNOWN,
    }
}

pub fn fuel_mix_name(fuel_mix: i8) -> &'static str {
    match fuel_mix {
        0 => "Lean",
        1 => "Standard",
        2 => "Rich",
        3 => "Max",
        _ => UNKNOWN,
    }
}

pub fn pit_status_name(in_pits: i8) -> &'static str {
    match in_pits {
        0 => "None",
        1 => "Pitting",
        2 => "In Pit Area",
        _ => UNKNOWN,
    }
}

pub fn sector_name(sector: i8) -> &'static str {
    match sector {
        0 => "Sector 1",
        1 => "Sector 2",
        2 => "Sector 3",
        _ => UNKNOWN,
    }
}

/// Car era, from the packet's `era` (2017 modern, 1980 classic).
pub fn era_name(era: f32) -> &'static str {
    match float_code(era) {
        Some(2017) => "Modern",
        Some(1980) => "Classic",
        _ => UNKNOWN,
    }
}

/// Gear as shown on a dashboard: the wire value is offset by one, with
/// 0 meaning reverse and 1 neutral.
pub fn gear_label(gear: f32) -> String {
    match float_code(gear) {
        Some(0) => "R".to_string(),
        Some(1) => "N".to_string(),
        Some(g) if g > 1 => (g - 1).to_string(),
        _ => "?".to_string(),
    }
}
