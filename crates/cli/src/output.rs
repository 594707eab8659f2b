//! Output formatting for received packets

use anyhow::Error;
use colored::*;
use f1_telemetry_stream::StreamStats;
use f1_telemetry_wire::{CarRecord, TelemetryPacket, labels};
use serde_json::json;

/// One-line summary of the player's car state.
pub fn format_packet_line(packet: &TelemetryPacket) -> String {
    format!(
        "t={:>9.3}s lap {:>2.0} gear {:>2} {:>5.1} mph P{:<2.0} {}",
        packet.time,
        packet.lap,
        labels::gear_label(packet.gear),
        packet.speed,
        packet.car_position,
        labels::track_name(packet.track_number),
    )
}

pub fn format_car_line(index: usize, car: &CarRecord, is_player: bool) -> String {
    let marker = if is_player { '*' } else { ' ' };
    format!(
        "{marker}{index:>2} P{:<2} {:<20} {:<12} lap {:>2} best {:>8.3}s {}",
        car.car_position,
        labels::driver_name(car.driver_id),
        labels::team_name(car.team_id),
        car.current_lap_num,
        car.best_lap_time,
        labels::tyre_compound_name(car.tyre_compound),
    )
}

/// Print one admitted packet in the selected format.
pub fn print_packet(packet: &TelemetryPacket, json: bool, cars: bool) {
    if json {
        match serde_json::to_string(packet) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to format packet as JSON: {}", e),
        }
        return;
    }

    println!("{}", format_packet_line(packet));
    if cars {
        let player = usize::try_from(packet.player_car_index).ok();
        for (index, car) in packet.active_cars().iter().enumerate() {
            println!("  {}", format_car_line(index, car, player == Some(index)));
        }
    }
}

pub fn print_stats(stats: &StreamStats, json: bool) {
    if json {
        let output = json!({ "stats": stats });
        match serde_json::to_string(&output) {
            Ok(s) => eprintln!("{}", s),
            Err(e) => eprintln!("Failed to format stats as JSON: {}", e),
        }
    } else {
        eprintln!(
            "{} {} datagrams, {} packets, {} out of order, {} malformed",
            "Stopped:".bold(),
            stats.datagrams_received,
            stats.packets_emitted,
            stats.dropped_out_of_order,
            stats.malformed
        );
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": { "message": error.to_string() }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => eprintln!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_line_shows_displayed_gear_and_track() {
        let packet = TelemetryPacket {
            time: 83.5,
            lap: 3.0,
            gear: 7.0,
            speed: 187.25,
            car_position: 4.0,
            track_number: 7.0,
            ..TelemetryPacket::default()
        };
        let line = format_packet_line(&packet);
        assert!(line.starts_with("t=   83.500s"), "{line}");
        assert!(line.contains("gear  6"), "{line}");
        assert!(line.contains("187.2 mph") || line.contains("187.3 mph"), "{line}");
        assert!(line.contains("P4"), "{line}");
        assert!(line.ends_with("Silverstone"), "{line}");
    }

    #[test]
    fn packet_line_labels_reverse_and_unknown_track() {
        let packet = TelemetryPacket {
            gear: 0.0,
            track_number: -1.0,
            ..TelemetryPacket::default()
        };
        let line = format_packet_line(&packet);
        assert!(line.contains("gear  R"), "{line}");
        assert!(line.ends_with("Unknown"), "{line}");
    }

    #[test]
    fn car_line_marks_player() {
        let car = CarRecord {
            driver_id: 9,
            team_id: 4,
            car_position: 1,
            tyre_compound: 2,
            ..CarRecord::default()
        };
        let line = format_car_line(3, &car, true);
        assert!(line.starts_with("* 3 P1"), "{line}");
        assert!(line.contains("Lewis Hamilton"), "{line}");
        assert!(line.contains("Mercedes"), "{line}");
        assert!(line.ends_with("Soft"), "{line}");
        assert!(format_car_line(3, &car, false).starts_with("  3"));
    }
}
