//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::db::{PortWithUsage, Ship};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn header(table: &mut Table, columns: &[&str]) {
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            columns
                .iter()
                .map(|c| Cell::new(c).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
}

/// Print a table of ports
pub fn print_port_table(ports: &[PortWithUsage]) {
    if ports.is_empty() {
        info("No ports found");
        return;
    }

    let mut table = Table::new();
    header(
        &mut table,
        &["ID", "Name", "LOCODE", "Country", "Max Vessel", "Ships", "Cargo"],
    );

    for entry in ports {
        let port = &entry.port;
        let cargo = entry
            .port_usage
            .as_ref()
            .map(|u| Cell::new(&u.cargo_vessels))
            .unwrap_or_else(|| Cell::new("-").fg(Color::DarkGrey));

        table.add_row(vec![
            Cell::new(port.id),
            Cell::new(&port.port_name),
            Cell::new(&port.port_locode),
            Cell::new(&port.port_country),
            Cell::new(&port.port_max_vessel_size),
            Cell::new(port.port_total_ships),
            cargo,
        ]);
    }

    println!("{table}");
}

/// Print a table of ships
pub fn print_ship_table(ships: &[Ship]) {
    if ships.is_empty() {
        info("No ships found");
        return;
    }

    let mut table = Table::new();
    header(
        &mut table,
        &["ID", "Name", "Country", "Type", "Length", "Status", "Port"],
    );

    for ship in ships {
        let status_color = match ship.ship_status.as_str() {
            "moored" | "at anchor" => Color::Yellow,
            s if s.starts_with("underway") => Color::Green,
            _ => Color::White,
        };
        let port = ship
            .ship_current_port
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(ship.id),
            Cell::new(&ship.ship_name),
            Cell::new(&ship.ship_country),
            Cell::new(&ship.ship_type),
            Cell::new(&ship.ship_length),
            Cell::new(&ship.ship_status).fg(status_color),
            Cell::new(port),
        ]);
    }

    println!("{table}");
}
