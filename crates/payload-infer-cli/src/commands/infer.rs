//! Infer command - extract telemetry from a single message.

use std::path::PathBuf;

use colored::Colorize;
use payload_infer::LocationConfig;

use crate::cli::TelemetryKind;
use crate::report::{self, Report};

pub fn run(
    file: Option<PathBuf>,
    only: Vec<TelemetryKind>,
    json_output: bool,
    config: LocationConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let message = super::load_message(file.as_deref())?;
    tracing::debug!(fields = message.len(), "message loaded");

    let kinds = report::selected(&only);
    let report = report::infer(&message, &kinds, config);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(&report, &kinds);
    }

    Ok(())
}

fn print_human(report: &Report, kinds: &[TelemetryKind]) {
    for kind in kinds {
        let label = format!("{:<9}", kind.to_string());
        match kind {
            TelemetryKind::Location => match &report.location {
                Some(location) => println!("{} {}", label.cyan().bold(), location),
                None => println!("{} {}", label.cyan().bold(), "not found".dimmed()),
            },
            TelemetryKind::Wifi => match &report.access_points {
                Some(points) => {
                    println!(
                        "{} {} access point(s)",
                        label.cyan().bold(),
                        points.len().to_string().white().bold()
                    );
                    for point in points {
                        println!("          {}  {:>7.1} dBm", point.bssid, point.rssi);
                    }
                }
                None => println!("{} {}", label.cyan().bold(), "not found".dimmed()),
            },
            TelemetryKind::Gnss => match &report.gnss {
                Some(payload) => println!(
                    "{} {} ({} bytes)",
                    label.cyan().bold(),
                    payload,
                    payload.len() / 2
                ),
                None => println!("{} {}", label.cyan().bold(), "not found".dimmed()),
            },
        }
    }

    if report.is_empty() {
        println!();
        println!("{}", "No telemetry recognized in message.".yellow());
    }
}
