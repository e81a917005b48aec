//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// payload-infer: extract location, WiFi and GNSS telemetry from decoded messages
#[derive(Parser)]
#[command(name = "payload-infer")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Accept HDOP as a location accuracy source
    #[arg(long, global = true)]
    pub lenient: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer telemetry from a single JSON message
    Infer {
        /// Path to the JSON message (default: stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Only run the given inferrer (location, wifi, gnss); repeatable
        #[arg(long)]
        only: Vec<TelemetryKind>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Infer telemetry from newline-delimited JSON messages
    Batch {
        /// Path to the NDJSON file (default: stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Only run the given inferrer (location, wifi, gnss); repeatable
        #[arg(long)]
        only: Vec<TelemetryKind>,
    },
}

/// Telemetry type selectable on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TelemetryKind {
    /// Geographic location
    Location,
    /// WiFi access point observations
    Wifi,
    /// Raw GNSS navigation payload
    Gnss,
}

impl TelemetryKind {
    /// All telemetry types, in report order.
    pub const ALL: [TelemetryKind; 3] = [
        TelemetryKind::Location,
        TelemetryKind::Wifi,
        TelemetryKind::Gnss,
    ];
}

impl std::str::FromStr for TelemetryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "location" | "loc" | "gps" => Ok(TelemetryKind::Location),
            "wifi" | "access_points" | "ap" => Ok(TelemetryKind::Wifi),
            "gnss" | "nav" => Ok(TelemetryKind::Gnss),
            _ => Err(format!(
                "Unknown telemetry type: {}. Use: location, wifi, or gnss.",
                s
            )),
        }
    }
}

impl std::fmt::Display for TelemetryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelemetryKind::Location => write!(f, "location"),
            TelemetryKind::Wifi => write!(f, "wifi"),
            TelemetryKind::Gnss => write!(f, "gnss"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_telemetry_kind_parsing() {
        assert_eq!("location".parse::<TelemetryKind>(), Ok(TelemetryKind::Location));
        assert_eq!("WiFi".parse::<TelemetryKind>(), Ok(TelemetryKind::Wifi));
        assert_eq!("nav".parse::<TelemetryKind>(), Ok(TelemetryKind::Gnss));
        assert!("altitude".parse::<TelemetryKind>().is_err());
    }

    #[test]
    fn test_parse_infer_arguments() {
        let cli = Cli::try_parse_from([
            "payload-infer",
            "--lenient",
            "infer",
            "msg.json",
            "--only",
            "location",
            "--only",
            "gnss",
            "--json",
        ])
        .unwrap();

        assert!(cli.lenient);
        match cli.command {
            Commands::Infer { file, only, json } => {
                assert_eq!(file, Some(PathBuf::from("msg.json")));
                assert_eq!(only, vec![TelemetryKind::Location, TelemetryKind::Gnss]);
                assert!(json);
            }
            Commands::Batch { .. } => panic!("expected infer command"),
        }
    }
}
