//! payload-infer CLI - telemetry inference for decoded device messages.

mod cli;
mod commands;
mod logging;
mod report;

use clap::Parser;
use cli::{Cli, Commands};
use payload_infer::{LocationConfig, LocationPolicy};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = LocationConfig {
        policy: if cli.lenient {
            LocationPolicy::Lenient
        } else {
            LocationPolicy::Strict
        },
    };

    let result = match cli.command {
        Commands::Infer { file, only, json } => commands::infer::run(file, only, json, config),

        Commands::Batch { file, only } => commands::batch::run(file, only, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
