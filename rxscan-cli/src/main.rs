//! rxscan command-line entry point

use clap::Parser;
use rxscan_cli::commands::Commands;
use std::process::ExitCode;

/// Extract medication attributes from prescription text
#[derive(Debug, Parser)]
#[command(name = "rxscan", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
