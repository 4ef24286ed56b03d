use clap::{Parser, Subcommand};

use super::commands::{export::ExportArgs, inspect::InspectArgs};

#[derive(Debug, Parser)]
#[command(name = "coolerlog", version, about = "Cooler MQTT log to CSV exporter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a cooler MQTT log into a CSV spreadsheet.
    Export(ExportArgs),
    /// Parse a log and report diagnostics without writing a CSV.
    Inspect(InspectArgs),
}
