pub mod check;
pub mod codes;
pub mod config;
pub mod render;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::settings::{DateFormat, OutputFormat};

#[derive(Parser)]
#[command(
    name = "activity-checker",
    about = "Check spreadsheet activities against date, cost and ledger-code bounds."
)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate every activity row and list the violations.
    Check {
        /// Spreadsheet (XLSX/XLS/ODS) or CSV file
        file: Option<String>,
        /// Sheet to read (defaults to the configured sheet)
        #[arg(long)]
        sheet: Option<String>,
        /// Earliest allowed start date
        #[arg(long = "start")]
        start_date: Option<String>,
        /// Latest allowed end date
        #[arg(long = "end")]
        end_date: Option<String>,
        /// Minimum cost (inclusive)
        #[arg(long = "min-cost", allow_hyphen_values = true)]
        min_cost: Option<String>,
        /// Maximum cost (inclusive)
        #[arg(long = "max-cost", allow_hyphen_values = true)]
        max_cost: Option<String>,
        /// Only check rows whose ledger code contains this text
        #[arg(long)]
        ledger: Option<String>,
        /// Date format for the bounds and text date cells
        #[arg(long = "date-format", value_enum)]
        date_format: Option<DateFormat>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// List the ledger codes present in a sheet.
    Codes {
        /// Spreadsheet (XLSX/XLS/ODS) or CSV file
        file: String,
        /// Sheet to read (defaults to the configured sheet)
        #[arg(long)]
        sheet: Option<String>,
        /// Only list codes containing this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show or change saved defaults.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Print a shell completion script.
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings.
    Show,
    /// Save a setting (keys: date-format, sheet, output).
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
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
    fn test_parse_check_flags() {
        let cli = Cli::try_parse_from([
            "activity-checker",
            "check",
            "acts.xlsx",
            "--sheet",
            "Fall",
            "--start",
            "01/10/2024",
            "--end",
            "01/20/2024",
            "--min-cost",
            "-5",
            "--max-cost",
            "50",
            "--date-format",
            "two-digit",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check {
                file,
                min_cost,
                date_format,
                format,
                ..
            } => {
                assert_eq!(file.as_deref(), Some("acts.xlsx"));
                assert_eq!(min_cost.as_deref(), Some("-5"));
                assert_eq!(date_format, Some(DateFormat::TwoDigitYear));
                assert_eq!(format, Some(OutputFormat::Json));
            }
            _ => panic!("expected check"),
        }
    }
}
