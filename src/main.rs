mod checker;
mod cli;
mod criteria;
mod error;
mod fmt;
mod loader;
mod models;
mod settings;
mod validator;

use clap::{CommandFactory, Parser};
use log::LevelFilter;

use cli::{Cli, Commands, ConfigCommands};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            file,
            sheet,
            start_date,
            end_date,
            min_cost,
            max_cost,
            ledger,
            date_format,
            format,
        } => cli::check::run(cli::check::CheckArgs {
            file,
            sheet,
            start_date,
            end_date,
            min_cost,
            max_cost,
            ledger,
            date_format,
            format,
        }),
        Commands::Codes {
            file,
            sheet,
            filter,
        } => cli::codes::run(&file, sheet.as_deref(), filter.as_deref()),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Set { key, value } => cli::config::set(&key, &value),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "activity-checker", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
