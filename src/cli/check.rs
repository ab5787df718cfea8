use log::{debug, info};

use crate::checker;
use crate::error::Result;
use crate::models::{CheckRequest, Report};
use crate::settings::{load_settings, shellexpand_path, DateFormat, OutputFormat};

use super::render::render;

/// Exit code when the run ended in an error entry instead of a report.
const ERROR_EXIT_CODE: i32 = 2;

pub struct CheckArgs {
    pub file: Option<String>,
    pub sheet: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_cost: Option<String>,
    pub max_cost: Option<String>,
    pub ledger: Option<String>,
    pub date_format: Option<DateFormat>,
    pub format: Option<OutputFormat>,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let mut settings = load_settings();
    if let Some(date_format) = args.date_format {
        settings.date_format = date_format;
    }
    let format = args.format.unwrap_or(settings.output);

    let request = CheckRequest {
        file: args.file.as_deref().map(str::trim).filter(|f| !f.is_empty()).map(shellexpand_path),
        sheet: args.sheet,
        start_date: args.start_date,
        end_date: args.end_date,
        min_cost: args.min_cost,
        max_cost: args.max_cost,
        ledger_code: args.ledger,
    };

    let report = checker::run(&request, &settings).unwrap_or_else(|e| {
        debug!("check failed: {e:?}");
        Report::from_error(&e)
    });
    info!("{} violations in {} rows", report.violations(), report.rows_considered);
    println!("{}", render(&report, format)?);

    if report.is_error() {
        std::process::exit(ERROR_EXIT_CODE);
    }
    Ok(())
}
