use colored::Colorize;

use crate::checker;
use crate::error::Result;
use crate::settings::{load_settings, shellexpand_path};

pub fn run(file: &str, sheet: Option<&str>, filter: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let codes = checker::ledger_codes(&shellexpand_path(file), sheet, &settings, filter)?;
    if codes.is_empty() {
        println!("{}", "No ledger codes found.".yellow());
        return Ok(());
    }
    for code in &codes {
        println!("{code}");
    }
    Ok(())
}
