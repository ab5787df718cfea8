use colored::Colorize;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path};

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings file:  {}", settings_path().display());
    println!("Date format:    {}", settings.date_format.pattern());
    println!(
        "Default sheet:  {}",
        settings.default_sheet.as_deref().unwrap_or("(not set)")
    );
    println!("Output:         {:?}", settings.output);
    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let mut settings = load_settings();
    settings.set(key, value)?;
    save_settings(&settings)?;
    println!("{} {key} = {value}", "Saved".green());
    Ok(())
}
