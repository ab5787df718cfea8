use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{CheckerError, Result};

/// How dates are written in the start/end inputs and in text date cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// MM/DD/YYYY
    #[default]
    #[value(name = "four-digit")]
    FourDigitYear,
    /// MM/DD/YY
    #[value(name = "two-digit")]
    TwoDigitYear,
}

impl DateFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::FourDigitYear => "MM/DD/YYYY",
            Self::TwoDigitYear => "MM/DD/YY",
        }
    }

    fn year_digits(&self) -> usize {
        match self {
            Self::FourDigitYear => 4,
            Self::TwoDigitYear => 2,
        }
    }

    /// Parse `M/D/Y` where the year has exactly the configured number of
    /// digits. Two-digit years 00-68 land in 2000-2068, 69-99 in 1969-1999.
    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let parts: Vec<&str> = raw.trim().split('/').collect();
        if parts.len() != 3 {
            return None;
        }
        let (m, d, y) = (parts[0].trim(), parts[1].trim(), parts[2].trim());
        let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(m) || !all_digits(d) || !all_digits(y) {
            return None;
        }
        if m.len() > 2 || d.len() > 2 || y.len() != self.year_digits() {
            return None;
        }
        let m: u32 = m.parse().ok()?;
        let d: u32 = d.parse().ok()?;
        let mut y: i32 = y.parse().ok()?;
        if *self == Self::TwoDigitYear {
            y += if y < 69 { 2000 } else { 1900 };
        }
        NaiveDate::from_ymd_opt(y, m, d)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub date_format: DateFormat,
    #[serde(default)]
    pub default_sheet: Option<String>,
    #[serde(default)]
    pub output: OutputFormat,
}

impl Settings {
    /// Apply a `config set` key. Keys mirror the CLI flag names.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "date-format" => {
                self.date_format = DateFormat::from_str(value, true)
                    .map_err(|_| CheckerError::Settings(format!("unknown date format: {value}")))?;
            }
            "sheet" => {
                let value = value.trim();
                self.default_sheet = if value.is_empty() { None } else { Some(value.to_string()) };
            }
            "output" => {
                self.output = OutputFormat::from_str(value, true)
                    .map_err(|_| CheckerError::Settings(format!("unknown output format: {value}")))?;
            }
            _ => return Err(CheckerError::Settings(format!("unknown setting: {key}"))),
        }
        Ok(())
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("activity-checker")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if !path.exists() {
        debug!("no settings at {}, using defaults", path.display());
        return Settings::default();
    }
    let content = std::fs::read_to_string(&path).unwrap_or_default();
    match serde_json::from_str(&content) {
        Ok(settings) => {
            debug!("loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            warn!("ignoring unreadable settings at {}: {e}", path.display());
            Settings::default()
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| CheckerError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> PathBuf {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return PathBuf::from(path.replacen('~', &home.to_string_lossy(), 1));
        }
    }
    PathBuf::from(path)
}
