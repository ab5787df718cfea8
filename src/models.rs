use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CheckerError;

/// One spreadsheet row after column lookup and cell conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    pub activity: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cost: f64,
    pub ledger_code: Option<String>,
}

/// The raw input fields of a check, as the user typed them.
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    pub file: Option<PathBuf>,
    pub sheet: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_cost: Option<String>,
    pub max_cost: Option<String>,
    pub ledger_code: Option<String>,
}

/// Bounds and filters applied to every row of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationCriteria {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_cost: f64,
    pub max_cost: f64,
    /// Whether min/max were supplied; a zero minimum still counts.
    pub cost_bounds: bool,
    pub ledger_code_filter: Option<String>,
}

impl Default for ValidationCriteria {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            min_cost: 0.0,
            max_cost: f64::INFINITY,
            cost_bounds: false,
            ledger_code_filter: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BothDatesOutOfBounds,
    InvalidStartDate,
    InvalidEndDate,
    InvalidCost,
    LedgerCodeMatch,
    NoLedgerMatch,
    Summary,
    Error,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BothDatesOutOfBounds => "Both Dates Out of Bounds",
            Self::InvalidStartDate => "Invalid Start Date",
            Self::InvalidEndDate => "Invalid End Date",
            Self::InvalidCost => "Invalid Cost",
            Self::LedgerCodeMatch => "Ledger Code Match",
            Self::NoLedgerMatch => "Ledger code",
            Self::Summary => "Summary",
            Self::Error => "Error",
        }
    }

    pub fn is_violation(&self) -> bool {
        matches!(
            self,
            Self::BothDatesOutOfBounds | Self::InvalidStartDate | Self::InvalidEndDate | Self::InvalidCost
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub activity: String,
    pub category: Category,
    pub label: String,
    pub detail: String,
}

impl Finding {
    pub fn row(activity: &str, category: Category, detail: String) -> Self {
        Self {
            activity: activity.to_string(),
            category,
            label: category.label().to_string(),
            detail,
        }
    }

    pub fn summary(label: &str, detail: String) -> Self {
        Self {
            activity: "Summary".to_string(),
            category: Category::Summary,
            label: label.to_string(),
            detail,
        }
    }

    pub fn error(err: &CheckerError) -> Self {
        Self {
            activity: "Error".to_string(),
            category: Category::Error,
            label: err.kind().to_string(),
            detail: err.to_string(),
        }
    }
}

/// Running totals for one run. For each dimension the valid and invalid
/// counts add up to the number of rows considered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub correct_start: usize,
    pub incorrect_start: usize,
    pub correct_end: usize,
    pub incorrect_end: usize,
    pub valid_cost: usize,
    pub invalid_cost: usize,
    pub ledger_matches: usize,
    pub both_out_of_bounds: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub findings: Vec<Finding>,
    pub counters: Counters,
    pub rows_considered: usize,
}

impl Report {
    pub fn from_error(err: &CheckerError) -> Self {
        Self {
            findings: vec![Finding::error(err)],
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.findings.iter().any(|f| f.category == Category::Error)
    }

    pub fn violations(&self) -> usize {
        self.findings.iter().filter(|f| f.category.is_violation()).count()
    }

    /// `(activity, label, detail)` triples in display order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.findings
            .iter()
            .map(|f| (f.activity.as_str(), f.label.as_str(), f.detail.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_report_has_single_entry() {
        let report = Report::from_error(&CheckerError::IncompleteDatePair);
        assert!(report.is_error());
        let entries: Vec<_> = report.entries().collect();
        assert_eq!(
            entries,
            vec![(
                "Error",
                "Incomplete Date Range",
                "Both Start Date and End Date must be filled."
            )]
        );
    }

    #[test]
    fn test_violations_ignore_summaries_and_matches() {
        let report = Report {
            findings: vec![
                Finding::row("Swim", Category::InvalidCost, String::new()),
                Finding::row("Swim", Category::LedgerCodeMatch, String::new()),
                Finding::summary("Valid Costs", "0 / 1".into()),
            ],
            ..Report::default()
        };
        assert_eq!(report.violations(), 1);
        assert!(!report.is_error());
    }

    #[test]
    fn test_default_criteria_has_open_cost_range() {
        let c = ValidationCriteria::default();
        assert_eq!(c.min_cost, 0.0);
        assert!(c.max_cost.is_infinite());
        assert!(!c.cost_bounds);
    }
}
