use log::debug;

use crate::error::{CheckerError, Result};
use crate::loader::parse_amount;
use crate::models::{CheckRequest, ValidationCriteria};
use crate::settings::DateFormat;

/// A form field counts as filled once it has non-whitespace text.
fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_cost(field: &'static str, raw: Option<&str>) -> Result<Option<f64>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let invalid = || CheckerError::InvalidNumericInput {
        field,
        value: raw.to_string(),
    };
    let value = parse_amount(raw).ok_or_else(invalid)?;
    let rounded = (value * 1000.0).round();
    if !rounded.is_finite() {
        return Err(invalid());
    }
    Ok(Some(rounded / 1000.0))
}

impl ValidationCriteria {
    /// Build criteria from the raw input fields. Checks run in a fixed
    /// order and the first failure is returned.
    pub fn from_request(request: &CheckRequest, date_format: DateFormat) -> Result<Self> {
        let start_input = filled(&request.start_date);
        let end_input = filled(&request.end_date);
        let min_input = filled(&request.min_cost);
        let max_input = filled(&request.max_cost);

        let min_cost = parse_cost("Minimum Cost", min_input)?;
        let max_cost = parse_cost("Maximum Cost", max_input)?;

        if start_input.is_some() != end_input.is_some() {
            return Err(CheckerError::IncompleteDatePair);
        }
        if min_cost.is_some() != max_cost.is_some() {
            return Err(CheckerError::IncompleteCostPair);
        }

        let parse_date = |raw: &str| {
            date_format.parse(raw).ok_or_else(|| CheckerError::InvalidDateFormat {
                location: "Date input".to_string(),
                value: raw.to_string(),
                expected: date_format.pattern(),
            })
        };
        let start_date = start_input.map(parse_date).transpose()?;
        let end_date = end_input.map(parse_date).transpose()?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(CheckerError::InvertedRange(format!(
                    "Start Date {start} is after End Date {end}."
                )));
            }
        }

        let mut criteria = Self {
            start_date,
            end_date,
            ledger_code_filter: filled(&request.ledger_code).map(str::to_string),
            ..Self::default()
        };
        if let (Some(min), Some(max)) = (min_cost, max_cost) {
            if min > max {
                return Err(CheckerError::InvertedRange(format!(
                    "Minimum Cost {min} is greater than Maximum Cost {max}."
                )));
            }
            criteria.min_cost = min;
            criteria.max_cost = max;
            criteria.cost_bounds = true;
        }

        debug!("criteria: {criteria:?}");
        Ok(criteria)
    }
}
