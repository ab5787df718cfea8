use log::info;

use crate::fmt::money;
use crate::models::{ActivityRow, Category, Counters, Finding, Report, ValidationCriteria};

fn matches_ledger(row: &ActivityRow, needle: &str) -> bool {
    row.ledger_code
        .as_deref()
        .is_some_and(|code| code.to_lowercase().contains(needle))
}

fn check_dates(row: &ActivityRow, criteria: &ValidationCriteria, counters: &mut Counters, findings: &mut Vec<Finding>) {
    let early = criteria.start_date.filter(|bound| row.start_date < *bound);
    let late = criteria.end_date.filter(|bound| row.end_date > *bound);

    // A row outside both bounds is reported once.
    if early.is_some() && late.is_some() {
        findings.push(Finding::row(
            &row.activity,
            Category::BothDatesOutOfBounds,
            format!("Start: {}, End: {}", row.start_date, row.end_date),
        ));
        counters.both_out_of_bounds += 1;
        counters.incorrect_start += 1;
        counters.incorrect_end += 1;
        return;
    }

    match early {
        Some(bound) => {
            findings.push(Finding::row(
                &row.activity,
                Category::InvalidStartDate,
                format!("Start: {}, starts before the expected start date of: {bound}", row.start_date),
            ));
            counters.incorrect_start += 1;
        }
        None => counters.correct_start += 1,
    }
    match late {
        Some(bound) => {
            findings.push(Finding::row(
                &row.activity,
                Category::InvalidEndDate,
                format!("End: {}, ends after the expected end date of: {bound}", row.end_date),
            ));
            counters.incorrect_end += 1;
        }
        None => counters.correct_end += 1,
    }
}

fn check_cost(row: &ActivityRow, criteria: &ValidationCriteria, counters: &mut Counters, findings: &mut Vec<Finding>) {
    if criteria.cost_bounds && (row.cost < criteria.min_cost || row.cost > criteria.max_cost) {
        findings.push(Finding::row(
            &row.activity,
            Category::InvalidCost,
            format!(
                "Cost: {}, Expected between {} and {}",
                money(row.cost),
                money(criteria.min_cost),
                money(criteria.max_cost)
            ),
        ));
        counters.invalid_cost += 1;
    } else {
        counters.valid_cost += 1;
    }
}

fn no_ledger_match(code: &str) -> Report {
    Report {
        findings: vec![Finding {
            activity: "No Match".to_string(),
            category: Category::NoLedgerMatch,
            label: Category::NoLedgerMatch.label().to_string(),
            detail: format!("No entries found for {code}."),
        }],
        ..Report::default()
    }
}

/// Classify every row against `criteria`.
///
/// When a ledger filter is set it gates everything else: only matching rows
/// are checked, and an empty match ends the run with a single no-match
/// finding. Row findings come first, in row order, then ledger matches,
/// then the summaries.
pub fn validate(rows: &[ActivityRow], criteria: &ValidationCriteria) -> Report {
    let considered: Vec<&ActivityRow> = match &criteria.ledger_code_filter {
        Some(code) => {
            let needle = code.to_lowercase();
            rows.iter().filter(|r| matches_ledger(r, &needle)).collect()
        }
        None => rows.iter().collect(),
    };
    if let Some(code) = &criteria.ledger_code_filter {
        if considered.is_empty() {
            info!("no rows match ledger code {code}");
            return no_ledger_match(code);
        }
    }

    let mut counters = Counters::default();
    let mut findings = Vec::new();
    for row in &considered {
        check_dates(row, criteria, &mut counters, &mut findings);
        check_cost(row, criteria, &mut counters, &mut findings);
    }

    let total = considered.len();
    if let Some(code) = &criteria.ledger_code_filter {
        counters.ledger_matches = total;
        for row in &considered {
            findings.push(Finding::row(
                &row.activity,
                Category::LedgerCodeMatch,
                format!("Ledger code: {}", row.ledger_code.as_deref().unwrap_or_default()),
            ));
        }
        findings.push(Finding::summary(
            "Ledger Code Matches",
            format!("{total} activities match Ledger Code: {code}"),
        ));
    }

    let summaries = [
        ("Valid Start Dates", counters.correct_start),
        ("Invalid Start Dates", counters.incorrect_start),
        ("Valid End Dates", counters.correct_end),
        ("Invalid End Dates", counters.incorrect_end),
        ("Valid Costs", counters.valid_cost),
        ("Invalid Costs", counters.invalid_cost),
    ];
    for (label, count) in summaries {
        findings.push(Finding::summary(label, format!("{count} / {total}")));
    }

    info!(
        "checked {total} rows: {} start, {} end, {} cost violations",
        counters.incorrect_start, counters.incorrect_end, counters.invalid_cost
    );
    Report {
        findings,
        counters,
        rows_considered: total,
    }
}
