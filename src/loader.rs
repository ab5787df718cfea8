use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};

use crate::error::{CheckerError, Result};
use crate::fmt::plain_number;
use crate::models::ActivityRow;
use crate::settings::DateFormat;

pub const START_DATE_COLUMN: &str = "Start date";
pub const END_DATE_COLUMN: &str = "End date";
pub const COST_COLUMN: &str = "Cost";
pub const ACTIVITY_COLUMN: &str = "Activity";
pub const LEDGER_CODE_COLUMN: &str = "Ledger code";

const REQUIRED_COLUMNS: &[&str] = &[START_DATE_COLUMN, END_DATE_COLUMN, COST_COLUMN, ACTIVITY_COLUMN];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a cost such as `1,234.56`, `$50`, or `(20.00)`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let value = if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        -inner.trim().parse::<f64>().ok()?
    } else {
        s.parse::<f64>().ok()?
    };
    value.is_finite().then_some(value)
}

pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    if !serial.is_finite() || serial.abs() > 3_000_000.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(chrono::Duration::days(serial.floor() as i64))
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

// ---------------------------------------------------------------------------
// Raw table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    fn from_text(raw: &str) -> Self {
        let t = raw.trim();
        if t.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(t.to_string())
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => plain_number(*n),
            Cell::Date(d) => d.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableRow {
    /// 1-based row number in the source sheet.
    pub line: usize,
    pub cells: Vec<Cell>,
}

impl TableRow {
    fn cell(&self, idx: usize) -> &Cell {
        self.cells.get(idx).unwrap_or(&EMPTY_CELL)
    }
}

/// A sheet as read from disk: a header row plus the non-empty rows below it.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

struct Columns {
    start: usize,
    end: usize,
    cost: usize,
    activity: usize,
    ledger: Option<usize>,
}

impl Table {
    fn from_rows(rows: impl IntoIterator<Item = (usize, Vec<Cell>)>) -> Self {
        let mut iter = rows.into_iter();
        let Some((_, header)) = iter.next() else {
            return Self::default();
        };
        let headers = header.iter().map(|c| normalize_header(&c.display())).collect();
        let rows = iter
            .filter(|(_, cells)| !cells.iter().all(Cell::is_empty))
            .map(|(line, cells)| TableRow { line, cells })
            .collect();
        Self { headers, rows }
    }

    /// Case-insensitive header lookup; the first matching column wins.
    pub fn column(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.headers.iter().position(|h| h.to_lowercase() == name)
    }

    fn columns(&self, require_ledger: bool) -> Result<Columns> {
        let mut required = REQUIRED_COLUMNS.to_vec();
        if require_ledger {
            required.push(LEDGER_CODE_COLUMN);
        }
        let missing: Vec<String> = required
            .iter()
            .filter(|c| self.column(c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            debug!("missing columns {missing:?}; headers were {:?}", self.headers);
            return Err(CheckerError::MissingColumns(missing));
        }
        let find = |name: &str| self.column(name).ok_or_else(|| CheckerError::MissingColumns(vec![name.to_string()]));
        Ok(Columns {
            start: find(START_DATE_COLUMN)?,
            end: find(END_DATE_COLUMN)?,
            cost: find(COST_COLUMN)?,
            activity: find(ACTIVITY_COLUMN)?,
            ledger: self.column(LEDGER_CODE_COLUMN),
        })
    }

    /// Convert every row into an [`ActivityRow`]. The column check runs
    /// before any cell is converted.
    pub fn activities(&self, require_ledger: bool, date_format: DateFormat) -> Result<Vec<ActivityRow>> {
        let cols = self.columns(require_ledger)?;
        let mut activities = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let start_date = cell_to_date(row, cols.start, START_DATE_COLUMN, date_format)?;
            let end_date = cell_to_date(row, cols.end, END_DATE_COLUMN, date_format)?;
            let cost = cell_to_cost(row, cols.cost)?;
            let ledger_code = cols
                .ledger
                .map(|idx| row.cell(idx).display())
                .filter(|code| !code.is_empty());
            activities.push(ActivityRow {
                activity: row.cell(cols.activity).display(),
                start_date,
                end_date,
                cost,
                ledger_code,
            });
        }
        debug!("converted {} activity rows", activities.len());
        Ok(activities)
    }

    /// Sorted, de-duplicated ledger codes of the sheet.
    pub fn ledger_codes(&self) -> Result<Vec<String>> {
        let idx = self
            .column(LEDGER_CODE_COLUMN)
            .ok_or_else(|| CheckerError::MissingColumns(vec![LEDGER_CODE_COLUMN.to_string()]))?;
        let codes: BTreeSet<String> = self
            .rows
            .iter()
            .map(|row| row.cell(idx).display())
            .filter(|code| !code.is_empty())
            .collect();
        Ok(codes.into_iter().collect())
    }
}

fn location(row: &TableRow, column: &str) -> String {
    format!("Row {}, column '{column}'", row.line)
}

fn cell_to_date(row: &TableRow, idx: usize, column: &str, date_format: DateFormat) -> Result<NaiveDate> {
    let cell = row.cell(idx);
    let parsed = match cell {
        Cell::Date(d) => Some(*d),
        Cell::Number(n) => excel_serial_to_date(*n),
        Cell::Text(s) => date_format.parse(s),
        Cell::Empty => None,
    };
    parsed.ok_or_else(|| {
        debug!("bad date {cell:?} at line {}", row.line);
        CheckerError::InvalidDateFormat {
            location: location(row, column),
            value: cell.display(),
            expected: date_format.pattern(),
        }
    })
}

fn cell_to_cost(row: &TableRow, idx: usize) -> Result<f64> {
    let cell = row.cell(idx);
    let parsed = match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => parse_amount(s),
        Cell::Empty | Cell::Date(_) => None,
    };
    parsed.ok_or_else(|| CheckerError::InvalidCellValue {
        location: location(row, COST_COLUMN),
        value: cell.display(),
        expected: "cost",
    })
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

/// Read a sheet from a CSV file or a workbook. CSV files have a single
/// sheet, so `sheet` is only consulted for workbooks.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    if is_csv(path) {
        read_csv(path)
    } else {
        read_workbook(path, sheet)
    }
}

fn read_csv(path: &Path) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| CheckerError::FileError(format!("Could not read {}: {e}", path.display())))?;
    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = record.position().map_or(i + 1, |p| p.line() as usize);
        rows.push((line, record.iter().map(Cell::from_text).collect()));
    }
    let table = Table::from_rows(rows);
    info!("read {} rows from {}", table.rows.len(), path.display());
    Ok(table)
}

#[cfg(feature = "excel")]
#[allow(unreachable_patterns)]
fn cell_from_data(data: &calamine::Data) -> Cell {
    use calamine::Data;
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()).map_or(Cell::Number(dt.as_f64()), Cell::Date),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map_or_else(|| Cell::from_text(s), Cell::Date),
        Data::DurationIso(s) => Cell::from_text(s),
        _ => Cell::Empty,
    }
}

#[cfg(feature = "excel")]
fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Table> {
    use calamine::Reader;

    let sheet = sheet.ok_or(CheckerError::MissingSheetName)?;
    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| CheckerError::FileError(format!("Failed to open {}: {e}", path.display())))?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(CheckerError::SheetNotFound {
            sheet: sheet.to_string(),
            available,
        });
    }
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| CheckerError::FileError(format!("Error reading sheet '{sheet}': {e}")))?;

    let first_line = range.start().map_or(0, |(row, _)| row as usize) + 1;
    let rows = range
        .rows()
        .enumerate()
        .map(|(i, row)| (first_line + i, row.iter().map(cell_from_data).collect()));
    let table = Table::from_rows(rows);
    info!("read {} rows from sheet '{sheet}' of {}", table.rows.len(), path.display());
    Ok(table)
}

#[cfg(not(feature = "excel"))]
fn read_workbook(path: &Path, _sheet: Option<&str>) -> Result<Table> {
    Err(CheckerError::FileError(format!(
        "{}: spreadsheet support is not enabled in this build; use a CSV file",
        path.display()
    )))
}
