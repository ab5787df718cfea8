use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("Please enter a valid numeric value for {field} (got \"{value}\").")]
    InvalidNumericInput { field: &'static str, value: String },

    #[error("Both Start Date and End Date must be filled.")]
    IncompleteDatePair,

    #[error("Both Minimum Cost and Maximum Cost must be filled.")]
    IncompleteCostPair,

    #[error("{0}")]
    InvertedRange(String),

    #[error("No file selected. Please provide a spreadsheet file.")]
    NoFileSelected,

    #[error("A sheet name is required for spreadsheet files.")]
    MissingSheetName,

    #[error("{0}")]
    FileError(String),

    #[error("Sheet '{sheet}' not found (available: {})", .available.join(", "))]
    SheetNotFound { sheet: String, available: Vec<String> },

    #[error("Required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("{location}: \"{value}\" does not match the date format {expected}")]
    InvalidDateFormat {
        location: String,
        value: String,
        expected: &'static str,
    },

    #[error("{location}: \"{value}\" is not a valid {expected}")]
    InvalidCellValue {
        location: String,
        value: String,
        expected: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

impl CheckerError {
    /// Short label shown in the category column when an error is rendered
    /// as a report entry.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidNumericInput { .. } => "Invalid Input",
            Self::IncompleteDatePair => "Incomplete Date Range",
            Self::IncompleteCostPair => "Incomplete Cost Range",
            Self::InvertedRange(_) => "Inverted Range",
            Self::NoFileSelected => "No File Selected",
            Self::MissingSheetName => "Missing Sheet Name",
            Self::FileError(_) | Self::Io(_) | Self::Csv(_) => "File Error",
            Self::SheetNotFound { .. } => "Sheet Not Found",
            Self::MissingColumns(_) => "Missing Columns",
            Self::InvalidDateFormat { .. } => "Invalid Date Format",
            Self::InvalidCellValue { .. } => "Invalid Cell Value",
            Self::Json(_) => "Output Error",
            Self::Settings(_) => "Settings",
            Self::Other(_) => "Exception",
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckerError>;
