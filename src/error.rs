use thiserror::Error;

/// Everything that can go wrong between fetching the sheet and producing a
/// report. `MissingColumn` and `NotFound` are data problems; the rest are
/// unexpected failures of the fetch or the CSV itself.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Google Sheet missing required column: {0}")]
    MissingColumn(String),
    #[error("No data found for {0}")]
    NotFound(String),
    #[error("{0}")]
    Fetch(#[from] reqwest::Error),
    #[error("sheet service responded with {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("No columns to parse from file")]
    NoColumns,
}

pub type ReportResult<T> = Result<T, ReportError>;
