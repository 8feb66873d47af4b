use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input (bad quoting, ragged rows, ...).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the CSV header.
    #[error("Missing column in CSV header: {0}")]
    MissingColumn(String),

    /// An order date did not match any recognised format.
    #[error("Invalid date on line {line}: {value}")]
    DateParse { line: u64, value: String },

    /// A sales or profit cell could not be read as a decimal amount.
    #[error("Invalid amount on line {line}: {value}")]
    AmountParse { line: u64, value: String },

    /// A category name is not one of the known product categories.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Profit margin requested over a record set with zero total sales.
    #[error("Division by zero: total sales is zero")]
    DivisionByZero,

    /// The expected data file does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// A JSON document could not be produced.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Sales or profit totals exceed what a decimal amount can hold.
    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),

    /// The terminal could not be set up, drawn to or restored.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
