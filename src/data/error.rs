use std::path::PathBuf;

use thiserror::Error;

/// Why a transaction export could not be loaded. A load either yields the
/// whole table or one of these; there is no partial result.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read from disk.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file name has no extension at all.
    #[error("File has no extension (expected .csv)")]
    MissingExtension,

    /// Only `.csv` exports are accepted.
    #[error("Unsupported file extension: .{0} (expected .csv)")]
    UnsupportedExtension(String),

    /// Uploaded bytes are not valid UTF-8.
    #[error("File is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The CSV reader rejected a row (bad quoting, invalid UTF-8 in a field).
    #[error("CSV row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// Every row must carry Description, Day, Type, Amount, ID.
    #[error("CSV row {row}: expected 5 columns, found {found}")]
    ColumnCount { row: usize, found: usize },

    /// `Day` or `Amount` is not a usable number.
    #[error("CSV row {row}: {column} '{value}' is not a valid number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// The export contains no transactions.
    #[error("No transactions found")]
    Empty,
}
