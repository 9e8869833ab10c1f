use thiserror::Error;

/// Everything that can go wrong while reading a launch table.
///
/// All variants are fatal: the dashboard does not start without a table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Row {row}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType {
        column: &'static str,
        data_type: String,
    },

    #[error("Launch table contains no rows")]
    Empty,
}
