//! Error types for the payment optimizer.

use thiserror::Error;

/// Result type alias for optimizer operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while loading inputs or writing the report.
///
/// An order that cannot be paid is not an error; it is reported through
/// [`BatchReport::unpayable`](crate::engine::BatchReport::unpayable).
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report writing error
    #[error("Report writing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid order or payment method record
    #[error("Invalid record at index {index}: {message}")]
    InvalidRecord { index: usize, message: String },

    /// Two payment methods share the same ID
    #[error("Duplicate payment method ID {id}")]
    DuplicateMethodId { id: String },

    /// Missing input file arguments
    #[error(
        "Missing input file arguments. Usage: payment-optimizer <orders.json> <paymentmethods.json>"
    )]
    MissingArgument,

    /// Input file without a `.json` extension
    #[error("Input file {path} must have the .json extension")]
    InvalidExtension { path: String },
}
