//! Common error types for the payroll report engine

use thiserror::Error;

/// Common result type for payrep operations
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP-equivalent class of an error, for the (out-of-scope) transport layer.
///
/// The core never speaks HTTP itself; collaborators map errors to responses
/// through this classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Malformed or invalid request (4xx)
    BadRequest,
    /// Requested resource does not exist (404)
    NotFound,
    /// Unexpected internal failure (500)
    Internal,
}

/// Error taxonomy across ingestion and report generation
#[derive(Error, Debug)]
pub enum Error {
    /// Upload request carried no file content
    #[error("File is required")]
    MissingFile,

    /// Upload request carried no reporting period
    #[error("Period is required")]
    MissingPeriod,

    /// A data row's field count does not match the header
    #[error("Row {row}: expected {expected} fields, got {actual} ({})",
        if .actual > .expected { "too many fields" } else { "too few fields" })]
    Parse {
        /// 1-based data row index
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// File parsed but contained no data rows
    #[error("File is empty")]
    EmptyFile,

    /// Required columns absent from the header
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The same employee number appeared more than once within one file
    #[error("Duplicate employee numbers in file ({total} total): {}", .sample.join(", "))]
    DuplicateInFile {
        /// Capped sample of offending employee numbers
        sample: Vec<String>,
        /// Distinct employee numbers that appeared more than once
        total: usize,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Map an error to the response class the transport layer should use.
    pub fn status_class(&self) -> StatusClass {
        match self {
            Error::MissingFile
            | Error::MissingPeriod
            | Error::Parse { .. }
            | Error::EmptyFile
            | Error::MissingColumns(_)
            | Error::DuplicateInFile { .. }
            | Error::Config(_) => StatusClass::BadRequest,
            Error::NotFound(_) => StatusClass::NotFound,
            Error::Internal(_) | Error::Io(_) | Error::Csv(_) => StatusClass::Internal,
        }
    }
}
