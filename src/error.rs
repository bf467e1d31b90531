use crate::domain::validation::FieldErrors;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error("Cannot calculate with these values: {0}")]
    Domain(String),
    #[error("Calculation not found: {0}")]
    NotFound(Uuid),
    #[error("{0}")]
    InvalidData(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    StorageError(Box<dyn std::error::Error + Send + Sync>),
}

impl LoanError {
    /// Stable machine-readable code for the failure category.
    pub fn code(&self) -> &'static str {
        match self {
            LoanError::Validation(_) => "VALIDATION_ERROR",
            LoanError::Domain(_) => "DOMAIN_ERROR",
            LoanError::NotFound(_) => "NOT_FOUND",
            LoanError::InvalidData(_) => "INVALID_DATA",
            LoanError::CsvError(_)
            | LoanError::IoError(_)
            | LoanError::JsonError(_)
            | LoanError::StorageError(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for LoanError {
    fn from(err: rocksdb::Error) -> Self {
        LoanError::StorageError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
