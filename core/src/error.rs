use thiserror::Error;

/// Result type for truthmap operations
pub type Result<T> = std::result::Result<T, TruthError>;

/// Error types for truthmap operations
#[derive(Error, Debug)]
pub enum TruthError {
    /// A required column is absent from a clinical table header
    #[error("Schema error: table '{table}' has no column '{column}'")]
    Schema { table: String, column: String },

    /// Subject not present in the global radiology-score table
    #[error("Subject not found in clinical tables: {0}")]
    MissingSubject(String),

    /// Unrecognized ground-truth policy
    #[error("Unsupported ground-truth type: {0}")]
    UnsupportedPolicy(String),

    /// Unrecognized aggregation scope
    #[error("Unsupported scope: {0}")]
    UnsupportedScope(String),

    /// Malformed delimited table
    #[error("CSV error: {0}")]
    Csv(String),

    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Invalid tag or field value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TruthError {
    /// Whether the error only concerns a single imaging record.
    ///
    /// Recoverable errors exclude that record from the output; every other
    /// variant aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TruthError::MissingSubject(_))
    }
}

impl From<csv::Error> for TruthError {
    fn from(e: csv::Error) -> Self {
        TruthError::Csv(format!("{}", e))
    }
}

impl From<serde_json::Error> for TruthError {
    fn from(e: serde_json::Error) -> Self {
        TruthError::Json(format!("{}", e))
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for TruthError {
    fn from(e: dicom_object::ReadError) -> Self {
        TruthError::DicomError(format!("{}", e))
    }
}
