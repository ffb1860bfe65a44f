use thiserror::Error;

/// Main error type for the ClassSplit system
#[derive(Error, Debug)]
pub enum CsError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Partition error: {0}")]
    Partition(#[from] PartitionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Input-related errors
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Missing input '{name}': {path}")]
    MissingInput { name: String, path: String },

    #[error("Data loading failed: {message}")]
    LoadingFailed { message: String },

    #[error("Data parsing error: {message}")]
    ParseError { message: String },
}

/// Errors describing a broken group pair or an unusable run configuration
#[derive(Error, Debug)]
pub enum PartitionError {
    #[error("Invalid partition configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Unbalanced groups: {size1} vs {size2}")]
    Unbalanced { size1: usize, size2: usize },

    #[error("Groups do not partition the person set: {message}")]
    NotAPartition { message: String },
}

/// Result type alias for ClassSplit operations
pub type CsResult<T> = Result<T, CsError>;

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::CsError::Config(format!($($arg)*))
    };
}
