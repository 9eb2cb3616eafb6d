use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no valid data after {stage}")]
    NoValidData { stage: &'static str },

    #[error("insufficient data points: {actual} (need at least {required})")]
    InsufficientData { required: usize, actual: usize },

    #[error("too many missing values: {missing} of {total}")]
    TooManyMissing { missing: usize, total: usize },

    #[error("category '{0}' not found in data")]
    CategoryNotFound(String),

    #[error("regression failed: {0}")]
    Regression(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
