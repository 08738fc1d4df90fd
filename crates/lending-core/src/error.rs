use thiserror::Error;

/// Top-level error type for the lending graph.
#[derive(Error, Debug)]
pub enum LendingError {
    #[error("{label} '{name}' not found")]
    NotFound { label: String, name: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Graph database error: {0}")]
    Upstream(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LendingError {
    pub fn not_found(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            label: label.into(),
            name: name.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LendingError>;
