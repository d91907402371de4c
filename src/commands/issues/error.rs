use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Invalid date format: '{0}'. Use MM/DD/YYYY.")]
    InvalidDate(String),

    /// The search itself failed; carries the user-facing warning.
    #[error("{0}")]
    FetchFailed(String),
}

pub type Result<T> = std::result::Result<T, ViewError>;
