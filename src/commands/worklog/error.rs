use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorklogError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: csv::Error },

    #[error("Invalid row in {path}: {source}")]
    InvalidRow { path: PathBuf, source: csv::Error },

    #[error("{failed} of {total} work-log update(s) failed")]
    IncompleteImport { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, WorklogError>;
