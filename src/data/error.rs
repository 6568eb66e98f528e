use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while reading an input table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("{} is not a readable metadata table: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },
}

impl LoadError {
    pub(crate) fn malformed(path: &std::path::Path, reason: impl Into<String>) -> Self {
        LoadError::MalformedInput {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
