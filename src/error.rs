use std::path::PathBuf;

use thiserror::Error;

pub type UpsetResult<T> = Result<T, UpsetError>;

#[derive(Debug, Error)]
pub enum UpsetError {
    /// Input is not an ordered boolean-membership table with one index level
    /// per category.
    #[error("data is incorrectly formatted, must be a boolean membership table: {0}")]
    Format(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("failed to write `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
