use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Path error: {0}")]
    PathError(String),
}
