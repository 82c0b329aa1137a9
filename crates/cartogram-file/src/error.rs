//! 文件操作错误定义

use cartogram_core::error::GeoError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("DXF error: {0}")]
    Dxf(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Handle '{0}' cannot be written to a data file")]
    InvalidHandle(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] GeoError),
}

impl FileError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        FileError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
