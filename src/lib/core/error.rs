//! Error types for the cellio library

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CellioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "hdf5")]
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("Invalid input type at index {index}: expected a string or null, got {found}")]
    InvalidInputType { index: usize, found: String },

    #[error("No merge strategy for key {key}, value of type {value_type}, from {value} into {prior}")]
    MergeConflict {
        key: String,
        value: String,
        value_type: String,
        prior: String,
    },

    #[error("{command} returned error code {}: {stderr}", display_code(.code))]
    ExternalProcess {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Process did not finish: {command} .")]
    ProcessNotFinished { command: String },

    #[error("Failed to {op} {}: {source}", .path.display())]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Please provide a file, not a directory: {}", .0.display())]
    ExpectedFile(PathBuf),

    #[error("Please provide a directory, not a file: {}", .0.display())]
    ExpectedDirectory(PathBuf),

    #[error("Output directory does not exist: {}", .0.display())]
    OutputDirMissing(PathBuf),

    #[error("Please provide a directory, not a file: {}", .0.display())]
    OutputParentNotDirectory(PathBuf),

    #[error("Header mismatch in {}: expected {expected:?}, got {found:?}", .path.display())]
    HeaderMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CellioError>;

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "<none>".to_string(), |c| c.to_string())
}

impl CellioError {
    /// Wrap an OS error with the operation and path that produced it.
    pub fn filesystem<P: Into<PathBuf>>(op: &'static str, path: P, source: std::io::Error) -> Self {
        CellioError::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }

    /// The underlying OS error kind, when there is one.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            CellioError::Io(err) => Some(err.kind()),
            CellioError::Filesystem { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}
