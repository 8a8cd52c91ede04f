use std::path::PathBuf;
use thiserror::Error;

/// Custom error type shared by the oodeval crates.
#[derive(Error, Debug)]
pub enum OodError {
    #[error("Shape mismatch: expected {expected}, got {actual} during operation {operation}")]
    ShapeMismatch {
        expected: String,
        actual: String,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Cannot stack an empty list of tensors")]
    EmptyTensorList,

    /// Raised before any file is touched when a loader is asked for a family it does not serve.
    #[error("Dataset '{name}' is not supported by {loader}: expected one of {allowed:?}")]
    UnsupportedDataset {
        name: String,
        loader: &'static str,
        allowed: Vec<&'static str>,
    },

    #[error("Subset [{start}, {end}) does not fit in a dataset of {total} items")]
    SubsetOutOfRange {
        start: usize,
        end: usize,
        total: usize,
    },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid score {value} at index {index}")]
    InvalidScore { index: usize, value: f64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No class folders with images found under {path:?}")]
    EmptyImageFolder { path: PathBuf },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path:?}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl OodError {
    /// Wraps an `std::io::Error` with the path it was raised on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OodError::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds a `Decode` error from anything displayable.
    pub fn decode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        OodError::Decode {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
