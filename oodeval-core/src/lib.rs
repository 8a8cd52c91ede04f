//! Core building blocks for out-of-distribution evaluation: a host-side
//! [`Tensor`], batch assembly ops, the shared [`OodError`], and the
//! [`metrics`] used to score ID against OOD data.

pub mod error;
pub mod metrics;
pub mod ops;
pub mod tensor;

pub use error::OodError;
pub use metrics::{compute_roc, RocCurve};
pub use tensor::Tensor;

// Re-export traits required by public functions
pub use num_traits;
