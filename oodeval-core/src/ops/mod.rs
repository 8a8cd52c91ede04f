//! # Tensor Operations Module (`ops`)
//!
//! Copying operations that assemble batches out of individual tensors.
//!
//! - [`stack`]: insert a new dimension and lay the inputs along it.
//! - [`cat`]: concatenate along the first dimension.

pub mod stack;

pub use stack::{cat_op, stack_op};
