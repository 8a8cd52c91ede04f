//! Out-of-distribution scoring metrics.
//!
//! - [`scores`]: converting caller-side score containers into plain `f64` sequences.
//! - [`roc`]: ROC curve and trapezoidal AUC for ID versus OOD scores.
//! - [`entropy`]: per-item predictive entropy of class-probability rows.

pub mod entropy;
pub mod roc;
pub mod scores;

pub use entropy::{predictive_entropy, DEFAULT_ENTROPY_EPS};
pub use roc::{compute_roc, roc_curve, trapezoid_auc, RocCurve};
pub use scores::ScoreSource;
