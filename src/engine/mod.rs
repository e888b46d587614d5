//! Transform-convergence engine
//! Applies the alpha-weighted mean blend repeatedly and records step distances

pub mod convergence;
pub mod transform;
pub mod types;

pub use convergence::{iterate, DEFAULT_ITERATIONS};
pub use transform::{apply_transform, l2_distance, mean, DEFAULT_ALPHA};
pub use types::{ConvergenceResult, IterationRecord};
