//! Core traits and types for trajectory-recording embedding optimization.
//!
//! This crate provides the foundational abstractions for running
//! gradient-descent embedding optimizers while capturing the path the
//! embedding takes across iterations. The optimizer itself lives in
//! `embedtrace-optim`; this crate defines the contracts it is built on.
//!
//! # Key Concepts
//!
//! - **Parameter vector**: the flattened low-dimensional coordinates of all
//!   embedded points (`n_points * n_dims` scalars)
//! - **Objective function**: black-box evaluator returning an error value
//!   and a gradient for the current parameters
//! - **Trajectory**: the ordered history of parameter snapshots captured
//!   during one optimization run
//! - **Sample sink**: injectable instrumentation point that receives
//!   snapshots at the configured cadence
//!
//! # Modules
//!
//! - [`error`]: Error types for optimization runs
//! - [`objective`]: Objective evaluator interface
//! - [`optimizer`]: Result, termination, and convergence-tracking types
//! - [`trajectory`]: Snapshot recording and the sample-sink trait
//! - [`types`]: Scalar abstraction and vector aliases

pub mod error;
pub mod objective;
pub mod optimizer;
pub mod trajectory;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{OptimizerError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use embedtrace_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{OptimizerError, Result};
    pub use crate::objective::{CountingObjective, ObjectiveFunction, QuadraticObjective};
    pub use crate::optimizer::{ConvergenceTracker, OptimizationResult, TerminationReason};
    pub use crate::trajectory::{NoOpSink, SampleSink, TrajectoryRecorder};
    pub use crate::types::{DVector, Scalar};
}
