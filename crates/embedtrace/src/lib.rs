//! Trajectory-recording embedding optimization.
//!
//! `embedtrace` runs a momentum + adaptive-gain gradient descent over a
//! black-box objective to embed high-dimensional points into two
//! dimensions, recording parameter snapshots at a fixed cadence so the
//! optimization path can be replayed or animated afterwards.
//!
//! The workspace splits into:
//! - [`embedtrace_core`]: objective/trajectory contracts, errors, result
//!   types
//! - [`embedtrace_optim`]: the gradient-descent loop itself
//! - this crate: the public facade plus the [`export`] module that
//!   reshapes recorded trajectories into an indexable table
//!
//! # Example
//!
//! ```rust
//! use embedtrace::prelude::*;
//!
//! // Two points embedded in 2-D, flattened [x0, y0, x1, y1].
//! let initial = DVector::from_vec(vec![1.0_f64, -1.0, 0.5, 0.25]);
//!
//! let mut optimizer = GradientDescent::new(
//!     GradientDescentConfig::new()
//!         .with_learning_rate(0.1)
//!         .with_momentum(0.5)
//!         .with_sample_every(25),
//! );
//!
//! let mut recorder = TrajectoryRecorder::new();
//! let result = optimizer
//!     .run(&QuadraticObjective::new(), &initial, 0, 500, &mut recorder)
//!     .unwrap();
//!
//! let points = vec![
//!     PointMeta::new("a", "left"),
//!     PointMeta::new("b", "right"),
//! ];
//! let table = TrajectoryTable::from_snapshots(recorder.snapshots(), &points).unwrap();
//! assert_eq!(table.rows().len(), recorder.len() * points.len());
//! assert_eq!(result.parameters.len(), initial.len());
//! ```

pub mod export;

// Re-export the underlying linear-algebra crate for downstream callers
pub use nalgebra;

// Re-export the full public API at the facade root
pub use embedtrace_core::{
    error::{OptimizerError, Result},
    objective::{CountingObjective, ObjectiveFunction, QuadraticObjective},
    optimizer::{ConvergenceTracker, OptimizationResult, TerminationReason},
    trajectory::{NoOpSink, SampleSink, TrajectoryRecorder},
    types::{DVector, Scalar},
};
pub use embedtrace_optim::{GradientDescent, GradientDescentConfig};
pub use export::{ExportError, PointMeta, TrajectoryRow, TrajectoryTable};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use embedtrace::prelude::*;
/// ```
pub mod prelude {
    pub use crate::export::{ExportError, PointMeta, TrajectoryRow, TrajectoryTable};
    pub use embedtrace_core::prelude::*;
    pub use embedtrace_optim::{GradientDescent, GradientDescentConfig};
}
