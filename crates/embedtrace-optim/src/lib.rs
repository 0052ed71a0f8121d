//! Embedtrace Optimization - the gradient-descent embedding optimizer.
//!
//! This crate provides the momentum + adaptive-gain gradient descent loop
//! used to embed high-dimensional points into a low-dimensional space,
//! instrumented to feed parameter snapshots to an injected sample sink at
//! a fixed cadence for later animation.
//!
//! # Examples
//!
//! ```rust
//! use embedtrace_core::prelude::*;
//! use embedtrace_optim::{GradientDescent, GradientDescentConfig};
//!
//! let mut optimizer = GradientDescent::new(
//!     GradientDescentConfig::new()
//!         .with_learning_rate(0.1)
//!         .with_momentum(0.5),
//! );
//!
//! let initial = DVector::from_vec(vec![1.0_f64, -1.0]);
//! let mut recorder = TrajectoryRecorder::new();
//! let result = optimizer
//!     .run(&QuadraticObjective::new(), &initial, 0, 500, &mut recorder)
//!     .unwrap();
//! assert_eq!(result.parameters.len(), initial.len());
//! ```

pub mod gradient_descent;

// Re-export the optimizer for convenience
pub use gradient_descent::{GradientDescent, GradientDescentConfig};

// Re-export commonly used items from core
pub use embedtrace_core::{
    error::{OptimizerError, Result},
    objective::ObjectiveFunction,
    optimizer::{OptimizationResult, TerminationReason},
    trajectory::{NoOpSink, SampleSink, TrajectoryRecorder},
};
