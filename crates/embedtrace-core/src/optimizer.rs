//! Result, termination, and convergence-tracking types for optimizers.
//!
//! These types are shared by every optimizer built on this crate: the
//! outcome of a run, why it stopped, and the best-error bookkeeping that
//! drives stagnation detection.

use crate::types::{DVector, Scalar};
use num_traits::Float;
use std::time::Duration;

/// Reasons for optimization termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Gradient norm dropped to or below the configured threshold.
    Converged,
    /// Best error made no progress for the configured number of
    /// iterations since it was last improved.
    Stagnated,
    /// Iteration budget exhausted without an early stop.
    MaxIterations,
}

/// Result of an embedding optimization run.
///
/// Carries the final embedding alongside the diagnostics a caller needs
/// to interpret it: the last computed error, the iteration index at loop
/// exit, the gradient norm at the last evaluation, and timing.
#[derive(Debug, Clone)]
pub struct OptimizationResult<T>
where
    T: Scalar,
{
    /// The final parameter vector (same length as the initial one)
    pub parameters: DVector<T>,

    /// The last computed error value.
    ///
    /// Only convergence-check iterations compute the error; if the run
    /// aborted before any check this holds the max-value sentinel.
    pub error: T,

    /// Iteration index at loop exit — either `max_iterations - 1` or the
    /// index at which an early termination condition fired
    pub last_iteration: usize,

    /// Gradient norm at the last evaluation (if any iteration ran)
    pub gradient_norm: Option<T>,

    /// Wall-clock time elapsed during the run
    pub duration: Duration,

    /// Why the run stopped
    pub termination_reason: TerminationReason,

    /// True if the gradient-norm convergence criterion was satisfied
    pub converged: bool,
}

impl<T> OptimizationResult<T>
where
    T: Scalar,
{
    /// Creates a new optimization result.
    pub fn new(
        parameters: DVector<T>,
        error: T,
        last_iteration: usize,
        duration: Duration,
        termination_reason: TerminationReason,
    ) -> Self {
        let converged = matches!(termination_reason, TerminationReason::Converged);

        Self {
            parameters,
            error,
            last_iteration,
            gradient_norm: None,
            duration,
            termination_reason,
            converged,
        }
    }

    /// Sets the gradient norm observed at the last evaluation.
    pub fn with_gradient_norm(mut self, norm: T) -> Self {
        self.gradient_norm = Some(norm);
        self
    }
}

/// Tracks the best error seen during a run and when it occurred.
///
/// Stagnation is declared when the current iteration has moved more than
/// a configured limit past the iteration at which the best error was
/// last improved.
#[derive(Debug, Clone)]
pub struct ConvergenceTracker<T>
where
    T: Scalar,
{
    /// Best (lowest) error observed so far
    pub best_error: T,
    /// Iteration index at which the best error was observed
    pub best_iteration: usize,
}

impl<T> ConvergenceTracker<T>
where
    T: Scalar,
{
    /// Creates a tracker with no observations, anchored at the starting
    /// iteration index.
    pub fn new(start_iteration: usize) -> Self {
        Self {
            best_error: <T as Float>::max_value(),
            best_iteration: start_iteration,
        }
    }

    /// Records an error observation at iteration `i`.
    ///
    /// Returns true if the observation improved on the best error.
    pub fn observe(&mut self, error: T, i: usize) -> bool {
        if error < self.best_error {
            self.best_error = error;
            self.best_iteration = i;
            true
        } else {
            false
        }
    }

    /// Returns true if iteration `i` is more than `limit` iterations past
    /// the last improvement.
    pub fn stagnated(&self, i: usize, limit: usize) -> bool {
        i - self.best_iteration > limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converged_flag() {
        let p = DVector::from_vec(vec![0.0_f64]);
        let result = OptimizationResult::new(
            p.clone(),
            0.5,
            10,
            Duration::from_millis(1),
            TerminationReason::Converged,
        );
        assert!(result.converged);

        let result = OptimizationResult::new(
            p,
            0.5,
            10,
            Duration::from_millis(1),
            TerminationReason::Stagnated,
        )
        .with_gradient_norm(1e-3);
        assert!(!result.converged);
        assert_eq!(result.gradient_norm, Some(1e-3));
    }

    #[test]
    fn test_tracker_improvement() {
        let mut tracker = ConvergenceTracker::<f64>::new(0);
        assert!(tracker.observe(10.0, 0));
        assert!(tracker.observe(5.0, 7));
        assert!(!tracker.observe(6.0, 8));

        assert_eq!(tracker.best_error, 5.0);
        assert_eq!(tracker.best_iteration, 7);
    }

    #[test]
    fn test_tracker_stagnation() {
        let mut tracker = ConvergenceTracker::<f64>::new(0);
        tracker.observe(1.0, 10);

        assert!(!tracker.stagnated(310, 300));
        assert!(tracker.stagnated(311, 300));
    }

    #[test]
    fn test_tracker_anchor() {
        // A resumed run anchors stagnation at its starting iteration.
        let tracker = ConvergenceTracker::<f64>::new(500);
        assert_eq!(tracker.best_iteration, 500);
        assert!(!tracker.stagnated(700, 300));
    }
}
