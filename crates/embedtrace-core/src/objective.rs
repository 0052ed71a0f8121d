//! Objective evaluator interface for the embedding optimizer.
//!
//! The optimizer treats the objective as a black box: given the current
//! flattened parameter vector it returns a scalar error and a gradient of
//! the same length. The mathematical derivation of the objective (e.g. the
//! t-SNE Kullback-Leibler divergence) is outside the scope of this crate.

use crate::{
    error::Result,
    types::{DVector, Scalar},
};
use num_traits::Float;
use std::fmt::Debug;

/// Trait for objective functions evaluated by the embedding optimizer.
///
/// Implementations compute the error value and its gradient at the given
/// parameters. When `compute_error` is false the error value is not used
/// by the caller that iteration, so implementations may skip the error
/// computation and return any placeholder value alongside the gradient.
pub trait ObjectiveFunction<T>: Debug
where
    T: Scalar,
{
    /// Evaluates the objective at the given parameters.
    ///
    /// # Arguments
    ///
    /// * `parameters` - Flattened embedding coordinates
    /// * `compute_error` - Whether the returned error value will be read
    ///
    /// # Returns
    ///
    /// A tuple of (error, gradient). The gradient length must equal the
    /// parameter length; the optimizer verifies this on every call.
    fn evaluate(&self, parameters: &DVector<T>, compute_error: bool) -> Result<(T, DVector<T>)>;
}

/// Simple quadratic objective: `f(p) = ||p||^2 / 2` with gradient `p`.
///
/// The minimum is at the origin. Used by tests and benchmarks as a
/// well-understood stand-in for a real embedding objective.
#[derive(Debug, Clone, Default)]
pub struct QuadraticObjective;

impl QuadraticObjective {
    /// Creates a new quadratic objective.
    pub fn new() -> Self {
        Self
    }
}

impl<T> ObjectiveFunction<T> for QuadraticObjective
where
    T: Scalar,
{
    fn evaluate(&self, parameters: &DVector<T>, compute_error: bool) -> Result<(T, DVector<T>)> {
        let error = if compute_error {
            parameters.norm_squared() / <T as Scalar>::from_f64(2.0)
        } else {
            // Placeholder; the caller ignores the error this iteration.
            <T as Float>::max_value()
        };
        Ok((error, parameters.clone()))
    }
}

/// Wrapper that counts evaluations of an inner objective.
///
/// Useful in tests for asserting how often the optimizer requests the
/// error value versus gradient-only evaluations.
#[derive(Debug)]
pub struct CountingObjective<F> {
    /// The underlying objective
    pub inner: F,
    /// Total number of evaluations
    pub evaluation_count: std::cell::RefCell<usize>,
    /// Number of evaluations with `compute_error == true`
    pub error_count: std::cell::RefCell<usize>,
}

impl<F> CountingObjective<F> {
    /// Creates a new counting wrapper around an objective.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            evaluation_count: std::cell::RefCell::new(0),
            error_count: std::cell::RefCell::new(0),
        }
    }

    /// Resets all counters to zero.
    pub fn reset_counts(&self) {
        *self.evaluation_count.borrow_mut() = 0;
        *self.error_count.borrow_mut() = 0;
    }

    /// Returns (total evaluations, error-computing evaluations).
    pub fn counts(&self) -> (usize, usize) {
        (
            *self.evaluation_count.borrow(),
            *self.error_count.borrow(),
        )
    }
}

impl<T, F> ObjectiveFunction<T> for CountingObjective<F>
where
    T: Scalar,
    F: ObjectiveFunction<T>,
{
    fn evaluate(&self, parameters: &DVector<T>, compute_error: bool) -> Result<(T, DVector<T>)> {
        *self.evaluation_count.borrow_mut() += 1;
        if compute_error {
            *self.error_count.borrow_mut() += 1;
        }
        self.inner.evaluate(parameters, compute_error)
    }
}
