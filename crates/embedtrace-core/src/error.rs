//! Error types for embedding optimization runs.
//!
//! This module defines the error taxonomy shared by the objective
//! evaluator contract and the gradient-descent optimizer. All variants
//! abort the current run; retrying a diverging optimization does not
//! self-correct, so any retry policy belongs to the caller.

use thiserror::Error;

/// Errors that can occur during an optimization run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OptimizerError {
    /// Gradient length does not match parameter length.
    ///
    /// This is checked on every evaluation so that a misbehaving
    /// objective fails fast instead of silently corrupting the
    /// momentum and gain state.
    #[error("Gradient shape mismatch: expected length {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected length (the parameter vector length)
        expected: usize,
        /// Actual gradient length returned by the objective
        actual: usize,
    },

    /// The objective produced a NaN or infinite value.
    ///
    /// The run is aborted; any snapshots already recorded remain in the
    /// caller-owned recorder so partial results can still be rendered.
    #[error("Non-finite {what} at iteration {iteration}")]
    NonFiniteValue {
        /// Which value was non-finite ("error" or "gradient")
        what: String,
        /// Iteration index at which the value was observed
        iteration: usize,
    },

    /// The initial parameter vector is empty.
    #[error("Initial parameter vector is empty")]
    EmptyInput,

    /// The iteration range is inverted or empty.
    #[error("Invalid iteration range: start {start} must be below max {max}")]
    InvalidIterationRange {
        /// Requested starting iteration index
        start: usize,
        /// Requested iteration bound
        max: usize,
    },

    /// A configuration value is out of its valid domain.
    #[error("Invalid optimizer configuration: {parameter} = {value} ({reason})")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },
}

impl OptimizerError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }

    /// Create a NonFiniteValue error for a named quantity.
    pub fn non_finite<S: Into<String>>(what: S, iteration: usize) -> Self {
        Self::NonFiniteValue {
            what: what.into(),
            iteration,
        }
    }

    /// Create an InvalidIterationRange error.
    pub fn invalid_iteration_range(start: usize, max: usize) -> Self {
        Self::InvalidIterationRange { start, max }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = OptimizerError::shape_mismatch(100, 98);
        assert!(matches!(err, OptimizerError::ShapeMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "Gradient shape mismatch: expected length 100, got 98"
        );

        let err = OptimizerError::non_finite("gradient", 17);
        assert!(matches!(err, OptimizerError::NonFiniteValue { .. }));
        assert_eq!(err.to_string(), "Non-finite gradient at iteration 17");
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            OptimizerError::shape_mismatch(4, 2),
            OptimizerError::non_finite("error", 0),
            OptimizerError::EmptyInput,
            OptimizerError::invalid_iteration_range(500, 500),
            OptimizerError::invalid_configuration("must be at least 1", "sample_every", "0"),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_invalid_range_context() {
        let err = OptimizerError::invalid_iteration_range(250, 100);
        if let OptimizerError::InvalidIterationRange { start, max } = err {
            assert_eq!(start, 250);
            assert_eq!(max, 100);
        } else {
            panic!("Expected InvalidIterationRange variant");
        }
    }
}
