//! Momentum gradient descent with per-coordinate adaptive gains.
//!
//! This module implements the batch gradient-descent loop used to embed
//! high-dimensional points into a low-dimensional space, in the style of
//! the classic stochastic-neighbor-embedding optimizers.
//!
//! # Algorithm Overview
//!
//! Each iteration performs the following steps:
//! 1. Sample the current parameter vector into the injected sink at the
//!    configured cadence
//! 2. Evaluate the objective, computing the error only on
//!    convergence-check iterations
//! 3. Grow each coordinate's gain when the update direction disagrees
//!    with the gradient, shrink it when they agree, floor-clamped at the
//!    minimum gain
//! 4. Fold the gain-scaled gradient into the momentum update and apply it
//!    to the parameters in place
//! 5. On check iterations, test for vanishing gradient and for stagnation
//!    of the best error
//!
//! The iteration order is a genuine sequential dependency: each step's
//! gain and momentum update depends on the previous step's state.

use embedtrace_core::{
    error::{OptimizerError, Result},
    objective::ObjectiveFunction,
    optimizer::{ConvergenceTracker, OptimizationResult, TerminationReason},
    trajectory::SampleSink,
    types::{DVector, Scalar},
};
use num_traits::Float;
use std::time::Instant;

/// Configuration for the gradient-descent embedding optimizer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientDescentConfig<T>
where
    T: Scalar,
{
    /// Evaluate convergence criteria every N iterations
    pub check_convergence_every: usize,

    /// Stop if the best error has not improved for this many iterations
    /// since it was last improved
    pub iterations_without_progress_limit: usize,

    /// Exponential weighting of the prior update retained each step
    pub momentum: T,

    /// Base step scale
    pub learning_rate: T,

    /// Floor for the per-coordinate adaptive gain
    pub min_gain: T,

    /// Stop if the gradient's Euclidean norm drops at or below this
    pub min_gradient_norm: T,

    /// Record a trajectory snapshot every Nth completed iteration,
    /// counted from the start of the run (not from `start_iteration`;
    /// a resumed run restarts its sampling counter)
    pub sample_every: usize,

    /// Diagnostic output level; at 2 and above a progress line is
    /// printed on every convergence check
    pub verbosity: u8,
}

impl<T> Default for GradientDescentConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            check_convergence_every: 1,
            iterations_without_progress_limit: 300,
            momentum: <T as Scalar>::from_f64(0.8),
            learning_rate: <T as Scalar>::from_f64(200.0),
            min_gain: <T as Scalar>::from_f64(0.01),
            min_gradient_norm: <T as Scalar>::from_f64(1e-7),
            sample_every: 10,
            verbosity: 0,
        }
    }
}

impl<T> GradientDescentConfig<T>
where
    T: Scalar,
{
    /// Creates a new configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the convergence-check cadence.
    pub fn with_check_convergence_every(mut self, every: usize) -> Self {
        self.check_convergence_every = every;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_iterations_without_progress_limit(mut self, limit: usize) -> Self {
        self.iterations_without_progress_limit = limit;
        self
    }

    /// Sets the momentum coefficient.
    pub fn with_momentum(mut self, momentum: T) -> Self {
        self.momentum = momentum;
        self
    }

    /// Sets the base learning rate.
    pub fn with_learning_rate(mut self, learning_rate: T) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the adaptive-gain floor.
    pub fn with_min_gain(mut self, min_gain: T) -> Self {
        self.min_gain = min_gain;
        self
    }

    /// Sets the vanishing-gradient threshold.
    pub fn with_min_gradient_norm(mut self, norm: T) -> Self {
        self.min_gradient_norm = norm;
        self
    }

    /// Sets the trajectory sampling cadence.
    pub fn with_sample_every(mut self, every: usize) -> Self {
        self.sample_every = every;
        self
    }

    /// Sets the diagnostic output level.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.check_convergence_every == 0 {
            return Err(OptimizerError::invalid_configuration(
                "must be at least 1",
                "check_convergence_every",
                "0",
            ));
        }
        if self.sample_every == 0 {
            return Err(OptimizerError::invalid_configuration(
                "must be at least 1",
                "sample_every",
                "0",
            ));
        }
        Ok(())
    }
}

/// Per-run optimizer state.
///
/// The momentum and gain vectors live for the duration of one run and are
/// discarded on completion; they always have the parameter length.
#[derive(Debug)]
struct GradientDescentState<T>
where
    T: Scalar,
{
    /// Exponentially-weighted update direction
    update: DVector<T>,

    /// Per-coordinate adaptive step multipliers
    gains: DVector<T>,
}

impl<T> GradientDescentState<T>
where
    T: Scalar,
{
    fn new(n: usize) -> Self {
        Self {
            update: DVector::zeros(n),
            gains: DVector::from_element(n, T::one()),
        }
    }
}

/// Momentum gradient-descent embedding optimizer.
///
/// Runs bounded iterations over an [`ObjectiveFunction`], applying
/// momentum with per-coordinate adaptive gains, and drives the injected
/// [`SampleSink`] at the configured sampling cadence so a client can
/// later animate the optimization path.
///
/// # Examples
///
/// ```rust
/// use embedtrace_core::prelude::*;
/// use embedtrace_optim::{GradientDescent, GradientDescentConfig};
///
/// let mut optimizer = GradientDescent::new(
///     GradientDescentConfig::new()
///         .with_learning_rate(0.1)
///         .with_momentum(0.5)
///         .with_min_gradient_norm(1e-3),
/// );
///
/// let initial = DVector::from_vec(vec![1.0_f64, -1.0]);
/// let mut recorder = TrajectoryRecorder::new();
/// let result = optimizer
///     .run(&QuadraticObjective::new(), &initial, 0, 1000, &mut recorder)
///     .unwrap();
/// assert_eq!(result.parameters.len(), 2);
/// ```
#[derive(Debug)]
pub struct GradientDescent<T>
where
    T: Scalar,
{
    config: GradientDescentConfig<T>,
}

impl<T> GradientDescent<T>
where
    T: Scalar,
{
    /// Creates a new optimizer with the given configuration.
    pub fn new(config: GradientDescentConfig<T>) -> Self {
        Self { config }
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &GradientDescentConfig<T> {
        &self.config
    }

    /// Returns the optimizer name.
    pub fn name(&self) -> &str {
        "Gradient Descent"
    }

    /// Runs the optimization loop.
    ///
    /// Iterates from `start_iteration` to `max_iterations - 1`, mutating
    /// a private copy of the parameters and feeding snapshots to `sink`
    /// every `sample_every` completed iterations (counted from the start
    /// of this run).
    ///
    /// # Arguments
    ///
    /// * `objective` - Black-box error/gradient evaluator
    /// * `initial_parameters` - Flattened embedding, must be non-empty
    /// * `start_iteration` - First iteration index, below `max_iterations`
    /// * `max_iterations` - Iteration bound
    /// * `sink` - Receiver for sampled snapshots
    ///
    /// # Returns
    ///
    /// An [`OptimizationResult`] with the final parameters, the last
    /// computed error, and the iteration index at loop exit.
    ///
    /// # Errors
    ///
    /// [`OptimizerError::EmptyInput`] for an empty parameter vector,
    /// [`OptimizerError::InvalidIterationRange`] when
    /// `start_iteration >= max_iterations`,
    /// [`OptimizerError::ShapeMismatch`] when the objective returns a
    /// gradient of the wrong length, and
    /// [`OptimizerError::NonFiniteValue`] when it returns NaN or
    /// infinity. On error, snapshots already passed to `sink` are
    /// untouched, so partial trajectories remain usable.
    pub fn run<F, S>(
        &mut self,
        objective: &F,
        initial_parameters: &DVector<T>,
        start_iteration: usize,
        max_iterations: usize,
        sink: &mut S,
    ) -> Result<OptimizationResult<T>>
    where
        F: ObjectiveFunction<T>,
        S: SampleSink<T>,
    {
        let n = initial_parameters.len();
        if n == 0 {
            return Err(OptimizerError::EmptyInput);
        }
        if start_iteration >= max_iterations {
            return Err(OptimizerError::invalid_iteration_range(
                start_iteration,
                max_iterations,
            ));
        }
        self.config.validate()?;

        let mut parameters = initial_parameters.clone();
        let mut state = GradientDescentState::new(n);
        let mut tracker = ConvergenceTracker::new(start_iteration);

        let mut error = <T as Float>::max_value();
        let mut gradient_norm = None;
        let mut termination_reason = TerminationReason::MaxIterations;
        let mut last_iteration = start_iteration;

        // Sampling cadence counts completed loop bodies of this run,
        // independent of the global iteration index.
        let mut run_counter = 0_usize;

        let start_time = Instant::now();
        let mut tic = Instant::now();

        for i in start_iteration..max_iterations {
            last_iteration = i;
            run_counter += 1;
            if run_counter % self.config.sample_every == 0 {
                sink.on_sample(i, &parameters);
            }

            // Only compute the error when a convergence check needs it.
            let check_convergence = (i + 1) % self.config.check_convergence_every == 0
                || i == max_iterations - 1;

            let (iteration_error, mut gradient) =
                objective.evaluate(&parameters, check_convergence)?;
            if gradient.len() != n {
                return Err(OptimizerError::shape_mismatch(n, gradient.len()));
            }
            if gradient.iter().any(|g| !Float::is_finite(*g)) {
                return Err(OptimizerError::non_finite("gradient", i));
            }
            if check_convergence && !Float::is_finite(iteration_error) {
                return Err(OptimizerError::non_finite("error", i));
            }

            let grad_norm = gradient.norm();
            gradient_norm = Some(grad_norm);

            self.apply_update(&mut state, &mut parameters, &mut gradient);

            if check_convergence {
                error = iteration_error;
                let check_duration = tic.elapsed();
                tic = Instant::now();

                if self.config.verbosity >= 2 {
                    println!(
                        "[embedtrace] Iteration {}: error = {:.7}, gradient norm = {:.7} ({} iterations in {:.3}s)",
                        i + 1,
                        error.to_f64(),
                        grad_norm.to_f64(),
                        self.config.check_convergence_every,
                        check_duration.as_secs_f64()
                    );
                }

                if !tracker.observe(error, i)
                    && tracker.stagnated(i, self.config.iterations_without_progress_limit)
                {
                    if self.config.verbosity >= 2 {
                        println!(
                            "[embedtrace] Iteration {}: did not make any progress during the last {} episodes. Finished.",
                            i + 1,
                            self.config.iterations_without_progress_limit
                        );
                    }
                    termination_reason = TerminationReason::Stagnated;
                    break;
                }
                if grad_norm <= self.config.min_gradient_norm {
                    if self.config.verbosity >= 2 {
                        println!(
                            "[embedtrace] Iteration {}: gradient norm {}. Finished.",
                            i + 1,
                            grad_norm
                        );
                    }
                    termination_reason = TerminationReason::Converged;
                    break;
                }
            }
        }

        let result = OptimizationResult::new(
            parameters,
            error,
            last_iteration,
            start_time.elapsed(),
            termination_reason,
        );
        Ok(match gradient_norm {
            Some(norm) => result.with_gradient_norm(norm),
            None => result,
        })
    }

    /// Applies one gain/momentum update to the parameters in place.
    ///
    /// Gains grow by 0.2 where the update direction disagrees with the
    /// gradient and shrink by the factor 0.8 where they agree, never
    /// dropping below the configured floor.
    fn apply_update(
        &self,
        state: &mut GradientDescentState<T>,
        parameters: &mut DVector<T>,
        gradient: &mut DVector<T>,
    ) {
        let gain_increment = <T as Scalar>::from_f64(0.2);
        let gain_decay = <T as Scalar>::from_f64(0.8);

        for j in 0..parameters.len() {
            if state.update[j] * gradient[j] < T::zero() {
                state.gains[j] += gain_increment;
            } else {
                state.gains[j] *= gain_decay;
            }
            if state.gains[j] < self.config.min_gain {
                state.gains[j] = self.config.min_gain;
            }

            gradient[j] *= state.gains[j];
            state.update[j] =
                self.config.momentum * state.update[j] - self.config.learning_rate * gradient[j];
            parameters[j] += state.update[j];
        }
    }
}
