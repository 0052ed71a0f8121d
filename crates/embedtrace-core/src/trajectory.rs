//! Trajectory recording for embedding optimization runs.
//!
//! The optimizer samples the parameter vector at a configurable cadence
//! and hands each sample to a [`SampleSink`]. The standard sink is the
//! [`TrajectoryRecorder`], an append-only buffer of deep-copied snapshots
//! that the caller owns and consumes after the run completes. Recording
//! is an explicit, injected collaborator rather than a hidden global, so
//! concurrent runs cannot leak snapshots into each other.

use crate::types::{DVector, Scalar};

/// Receiver for parameter snapshots sampled during optimization.
///
/// This is the instrumentation extension point of the optimizer: anything
/// that wants to observe the embedding state at the sampling cadence
/// (recording, streaming, early visualization) implements this trait and
/// is passed into the run by mutable reference.
pub trait SampleSink<T>
where
    T: Scalar,
{
    /// Called with the parameter vector at a sampled iteration.
    ///
    /// `iteration` is the global iteration index at which the sample was
    /// taken. The parameters are the pre-update state of that iteration;
    /// implementations needing to retain them must copy.
    fn on_sample(&mut self, iteration: usize, parameters: &DVector<T>);
}

/// A sink that discards all samples.
///
/// Useful when the caller only wants the final embedding.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl<T> SampleSink<T> for NoOpSink
where
    T: Scalar,
{
    fn on_sample(&mut self, _iteration: usize, _parameters: &DVector<T>) {}
}

/// Append-only buffer of parameter-vector snapshots.
///
/// Snapshots are deep copies in recording order; the sequence grows
/// monotonically during a run and is never mutated after append. One
/// recorder belongs to one run at a time — reuse across unrelated runs
/// requires an explicit [`clear`](TrajectoryRecorder::clear).
#[derive(Debug, Clone, Default)]
pub struct TrajectoryRecorder<T>
where
    T: Scalar,
{
    snapshots: Vec<DVector<T>>,
}

impl<T> TrajectoryRecorder<T>
where
    T: Scalar,
{
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    /// Creates an empty recorder with capacity for `n` snapshots.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(n),
        }
    }

    /// Appends a deep copy of the given parameters.
    pub fn record(&mut self, parameters: &DVector<T>) {
        self.snapshots.push(parameters.clone());
    }

    /// Returns the recorded snapshots in recording order.
    pub fn snapshots(&self) -> &[DVector<T>] {
        &self.snapshots
    }

    /// Returns the number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Removes all recorded snapshots.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Consumes the recorder, returning the owned snapshot sequence.
    pub fn into_snapshots(self) -> Vec<DVector<T>> {
        self.snapshots
    }
}

impl<T> SampleSink<T> for TrajectoryRecorder<T>
where
    T: Scalar,
{
    fn on_sample(&mut self, _iteration: usize, parameters: &DVector<T>) {
        self.record(parameters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_deep_copy() {
        let mut recorder = TrajectoryRecorder::new();
        let mut p = DVector::from_vec(vec![1.0_f64, 2.0]);

        recorder.record(&p);
        p[0] = 99.0;

        assert_eq!(recorder.snapshots()[0][0], 1.0);
    }

    #[test]
    fn test_recording_order() {
        let mut recorder = TrajectoryRecorder::new();
        for i in 0..5 {
            let p = DVector::from_element(2, f64::from(i));
            recorder.on_sample(i as usize * 10, &p);
        }

        assert_eq!(recorder.len(), 5);
        for (i, snapshot) in recorder.snapshots().iter().enumerate() {
            assert_eq!(snapshot[0], i as f64);
        }
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut recorder = TrajectoryRecorder::<f64>::with_capacity(8);
        recorder.record(&DVector::zeros(4));
        assert!(!recorder.is_empty());

        recorder.clear();
        assert!(recorder.is_empty());
        assert_eq!(recorder.len(), 0);
    }

    #[test]
    fn test_into_snapshots() {
        let mut recorder = TrajectoryRecorder::new();
        recorder.record(&DVector::from_vec(vec![1.0_f64]));
        recorder.record(&DVector::from_vec(vec![2.0_f64]));

        let snapshots = recorder.into_snapshots();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1][0], 2.0);
    }

    #[test]
    fn test_noop_sink() {
        let mut sink = NoOpSink;
        let p = DVector::from_vec(vec![1.0_f64]);
        // Must accept samples without effect.
        SampleSink::<f64>::on_sample(&mut sink, 0, &p);
    }
}
