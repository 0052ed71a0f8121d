//! End-to-end tests: optimize, record, export, and read back.

use embedtrace::prelude::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn labeled_points(n: usize) -> Vec<PointMeta> {
    (0..n)
        .map(|i| PointMeta::new(format!("point-{i}"), format!("group-{}", i % 3)))
        .collect()
}

#[test]
fn test_optimize_record_export_pipeline() {
    let n_points = 4;
    let initial = DVector::from_fn(n_points * 2, |i, _| 0.5 + 0.1 * i as f64);

    let mut optimizer = GradientDescent::new(
        GradientDescentConfig::new()
            .with_learning_rate(0.05)
            .with_momentum(0.5)
            .with_min_gradient_norm(0.0)
            .with_sample_every(10),
    );
    let mut recorder = TrajectoryRecorder::new();

    let result = optimizer
        .run(&QuadraticObjective::new(), &initial, 0, 100, &mut recorder)
        .unwrap();

    assert_eq!(result.last_iteration, 99);
    assert_eq!(result.parameters.len(), initial.len());
    assert_eq!(recorder.len(), 10);

    let points = labeled_points(n_points);
    let table = TrajectoryTable::from_snapshots(recorder.snapshots(), &points).unwrap();
    assert_eq!(table.rows().len(), 10 * n_points);
    assert_eq!(table.n_slices(), 10);

    // The first exported slice is the embedding as it stood at the
    // tenth iteration of the run.
    let first_slice = &recorder.snapshots()[0];
    assert_eq!(table.rows()[0].x, first_slice[0]);
    assert_eq!(table.rows()[0].y, first_slice[1]);
}

#[test]
fn test_round_trip_reconstructs_slice_structure() {
    let n_points = 5;
    let snapshots: Vec<DVector<f64>> = (0..7)
        .map(|s| DVector::from_fn(n_points * 2, |i, _| s as f64 + i as f64 / 100.0))
        .collect();
    let points = labeled_points(n_points);

    let table = TrajectoryTable::from_snapshots(&snapshots, &points).unwrap();

    let mut buffer = Vec::new();
    table.write_delimited(&mut buffer).unwrap();
    let restored = TrajectoryTable::<f64>::read_delimited(buffer.as_slice()).unwrap();

    // k * n rows, slice indices 0..k-1 each repeated n times contiguously.
    assert_eq!(restored.rows().len(), 7 * n_points);
    for (row_index, row) in restored.rows().iter().enumerate() {
        assert_eq!(row.slice_index, row_index / n_points);
    }
    assert_eq!(restored, table);
}

#[test]
fn test_recorder_reuse_requires_clear() {
    let initial = DVector::from_vec(vec![0.5_f64, -0.5]);
    let mut optimizer = GradientDescent::new(
        GradientDescentConfig::new()
            .with_learning_rate(0.05)
            .with_momentum(0.5)
            .with_min_gradient_norm(0.0)
            .with_sample_every(5),
    );

    let mut recorder = TrajectoryRecorder::new();
    optimizer
        .run(&QuadraticObjective::new(), &initial, 0, 50, &mut recorder)
        .unwrap();
    assert_eq!(recorder.len(), 10);

    // Without clearing, a second run appends to the same trajectory.
    optimizer
        .run(&QuadraticObjective::new(), &initial, 0, 50, &mut recorder)
        .unwrap();
    assert_eq!(recorder.len(), 20);

    recorder.clear();
    optimizer
        .run(&QuadraticObjective::new(), &initial, 0, 50, &mut recorder)
        .unwrap();
    assert_eq!(recorder.len(), 10);
}

proptest! {
    #[test]
    fn prop_trajectory_length_matches_cadence(
        max_iterations in 1_usize..300,
        sample_every in 1_usize..20,
    ) {
        let initial = DVector::from_vec(vec![0.25_f64, -0.25]);
        let mut optimizer = GradientDescent::new(
            GradientDescentConfig::new()
                .with_learning_rate(0.05)
                .with_momentum(0.5)
                .with_min_gradient_norm(0.0)
                .with_iterations_without_progress_limit(1000)
                .with_sample_every(sample_every),
        );
        let mut recorder = TrajectoryRecorder::new();

        let result = optimizer
            .run(&QuadraticObjective::new(), &initial, 0, max_iterations, &mut recorder)
            .unwrap();

        prop_assert_eq!(result.parameters.len(), initial.len());
        prop_assert_eq!(recorder.len(), max_iterations / sample_every);
    }
}
