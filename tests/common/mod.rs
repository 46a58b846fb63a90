//! Shared helpers for integration tests.
#![allow(dead_code)]

use ensembles_rust::TrainingSet;
use ndarray::{Array1, Array2};

/// Initialize logging once per test binary.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Deterministic synthetic regression data.
///
/// Features mix a smooth oscillation with a linear drift; the target is a
/// weighted sum of the features plus a mild nonlinearity, so trees have
/// structure to find without any randomness in the fixture itself.
pub fn synthetic_regression(num_rows: usize, num_features: usize) -> TrainingSet {
    let features = Array2::from_shape_fn((num_rows, num_features), |(i, j)| {
        ((i as f64) * 0.7 + (j as f64) * 1.3).sin() * 2.0 + (i as f64) * 0.05
    });
    let targets = Array1::from_shape_fn(num_rows, |i| {
        let row = features.row(i);
        let weighted: f64 = row
            .iter()
            .enumerate()
            .map(|(j, &value)| value * 0.5 * (j as f64 + 1.0))
            .sum();
        weighted + ((i as f64) * 0.3).cos()
    });
    TrainingSet::new(features, targets).expect("synthetic data is well formed")
}

/// The four-point single-feature set where the target equals the feature.
pub fn identity_line_set() -> TrainingSet {
    let features = Array2::from_shape_vec((4, 1), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let targets = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
    TrainingSet::new(features, targets).unwrap()
}
