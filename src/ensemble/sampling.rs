//! Row and feature subsampling shared by both engines.

use crate::core::random::Random;
use crate::core::types::{FeatureIndex, Score};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// The row and column draws for one ensemble round.
///
/// Rows are a bootstrap sample, the same size as the training set and drawn
/// with replacement. Columns are drawn without replacement and kept in
/// ascending order.
#[derive(Debug, Clone)]
pub struct Subsample {
    /// Bootstrap row indices, possibly repeating.
    pub rows: Vec<usize>,
    /// Ordered distinct feature-column indices.
    pub columns: Vec<FeatureIndex>,
}

/// Draw a fresh row/column subsample for one round.
pub fn draw_subsample(
    rng: &mut Random,
    num_rows: usize,
    num_features: usize,
    subset_size: usize,
) -> Subsample {
    let rows = rng.bootstrap(num_rows);
    let columns = rng.sample(num_features, subset_size);
    Subsample { rows, columns }
}

impl Subsample {
    /// Slice the training matrix down to the sampled rows and columns.
    pub fn slice_features(&self, features: ArrayView2<'_, Score>) -> Array2<Score> {
        features
            .select(Axis(0), &self.rows)
            .select(Axis(1), &self.columns)
    }

    /// Gather the target values for the sampled rows.
    pub fn slice_targets(&self, targets: ArrayView1<'_, Score>) -> Array1<Score> {
        targets.select(Axis(0), &self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};
    use std::collections::HashSet;

    #[test]
    fn test_draw_dimensions() {
        let mut rng = Random::with_seed(11);
        let subsample = draw_subsample(&mut rng, 30, 9, 3);

        assert_eq!(subsample.rows.len(), 30);
        assert!(subsample.rows.iter().all(|&r| r < 30));

        assert_eq!(subsample.columns.len(), 3);
        let unique: HashSet<_> = subsample.columns.iter().collect();
        assert_eq!(unique.len(), 3);
        assert!(subsample.columns.iter().all(|&c| c < 9));
    }

    #[test]
    fn test_slicing() {
        let features = arr2(&[[1.0, 10.0, 100.0], [2.0, 20.0, 200.0], [3.0, 30.0, 300.0]]);
        let targets = arr1(&[-1.0, -2.0, -3.0]);
        let subsample = Subsample {
            rows: vec![2, 0, 2],
            columns: vec![0, 2],
        };

        let sliced = subsample.slice_features(features.view());
        assert_eq!(sliced, arr2(&[[3.0, 300.0], [1.0, 100.0], [3.0, 300.0]]));

        let sliced_targets = subsample.slice_targets(targets.view());
        assert_eq!(sliced_targets, arr1(&[-3.0, -1.0, -3.0]));
    }
}
