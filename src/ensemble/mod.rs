//! Ensemble training engines.
//!
//! Two independent engines share the row/column subsampling utility and the
//! member representation defined here: [`RandomForest`] averages
//! independently trained trees, [`GradientBoosting`] accumulates
//! line-search-scaled residual fits.

pub mod boosting;
pub mod forest;
pub mod sampling;

pub use boosting::GradientBoosting;
pub use forest::RandomForest;

use crate::core::error::{EnsembleError, Result};
use crate::core::traits::RegressionModel;
use crate::core::types::{FeatureIndex, Score};
use ndarray::{Array1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// One trained tree plus the exact ordered feature-column subset it was
/// trained on.
///
/// Members are exclusively owned by the ensemble that created them and are
/// immutable once trained. Together with the boosting coefficients they are
/// the complete per-member state an external persistence layer needs to
/// capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleMember<T> {
    tree: T,
    feature_indices: Vec<FeatureIndex>,
}

impl<T: RegressionModel> EnsembleMember<T> {
    /// Pair a fitted tree with the column indices it was trained on.
    pub fn new(tree: T, feature_indices: Vec<FeatureIndex>) -> Self {
        EnsembleMember {
            tree,
            feature_indices,
        }
    }

    /// The fitted tree.
    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// The ordered column indices this member slices out of the full matrix.
    pub fn feature_indices(&self) -> &[FeatureIndex] {
        &self.feature_indices
    }

    /// Predict on the full-width feature matrix by slicing this member's
    /// columns first.
    pub fn predict(&self, features: ArrayView2<'_, Score>) -> Result<Array1<Score>> {
        if let Some(&max_index) = self.feature_indices.iter().max() {
            if max_index >= features.ncols() {
                return Err(EnsembleError::dimension_mismatch(
                    format!("at least {} feature columns", max_index + 1),
                    format!("{} feature columns", features.ncols()),
                ));
            }
        }
        let selected = features.select(Axis(1), &self.feature_indices);
        self.tree.predict_batch(selected.view())
    }
}
