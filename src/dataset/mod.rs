//! Training data container for the ensemble engines.

use crate::core::error::{EnsembleError, Result};
use crate::core::types::{Label, Score};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// An immutable pairing of a feature matrix and a target vector.
///
/// Rows are samples and columns are features. Row and column counts are
/// validated at construction and fixed for the lifetime of the value; the
/// same type serves as the optional validation pair passed to
/// `fit_with_validation`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    features: Array2<Score>,
    targets: Array1<Label>,
}

impl TrainingSet {
    /// Create a training set from a feature matrix and a target vector.
    ///
    /// Fails if either dimension is empty or if the target length does not
    /// match the feature row count.
    pub fn new(features: Array2<Score>, targets: Array1<Label>) -> Result<Self> {
        if features.nrows() == 0 {
            return Err(EnsembleError::dataset("feature matrix has no rows"));
        }
        if features.ncols() == 0 {
            return Err(EnsembleError::dataset("feature matrix has no columns"));
        }
        if targets.len() != features.nrows() {
            return Err(EnsembleError::dimension_mismatch(
                format!("{} target values", features.nrows()),
                format!("{} target values", targets.len()),
            ));
        }
        Ok(TrainingSet { features, targets })
    }

    /// Number of samples.
    pub fn num_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Number of feature columns.
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// View of the feature matrix.
    pub fn features(&self) -> ArrayView2<'_, Score> {
        self.features.view()
    }

    /// View of the target vector.
    pub fn targets(&self) -> ArrayView1<'_, Label> {
        self.targets.view()
    }
}
