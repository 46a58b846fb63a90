//! Trait abstractions at the boundary between the ensemble engines and the
//! single-tree regressor.
//!
//! Both engines delegate tree construction through [`TreeLearner`] and only
//! interact with fitted trees through [`RegressionModel`]. Any CART-style
//! implementation can be substituted; the bundled
//! [`CartLearner`](crate::tree::CartLearner) is the default.

use crate::core::error::Result;
use crate::core::types::Score;
use ndarray::{Array1, ArrayView1, ArrayView2};
use std::fmt::Debug;

/// Interface for fitting a single regression tree.
///
/// The learner receives an already-sliced feature matrix (the sampled rows
/// and columns for one ensemble round) and the matching target vector. The
/// fitted tree is tied to that column layout: prediction inputs must carry
/// the same column count, in the same order, as the matrix seen at fit time.
pub trait TreeLearner: Debug + Send + Sync {
    /// Fitted tree type produced by this learner.
    type Tree: RegressionModel;

    /// Fit one tree to the given feature matrix and target vector.
    ///
    /// Fails if the row counts of `features` and `targets` disagree or the
    /// input is empty.
    fn fit(&self, features: ArrayView2<'_, Score>, targets: ArrayView1<'_, Score>)
        -> Result<Self::Tree>;
}

/// Interface for a fitted regression model over a fixed column layout.
pub trait RegressionModel: Debug + Send + Sync {
    /// Predict one value per row of `features`.
    ///
    /// Fails if the column count differs from the column count at fit time.
    fn predict_batch(&self, features: ArrayView2<'_, Score>) -> Result<Array1<Score>>;
}
