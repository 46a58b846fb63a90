//! # Rust Ensembles
//!
//! Tree-ensemble regressors for squared-error regression: a bagged random
//! forest and a gradient boosting engine, both tracking per-round training
//! and validation loss against wall-clock time for diagnostic plotting.
//!
//! ## Features
//!
//! - **Two engines, one shape**: [`RandomForest`] averages independently
//!   bagged trees; [`GradientBoosting`] accumulates residual fits scaled by
//!   an exact line-search step and a global learning rate.
//! - **Streaming loss tracking**: every fit returns a [`TrainingHistory`]
//!   with one `(elapsed_seconds, train_rmse, validation_rmse?)` sample per
//!   member, maintained through incremental mean updates.
//! - **Reproducible subsampling**: each engine owns a seedable random
//!   source; the same seed and inputs give identical histories and
//!   predictions.
//! - **Pluggable tree learner**: the engines delegate single-tree fitting
//!   through the [`TreeLearner`] trait; the bundled [`CartLearner`] grows
//!   variance-reduction regression trees and any CART-style implementation
//!   can be substituted.
//!
//! ## Quick Start
//!
//! ```rust
//! use ensembles_rust::{ForestConfig, RandomForest, TrainingSet};
//! use ndarray::{Array1, Array2};
//!
//! # fn main() -> ensembles_rust::Result<()> {
//! let features = Array2::from_shape_vec((4, 1), vec![1.0, 2.0, 3.0, 4.0])
//!     .expect("shape is valid");
//! let targets = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
//! let train = TrainingSet::new(features, targets)?;
//!
//! let config = ForestConfig::builder()
//!     .n_estimators(10)
//!     .feature_fraction(1.0)
//!     .random_seed(42)
//!     .build()?;
//!
//! let mut forest = RandomForest::new(config);
//! let history = forest.fit(&train)?;
//! assert_eq!(history.len(), 10);
//!
//! let predictions = forest.predict(train.features())?;
//! assert_eq!(predictions.len(), 4);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module
pub mod core;

// Configuration management module
pub mod config;

// Dataset management module
pub mod dataset;

// Ensemble engines module
pub mod ensemble;

// Metrics and loss tracking module
pub mod metrics;

// Bundled single-tree regressor module
pub mod tree;

// Re-export core functionality for convenience
pub use core::{
    error::{EnsembleError, Result},
    random::Random,
    traits::{RegressionModel, TreeLearner},
    types::*,
};

// Re-export configuration functionality
pub use config::{
    BoostingConfig, BoostingConfigBuilder, ForestConfig, ForestConfigBuilder, TreeParams,
};

// Re-export dataset functionality
pub use dataset::TrainingSet;

// Re-export ensemble functionality
pub use ensemble::{EnsembleMember, GradientBoosting, RandomForest};

// Re-export metrics functionality
pub use metrics::{rmse, LossTracker, MetricSample, TrainingHistory};

// Re-export the bundled tree learner
pub use tree::{CartLearner, RegressionTree};

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn tiny_set() -> TrainingSet {
        TrainingSet::new(
            arr2(&[[1.0, 0.5], [2.0, 1.5], [3.0, 2.5], [4.0, 3.5]]),
            arr1(&[1.0, 2.0, 3.0, 4.0]),
        )
        .unwrap()
    }

    #[test]
    fn test_forest_smoke() {
        let config = ForestConfig::builder()
            .n_estimators(3)
            .random_seed(7)
            .build()
            .unwrap();
        let mut forest = RandomForest::new(config);
        let history = forest.fit(&tiny_set()).unwrap();

        assert_eq!(history.len(), 3);
        assert!(forest.is_fitted());
    }

    #[test]
    fn test_boosting_smoke() {
        let config = BoostingConfig::builder()
            .n_estimators(3)
            .random_seed(7)
            .build()
            .unwrap();
        let mut booster = GradientBoosting::new(config);
        let history = booster.fit(&tiny_set()).unwrap();

        assert_eq!(history.len(), 3);
        assert!(booster.is_fitted());
    }

    #[test]
    fn test_config_validation_at_boundary() {
        assert!(ForestConfig::builder().n_estimators(0).build().is_err());
        assert!(BoostingConfig::builder().learning_rate(-1.0).build().is_err());
    }

    #[test]
    fn test_error_integration() {
        let err = EnsembleError::config("test error");
        assert_eq!(err.category(), "config");
    }
}
