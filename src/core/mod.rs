//! Core infrastructure for the ensemble engines.
//!
//! This module provides the fundamental building blocks shared by the rest
//! of the crate: error types, numeric type aliases, the tree-learner trait
//! seam and the seedable random source used for subsampling.

pub mod error;
pub mod random;
pub mod traits;
pub mod types;

pub use error::{EnsembleError, Result};
pub use random::Random;
pub use traits::{RegressionModel, TreeLearner};
pub use types::*;
