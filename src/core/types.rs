//! Core data types shared by the ensemble engines.

/// Prediction, target and gradient value type.
/// 64-bit float providing numerical stability for the incremental mean
/// updates and the line-search accumulation.
pub type Score = f64;

/// Target value type, kept distinct from `Score` for signature clarity.
pub type Label = f64;

/// Feature index type for identifying feature columns in the dataset.
pub type FeatureIndex = usize;

/// Tree node identifier type.
pub type NodeIndex = usize;

/// Iteration number type for ensemble training rounds.
pub type IterationIndex = usize;
