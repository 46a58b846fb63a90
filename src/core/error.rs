//! Error handling and error types for the ensemble training engines.
//!
//! This module provides error handling using Rust's Result type system,
//! ensuring clear error propagation from configuration, dataset construction,
//! tree fitting, ensemble training and prediction.

use std::io;
use thiserror::Error;

/// Main error type for the ensembles library.
///
/// This enum covers all error conditions that can occur during dataset
/// construction, engine configuration, ensemble training and prediction.
#[derive(Error, Debug)]
pub enum EnsembleError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Dataset-related errors
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// Training-related errors
    #[error("Training error: {message}")]
    Training { message: String },

    /// Tree construction errors
    #[error("Tree construction error: {message}")]
    TreeConstruction { message: String },

    /// Prediction errors
    #[error("Prediction error: {message}")]
    Prediction { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Use of a model that has not been fitted yet
    #[error("Model not fitted: {operation} requires a completed fit")]
    NotFitted { operation: String },

    /// Model serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Results using EnsembleError
pub type Result<T> = std::result::Result<T, EnsembleError>;

/// Utility functions for error handling
impl EnsembleError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        EnsembleError::Config {
            message: message.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        EnsembleError::Dataset {
            message: message.into(),
        }
    }

    /// Create a training error
    pub fn training<S: Into<String>>(message: S) -> Self {
        EnsembleError::Training {
            message: message.into(),
        }
    }

    /// Create a tree construction error
    pub fn tree_construction<S: Into<String>>(message: S) -> Self {
        EnsembleError::TreeConstruction {
            message: message.into(),
        }
    }

    /// Create a prediction error
    pub fn prediction<S: Into<String>>(message: S) -> Self {
        EnsembleError::Prediction {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        EnsembleError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        EnsembleError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a not-fitted error
    pub fn not_fitted<S: Into<String>>(operation: S) -> Self {
        EnsembleError::NotFitted {
            operation: operation.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        EnsembleError::Serialization {
            message: message.into(),
        }
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            EnsembleError::Config { .. } => "config",
            EnsembleError::Dataset { .. } => "dataset",
            EnsembleError::Training { .. } => "training",
            EnsembleError::TreeConstruction { .. } => "tree_construction",
            EnsembleError::Prediction { .. } => "prediction",
            EnsembleError::InvalidParameter { .. } => "invalid_parameter",
            EnsembleError::DimensionMismatch { .. } => "dimension_mismatch",
            EnsembleError::NotFitted { .. } => "not_fitted",
            EnsembleError::Serialization { .. } => "serialization",
            EnsembleError::IO { .. } => "io",
            EnsembleError::Json { .. } => "json",
        }
    }
}
