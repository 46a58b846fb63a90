//! Configuration structures and builders for the ensemble engines.
//!
//! Engine parameters are validated when a builder's `build()` runs. A value
//! outside its documented range is rejected with an
//! [`InvalidParameter`](crate::core::error::EnsembleError::InvalidParameter)
//! error rather than clamped; silently adjusted parameters previously made
//! training behavior hard to diagnose.

use crate::core::error::{EnsembleError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of ensemble members.
pub const DEFAULT_NUM_ESTIMATORS: usize = 100;
/// Default learning rate for gradient boosting.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
/// Default maximum tree depth for gradient boosting members.
pub const DEFAULT_BOOSTING_MAX_DEPTH: usize = 5;
/// Default minimum number of samples required to split a tree node.
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;
/// Default random seed.
pub const DEFAULT_RANDOM_SEED: u64 = 0;

/// Construction parameters forwarded to the tree learner for every member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth of each tree. `None` means no depth limit.
    pub max_depth: Option<usize>,
    /// Minimum number of samples a node must hold to be considered for a
    /// split.
    pub min_samples_split: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        TreeParams {
            max_depth: None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
        }
    }
}

impl TreeParams {
    fn validate(&self) -> Result<()> {
        if let Some(depth) = self.max_depth {
            if depth < 1 {
                return Err(EnsembleError::invalid_parameter(
                    "max_depth",
                    depth.to_string(),
                    "must be at least 1 when bounded",
                ));
            }
        }
        if self.min_samples_split < 2 {
            return Err(EnsembleError::invalid_parameter(
                "min_samples_split",
                self.min_samples_split.to_string(),
                "must be at least 2",
            ));
        }
        Ok(())
    }
}

/// Configuration for the random forest engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest.
    pub n_estimators: usize,
    /// Fraction of features drawn for each tree, in `(0, 1]`. `None` selects
    /// one third of all features.
    pub feature_fraction: Option<f64>,
    /// Seed for the engine-owned random source.
    pub random_seed: u64,
    /// Per-tree construction parameters.
    pub tree: TreeParams,
}

impl Default for ForestConfig {
    fn default() -> Self {
        ForestConfig {
            n_estimators: DEFAULT_NUM_ESTIMATORS,
            feature_fraction: None,
            random_seed: DEFAULT_RANDOM_SEED,
            tree: TreeParams::default(),
        }
    }
}

impl ForestConfig {
    /// Create a builder initialized with default values.
    pub fn builder() -> ForestConfigBuilder {
        ForestConfigBuilder::new()
    }

    /// Validate the configuration parameters.
    pub fn validate(&self) -> Result<()> {
        validate_common(self.n_estimators, self.feature_fraction)?;
        self.tree.validate()
    }

    /// Number of feature columns drawn for each member, given the total
    /// feature count. Defaults to one third of all features and is kept
    /// within `[1, num_features]`.
    pub fn feature_subset_size(&self, num_features: usize) -> usize {
        feature_subset_size(self.feature_fraction, num_features)
    }

    /// Load a configuration from a `.json` or `.toml` file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_config_file(path.as_ref())
    }

    /// Save the configuration to a `.json` or `.toml` file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_config_file(path.as_ref(), self)
    }
}

/// Builder for [`ForestConfig`].
#[derive(Debug, Clone, Default)]
pub struct ForestConfigBuilder {
    config: ForestConfig,
}

impl ForestConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of trees.
    pub fn n_estimators(mut self, n_estimators: usize) -> Self {
        self.config.n_estimators = n_estimators;
        self
    }

    /// Set the feature fraction drawn for each tree.
    pub fn feature_fraction(mut self, fraction: f64) -> Self {
        self.config.feature_fraction = Some(fraction);
        self
    }

    /// Set the maximum tree depth. Pass `None` for unbounded trees.
    pub fn max_depth(mut self, max_depth: impl Into<Option<usize>>) -> Self {
        self.config.tree.max_depth = max_depth.into();
        self
    }

    /// Set the minimum number of samples required to split a node.
    pub fn min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.config.tree.min_samples_split = min_samples_split;
        self
    }

    /// Set the random seed.
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = seed;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ForestConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration for the gradient boosting engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostingConfig {
    /// Number of boosting rounds.
    pub n_estimators: usize,
    /// Global shrinkage applied to every member's line-search step.
    pub learning_rate: f64,
    /// Fraction of features drawn for each tree, in `(0, 1]`. `None` selects
    /// one third of all features.
    pub feature_fraction: Option<f64>,
    /// Seed for the engine-owned random source.
    pub random_seed: u64,
    /// Per-tree construction parameters.
    pub tree: TreeParams,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        BoostingConfig {
            n_estimators: DEFAULT_NUM_ESTIMATORS,
            learning_rate: DEFAULT_LEARNING_RATE,
            feature_fraction: None,
            random_seed: DEFAULT_RANDOM_SEED,
            tree: TreeParams {
                max_depth: Some(DEFAULT_BOOSTING_MAX_DEPTH),
                ..TreeParams::default()
            },
        }
    }
}

impl BoostingConfig {
    /// Create a builder initialized with default values.
    pub fn builder() -> BoostingConfigBuilder {
        BoostingConfigBuilder::new()
    }

    /// Validate the configuration parameters.
    pub fn validate(&self) -> Result<()> {
        validate_common(self.n_estimators, self.feature_fraction)?;
        if !(self.learning_rate > 0.0) {
            return Err(EnsembleError::invalid_parameter(
                "learning_rate",
                self.learning_rate.to_string(),
                "must be positive",
            ));
        }
        self.tree.validate()
    }

    /// Number of feature columns drawn for each member, given the total
    /// feature count. Defaults to one third of all features and is kept
    /// within `[1, num_features]`.
    pub fn feature_subset_size(&self, num_features: usize) -> usize {
        feature_subset_size(self.feature_fraction, num_features)
    }

    /// Load a configuration from a `.json` or `.toml` file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_config_file(path.as_ref())
    }

    /// Save the configuration to a `.json` or `.toml` file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_config_file(path.as_ref(), self)
    }
}

/// Builder for [`BoostingConfig`].
#[derive(Debug, Clone, Default)]
pub struct BoostingConfigBuilder {
    config: BoostingConfig,
}

impl BoostingConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of boosting rounds.
    pub fn n_estimators(mut self, n_estimators: usize) -> Self {
        self.config.n_estimators = n_estimators;
        self
    }

    /// Set the learning rate.
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    /// Set the feature fraction drawn for each tree.
    pub fn feature_fraction(mut self, fraction: f64) -> Self {
        self.config.feature_fraction = Some(fraction);
        self
    }

    /// Set the maximum tree depth. Pass `None` for unbounded trees.
    pub fn max_depth(mut self, max_depth: impl Into<Option<usize>>) -> Self {
        self.config.tree.max_depth = max_depth.into();
        self
    }

    /// Set the minimum number of samples required to split a node.
    pub fn min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.config.tree.min_samples_split = min_samples_split;
        self
    }

    /// Set the random seed.
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = seed;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<BoostingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn validate_common(n_estimators: usize, feature_fraction: Option<f64>) -> Result<()> {
    if n_estimators < 1 {
        return Err(EnsembleError::invalid_parameter(
            "n_estimators",
            n_estimators.to_string(),
            "must be at least 1",
        ));
    }
    if let Some(fraction) = feature_fraction {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(EnsembleError::invalid_parameter(
                "feature_fraction",
                fraction.to_string(),
                "must be in range (0.0, 1.0]",
            ));
        }
    }
    Ok(())
}

fn feature_subset_size(feature_fraction: Option<f64>, num_features: usize) -> usize {
    let raw = match feature_fraction {
        Some(fraction) => (num_features as f64 * fraction) as usize,
        None => num_features / 3,
    };
    raw.clamp(1, num_features.max(1))
}

fn load_config_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| EnsembleError::config(format!("Failed to read config file: {}", e)))?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .map_err(|e| EnsembleError::config(format!("Failed to parse JSON config: {}", e))),
        Some("toml") => toml::from_str(&content)
            .map_err(|e| EnsembleError::config(format!("Failed to parse TOML config: {}", e))),
        _ => Err(EnsembleError::config(
            "Unsupported config file format. Use .json or .toml",
        )),
    }
}

fn save_config_file<T: Serialize>(path: &Path, config: &T) -> Result<()> {
    let content = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::to_string_pretty(config)
            .map_err(|e| EnsembleError::config(format!("Failed to serialize to JSON: {}", e)))?,
        Some("toml") => toml::to_string_pretty(config)
            .map_err(|e| EnsembleError::config(format!("Failed to serialize to TOML: {}", e)))?,
        _ => {
            return Err(EnsembleError::config(
                "Unsupported config file format. Use .json or .toml",
            ))
        }
    };

    std::fs::write(path, content)
        .map_err(|e| EnsembleError::config(format!("Failed to write config file: {}", e)))?;

    Ok(())
}
