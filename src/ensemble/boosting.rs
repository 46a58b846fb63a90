//! Gradient boosting engine for MSE regression.

use crate::config::BoostingConfig;
use crate::core::error::{EnsembleError, Result};
use crate::core::random::Random;
use crate::core::traits::{RegressionModel, TreeLearner};
use crate::core::types::{IterationIndex, Score};
use crate::dataset::TrainingSet;
use crate::ensemble::sampling::draw_subsample;
use crate::ensemble::EnsembleMember;
use crate::metrics::{rmse, LossTracker, TrainingHistory};
use crate::tree::CartLearner;
use ndarray::{Array1, ArrayView1, ArrayView2, Zip};
use rayon::prelude::*;

/// Gradient boosted trees minimizing squared error.
///
/// Members are trained strictly in sequence: each round fits a tree to the
/// pseudo-residual of the running prediction on a fresh bootstrap/column
/// subsample, scales it by an exact line-search step, and folds
/// `learning_rate * alpha` times its prediction into the running total over
/// all rows. Prediction is the additive sum of the scaled member outputs,
/// never an average.
#[derive(Debug)]
pub struct GradientBoosting<L: TreeLearner = CartLearner> {
    config: BoostingConfig,
    learner: L,
    members: Vec<EnsembleMember<L::Tree>>,
    coefficients: Vec<Score>,
    num_features: Option<usize>,
}

impl GradientBoosting<CartLearner> {
    /// Create an unfitted booster using the bundled CART learner.
    pub fn new(config: BoostingConfig) -> Self {
        let learner = CartLearner::new(config.tree.clone());
        Self::with_learner(config, learner)
    }
}

impl Default for GradientBoosting<CartLearner> {
    fn default() -> Self {
        Self::new(BoostingConfig::default())
    }
}

impl<L: TreeLearner> GradientBoosting<L> {
    /// Create an unfitted booster delegating tree construction to `learner`.
    pub fn with_learner(config: BoostingConfig, learner: L) -> Self {
        GradientBoosting {
            config,
            learner,
            members: Vec::new(),
            coefficients: Vec::new(),
            num_features: None,
        }
    }

    /// Reassemble a fitted booster from externally persisted state.
    pub fn from_parts(
        config: BoostingConfig,
        learner: L,
        members: Vec<EnsembleMember<L::Tree>>,
        coefficients: Vec<Score>,
        num_features: usize,
    ) -> Result<Self> {
        config.validate()?;
        if members.is_empty() {
            return Err(EnsembleError::training(
                "a fitted booster needs at least one member",
            ));
        }
        if members.len() != coefficients.len() {
            return Err(EnsembleError::dimension_mismatch(
                format!("{} coefficients", members.len()),
                format!("{} coefficients", coefficients.len()),
            ));
        }
        for member in &members {
            if member.feature_indices().iter().any(|&f| f >= num_features) {
                return Err(EnsembleError::training(format!(
                    "member references a feature column >= {}",
                    num_features
                )));
            }
        }
        Ok(GradientBoosting {
            config,
            learner,
            members,
            coefficients,
            num_features: Some(num_features),
        })
    }

    /// The engine configuration, including the forwarded tree parameters.
    pub fn config(&self) -> &BoostingConfig {
        &self.config
    }

    /// All trained members in fit order.
    pub fn members(&self) -> &[EnsembleMember<L::Tree>] {
        &self.members
    }

    /// The line-search coefficient recorded for each member, in fit order.
    pub fn coefficients(&self) -> &[Score] {
        &self.coefficients
    }

    /// Number of trained members.
    pub fn num_members(&self) -> usize {
        self.members.len()
    }

    /// True once a fit has completed.
    pub fn is_fitted(&self) -> bool {
        self.num_features.is_some()
    }

    /// Train the booster on `train`, returning the per-round history.
    pub fn fit(&mut self, train: &TrainingSet) -> Result<TrainingHistory> {
        self.fit_impl(train, None)
    }

    /// Train the booster while also tracking loss on a validation split.
    ///
    /// The validation pair is never used to fit trees; it only adds the
    /// `validation_rmse` series to the returned history.
    pub fn fit_with_validation(
        &mut self,
        train: &TrainingSet,
        validation: &TrainingSet,
    ) -> Result<TrainingHistory> {
        if validation.num_features() != train.num_features() {
            return Err(EnsembleError::dimension_mismatch(
                format!("{} validation features", train.num_features()),
                format!("{} validation features", validation.num_features()),
            ));
        }
        self.fit_impl(train, Some(validation))
    }

    fn fit_impl(
        &mut self,
        train: &TrainingSet,
        validation: Option<&TrainingSet>,
    ) -> Result<TrainingHistory> {
        let num_rows = train.num_rows();
        let num_features = train.num_features();
        let subset_size = self.config.feature_subset_size(num_features);
        let learning_rate = self.config.learning_rate;

        log::info!(
            "training gradient boosting: {} rounds, learning rate {}, {} rows, {} of {} features per tree",
            self.config.n_estimators,
            learning_rate,
            num_rows,
            subset_size,
            num_features
        );

        self.members.clear();
        self.coefficients.clear();
        self.num_features = None;

        let mut rng = Random::with_seed(self.config.random_seed);
        let mut tracker = LossTracker::start();
        let mut current = Array1::<Score>::zeros(num_rows);
        let mut current_validation = validation.map(|v| Array1::<Score>::zeros(v.num_rows()));

        for round in 0..self.config.n_estimators {
            let subsample = draw_subsample(&mut rng, num_rows, num_features, subset_size);
            let sub_features = subsample.slice_features(train.features());

            // Pseudo-residual: the negative MSE gradient at the running
            // prediction, restricted to the sampled rows
            let residual_target = pseudo_residual(train.targets(), &current, &subsample.rows);
            let tree = self.learner.fit(sub_features.view(), residual_target.view())?;

            let sampled_direction = tree.predict_batch(sub_features.view())?;
            let sampled_residual: Array1<Score> = subsample
                .rows
                .iter()
                .map(|&r| train.targets()[r] - current[r])
                .collect();
            let alpha = line_search(sampled_residual.view(), sampled_direction.view());
            if alpha == 0.0 {
                log::warn!("round {}: line search found no descent step", round);
            }

            let member = EnsembleMember::new(tree, subsample.columns);
            let step = learning_rate * alpha;

            // The running prediction advances over all rows, not just the
            // sampled subset
            let prediction = member.predict(train.features())?;
            apply_step(&mut current, &prediction, step);
            let train_rmse = rmse(train.targets(), current.view());

            let validation_rmse = match (validation, current_validation.as_mut()) {
                (Some(validation), Some(running)) => {
                    let prediction = member.predict(validation.features())?;
                    apply_step(running, &prediction, step);
                    Some(rmse(validation.targets(), running.view()))
                }
                _ => None,
            };

            tracker.record(train_rmse, validation_rmse);
            log::debug!(
                "round {}: alpha {:.6}, train rmse {:.6}",
                round,
                alpha,
                train_rmse
            );
            self.coefficients.push(alpha);
            self.members.push(member);
        }

        self.num_features = Some(num_features);
        let history = tracker.finish();
        log::info!(
            "gradient boosting training finished: final train rmse {:.6}",
            history.final_train_rmse().unwrap_or(Score::NAN)
        );
        Ok(history)
    }

    /// Predict on `features`: the sum over all members of
    /// `learning_rate * alpha_i * member_i` prediction.
    pub fn predict(&self, features: ArrayView2<'_, Score>) -> Result<Array1<Score>> {
        self.predict_at_iteration(features, self.members.len())
    }

    /// Predict using only the first `num_members` members.
    ///
    /// `num_members = 0` yields the all-zero baseline the additive model
    /// starts from.
    pub fn predict_at_iteration(
        &self,
        features: ArrayView2<'_, Score>,
        num_members: IterationIndex,
    ) -> Result<Array1<Score>> {
        self.check_ready(features.ncols())?;
        if num_members > self.members.len() {
            return Err(EnsembleError::prediction(format!(
                "num_members must be at most {}, got {}",
                self.members.len(),
                num_members
            )));
        }

        // Member predictions run in parallel; the reduction applies them in
        // member order so results match the fit-time accumulation exactly.
        let predictions: Vec<Array1<Score>> = self.members[..num_members]
            .par_iter()
            .map(|member| member.predict(features))
            .collect::<Result<_>>()?;

        let mut total = Array1::<Score>::zeros(features.nrows());
        for (prediction, &alpha) in predictions.iter().zip(&self.coefficients) {
            apply_step(&mut total, prediction, self.config.learning_rate * alpha);
        }
        Ok(total)
    }

    fn check_ready(&self, num_columns: usize) -> Result<()> {
        let trained = self
            .num_features
            .ok_or_else(|| EnsembleError::not_fitted("predict"))?;
        if num_columns != trained {
            return Err(EnsembleError::dimension_mismatch(
                format!("{} feature columns", trained),
                format!("{} feature columns", num_columns),
            ));
        }
        Ok(())
    }
}

/// Negative gradient of the mean-squared-error loss at `current`, gathered
/// over the sampled rows: `2 * (target - current) / num_rows`.
fn pseudo_residual(
    targets: ArrayView1<'_, Score>,
    current: &Array1<Score>,
    rows: &[usize],
) -> Array1<Score> {
    let scale = 2.0 / targets.len() as Score;
    rows.iter()
        .map(|&r| scale * (targets[r] - current[r]))
        .collect()
}

/// Exact minimizer of `mean((residual - alpha * direction)^2)` over `alpha`.
///
/// The objective is quadratic in `alpha`, so the minimum is
/// `dot(residual, direction) / dot(direction, direction)`. A zero direction
/// has no descent step and yields `alpha = 0`.
fn line_search(residual: ArrayView1<'_, Score>, direction: ArrayView1<'_, Score>) -> Score {
    let denominator = direction.dot(&direction);
    if denominator == 0.0 {
        return 0.0;
    }
    residual.dot(&direction) / denominator
}

/// Fold a scaled member prediction into the running total:
/// `running += step * prediction`.
fn apply_step(running: &mut Array1<Score>, prediction: &Array1<Score>, step: Score) {
    Zip::from(running)
        .and(prediction)
        .for_each(|r, &p| *r += step * p);
}
