//! Bagged random forest engine for MSE regression.

use crate::config::ForestConfig;
use crate::core::error::{EnsembleError, Result};
use crate::core::random::Random;
use crate::core::traits::TreeLearner;
use crate::core::types::{IterationIndex, Score};
use crate::dataset::TrainingSet;
use crate::ensemble::sampling::draw_subsample;
use crate::ensemble::EnsembleMember;
use crate::metrics::{rmse, LossTracker, TrainingHistory};
use crate::tree::CartLearner;
use ndarray::{Array1, ArrayView2, Zip};
use rayon::prelude::*;

/// Random forest regressor minimizing squared error.
///
/// Each member is trained independently on a bootstrap row sample and a
/// fixed-size random column subset; prediction is the unweighted mean over
/// all members. During `fit` the ensemble prediction is maintained as an
/// incrementally updated running mean, so per-round loss tracking never
/// recomputes the full ensemble from scratch.
#[derive(Debug)]
pub struct RandomForest<L: TreeLearner = CartLearner> {
    config: ForestConfig,
    learner: L,
    members: Vec<EnsembleMember<L::Tree>>,
    num_features: Option<usize>,
}

impl RandomForest<CartLearner> {
    /// Create an unfitted forest using the bundled CART learner.
    pub fn new(config: ForestConfig) -> Self {
        let learner = CartLearner::new(config.tree.clone());
        Self::with_learner(config, learner)
    }
}

impl Default for RandomForest<CartLearner> {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl<L: TreeLearner> RandomForest<L> {
    /// Create an unfitted forest delegating tree construction to `learner`.
    pub fn with_learner(config: ForestConfig, learner: L) -> Self {
        RandomForest {
            config,
            learner,
            members: Vec::new(),
            num_features: None,
        }
    }

    /// Reassemble a fitted forest from externally persisted state.
    pub fn from_parts(
        config: ForestConfig,
        learner: L,
        members: Vec<EnsembleMember<L::Tree>>,
        num_features: usize,
    ) -> Result<Self> {
        config.validate()?;
        if members.is_empty() {
            return Err(EnsembleError::training(
                "a fitted forest needs at least one member",
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
        Ok(RandomForest {
            config,
            learner,
            members,
            num_features: Some(num_features),
        })
    }

    /// The engine configuration, including the forwarded tree parameters.
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// All trained members in fit order.
    pub fn members(&self) -> &[EnsembleMember<L::Tree>] {
        &self.members
    }

    /// Number of trained members.
    pub fn num_members(&self) -> usize {
        self.members.len()
    }

    /// True once a fit has completed.
    pub fn is_fitted(&self) -> bool {
        self.num_features.is_some()
    }

    /// Train the forest on `train`, returning the per-round history.
    pub fn fit(&mut self, train: &TrainingSet) -> Result<TrainingHistory> {
        self.fit_impl(train, None)
    }

    /// Train the forest while also tracking loss on a validation split.
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

        log::info!(
            "training random forest: {} trees, {} rows, {} of {} features per tree",
            self.config.n_estimators,
            num_rows,
            subset_size,
            num_features
        );

        self.members.clear();
        self.num_features = None;

        let mut rng = Random::with_seed(self.config.random_seed);
        let mut tracker = LossTracker::start();
        let mut train_mean = Array1::<Score>::zeros(num_rows);
        let mut validation_mean = validation.map(|v| Array1::<Score>::zeros(v.num_rows()));

        for round in 0..self.config.n_estimators {
            let subsample = draw_subsample(&mut rng, num_rows, num_features, subset_size);
            let sub_features = subsample.slice_features(train.features());
            let sub_targets = subsample.slice_targets(train.targets());

            let tree = self.learner.fit(sub_features.view(), sub_targets.view())?;
            let member = EnsembleMember::new(tree, subsample.columns);

            let prediction = member.predict(train.features())?;
            update_running_mean(&mut train_mean, &prediction, round);
            let train_rmse = rmse(train.targets(), train_mean.view());

            let validation_rmse = match (validation, validation_mean.as_mut()) {
                (Some(validation), Some(mean)) => {
                    let prediction = member.predict(validation.features())?;
                    update_running_mean(mean, &prediction, round);
                    Some(rmse(validation.targets(), mean.view()))
                }
                _ => None,
            };

            tracker.record(train_rmse, validation_rmse);
            log::debug!("round {}: train rmse {:.6}", round, train_rmse);
            self.members.push(member);
        }

        self.num_features = Some(num_features);
        let history = tracker.finish();
        log::info!(
            "random forest training finished: final train rmse {:.6}",
            history.final_train_rmse().unwrap_or(Score::NAN)
        );
        Ok(history)
    }

    /// Predict on `features`: the unweighted mean of every member's
    /// prediction, each member slicing its own stored column subset.
    pub fn predict(&self, features: ArrayView2<'_, Score>) -> Result<Array1<Score>> {
        self.predict_at_iteration(features, self.members.len())
    }

    /// Predict using only the first `num_members` members.
    pub fn predict_at_iteration(
        &self,
        features: ArrayView2<'_, Score>,
        num_members: IterationIndex,
    ) -> Result<Array1<Score>> {
        self.check_ready(features.ncols())?;
        if num_members == 0 || num_members > self.members.len() {
            return Err(EnsembleError::prediction(format!(
                "num_members must be in [1, {}], got {}",
                self.members.len(),
                num_members
            )));
        }

        // Member predictions run in parallel; the reduction stays in member
        // order so results match a sequential evaluation exactly.
        let predictions: Vec<Array1<Score>> = self.members[..num_members]
            .par_iter()
            .map(|member| member.predict(features))
            .collect::<Result<_>>()?;

        let mut sum = Array1::<Score>::zeros(features.nrows());
        for prediction in &predictions {
            sum += prediction;
        }
        Ok(sum / num_members as Score)
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

/// Fold the latest member prediction into the running ensemble mean:
/// `mean = (mean * i + prediction) / (i + 1)` with `i` the zero-based round.
fn update_running_mean(mean: &mut Array1<Score>, prediction: &Array1<Score>, round: usize) {
    let i = round as Score;
    Zip::from(mean)
        .and(prediction)
        .for_each(|m, &p| *m = (*m * i + p) / (i + 1.0));
}
