//! Loss computation and training-history tracking.
//!
//! Both engines record one [`MetricSample`] per ensemble member added. The
//! resulting [`TrainingHistory`] is what the plotting boundary renders; it
//! is immutable once a fit completes.

use crate::core::error::Result;
use crate::core::types::Score;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Root-mean-squared-error over a full split.
///
/// Computed as `sqrt(mean((y_true - y_pred)^2))`. Both vectors must have the
/// same length.
pub fn rmse(y_true: ArrayView1<'_, Score>, y_pred: ArrayView1<'_, Score>) -> Score {
    debug_assert_eq!(y_true.len(), y_pred.len());
    let n = y_true.len() as Score;
    let sum_squared_error: Score = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p) * (t - p))
        .sum();
    (sum_squared_error / n).sqrt()
}

/// One training-progress measurement, taken after a member was added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Wall-clock seconds since the start of the fit call.
    pub elapsed_seconds: f64,
    /// RMSE of the running ensemble prediction on the training split.
    pub train_rmse: Score,
    /// RMSE on the validation split, when one was supplied.
    pub validation_rmse: Option<Score>,
}

/// The ordered sequence of metric samples produced by one fit call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    samples: Vec<MetricSample>,
}

impl TrainingHistory {
    /// All samples in member order.
    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    /// Number of recorded samples (one per ensemble member).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples were recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The last recorded sample.
    pub fn last(&self) -> Option<&MetricSample> {
        self.samples.last()
    }

    /// Training RMSE after the final member.
    pub fn final_train_rmse(&self) -> Option<Score> {
        self.last().map(|s| s.train_rmse)
    }

    /// Smallest validation RMSE seen across all members.
    pub fn best_validation_rmse(&self) -> Option<Score> {
        self.samples
            .iter()
            .filter_map(|s| s.validation_rmse)
            .fold(None, |best, v| match best {
                Some(b) if b <= v => Some(b),
                _ => Some(v),
            })
    }

    /// Exports the history to a JSON representation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Imports a history from a JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Accumulates metric samples during a fit call.
///
/// Elapsed times come from a monotonic clock started at construction, so the
/// recorded sequence is non-decreasing.
#[derive(Debug)]
pub struct LossTracker {
    start: Instant,
    samples: Vec<MetricSample>,
}

impl LossTracker {
    /// Start tracking; the wall clock begins now.
    pub fn start() -> Self {
        LossTracker {
            start: Instant::now(),
            samples: Vec::new(),
        }
    }

    /// Append one sample stamped with the elapsed time since `start`.
    pub fn record(&mut self, train_rmse: Score, validation_rmse: Option<Score>) {
        self.samples.push(MetricSample {
            elapsed_seconds: self.start.elapsed().as_secs_f64(),
            train_rmse,
            validation_rmse,
        });
    }

    /// Finish tracking and hand over the immutable history.
    pub fn finish(self) -> TrainingHistory {
        TrainingHistory {
            samples: self.samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    #[test]
    fn test_rmse_zero_for_identical() {
        let y = arr1(&[1.0, 2.0, 3.0]);
        assert_eq!(rmse(y.view(), y.view()), 0.0);
    }

    #[test]
    fn test_rmse_symmetric() {
        let a = arr1(&[1.0, 2.0, 3.0]);
        let b = arr1(&[2.0, 0.0, 5.0]);
        assert_eq!(rmse(a.view(), b.view()), rmse(b.view(), a.view()));
    }

    #[test]
    fn test_rmse_known_value() {
        let y_true = arr1(&[0.0, 0.0]);
        let y_pred = arr1(&[3.0, 4.0]);
        // sqrt((9 + 16) / 2)
        assert_abs_diff_eq!(
            rmse(y_true.view(), y_pred.view()),
            (12.5f64).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_tracker_elapsed_non_decreasing() {
        let mut tracker = LossTracker::start();
        for i in 0..5 {
            tracker.record(i as f64, None);
        }
        let history = tracker.finish();
        assert_eq!(history.len(), 5);
        for pair in history.samples().windows(2) {
            assert!(pair[0].elapsed_seconds <= pair[1].elapsed_seconds);
        }
    }

    #[test]
    fn test_history_accessors() {
        let mut tracker = LossTracker::start();
        tracker.record(2.0, Some(3.0));
        tracker.record(1.0, Some(2.5));
        tracker.record(0.5, Some(2.7));
        let history = tracker.finish();

        assert_eq!(history.final_train_rmse(), Some(0.5));
        assert_eq!(history.best_validation_rmse(), Some(2.5));
        assert!(!history.is_empty());
    }

    #[test]
    fn test_history_json_round_trip() {
        let mut tracker = LossTracker::start();
        tracker.record(1.0, None);
        tracker.record(0.5, Some(0.8));
        let history = tracker.finish();

        let json = history.to_json().unwrap();
        let restored = TrainingHistory::from_json(&json).unwrap();
        assert_eq!(history, restored);
    }
}
