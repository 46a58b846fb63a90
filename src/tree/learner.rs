//! CART-style learner growing regression trees by variance reduction.

use crate::config::TreeParams;
use crate::core::error::{EnsembleError, Result};
use crate::core::traits::TreeLearner;
use crate::core::types::{FeatureIndex, NodeIndex, Score};
use crate::tree::node::TreeNode;
use crate::tree::tree::RegressionTree;
use ndarray::{ArrayView1, ArrayView2};
use std::cmp::Ordering;

// Minimum squared-error improvement for a split to be kept.
const MIN_GAIN: Score = 1e-12;

/// Default learner for the ensemble engines.
///
/// Grows axis-aligned regression trees top-down. Each split minimizes the
/// summed squared error of the two children over every candidate feature
/// and midpoint threshold; leaves predict the mean target of their samples.
/// Growth stops at the configured depth limit, below `min_samples_split`,
/// or when no split improves on the parent.
#[derive(Debug, Clone)]
pub struct CartLearner {
    params: TreeParams,
}

impl CartLearner {
    /// Create a learner with the given tree parameters.
    pub fn new(params: TreeParams) -> Self {
        CartLearner { params }
    }

    /// The tree parameters applied to every fitted tree.
    pub fn params(&self) -> &TreeParams {
        &self.params
    }
}

impl Default for CartLearner {
    fn default() -> Self {
        Self::new(TreeParams::default())
    }
}

impl TreeLearner for CartLearner {
    type Tree = RegressionTree;

    fn fit(
        &self,
        features: ArrayView2<'_, Score>,
        targets: ArrayView1<'_, Score>,
    ) -> Result<RegressionTree> {
        if features.nrows() == 0 || features.ncols() == 0 {
            return Err(EnsembleError::tree_construction(
                "cannot fit a tree on an empty matrix",
            ));
        }
        if targets.len() != features.nrows() {
            return Err(EnsembleError::dimension_mismatch(
                format!("{} target values", features.nrows()),
                format!("{} target values", targets.len()),
            ));
        }

        let mut nodes = Vec::new();
        let indices: Vec<usize> = (0..features.nrows()).collect();
        build_node(&mut nodes, &features, &targets, indices, 0, &self.params);
        RegressionTree::from_nodes(nodes, features.ncols())
    }
}

/// Recursively grow the subtree for `indices`, returning its root index.
fn build_node(
    nodes: &mut Vec<TreeNode>,
    features: &ArrayView2<'_, Score>,
    targets: &ArrayView1<'_, Score>,
    indices: Vec<usize>,
    depth: usize,
    params: &TreeParams,
) -> NodeIndex {
    let count = indices.len();
    let mean = indices.iter().map(|&i| targets[i]).sum::<Score>() / count as Score;
    let index = nodes.len();
    nodes.push(TreeNode::new_leaf(mean, count, depth));

    let depth_limited = params.max_depth.is_some_and(|limit| depth >= limit);
    if depth_limited || count < params.min_samples_split {
        return index;
    }

    let Some(split) = best_split(features, targets, &indices) else {
        return index;
    };

    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| features[[i, split.feature]] <= split.threshold);

    let left = build_node(nodes, features, targets, left_rows, depth + 1, params);
    let right = build_node(nodes, features, targets, right_rows, depth + 1, params);
    nodes[index] = TreeNode::new_internal(left, right, split.feature, split.threshold, count, depth);
    index
}

struct SplitCandidate {
    feature: FeatureIndex,
    threshold: f64,
    sse: Score,
}

/// Exhaustive best-split search over every feature and midpoint threshold.
///
/// Returns `None` when no candidate improves on the parent node's squared
/// error, which covers constant targets and constant feature columns.
fn best_split(
    features: &ArrayView2<'_, Score>,
    targets: &ArrayView1<'_, Score>,
    indices: &[usize],
) -> Option<SplitCandidate> {
    let n = indices.len();
    let total_sum: Score = indices.iter().map(|&i| targets[i]).sum();
    let total_sq: Score = indices.iter().map(|&i| targets[i] * targets[i]).sum();
    let parent_sse = total_sq - total_sum * total_sum / n as Score;

    let mut best: Option<SplitCandidate> = None;
    for feature in 0..features.ncols() {
        let mut pairs: Vec<(Score, Score)> = indices
            .iter()
            .map(|&i| (features[[i, feature]], targets[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for i in 0..n - 1 {
            let (value, target) = pairs[i];
            left_sum += target;
            left_sq += target * target;
            // No boundary between equal feature values
            if value == pairs[i + 1].0 {
                continue;
            }
            let left_n = (i + 1) as Score;
            let right_n = (n - i - 1) as Score;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);
            if best.as_ref().map_or(true, |b| sse < b.sse) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: 0.5 * (value + pairs[i + 1].0),
                    sse,
                });
            }
        }
    }

    best.filter(|b| parent_sse - b.sse > MIN_GAIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::RegressionModel;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_unbounded_tree_fits_exactly() {
        let features = arr2(&[[1.0], [2.0], [3.0], [4.0]]);
        let targets = arr1(&[1.0, 2.0, 3.0, 4.0]);
        let learner = CartLearner::default();

        let tree = learner.fit(features.view(), targets.view()).unwrap();
        let predictions = tree.predict_batch(features.view()).unwrap();
        for (prediction, target) in predictions.iter().zip(targets.iter()) {
            assert_abs_diff_eq!(*prediction, *target, epsilon = 1e-12);
        }
        assert_eq!(tree.num_leaves(), 4);
    }

    #[test]
    fn test_depth_limit_produces_stump() {
        let features = arr2(&[[1.0], [2.0], [3.0], [4.0]]);
        let targets = arr1(&[1.0, 2.0, 3.0, 4.0]);
        let learner = CartLearner::new(TreeParams {
            max_depth: Some(1),
            ..TreeParams::default()
        });

        let tree = learner.fit(features.view(), targets.view()).unwrap();
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.num_leaves(), 2);

        // A depth-1 tree on this data splits at 2.5 and predicts child means
        let predictions = tree.predict_batch(features.view()).unwrap();
        assert_abs_diff_eq!(predictions[0], 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(predictions[3], 3.5, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_targets_single_leaf() {
        let features = arr2(&[[1.0], [2.0], [3.0]]);
        let targets = arr1(&[7.0, 7.0, 7.0]);
        let learner = CartLearner::default();

        let tree = learner.fit(features.view(), targets.view()).unwrap();
        assert_eq!(tree.num_nodes(), 1);

        let predictions = tree.predict_batch(arr2(&[[10.0]]).view()).unwrap();
        assert_abs_diff_eq!(predictions[0], 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_feature_cannot_split() {
        let features = arr2(&[[5.0], [5.0], [5.0], [5.0]]);
        let targets = arr1(&[1.0, 2.0, 3.0, 4.0]);
        let learner = CartLearner::default();

        let tree = learner.fit(features.view(), targets.view()).unwrap();
        assert_eq!(tree.num_nodes(), 1);
    }

    #[test]
    fn test_min_samples_split_respected() {
        let features = arr2(&[[1.0], [2.0], [3.0], [4.0]]);
        let targets = arr1(&[1.0, 2.0, 3.0, 4.0]);
        let learner = CartLearner::new(TreeParams {
            min_samples_split: 3,
            ..TreeParams::default()
        });

        let tree = learner.fit(features.view(), targets.view()).unwrap();
        // Two-sample nodes stay leaves, so singleton leaves cannot appear
        assert_eq!(tree.num_leaves(), 2);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_two_feature_split_picks_informative_column() {
        // Column 0 is noise, column 1 separates the targets
        let features = arr2(&[
            [0.3, 1.0],
            [0.1, 1.0],
            [0.2, 5.0],
            [0.4, 5.0],
        ]);
        let targets = arr1(&[-1.0, -1.0, 1.0, 1.0]);
        let learner = CartLearner::new(TreeParams {
            max_depth: Some(1),
            ..TreeParams::default()
        });

        let tree = learner.fit(features.view(), targets.view()).unwrap();
        let predictions = tree.predict_batch(features.view()).unwrap();
        assert_eq!(predictions.to_vec(), vec![-1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let features = arr2(&[[1.0], [2.0]]);
        let targets = arr1(&[1.0, 2.0, 3.0]);
        let learner = CartLearner::default();
        assert!(learner.fit(features.view(), targets.view()).is_err());
    }
}
