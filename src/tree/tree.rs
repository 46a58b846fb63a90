//! Fitted regression tree structure with prediction support.

use crate::core::error::{EnsembleError, Result};
use crate::core::traits::RegressionModel;
use crate::core::types::Score;
use crate::tree::node::TreeNode;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// A fitted axis-aligned regression tree.
///
/// Nodes are stored in a contiguous vector with the root at index 0. The
/// tree is tied to the column layout it was fitted on: prediction inputs
/// must carry the same column count, in the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
    num_features: usize,
    num_leaves: usize,
    max_depth: usize,
}

impl RegressionTree {
    /// Assemble a tree from a node arena built by a learner.
    pub(crate) fn from_nodes(nodes: Vec<TreeNode>, num_features: usize) -> Result<Self> {
        if nodes.is_empty() {
            return Err(EnsembleError::tree_construction("tree has no nodes"));
        }
        for node in &nodes {
            for child in [node.left_child(), node.right_child()].into_iter().flatten() {
                if child >= nodes.len() {
                    return Err(EnsembleError::tree_construction(format!(
                        "child index {} out of bounds for {} nodes",
                        child,
                        nodes.len()
                    )));
                }
            }
        }
        let num_leaves = nodes.iter().filter(|n| n.is_leaf()).count();
        let max_depth = nodes.iter().map(TreeNode::depth).max().unwrap_or(0);
        Ok(RegressionTree {
            nodes,
            num_features,
            num_leaves,
            max_depth,
        })
    }

    /// Returns the number of nodes in the tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaf nodes in the tree.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Returns the realized tree depth.
    pub fn depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the column count the tree was fitted on.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    fn predict_row(&self, row: ArrayView1<'_, Score>) -> Score {
        let mut node_index = 0;
        loop {
            let node = &self.nodes[node_index];
            if node.is_leaf() {
                return node.leaf_output().unwrap_or(0.0);
            }
            // from_nodes verified split fields and child indices
            let feature = node.split_feature().unwrap_or(0);
            let threshold = node.split_threshold().unwrap_or(0.0);
            node_index = if row[feature] <= threshold {
                node.left_child().unwrap_or(0)
            } else {
                node.right_child().unwrap_or(0)
            };
        }
    }
}

impl RegressionModel for RegressionTree {
    fn predict_batch(&self, features: ArrayView2<'_, Score>) -> Result<Array1<Score>> {
        if features.ncols() != self.num_features {
            return Err(EnsembleError::dimension_mismatch(
                format!("{} feature columns", self.num_features),
                format!("{} feature columns", features.ncols()),
            ));
        }
        let mut predictions = Array1::zeros(features.nrows());
        for (i, row) in features.axis_iter(Axis(0)).enumerate() {
            predictions[i] = self.predict_row(row);
        }
        Ok(predictions)
    }
}
