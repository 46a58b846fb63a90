//! Tree node representation for the bundled regression tree.

use crate::core::types::{FeatureIndex, NodeIndex, Score};
use serde::{Deserialize, Serialize};

/// Tree node supporting both internal and leaf nodes.
///
/// Internal nodes carry split information and child indices into the owning
/// tree's node arena. Leaf nodes carry the prediction value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Left child node index (for internal nodes only)
    left_child: Option<NodeIndex>,
    /// Right child node index (for internal nodes only)
    right_child: Option<NodeIndex>,
    /// Split feature index (for internal nodes only)
    split_feature: Option<FeatureIndex>,
    /// Split threshold value (for internal nodes only)
    split_threshold: Option<f64>,
    /// Prediction value (for leaf nodes only)
    leaf_output: Option<Score>,
    /// Number of training samples routed through this node
    data_count: usize,
    /// Node depth in the tree
    depth: usize,
    /// Whether this node is a leaf
    is_leaf: bool,
}

impl TreeNode {
    /// Creates a new leaf node with the given prediction value.
    pub fn new_leaf(output: Score, data_count: usize, depth: usize) -> Self {
        TreeNode {
            left_child: None,
            right_child: None,
            split_feature: None,
            split_threshold: None,
            leaf_output: Some(output),
            data_count,
            depth,
            is_leaf: true,
        }
    }

    /// Creates a new internal node with split information.
    pub fn new_internal(
        left_child: NodeIndex,
        right_child: NodeIndex,
        split_feature: FeatureIndex,
        split_threshold: f64,
        data_count: usize,
        depth: usize,
    ) -> Self {
        TreeNode {
            left_child: Some(left_child),
            right_child: Some(right_child),
            split_feature: Some(split_feature),
            split_threshold: Some(split_threshold),
            leaf_output: None,
            data_count,
            depth,
            is_leaf: false,
        }
    }

    /// Returns true if this node is a leaf node.
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// Returns the left child node index (for internal nodes).
    pub fn left_child(&self) -> Option<NodeIndex> {
        self.left_child
    }

    /// Returns the right child node index (for internal nodes).
    pub fn right_child(&self) -> Option<NodeIndex> {
        self.right_child
    }

    /// Returns the split feature index (for internal nodes).
    pub fn split_feature(&self) -> Option<FeatureIndex> {
        self.split_feature
    }

    /// Returns the split threshold (for internal nodes).
    pub fn split_threshold(&self) -> Option<f64> {
        self.split_threshold
    }

    /// Returns the prediction value (for leaf nodes).
    pub fn leaf_output(&self) -> Option<Score> {
        self.leaf_output
    }

    /// Returns the number of training samples routed through this node.
    pub fn data_count(&self) -> usize {
        self.data_count
    }

    /// Returns the node depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
