//! Bundled single-tree regressor.
//!
//! The ensemble engines only depend on the
//! [`TreeLearner`](crate::core::traits::TreeLearner) and
//! [`RegressionModel`](crate::core::traits::RegressionModel) traits; this
//! module provides the default implementation of that seam, an axis-aligned
//! regression tree grown by variance-reduction splitting.

pub mod learner;
pub mod node;
pub mod tree;

pub use learner::CartLearner;
pub use node::TreeNode;
pub use tree::RegressionTree;
