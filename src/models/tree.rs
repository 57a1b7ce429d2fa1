//! Regression tree ensembles (random forest / gradient boosting).
//!
//! Each tree is stored as parallel node arrays. Node 0 is the root; a node is a
//! leaf when its left child is `-1`. Rows go left when
//! `row[feature] <= threshold` (a NaN feature therefore goes right).
//!
//! Validation requires every child index to be greater than its parent, which
//! rules out cycles and guarantees traversal terminates.

use serde::{Deserialize, Serialize};

use crate::artifact::Predictor;
use crate::error::PipelineError;

/// Marker for "no child" in `children_left` / `children_right`.
pub const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    /// Split feature per node (ignored for leaves).
    pub feature: Vec<i64>,
    /// Split threshold per node (ignored for leaves).
    pub threshold: Vec<f64>,
    /// Leaf output per node (ignored for internal nodes).
    pub value: Vec<f64>,
}

impl RegressionTree {
    pub fn num_nodes(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.num_nodes();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err("tree node arrays have different lengths".to_string());
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                if right != LEAF {
                    return Err(format!("node {node} has a right child but no left child"));
                }
                if !self.value[node].is_finite() {
                    return Err(format!("leaf {node} has a non-finite value"));
                }
                continue;
            }
            for child in [left, right] {
                let valid = usize::try_from(child).is_ok_and(|c| c > node && c < n);
                if !valid {
                    return Err(format!("node {node} has invalid child index {child}"));
                }
            }
            let valid_feature = usize::try_from(self.feature[node]).is_ok_and(|f| f < n_features);
            if !valid_feature {
                return Err(format!(
                    "node {node} splits on feature {} (model has {n_features})",
                    self.feature[node]
                ));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {node} has a NaN threshold"));
            }
        }
        Ok(())
    }

    /// Walk a validated tree to its leaf value.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            let next = if row[feature] <= self.threshold[node] {
                self.children_left[node]
            } else {
                self.children_right[node]
            };
            node = next as usize;
        }
        self.value[node]
    }
}

/// How per-tree outputs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of tree outputs (random forest).
    #[default]
    Mean,
    /// Sum of tree outputs (boosting; leaf values already include the learning rate).
    Sum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub n_features: usize,
    pub trees: Vec<RegressionTree>,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.n_features == 0 {
            return Err(PipelineError::ArtifactMalformed("tree ensemble has no features".to_string()));
        }
        if self.trees.is_empty() {
            return Err(PipelineError::ArtifactMalformed("tree ensemble has no trees".to_string()));
        }
        if !self.base_score.is_finite() {
            return Err(PipelineError::ArtifactMalformed(
                "tree ensemble has a non-finite base score".to_string(),
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| PipelineError::ArtifactMalformed(format!("tree {i}: {e}")))?;
        }
        Ok(())
    }
}

impl Predictor for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, row: &[f64]) -> Result<f64, PipelineError> {
        super::check_row_width(self.n_features, row)?;
        let sum: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        let combined = match self.aggregation {
            Aggregation::Mean => sum / self.trees.len() as f64,
            Aggregation::Sum => sum,
        };
        super::finite_prediction(self.base_score + combined)
    }

    fn describe(&self) -> String {
        format!(
            "tree_ensemble (n_features={}, trees={}, aggregation={:?})",
            self.n_features,
            self.trees.len(),
            self.aggregation
        )
    }
}
