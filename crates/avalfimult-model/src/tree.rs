//! CART decision tree classifier
//!
//! Trees are stored in flattened parallel arrays: node `i` splits on
//! `feature[i]` at `threshold[i]`, sending samples with
//! `x[feature] <= threshold` to `children_left[i]` and the rest to
//! `children_right[i]`. Leaves have both children set to [`LEAF`] and carry
//! per-class weights in `value[i]`.

use avalfimult_core::{Error, FeatureVector, Label, Result, FEATURE_COUNT};

use crate::classifier::{argmax_class, Classifier};

/// Child index marking a leaf node
pub const LEAF: i64 = -1;

/// A fitted CART binary/multi-class decision tree
#[derive(Debug, Clone)]
pub struct DecisionTreeClassifier {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<Vec<f64>>,
    classes: Vec<f64>,
    depth: usize,
}

impl DecisionTreeClassifier {
    /// Build a tree from its flattened node arrays, validating the structure
    pub fn new(
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<i64>,
        threshold: Vec<f64>,
        value: Vec<Vec<f64>>,
        classes: Vec<f64>,
    ) -> Result<Self> {
        let n = children_left.len();
        if n == 0 {
            return Err(Error::artifact("decision tree has no nodes"));
        }
        if [children_right.len(), feature.len(), threshold.len(), value.len()]
            .iter()
            .any(|&len| len != n)
        {
            return Err(Error::artifact(format!(
                "decision tree arrays disagree on node count (children_left={}, children_right={}, feature={}, threshold={}, value={})",
                n,
                children_right.len(),
                feature.len(),
                threshold.len(),
                value.len()
            )));
        }
        if classes.is_empty() {
            return Err(Error::artifact("decision tree has no classes"));
        }

        for node in 0..n {
            let (left, right) = (children_left[node], children_right[node]);
            if value[node].len() != classes.len() {
                return Err(Error::artifact(format!(
                    "node {} has {} class weights, expected {}",
                    node,
                    value[node].len(),
                    classes.len()
                )));
            }
            if left == LEAF && right == LEAF {
                continue;
            }
            // Children always follow their parent; this also rules out cycles
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(Error::artifact(format!(
                        "node {node} has invalid child index {child}"
                    )));
                }
            }
            if feature[node] < 0 || feature[node] >= FEATURE_COUNT as i64 {
                return Err(Error::artifact(format!(
                    "node {} splits on feature {}, expected 0..{}",
                    node, feature[node], FEATURE_COUNT
                )));
            }
            if threshold[node].is_nan() {
                return Err(Error::artifact(format!("node {node} has a NaN threshold")));
            }
        }

        let depth = Self::measure_depth(&children_left, &children_right);

        Ok(Self {
            children_left,
            children_right,
            feature,
            threshold,
            value,
            classes,
            depth,
        })
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn measure_depth(left: &[i64], right: &[i64]) -> usize {
        let mut depths = vec![0usize; left.len()];
        let mut max = 0;
        // Children have larger indices than their parent, so one forward pass suffices
        for node in 0..left.len() {
            for child in [left[node], right[node]] {
                if child != LEAF {
                    let d = depths[node] + 1;
                    depths[child as usize] = d;
                    max = max.max(d);
                }
            }
        }
        max
    }

    fn leaf_for(&self, features: &FeatureVector) -> Result<usize> {
        let mut node = 0usize;
        for _ in 0..=self.node_count() {
            let left = self.children_left[node];
            if left == LEAF {
                return Ok(node);
            }
            let x = features
                .get(self.feature[node] as usize)
                .ok_or_else(|| Error::internal(format!("node {node} feature out of range")))?;
            node = if x <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
        Err(Error::internal("decision tree walk did not reach a leaf"))
    }
}

impl Classifier for DecisionTreeClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        let leaf = self.leaf_for(features)?;
        argmax_class(&self.value[leaf], &self.classes)
            .ok_or_else(|| Error::internal(format!("leaf {leaf} has no class weights")))
    }

    fn name(&self) -> &str {
        "decision_tree"
    }

    fn identity(&self) -> String {
        format!(
            "DecisionTreeClassifier(nodes={}, depth={}, classes={})",
            self.node_count(),
            self.depth,
            self.classes.len()
        )
    }
}
