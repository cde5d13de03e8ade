//! Decision-tree ensembles.
//!
//! Trees are stored as flat node arrays with node 0 as the root. A split sends
//! a sample left when `x[feature] <= threshold`. Children must sit at a higher
//! index than their parent, which keeps every walk finite.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{FEATURE_COUNT, FeatureVector};
use crate::predictor::Classifier;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

/// How per-tree outputs combine into one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Leaves hold class labels; the most frequent label wins, ties to the lower label.
    Vote,
    /// Leaves hold additive scores; class 1 when `base_score + Σ leaves > 0`.
    Logit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub trees: Vec<Tree>,
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
}

impl Tree {
    fn validate(&self, tree_idx: usize, aggregation: Aggregation) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err(format!("tree {tree_idx} has no nodes"));
        }
        let n = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(format!(
                            "tree {tree_idx} node {i}: feature index {feature} out of range"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("tree {tree_idx} node {i}: non-finite threshold"));
                    }
                    for child in [left, right] {
                        if child <= i || child >= n {
                            return Err(format!(
                                "tree {tree_idx} node {i}: invalid child index {child}"
                            ));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("tree {tree_idx} node {i}: non-finite leaf"));
                    }
                    if aggregation == Aggregation::Vote && value.fract() != 0.0 {
                        return Err(format!(
                            "tree {tree_idx} node {i}: vote leaf {value} is not a class label"
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    fn leaf_value(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
                Node::Leaf { value } => return value,
            }
        }
    }
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("tree ensemble has no trees".to_string());
        }
        if !self.base_score.is_finite() {
            return Err("tree ensemble base_score is non-finite".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.aggregation)?;
        }
        Ok(())
    }
}

impl Classifier for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> i64 {
        let x = features.to_f64();
        match self.aggregation {
            Aggregation::Vote => {
                let mut votes: BTreeMap<i64, usize> = BTreeMap::new();
                for tree in &self.trees {
                    *votes.entry(tree.leaf_value(&x) as i64).or_default() += 1;
                }
                let mut best: Option<(i64, usize)> = None;
                for (label, count) in votes {
                    if best.is_none_or(|(_, c)| count > c) {
                        best = Some((label, count));
                    }
                }
                best.map(|(label, _)| label).unwrap_or(0)
            }
            Aggregation::Logit => {
                let score: f64 = self.base_score + self.trees.iter().map(|t| t.leaf_value(&x)).sum::<f64>();
                if score > 0.0 { 1 } else { 0 }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> Tree {
        Tree {
            nodes: vec![
                Node::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { value: left },
                Node::Leaf { value: right },
            ],
        }
    }

    fn profile(capital_gain: i64, education_num: i64) -> FeatureVector {
        FeatureVector::new([40, 4, 180000, education_num, 0, 4, 2, 4, 1, capital_gain, 0, 45, 38])
    }

    #[test]
    fn vote_takes_majority() {
        let model = TreeEnsemble {
            trees: vec![
                stump(9, 7000.0, 0.0, 1.0),
                stump(3, 12.0, 0.0, 1.0),
                stump(11, 50.0, 0.0, 1.0),
            ],
            aggregation: Aggregation::Vote,
            base_score: 0.0,
        };
        model.validate().unwrap();
        assert_eq!(model.predict(&profile(0, 10)), 0);
        assert_eq!(model.predict(&profile(10000, 14)), 1);
    }

    #[test]
    fn vote_ties_go_to_lower_label() {
        let model = TreeEnsemble {
            trees: vec![stump(9, 7000.0, 0.0, 1.0), stump(9, 7000.0, 1.0, 0.0)],
            aggregation: Aggregation::Vote,
            base_score: 0.0,
        };
        assert_eq!(model.predict(&profile(0, 10)), 0);
    }

    #[test]
    fn vote_passes_through_foreign_labels() {
        let model = TreeEnsemble {
            trees: vec![stump(9, 7000.0, 2.0, 1.0)],
            aggregation: Aggregation::Vote,
            base_score: 0.0,
        };
        model.validate().unwrap();
        assert_eq!(model.predict(&profile(0, 10)), 2);
    }

    #[test]
    fn logit_sums_leaves() {
        let model = TreeEnsemble {
            trees: vec![stump(9, 7000.0, -1.0, 2.0), stump(3, 12.0, -0.5, 0.75)],
            aggregation: Aggregation::Logit,
            base_score: -0.5,
        };
        assert_eq!(model.predict(&profile(0, 16)), 0);
        assert_eq!(model.predict(&profile(8000, 10)), 1);
    }

    #[test]
    fn validation_rejects_backward_children_and_bad_features() {
        let cyclic = TreeEnsemble {
            trees: vec![Tree {
                nodes: vec![
                    Node::Split {
                        feature: 0,
                        threshold: 1.0,
                        left: 0,
                        right: 1,
                    },
                    Node::Leaf { value: 0.0 },
                ],
            }],
            aggregation: Aggregation::Vote,
            base_score: 0.0,
        };
        assert!(cyclic.validate().unwrap_err().contains("invalid child index 0"));

        let wide = TreeEnsemble {
            trees: vec![stump(13, 1.0, 0.0, 1.0)],
            aggregation: Aggregation::Vote,
            base_score: 0.0,
        };
        assert!(wide.validate().unwrap_err().contains("feature index 13"));
    }

    #[test]
    fn vote_leaves_must_be_integral() {
        let model = TreeEnsemble {
            trees: vec![stump(9, 7000.0, 0.5, 1.0)],
            aggregation: Aggregation::Vote,
            base_score: 0.0,
        };
        assert!(model.validate().is_err());
    }
}
