//! Logistic (linear) classifier.
//!
//! Decision rule: `sigmoid(w · x + b) >= threshold` → class 1, else class 0.

use nalgebra::SVector;
use serde::{Deserialize, Serialize};

use crate::domain::{FEATURE_COUNT, FeatureVector};
use crate::predictor::Classifier;

fn default_threshold() -> f64 {
    0.5
}

/// Linear model as stored in the artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSpec {
    pub weights: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    weights: SVector<f64, FEATURE_COUNT>,
    intercept: f64,
    threshold: f64,
}

impl LinearClassifier {
    /// Validate a stored spec and build the classifier.
    pub fn from_spec(spec: &LinearSpec) -> Result<Self, String> {
        if spec.weights.len() != FEATURE_COUNT {
            return Err(format!(
                "linear model has {} weights, expected {FEATURE_COUNT}",
                spec.weights.len()
            ));
        }
        if !spec.weights.iter().all(|w| w.is_finite()) || !spec.intercept.is_finite() {
            return Err("linear model has non-finite coefficients".to_string());
        }
        if !(spec.threshold > 0.0 && spec.threshold < 1.0) {
            return Err(format!(
                "linear model threshold {} must lie in (0, 1)",
                spec.threshold
            ));
        }
        Ok(Self {
            weights: SVector::from_row_slice(&spec.weights),
            intercept: spec.intercept,
            threshold: spec.threshold,
        })
    }

    /// Positive-class probability.
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let x = SVector::<f64, FEATURE_COUNT>::from(features.to_f64());
        let margin = self.weights.dot(&x) + self.intercept;
        1.0 / (1.0 + (-margin).exp())
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &FeatureVector) -> i64 {
        if self.probability(features) >= self.threshold { 1 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gain_only(weight: f64, intercept: f64) -> LinearSpec {
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[9] = weight;
        LinearSpec {
            weights,
            intercept,
            threshold: 0.5,
        }
    }

    #[test]
    fn decision_follows_margin_sign() {
        let model = LinearClassifier::from_spec(&gain_only(0.001, -5.0)).unwrap();
        let low = FeatureVector::new([30, 4, 180000, 10, 1, 9, 3, 4, 1, 0, 0, 40, 38]);
        let high = FeatureVector::new([30, 4, 180000, 10, 1, 9, 3, 4, 1, 15000, 0, 40, 38]);
        assert_eq!(model.predict(&low), 0);
        assert_eq!(model.predict(&high), 1);
        assert!(model.probability(&high) > 0.99);
    }

    #[test]
    fn rejects_wrong_weight_count() {
        let spec = LinearSpec {
            weights: vec![0.0; 12],
            intercept: 0.0,
            threshold: 0.5,
        };
        let err = LinearClassifier::from_spec(&spec).unwrap_err();
        assert!(err.contains("12 weights"));
    }

    #[test]
    fn rejects_degenerate_threshold() {
        let mut spec = gain_only(1.0, 0.0);
        spec.threshold = 1.0;
        assert!(LinearClassifier::from_spec(&spec).is_err());
    }
}
