//! Model artifact loading.
//!
//! The artifact is a JSON export from the training pipeline:
//!
//! ```text
//! { "kind": "linear", "weights": [13 numbers], "intercept": -3.2, "threshold": 0.5 }
//! { "kind": "tree_ensemble", "aggregation": "vote", "trees": [{ "nodes": [...] }] }
//! ```
//!
//! An optional `feature_names` array must match the feature vector's column
//! names exactly. Any failure here is fatal for the process.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Feature, FeatureVector};
use crate::error::StartupError;
use crate::models::linear::{LinearClassifier, LinearSpec};
use crate::models::tree::TreeEnsemble;
use crate::predictor::Classifier;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearSpec),
    TreeEnsemble(TreeEnsemble),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    pub model: ModelSpec,
}

/// A validated, ready-to-use model.
#[derive(Debug, Clone)]
pub enum LoadedModel {
    Linear(LinearClassifier),
    TreeEnsemble(TreeEnsemble),
}

impl LoadedModel {
    pub fn kind_name(&self) -> &'static str {
        match self {
            LoadedModel::Linear(_) => "linear",
            LoadedModel::TreeEnsemble(_) => "tree_ensemble",
        }
    }
}

impl Classifier for LoadedModel {
    fn predict(&self, features: &FeatureVector) -> i64 {
        match self {
            LoadedModel::Linear(m) => m.predict(features),
            LoadedModel::TreeEnsemble(m) => m.predict(features),
        }
    }
}

/// Load and validate the artifact at `path`.
pub fn load_model(path: &Path) -> Result<LoadedModel, StartupError> {
    let file = File::open(path).map_err(|e| {
        let reason = if e.kind() == ErrorKind::NotFound {
            format!("Model file '{}' not found. Please supply it first.", path.display())
        } else {
            format!("Failed to open model file '{}': {e}", path.display())
        };
        StartupError::new(path, reason)
    })?;

    read_model(BufReader::new(file))
        .map_err(|reason| StartupError::new(path, format!("Invalid model file '{}': {reason}", path.display())))
}

/// Parse and validate an artifact from any reader.
pub fn read_model<R: Read>(reader: R) -> Result<LoadedModel, String> {
    let artifact: ArtifactFile = serde_json::from_reader(reader).map_err(|e| e.to_string())?;

    if let Some(names) = &artifact.feature_names {
        let expected: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
        if names.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(format!(
                "feature_names {names:?} do not match expected columns {expected:?}"
            ));
        }
    }

    match artifact.model {
        ModelSpec::Linear(spec) => Ok(LoadedModel::Linear(LinearClassifier::from_spec(&spec)?)),
        ModelSpec::TreeEnsemble(ensemble) => {
            ensemble.validate()?;
            Ok(LoadedModel::TreeEnsemble(ensemble))
        }
    }
}
