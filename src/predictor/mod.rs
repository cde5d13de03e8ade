//! Model invocation and the scoring entry point.
//!
//! - `Classifier` is the seam to the opaque model: one feature vector in, one
//!   class label out.
//! - `PredictorAdapter` maps that label onto `PredictionResult`, refusing
//!   anything that is not 0 or 1.
//! - `IncomeService` owns a loaded model and exposes `encode_and_predict`.
//!   It can only be constructed through `start`, so a failed load leaves
//!   nothing that could accept a request.

use std::sync::Mutex;

use serde::Serialize;

use crate::domain::{FeatureVector, PredictionResult, RawInput};
use crate::encoding::encode;
use crate::error::{PredictError, StartupError};

/// A model that is safe to call from many threads at once.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> i64;
}

/// A model whose predict call mutates internal state.
pub trait StatefulClassifier: Send {
    fn predict(&mut self, features: &FeatureVector) -> i64;
}

/// Serializes calls into a non-reentrant model.
///
/// The mutex guards the predict call only; encoding happens outside it.
pub struct Serialized<M> {
    inner: Mutex<M>,
}

impl<M> Serialized<M> {
    pub fn new(model: M) -> Self {
        Self {
            inner: Mutex::new(model),
        }
    }
}

impl<M: StatefulClassifier> Classifier for Serialized<M> {
    fn predict(&self, features: &FeatureVector) -> i64 {
        let mut model = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        model.predict(features)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, features: &FeatureVector) -> i64 {
        (**self).predict(features)
    }
}

impl<C: Classifier + ?Sized> Classifier for std::sync::Arc<C> {
    fn predict(&self, features: &FeatureVector) -> i64 {
        (**self).predict(features)
    }
}

/// Lifecycle of the model artifact within one process.
///
/// Only named in the startup transition log; a live `IncomeService` is
/// always `Loaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    Unloaded,
    Loaded,
    Failed,
}

impl std::fmt::Display for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ModelState::Unloaded => "unloaded",
            ModelState::Loaded => "loaded",
            ModelState::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

pub struct PredictorAdapter<M> {
    model: M,
}

impl<M: Classifier> PredictorAdapter<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, PredictError> {
        match self.model.predict(features) {
            1 => Ok(PredictionResult::HighIncome),
            0 => Ok(PredictionResult::StandardIncome),
            value => {
                tracing::error!(value, "model returned a label outside {{0, 1}}");
                Err(PredictError::UnexpectedModelOutput { value })
            }
        }
    }
}

/// Encoded features and the decision made from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scored {
    pub features: FeatureVector,
    pub prediction: PredictionResult,
}

pub struct IncomeService<M> {
    adapter: PredictorAdapter<M>,
}

impl<M: Classifier> IncomeService<M> {
    /// Run `loader` once and, on success, return a service ready for requests.
    ///
    /// A failure is handed back to the caller, which reports it. The transition
    /// itself is only logged at debug level.
    pub fn start<F>(loader: F) -> Result<Self, StartupError>
    where
        F: FnOnce() -> Result<M, StartupError>,
    {
        let from = ModelState::Unloaded;
        match loader() {
            Ok(model) => {
                tracing::info!("model state: {from} -> {}", ModelState::Loaded);
                Ok(Self {
                    adapter: PredictorAdapter::new(model),
                })
            }
            Err(err) => {
                tracing::debug!(
                    path = %err.path.display(),
                    "model state: {from} -> {}: {err}",
                    ModelState::Failed
                );
                Err(err)
            }
        }
    }

    pub fn adapter(&self) -> &PredictorAdapter<M> {
        &self.adapter
    }

    pub fn encode_and_predict(&self, raw: &RawInput) -> Result<PredictionResult, PredictError> {
        self.score(raw).map(|s| s.prediction)
    }

    /// Like `encode_and_predict`, but also returns the encoded vector.
    pub fn score(&self, raw: &RawInput) -> Result<Scored, PredictError> {
        let features = encode(raw)?;
        let prediction = self.adapter.predict(&features)?;
        tracing::debug!(features = ?features.values(), prediction = prediction.short_label(), "scored");
        Ok(Scored {
            features,
            prediction,
        })
    }
}
