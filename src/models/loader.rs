//! Loading of predictive models from disk.

use crate::error::ModelError;
use crate::models::PredictiveModel;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Linear-logistic model: `sigmoid(weights . features + bias)`.
///
/// Stored as a JSON document with `name`, `weights` and `bias` fields.
/// Deterministic by construction, which is what the scoring contract
/// requires of any configured model.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub name: String,
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl PredictiveModel for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.weights.len() {
            return Err(ModelError::FeatureShape {
                expected: self.weights.len(),
                got: features.len(),
            });
        }

        let z: f64 = self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;

        Ok(sigmoid(z))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Load a model from a JSON file.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Arc<dyn PredictiveModel>, ModelError> {
    let path = path.as_ref();

    let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let model: LinearModel = serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    info!(
        model = %model.name,
        path = %path.display(),
        features = model.weights.len(),
        "Loaded predictive model"
    );

    Ok(Arc::new(model))
}
