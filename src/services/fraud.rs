//! Fraud detection pipeline: rules plus optional model, alert decision.

use crate::audit::{AuditRecord, AuditSink};
use crate::error::ModelError;
use crate::features::FraudFeatures;
use crate::models::{round3, PredictiveModel};
use crate::rules;
use crate::types::{FraudRequest, FraudResponse};
use std::sync::Arc;
use tracing::info;

/// Fraud detection service.
///
/// Combines the fixed business rules with an optional predictive model.
/// Without a model the risk is the rule score alone, keeping evaluation
/// fully deterministic.
pub struct FraudDetector {
    model: Option<Arc<dyn PredictiveModel>>,
    alert_threshold: f64,
    audit: Arc<dyn AuditSink>,
}

impl FraudDetector {
    pub fn new(
        model: Option<Arc<dyn PredictiveModel>>,
        alert_threshold: f64,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            model,
            alert_threshold,
            audit,
        }
    }

    pub fn alert_threshold(&self) -> f64 {
        self.alert_threshold
    }

    /// Evaluate a transaction and decide whether to raise an alert.
    pub fn evaluate(&self, request: &FraudRequest) -> Result<FraudResponse, ModelError> {
        let features = FraudFeatures::from_request(request);

        let rule_score = rules::rule_score(&features);
        let model_score = match &self.model {
            Some(model) => model.predict(&features.to_vector())?.clamp(0.0, 1.0),
            None => 0.0,
        };

        let risk = round3((rule_score + model_score).min(1.0));
        let alert = risk >= self.alert_threshold;
        let message = if alert {
            "suspicious transaction"
        } else {
            "normal transaction"
        };

        info!(
            transaction_id = %request.transaction_id,
            client_id = %request.client_id,
            risk,
            alert,
            "Fraud evaluation complete"
        );
        self.audit.emit(
            AuditRecord::new("fraud_evaluation")
                .field("transaction_id", request.transaction_id.clone())
                .field("client_id", request.client_id.clone())
                .field("risk", risk)
                .field("alert", alert),
        );

        Ok(FraudResponse {
            transaction_id: request.transaction_id.clone(),
            client_id: request.client_id.clone(),
            risk,
            alert,
            message: message.to_string(),
        })
    }
}
