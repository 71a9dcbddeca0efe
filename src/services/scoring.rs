//! Credit scoring pipeline: preprocess, score, postprocess.

use crate::audit::{AuditRecord, AuditSink};
use crate::error::ModelError;
use crate::features::CreditFeatures;
use crate::models::{fallback, round3, PredictiveModel};
use crate::types::{Decision, ScoreRequest, ScoreResponse};
use std::sync::Arc;
use tracing::info;

/// Credit scoring service.
///
/// Holds the optional predictive model and the decision threshold, both
/// fixed at startup. Evaluation is a pure function of the request plus this
/// configuration, so concurrent calls need no coordination.
pub struct CreditScorer {
    model: Option<Arc<dyn PredictiveModel>>,
    threshold: f64,
    audit: Arc<dyn AuditSink>,
}

impl CreditScorer {
    pub fn new(
        model: Option<Arc<dyn PredictiveModel>>,
        threshold: f64,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            model,
            threshold,
            audit,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a client and derive the accept/reject decision.
    pub fn evaluate(&self, request: &ScoreRequest) -> Result<ScoreResponse, ModelError> {
        let features = CreditFeatures::from_request(request);

        let score = match &self.model {
            Some(model) => round3(model.predict(&features.to_vector())?.clamp(0.0, 1.0)),
            None => fallback::credit_score(&features),
        };

        let decision = if score >= self.threshold {
            Decision::Accepted
        } else {
            Decision::Rejected
        };
        let message = format!("score = {score}, decision = {decision}");

        info!(
            client_id = %request.client_id,
            score,
            decision = %decision,
            "Credit score evaluated"
        );
        self.audit.emit(
            AuditRecord::new("scoring_evaluation")
                .field("client_id", request.client_id.clone())
                .field("score", score)
                .field("decision", decision.to_string()),
        );

        Ok(ScoreResponse {
            client_id: request.client_id.clone(),
            score,
            decision,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::LogSink;
    use crate::error::ModelError;

    #[derive(Debug)]
    struct FixedModel(f64);

    impl PredictiveModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _features: &[f64]) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    #[derive(Debug)]
    struct FailingModel;

    impl PredictiveModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict(&self, _features: &[f64]) -> Result<f64, ModelError> {
            Err(ModelError::Inference("boom".into()))
        }
    }

    fn request(income: f64, delinquency: u32, age: u32) -> ScoreRequest {
        ScoreRequest {
            client_id: "C101".to_string(),
            age,
            annual_income: income,
            delinquency_count: delinquency,
            credit_amount: None,
        }
    }

    fn scorer(model: Option<Arc<dyn PredictiveModel>>, threshold: f64) -> CreditScorer {
        CreditScorer::new(model, threshold, Arc::new(LogSink))
    }

    #[test]
    fn fallback_reference_value() {
        let result = scorer(None, 0.5).evaluate(&request(50_000.0, 0, 30)).unwrap();
        assert_eq!(result.score, 0.58);
        assert_eq!(result.decision, Decision::Accepted);
        assert_eq!(result.message, "score = 0.58, decision = accepted");
    }

    #[test]
    fn below_threshold_is_rejected() {
        // 0.3 + 0.005*10 - 0.05*3 + 0.01*2.5 = 0.225
        let result = scorer(None, 0.5).evaluate(&request(10_000.0, 3, 25)).unwrap();
        assert_eq!(result.score, 0.225);
        assert_eq!(result.decision, Decision::Rejected);
    }

    #[test]
    fn boundary_equality_accepts() {
        let result = scorer(Some(Arc::new(FixedModel(0.5))), 0.5)
            .evaluate(&request(50_000.0, 0, 30))
            .unwrap();
        assert_eq!(result.score, 0.5);
        assert_eq!(result.decision, Decision::Accepted);
    }

    #[test]
    fn model_output_clamped_and_rounded() {
        let result = scorer(Some(Arc::new(FixedModel(1.7))), 0.5)
            .evaluate(&request(50_000.0, 0, 30))
            .unwrap();
        assert_eq!(result.score, 1.0);

        let result = scorer(Some(Arc::new(FixedModel(0.123_456))), 0.5)
            .evaluate(&request(50_000.0, 0, 30))
            .unwrap();
        assert_eq!(result.score, 0.123);
    }

    #[test]
    fn model_failure_surfaces_as_error() {
        let result = scorer(Some(Arc::new(FailingModel)), 0.5).evaluate(&request(50_000.0, 0, 30));
        assert!(result.is_err());
    }

    #[test]
    fn idempotent() {
        let service = scorer(None, 0.5);
        let req = request(42_000.0, 2, 44);
        let first = service.evaluate(&req).unwrap();
        let second = service.evaluate(&req).unwrap();
        assert_eq!(first.score, second.score);
        assert_eq!(first.decision, second.decision);
    }
}
