//! Credit scoring request and response structures.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Client attributes submitted for credit scoring. Immutable per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// Unique client identifier
    pub client_id: String,

    /// Age in years (18..=120)
    pub age: u32,

    /// Annual income, must be positive
    #[serde(alias = "revenu")]
    pub annual_income: f64,

    /// Number of past unpaid debts
    #[serde(alias = "historique_impaye")]
    pub delinquency_count: u32,

    /// Requested credit amount, if any
    #[serde(default, alias = "montant_credit")]
    pub credit_amount: Option<f64>,
}

impl ScoreRequest {
    /// Range-check the payload before it reaches the pipeline.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !(18..=120).contains(&self.age) {
            return Err(ApiError::Validation(format!(
                "age must be between 18 and 120, got {}",
                self.age
            )));
        }
        if !self.annual_income.is_finite() || self.annual_income <= 0.0 {
            return Err(ApiError::Validation(format!(
                "annual_income must be positive, got {}",
                self.annual_income
            )));
        }
        if let Some(amount) = self.credit_amount {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(ApiError::Validation(format!(
                    "credit_amount must be positive, got {amount}"
                )));
            }
        }
        Ok(())
    }
}

/// Decision derived from the score and the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accepted,
    Rejected,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Accepted => write!(f, "accepted"),
            Decision::Rejected => write!(f, "rejected"),
        }
    }
}

/// Scoring outcome returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub client_id: String,
    /// Credit score in [0, 1]
    pub score: f64,
    pub decision: Decision,
    pub message: String,
}
