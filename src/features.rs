//! Feature preprocessing for the credit and fraud pipelines.
//!
//! Derives the auxiliary features the scorers consume from raw request
//! fields. Feature vectors are produced in a fixed order so a configured
//! predictive model always sees the layout it was trained on.

use crate::types::{FraudRequest, ScoreRequest};

/// Delinquency counts are capped before scoring.
pub const DELINQUENCY_CAP: u32 = 10;

/// Preprocessed credit scoring features.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditFeatures {
    pub age: f64,
    /// Annual income in thousands
    pub income_k: f64,
    /// Delinquency count capped at [`DELINQUENCY_CAP`]
    pub delinquency: f64,
    /// Requested credit amount in thousands, 0 when absent
    pub credit_amount_k: f64,
}

impl CreditFeatures {
    pub fn from_request(req: &ScoreRequest) -> Self {
        Self {
            age: f64::from(req.age),
            income_k: req.annual_income / 1000.0,
            delinquency: f64::from(req.delinquency_count.min(DELINQUENCY_CAP)),
            credit_amount_k: req.credit_amount.unwrap_or(0.0) / 1000.0,
        }
    }

    /// Flat vector in the order given by [`CreditFeatures::feature_names`].
    pub fn to_vector(&self) -> Vec<f64> {
        vec![self.age, self.income_k, self.delinquency, self.credit_amount_k]
    }

    pub fn feature_names() -> [&'static str; 4] {
        ["age", "income_k", "delinquency", "credit_amount_k"]
    }
}

/// Preprocessed fraud detection features.
#[derive(Debug, Clone, PartialEq)]
pub struct FraudFeatures {
    /// Transaction amount in thousands
    pub amount_k: f64,
    /// Amount exceeds the high-amount rule threshold
    pub high_amount: bool,
    /// Withdrawal or transfer
    pub high_risk_channel: bool,
    /// Delinquency count capped at [`DELINQUENCY_CAP`]
    pub delinquency: f64,
}

impl FraudFeatures {
    pub fn from_request(req: &FraudRequest) -> Self {
        Self {
            amount_k: req.amount / 1000.0,
            high_amount: req.amount > crate::rules::HIGH_AMOUNT_THRESHOLD,
            high_risk_channel: req.transaction_type.is_high_risk(),
            delinquency: f64::from(req.delinquency_count.min(DELINQUENCY_CAP)),
        }
    }

    /// Flat vector in the order given by [`FraudFeatures::feature_names`].
    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.amount_k,
            if self.high_amount { 1.0 } else { 0.0 },
            if self.high_risk_channel { 1.0 } else { 0.0 },
            self.delinquency,
        ]
    }

    pub fn feature_names() -> [&'static str; 4] {
        ["amount_k", "high_amount", "high_risk_channel", "delinquency"]
    }
}
