//! Business rules for fraud detection.
//!
//! Fixed additive rules combined with the optional model output by the
//! fraud service. The weights are part of the scoring contract and are not
//! configurable at runtime.

use crate::features::FraudFeatures;

/// Amounts strictly above this trip the high-amount rule.
pub const HIGH_AMOUNT_THRESHOLD: f64 = 10_000.0;

const HIGH_AMOUNT_WEIGHT: f64 = 0.4;
const HIGH_RISK_CHANNEL_WEIGHT: f64 = 0.2;
const DELINQUENCY_WEIGHT: f64 = 0.1;

/// Rule component of the fraud risk score, capped at 1.0.
pub fn rule_score(features: &FraudFeatures) -> f64 {
    let mut score = 0.0;

    if features.high_amount {
        score += HIGH_AMOUNT_WEIGHT;
    }
    if features.high_risk_channel {
        score += HIGH_RISK_CHANNEL_WEIGHT;
    }
    score += DELINQUENCY_WEIGHT * features.delinquency;

    score.min(1.0)
}
