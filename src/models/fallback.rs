//! Deterministic fallback used when no credit model is configured.

use crate::features::CreditFeatures;
use crate::models::round3;

/// Credit score without a model, clamped to [0, 1] and rounded to 3
/// decimals:
///
/// `0.3 + 0.005 * income_k - 0.05 * delinquency + 0.01 * (age / 10)`
pub fn credit_score(features: &CreditFeatures) -> f64 {
    let raw = 0.3 + 0.005 * features.income_k - 0.05 * features.delinquency
        + 0.01 * (features.age / 10.0);
    round3(raw.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(income_k: f64, delinquency: f64, age: f64) -> CreditFeatures {
        CreditFeatures {
            age,
            income_k,
            delinquency,
            credit_amount_k: 0.0,
        }
    }

    #[test]
    fn reference_value() {
        // income 50 000, delinquency 0, age 30:
        // 0.3 + 0.005*50 - 0 + 0.01*3 = 0.58
        assert_eq!(credit_score(&features(50.0, 0.0, 30.0)), 0.58);
    }

    #[test]
    fn clamped_to_unit_interval() {
        // Very high income would push the raw value above 1
        assert_eq!(credit_score(&features(1_000.0, 0.0, 40.0)), 1.0);
        // Max delinquency with low income pushes it below 0
        assert_eq!(credit_score(&features(1.0, 10.0, 20.0)), 0.0);
    }

    #[test]
    fn delinquency_lowers_the_score() {
        let clean = credit_score(&features(50.0, 0.0, 30.0));
        let delinquent = credit_score(&features(50.0, 3.0, 30.0));
        assert!(delinquent < clean);
    }

    #[test]
    fn idempotent() {
        let f = features(42.0, 2.0, 55.0);
        assert_eq!(credit_score(&f), credit_score(&f));
    }
}
