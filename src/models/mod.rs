//! Predictive model seam for the scoring pipelines.
//!
//! Models are external collaborators: a flat numeric feature vector in, a
//! class-1 probability out. They are loaded once at process start and are
//! read-only afterwards; swapping a model requires a restart.

pub mod fallback;
pub mod loader;

pub use loader::LinearModel;

use crate::error::ModelError;

/// A predictive model producing a class-1 probability for a feature vector.
pub trait PredictiveModel: Send + Sync + std::fmt::Debug {
    /// Model name, used in logs.
    fn name(&self) -> &str;

    /// Probability of the positive class for the given features.
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError>;
}

/// Round a score to 3 decimals, the precision of the wire format.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round3_precision() {
        assert_eq!(round3(0.123_456), 0.123);
        assert_eq!(round3(0.9875), 0.988);
        assert_eq!(round3(1.0), 1.0);
        assert_eq!(round3(0.0), 0.0);
    }
}
