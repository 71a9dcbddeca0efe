//! Scoring services, constructed once at startup and shared by handlers.

pub mod fraud;
pub mod scoring;

pub use fraud::FraudDetector;
pub use scoring::CreditScorer;
