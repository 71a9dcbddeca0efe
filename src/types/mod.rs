//! Type definitions for the scoring and fraud endpoints

pub mod fraud;
pub mod score;

pub use fraud::{FraudRequest, FraudResponse, TransactionType};
pub use score::{Decision, ScoreRequest, ScoreResponse};
