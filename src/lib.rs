//! Riskgate — credit scoring and fraud detection API.
//!
//! Two symmetric evaluation pipelines (preprocess, score, postprocess)
//! served over HTTP behind JWT/RBAC authentication, with structured audit
//! records shipped per evaluation.

pub mod api;
pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod features;
pub mod metrics;
pub mod models;
pub mod rules;
pub mod services;
pub mod types;

pub use api::{build_router, ApiState};
pub use config::AppConfig;
pub use services::{CreditScorer, FraudDetector};
pub use types::{FraudRequest, FraudResponse, ScoreRequest, ScoreResponse};
