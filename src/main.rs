//! Riskgate API - Main Entry Point
//!
//! Loads configuration and models, fetches the identity provider key set,
//! and serves the scoring endpoints.

use anyhow::{Context, Result};
use riskgate::audit::{AuditSink, ElasticSink, LogSink};
use riskgate::auth::{jwks, TokenVerifier};
use riskgate::config::{AppConfig, LoggingConfig};
use riskgate::metrics::ServiceMetrics;
use riskgate::models::loader;
use riskgate::{ApiState, CreditScorer, FraudDetector};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    info!("Starting riskgate API");
    info!(
        score_threshold = config.scoring.threshold,
        alert_threshold = config.fraud.alert_threshold,
        "Thresholds loaded"
    );

    let metrics = Arc::new(ServiceMetrics::new());

    let audit: Arc<dyn AuditSink> = if config.audit.enabled {
        info!(url = %config.audit.url, index = %config.audit.index, "Audit shipping enabled");
        Arc::new(ElasticSink::new(&config.audit.url, &config.audit.index))
    } else {
        Arc::new(LogSink)
    };

    // Models are loaded once here and stay read-only for the process
    // lifetime; swapping one requires a restart.
    let scoring_model = config
        .scoring
        .model_path
        .as_deref()
        .map(loader::load_model)
        .transpose()
        .context("Failed to load credit scoring model")?;
    let fraud_model = config
        .fraud
        .model_path
        .as_deref()
        .map(loader::load_model)
        .transpose()
        .context("Failed to load fraud detection model")?;
    info!(
        scoring_model = scoring_model.is_some(),
        fraud_model = fraud_model.is_some(),
        "Predictive models configured"
    );

    let scoring = Arc::new(CreditScorer::new(
        scoring_model,
        config.scoring.threshold,
        audit.clone(),
    ));
    let fraud = Arc::new(FraudDetector::new(
        fraud_model,
        config.fraud.alert_threshold,
        audit.clone(),
    ));

    let jwks_url = config.auth.jwks_url();
    let key_set = jwks::fetch(&jwks_url)
        .await
        .context("Failed to fetch identity provider key set")?;
    let verifier = Arc::new(TokenVerifier::from_jwks(
        &key_set,
        &config.auth.issuer,
        &config.auth.audience,
        &config.auth.algorithm,
    )?);

    let state = ApiState {
        scoring,
        fraud,
        verifier,
        metrics,
        allowed_roles: Arc::new(config.auth.allowed_roles.clone()),
    };
    let app = riskgate::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    if logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    Ok(())
}
