//! Configuration management for the scoring API.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub scoring: ScoringConfig,
    pub fraud: FraudConfig,
    pub audit: AuditConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Identity provider configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Token issuer, e.g. a Keycloak realm URL
    pub issuer: String,
    /// Expected audience claim
    pub audience: String,
    /// Explicit JWKS URL; derived from the issuer when unset
    pub jwks_url: Option<String>,
    /// JWT signature algorithm
    pub algorithm: String,
    /// Roles allowed on the scoring endpoints
    pub allowed_roles: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: "https://keycloak.example.com/realms/myrealm".to_string(),
            audience: "my-client-id".to_string(),
            jwks_url: None,
            algorithm: "RS256".to_string(),
            allowed_roles: vec!["admin".to_string(), "analyst".to_string()],
        }
    }
}

impl AuthConfig {
    /// The JWKS endpoint, following the Keycloak layout when not set
    /// explicitly.
    pub fn jwks_url(&self) -> String {
        self.jwks_url.clone().unwrap_or_else(|| {
            format!(
                "{}/protocol/openid-connect/certs",
                self.issuer.trim_end_matches('/')
            )
        })
    }
}

/// Credit scoring configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score at or above which credit is accepted
    pub threshold: f64,
    /// Optional predictive model file
    pub model_path: Option<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            model_path: None,
        }
    }
}

/// Fraud detection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FraudConfig {
    /// Risk at or above which an alert is raised
    pub alert_threshold: f64,
    /// Optional predictive model file
    pub model_path: Option<String>,
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            alert_threshold: 0.7,
            model_path: None,
        }
    }
}

/// Audit log shipping configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Ship records to Elasticsearch; logged locally when disabled
    pub enabled: bool,
    /// Elasticsearch base URL
    pub url: String,
    /// Index receiving the evaluation documents
    pub index: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "http://localhost:9200".to_string(),
            index: "api-logs".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location plus environment
    /// overrides (`RISKGATE__SECTION__KEY`).
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path. The file is optional;
    /// defaults and environment variables fill the gaps.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("RISKGATE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
