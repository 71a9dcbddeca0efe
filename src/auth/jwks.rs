//! JSON Web Key Set retrieval.
//!
//! The key set is fetched once at process start and treated as immutable
//! for the process lifetime; a key rotation requires a restart.

use crate::error::AuthError;
use serde::Deserialize;
use tracing::info;

/// Published key set of the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// A single published key. Only RSA keys are used for verification.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kid: String,
    pub kty: String,
    #[serde(default)]
    pub alg: Option<String>,
    /// RSA modulus, base64url
    #[serde(default)]
    pub n: Option<String>,
    /// RSA public exponent, base64url
    #[serde(default)]
    pub e: Option<String>,
}

/// Fetch the key set from the identity provider.
pub async fn fetch(url: &str) -> Result<Jwks, AuthError> {
    let jwks: Jwks = reqwest::get(url).await?.error_for_status()?.json().await?;
    info!(url, keys = jwks.keys.len(), "Fetched identity provider key set");
    Ok(jwks)
}
