//! Bearer-token verification against the identity provider.

pub mod jwks;
pub mod rbac;

use crate::error::AuthError;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

/// Claims extracted from a verified token.
///
/// Roles live in the provider's nested `realm_access.roles` claim.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub realm_access: RealmAccess,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    pub fn roles(&self) -> &[String] {
        &self.realm_access.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.realm_access.roles.iter().any(|r| r == role)
    }
}

/// Verifies token signature, issuer, audience and expiry.
///
/// Keys are resolved by the `kid` header against the key set loaded at
/// startup; the set is immutable for the process lifetime.
pub struct TokenVerifier {
    keys: HashMap<String, DecodingKey>,
    default_key: Option<DecodingKey>,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier from the provider's published key set.
    pub fn from_jwks(
        key_set: &jwks::Jwks,
        issuer: &str,
        audience: &str,
        algorithm: &str,
    ) -> Result<Self, AuthError> {
        let algorithm = Algorithm::from_str(algorithm)?;
        let mut keys = HashMap::new();

        for key in &key_set.keys {
            if key.kty != "RSA" {
                continue;
            }
            let (Some(n), Some(e)) = (&key.n, &key.e) else {
                continue;
            };
            keys.insert(key.kid.clone(), DecodingKey::from_rsa_components(n, e)?);
        }

        if keys.is_empty() {
            return Err(AuthError::NoUsableKeys);
        }

        Ok(Self {
            keys,
            default_key: None,
            validation: build_validation(algorithm, issuer, audience),
        })
    }

    /// Build a verifier from a shared HS256 secret.
    ///
    /// Signature verification without the identity provider; meant for
    /// tests and local development, mirroring the provider's claim layout.
    pub fn with_shared_secret(secret: &str, issuer: &str, audience: &str) -> Self {
        Self {
            keys: HashMap::new(),
            default_key: Some(DecodingKey::from_secret(secret.as_bytes())),
            validation: build_validation(Algorithm::HS256, issuer, audience),
        }
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)?;

        let key = match &header.kid {
            Some(kid) => self
                .keys
                .get(kid)
                .ok_or_else(|| AuthError::UnknownKey(kid.clone()))?,
            None => self.default_key.as_ref().ok_or(AuthError::MissingKeyId)?,
        };

        let data = decode::<Claims>(token, key, &self.validation)?;
        Ok(data.claims)
    }
}

fn build_validation(algorithm: Algorithm, issuer: &str, audience: &str) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.set_issuer(&[issuer]);
    validation.set_audience(&[audience]);
    validation
}
