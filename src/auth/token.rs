//! Signed bearer tokens: issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the identity claims plus `iat`/`exp`.
//! Validity depends only on the signature and the expiry; nothing is stored
//! server-side, so there is no revocation.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use crate::auth::context::{Identity, TokenClaims};
use crate::config::{AuthConfig, ConfigError};

/// Reasons a presented token is refused.
///
/// Clients never see which one applied; the gate answers all of them the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not a structurally valid JWT (bad segments, bad base64, missing claims).
    Malformed,
    /// Signature does not match the configured secret.
    BadSignature,
    /// Signature is fine but `exp` is in the past.
    Expired,
    /// Signing failed while issuing.
    Signing(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "Malformed token"),
            Self::BadSignature => write!(f, "Token signature mismatch"),
            Self::Expired => write!(f, "Token expired"),
            Self::Signing(msg) => write!(f, "Failed to sign token: {}", msg),
        }
    }
}

impl std::error::Error for TokenError {}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::BadSignature,
            _ => Self::Malformed,
        }
    }
}

/// Build the issuer/verifier pair from validated configuration.
pub fn from_config(config: &AuthConfig) -> Result<(TokenIssuer, TokenVerifier), ConfigError> {
    let expiry = config.validate()?;
    let issuer = TokenIssuer::new(&config.jwt_secret, expiry)?;
    let verifier = TokenVerifier::new(&config.jwt_secret)?;
    Ok((issuer, verifier))
}

/// Mints tokens for identities whose password has already been checked.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    expiry: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, expiry: Duration) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if expiry.is_zero() {
            return Err(ConfigError::ZeroExpiry);
        }
        Ok(Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            expiry,
        })
    }

    /// Lifetime of newly issued tokens.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Issue a token valid from now.
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    /// Issue a token as if it were minted at `issued_at` (unix seconds).
    pub fn issue_at(&self, identity: &Identity, issued_at: i64) -> Result<String, TokenError> {
        let lifetime = i64::try_from(self.expiry.as_secs()).unwrap_or(i64::MAX);
        let claims = TokenClaims {
            id: identity.id.clone(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(lifetime),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

/// Checks signature and expiry of presented tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<TokenClaims>(token, &self.key, &self.validation).map_err(|e| {
            debug!("Token verification failed: {}", e);
            TokenError::from(e)
        })?;
        Ok(data.claims)
    }
}
