//! JWT token handling

use crate::auth::models::Role;
use crate::config::{AuthConfig, Config};
use crate::error::{Error, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Requester email
    pub email: String,
    /// Name of the requesting application
    #[serde(rename = "appName")]
    pub app_name: String,
    /// Write access
    pub admin: bool,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    pub fn role(&self) -> Role {
        Role::from_admin_flag(self.admin)
    }
}

/// Issues and verifies signed credentials.
///
/// Holds no per-request state; the keys are derived once from the
/// configured secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    trusted_domain: String,
    ttl: chrono::Duration,
}

impl TokenService {
    pub fn new(secret: &str, auth: &AuthConfig) -> Result<Self> {
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            trusted_domain: auth.trusted_domain.clone(),
            ttl: auth.token_ttl()?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let secret = config.signing_secret()?;
        Self::new(&secret, &config.auth)
    }

    /// Whether the domain after the last `@` is the trusted domain
    pub fn is_trusted(&self, email: &str) -> bool {
        email
            .rsplit_once('@')
            .map(|(_, domain)| domain.eq_ignore_ascii_case(&self.trusted_domain))
            .unwrap_or(false)
    }

    /// Build the claims for a requester, rejecting blank parameters
    pub fn claims_for(&self, email: &str, app_name: &str) -> Result<Claims> {
        let email = email.trim();
        let app_name = app_name.trim();
        if email.is_empty() || app_name.is_empty() {
            return Err(Error::MissingParameter);
        }

        let now = chrono::Utc::now();
        Ok(Claims {
            email: email.to_string(),
            app_name: app_name.to_string(),
            admin: self.is_trusted(email),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        })
    }

    /// Issue a token for a requester
    pub fn issue(&self, email: &str, app_name: &str) -> Result<String> {
        let claims = self.claims_for(email, app_name)?;
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }

    /// Verify signature and expiry
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                Error::InvalidToken
            })
    }
}
