use std::fmt;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::{error, info};
use rocket::fairing::AdHoc;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Settings the codec cannot be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    MissingSecret,
    InvalidTtl(i64),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::MissingSecret => {
                write!(f, "ACCESS_TOKEN_SECRET is empty; refusing to sign tokens")
            }
            CodecError::InvalidTtl(hours) => {
                write!(f, "TOKEN_TTL_HOURS must be a positive number of hours, got {}", hours)
            }
        }
    }
}

impl std::error::Error for CodecError {}

const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Signs and verifies the email identity tokens handed out by `/jwt`.
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl JwtService {
    pub fn new(secret: &str, ttl_hours: i64) -> Result<Self, CodecError> {
        if secret.is_empty() {
            return Err(CodecError::MissingSecret);
        }

        let ttl_seconds = ttl_hours
            .checked_mul(SECONDS_PER_HOUR)
            .filter(|seconds| *seconds > 0)
            .ok_or(CodecError::InvalidTtl(ttl_hours))?;

        Ok(JwtService {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, CodecError> {
        Self::new(&config.access_token_secret, config.token_ttl_hours)
    }

    pub fn issue(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(email, chrono::Utc::now().timestamp())
    }

    pub fn issue_at(&self, email: &str, now: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            email: email.to_string(),
            exp: now.saturating_add(self.ttl_seconds),
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Fails on a bad signature, a malformed token, or an elapsed `exp`.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;

        Ok(token_data.claims)
    }
}

/// Builds the codec from the managed `AppConfig`. Launch is aborted when the
/// signing secret is unusable.
pub fn init() -> AdHoc {
    AdHoc::try_on_ignite("Token codec", |rocket| async {
        let built = rocket
            .state::<AppConfig>()
            .map(|config| (JwtService::from_config(config), config.credential_source()));

        match built {
            Some((Ok(jwt), source)) => {
                info!("✓ Token codec ready");
                Ok(rocket.manage(jwt).manage(source))
            }
            Some((Err(e), _)) => {
                error!("✗ {}", e);
                Err(rocket)
            }
            None => {
                error!("✗ Token codec needs AppConfig to be managed first");
                Err(rocket)
            }
        }
    })
}
