//! Form protection tokens
//!
//! Every rendered form embeds a short-lived HS256 token signed with the
//! server's secret key. A POST is only processed when it carries a token
//! this server issued and that has not expired.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FORM_SUBJECT: &str = "cafe-form";

#[derive(Error, Debug)]
pub enum CsrfError {
    #[error("The CSRF token is missing.")]
    Missing,

    #[error("The CSRF token has expired.")]
    Expired,

    #[error("The CSRF token is invalid.")]
    Invalid,

    #[error("Failed to sign CSRF token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct CsrfClaims {
    sub: String,
    jti: String,
    iat: i64,
    exp: i64,
}

pub struct CsrfGuard {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    enabled: bool,
}

impl CsrfGuard {
    pub fn new(secret: &str, ttl_secs: i64, enabled: bool) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
            enabled,
        }
    }

    pub fn issue(&self) -> Result<String, CsrfError> {
        self.issue_at(Utc::now())
    }

    fn issue_at(&self, issued_at: DateTime<Utc>) -> Result<String, CsrfError> {
        let claims = CsrfClaims {
            sub: FORM_SUBJECT.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(CsrfError::Signing)
    }

    /// Check a submitted token. Always succeeds when protection is disabled.
    pub fn verify(&self, token: &str) -> Result<(), CsrfError> {
        if !self.enabled {
            return Ok(());
        }
        if token.is_empty() {
            return Err(CsrfError::Missing);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.sub = Some(FORM_SUBJECT.to_string());

        decode::<CsrfClaims>(token, &self.decoding_key, &validation)
            .map(|_| ())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => CsrfError::Expired,
                _ => CsrfError::Invalid,
            })
    }
}
