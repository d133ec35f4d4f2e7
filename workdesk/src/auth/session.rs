//! Session token creation and verification.
//!
//! Sessions are signed JWTs carried in an HttpOnly cookie. The token
//! lifetime depends on the "remember me" choice made at login:
//! `session.remember_timeout` (30 days by default) when remembered,
//! `session.timeout` otherwise. In the latter case the cookie itself
//! carries no Max-Age, so the client drops it when its session ends.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{api::models::users::CurrentUser, config::Config, errors::Error, types::UserId};

/// Session claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId,      // Subject (user ID)
    pub username: String, // Username
    pub exp: i64,         // Expiration time
    pub iat: i64,         // Issued at
}

impl SessionClaims {
    /// Create new session claims for a user
    pub fn new(user: &CurrentUser, remember: bool, config: &Config) -> Self {
        let now = Utc::now();
        let lifetime = if remember {
            config.auth.session.remember_timeout
        } else {
            config.auth.session.timeout
        };
        let exp = now + lifetime;

        Self {
            sub: user.id,
            username: user.username.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

impl From<SessionClaims> for CurrentUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
        }
    }
}

/// Create a signed token for a user session
pub fn create_session_token(user: &CurrentUser, remember: bool, config: &Config) -> Result<String, Error> {
    let claims = SessionClaims::new(user, remember, config);
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "sessions: secret_key is required".to_string(),
    })?;

    let key = EncodingKey::from_secret(secret_key.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create session token: {e}"),
    })
}

/// Verify and decode a session token
pub fn verify_session_token(token: &str, config: &Config) -> Result<CurrentUser, Error> {
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "sessions: secret_key is required".to_string(),
    })?;

    let key = DecodingKey::from_secret(secret_key.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| {
        use jsonwebtoken::errors::ErrorKind;
        match e.kind() {
            // Client errors (401) - malformed, tampered or expired tokens
            ErrorKind::InvalidToken
            | ErrorKind::InvalidSignature
            | ErrorKind::ExpiredSignature
            | ErrorKind::ImmatureSignature
            | ErrorKind::MissingRequiredClaim(_)
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Error::Unauthenticated { message: None },

            // Everything else points at a server-side problem
            _ => Error::Internal {
                operation: format!("session token verification: {e}"),
            },
        }
    })?;

    Ok(CurrentUser::from(token_data.claims))
}
