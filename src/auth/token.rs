/// Session token issuance
///
/// Tokens are JWTs signed with HS256, carrying the user id, email, and a
/// 24-hour expiry. They model a single-session-per-client credential: the
/// identity service writes one on login and deletes it on logout, and no
/// code path validates it on read. `inspect` is provided for callers that
/// want to decode one anyway.
///
/// # Example
///
/// ```
/// use tasklight::auth::token::{inspect, issue, SessionClaims};
/// use tasklight::models::user::User;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user = User::new("A".to_string(), "a@x.com".to_string(), "h".to_string());
/// let secret = "test-secret-key-at-least-32-bytes-long";
///
/// let token = issue(&SessionClaims::new(&user), secret)?;
/// let claims = inspect(&token, secret)?;
/// assert_eq!(claims.sub, user.id);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

/// Token lifetime: 24 hours from issuance
const TOKEN_TTL_HOURS: i64 = 24;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to encode token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to decode token
    #[error("Failed to decode token: {0}")]
    DecodeError(String),
}

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Email at time of issuance
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Creates claims for `user` expiring 24 hours from now
    pub fn new(user: &User) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id,
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }
}

/// Signs `claims` into a token string
pub fn issue(claims: &SessionClaims, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::CreateError(e.to_string()))
}

/// Decodes a token back into its claims
///
/// Verifies the signature and expiry. The services never call this; it is
/// for collaborators that want to look inside a stored token.
pub fn inspect(token: &str, secret: &str) -> Result<SessionClaims, TokenError> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| TokenError::DecodeError(e.to_string()))?;

    Ok(data.claims)
}
