//! Signed session-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub user_id: i64,
    pub exp: u64,
}

/// Errors returned by [`validate_session_token`] and
/// [`crate::flow::validate_flow_token`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("session expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Claims payload of the session token.
///
/// `sub` is the user id rendered as a decimal string, `exp` is seconds since
/// the UNIX epoch. The service issues these in `usecase::session`; everything
/// else only validates.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: u64,
}

/// Decode and validate a session JWT, returning raw claims.
///
/// HS256, exp checked, required claims `exp` + `sub`. The library's default
/// 60s leeway tolerates clock skew between the issuing process and any
/// future validator.
fn decode_session(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => SessionError::InvalidSignature,
        _ => SessionError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a session-cookie value, returning the parsed identity.
///
/// The cookie value is the only client input trusted here; the payload is
/// never re-derived from anything else the client sends.
pub fn validate_session_token(
    cookie_value: &str,
    secret: &str,
) -> Result<SessionInfo, SessionError> {
    let claims = decode_session(cookie_value, secret)?;
    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| SessionError::Malformed)?;
    Ok(SessionInfo {
        user_id,
        exp: claims.exp,
    })
}
