//! Pending-flow continuation state.
//!
//! A multi-step login holds its intermediate state (the email awaiting an
//! OTP, the OAuth `state` token) server-signed in its own short-lived cookie,
//! as one explicit value rather than loose per-key session fields. A flow
//! token is only readable by this service and dies with its TTL.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::token::SessionError;

/// Lifetime of a register/login pending flow in seconds, the same 10
/// minutes the OTP itself lives.
pub const FLOW_TOKEN_EXP: u64 = 600;

/// Lifetime of an OAuth pending flow in seconds. The `state` handshake lives
/// only as long as a default session would.
pub const OAUTH_FLOW_EXP: u64 = 3600;

/// One in-flight login flow. Single-use: the callback/confirm step consumes
/// it, and abandonment simply lets it expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingFlow {
    /// Awaiting the registration OTP for `email`.
    Register { email: String, name: String },
    /// Awaiting the login OTP for `email`.
    Login { email: String },
    /// Awaiting the OAuth callback carrying `state`.
    Oauth { state: String, next_url: String },
}

/// Claims payload of the flow token.
#[derive(Debug, Serialize, Deserialize)]
pub struct FlowClaims {
    pub exp: u64,
    #[serde(flatten)]
    pub flow: PendingFlow,
}

/// Validate a flow-cookie value, returning the pending flow it carries.
pub fn validate_flow_token(cookie_value: &str, secret: &str) -> Result<PendingFlow, SessionError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<FlowClaims>(
        cookie_value,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => SessionError::InvalidSignature,
        _ => SessionError::Malformed,
    })?;

    Ok(data.claims.flow)
}
