use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};

use smartstudy_session_types::cookie::{REMEMBER_SESSION_EXP, SESSION_EXP};
use smartstudy_session_types::flow::{FlowClaims, PendingFlow};
use smartstudy_session_types::token::SessionClaims;

use crate::domain::types::User;
use crate::error::WebServiceError;

/// A completed login: the account plus the session token the caller sets as
/// a cookie.
#[derive(Debug)]
pub struct SessionGrant {
    pub user: User,
    pub session_token: String,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a session token for a user id. `remember` extends the lifetime from
/// the 1-hour default to 7 days; only the OAuth path asks for that.
pub fn issue_session_token(
    user_id: i64,
    remember: bool,
    secret: &str,
) -> Result<String, WebServiceError> {
    let lifetime = if remember {
        REMEMBER_SESSION_EXP
    } else {
        SESSION_EXP
    };
    let claims = SessionClaims {
        sub: user_id.to_string(),
        exp: now_secs() + lifetime,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| WebServiceError::Internal(e.into()))
}

/// Sign a pending-flow token with the given lifetime.
pub fn issue_flow_token(
    flow: &PendingFlow,
    ttl_secs: u64,
    secret: &str,
) -> Result<String, WebServiceError> {
    let claims = FlowClaims {
        exp: now_secs() + ttl_secs,
        flow: flow.clone(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| WebServiceError::Internal(e.into()))
}
