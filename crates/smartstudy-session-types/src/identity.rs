//! Session-cookie identity extractor.

use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;

use crate::cookie::SMARTSTUDY_SESSION;
use crate::token::validate_session_token;

/// Anything that can hand the extractor the session-signing secret.
/// Implemented by the service's `AppState`.
pub trait SessionKeyProvider {
    fn session_secret(&self) -> &str;
}

/// Authenticated user identity, extracted from a valid session cookie.
///
/// Returns 401 if the cookie is absent, expired, or fails signature
/// validation. Handlers that merely want to know *whether* a session exists
/// (the entry-route short-circuit) read the jar directly instead.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
}

impl<S> FromRequestParts<S> for Identity
where
    S: SessionKeyProvider + Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async
    // fn`), and an `async fn` body borrowing `state` trips E0195 under
    // precise capturing. Extract synchronously, return a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let jar = CookieJar::from_headers(&parts.headers);
        let identity = jar
            .get(SMARTSTUDY_SESSION)
            .and_then(|c| validate_session_token(c.value(), state.session_secret()).ok())
            .map(|info| Identity {
                user_id: info.user_id,
            });

        async move { identity.ok_or(StatusCode::UNAUTHORIZED) }
    }
}
