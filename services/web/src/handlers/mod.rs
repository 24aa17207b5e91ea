pub mod auth;
pub mod oauth;
pub mod study;
pub mod user;

use axum_extra::extract::CookieJar;

use smartstudy_session_types::cookie::SMARTSTUDY_SESSION;
use smartstudy_session_types::token::{SessionInfo, validate_session_token};

use crate::state::AppState;

/// Landing area for authenticated users. Entry routes short-circuit here.
pub(crate) const DASHBOARD_PATH: &str = "/dashboard";

/// Login page, target of failed OAuth callbacks.
pub(crate) const LOGIN_PATH: &str = "/login";

/// Current session, if the jar carries a valid one. Used by entry routes for
/// the already-authenticated short-circuit; protected routes use the
/// `Identity` extractor instead.
pub(crate) fn current_session(jar: &CookieJar, state: &AppState) -> Option<SessionInfo> {
    jar.get(SMARTSTUDY_SESSION)
        .and_then(|c| validate_session_token(c.value(), &state.session_secret).ok())
}
