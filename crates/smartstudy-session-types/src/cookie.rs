//! Cookie builders for the session and pending-flow tokens.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the signed session token.
pub const SMARTSTUDY_SESSION: &str = "smartstudy_session";

/// Cookie name for the signed pending-flow token.
pub const SMARTSTUDY_FLOW: &str = "smartstudy_flow";

/// Default session lifetime in seconds (1 hour).
pub const SESSION_EXP: u64 = 3600;

/// Extended session lifetime in seconds (7 days). Used when a login flow
/// requests `remember`; the OAuth path does, the OTP path does not.
pub const REMEMBER_SESSION_EXP: u64 = 604800;

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use smartstudy_session_types::cookie::{set_session_cookie, SMARTSTUDY_SESSION};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "token".to_string(), "example.com".to_string(), false);
/// let cookie = jar.get(SMARTSTUDY_SESSION).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(
    jar: CookieJar,
    value: String,
    domain: String,
    remember: bool,
) -> CookieJar {
    let max_age = if remember {
        REMEMBER_SESSION_EXP
    } else {
        SESSION_EXP
    };
    let cookie = Cookie::build((SMARTSTUDY_SESSION, value))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(max_age as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Set the pending-flow cookie on the jar. Scoped to `/auth`; nothing
/// outside the auth routes ever reads it.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use smartstudy_session_types::cookie::{set_flow_cookie, SMARTSTUDY_FLOW};
///
/// let jar = CookieJar::new();
/// let jar = set_flow_cookie(jar, "token".to_string(), "example.com".to_string(), 600);
/// let cookie = jar.get(SMARTSTUDY_FLOW).unwrap();
/// assert_eq!(cookie.path(), Some("/auth"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(600)));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_flow_cookie(jar: CookieJar, value: String, domain: String, ttl_secs: u64) -> CookieJar {
    let cookie = Cookie::build((SMARTSTUDY_FLOW, value))
        .path("/auth")
        .domain(domain)
        .max_age(Duration::seconds(ttl_secs as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the pending-flow cookie.
pub fn clear_flow_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((SMARTSTUDY_FLOW, ""))
        .path("/auth")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear every auth cookie. Logout goes through here so no pending-flow
/// state survives the session it belonged to.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use smartstudy_session_types::cookie::{
///     clear_session_cookies, set_flow_cookie, set_session_cookie,
///     SMARTSTUDY_FLOW, SMARTSTUDY_SESSION,
/// };
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "s".to_string(), "example.com".to_string(), true);
/// let jar = set_flow_cookie(jar, "f".to_string(), "example.com".to_string(), 600);
/// let jar = clear_session_cookies(jar, "example.com".to_string());
/// assert_eq!(jar.get(SMARTSTUDY_SESSION).unwrap().max_age(), Some(time::Duration::ZERO));
/// assert_eq!(jar.get(SMARTSTUDY_FLOW).unwrap().max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookies(jar: CookieJar, domain: String) -> CookieJar {
    let session = Cookie::build((SMARTSTUDY_SESSION, ""))
        .path("/")
        .domain(domain.clone())
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    clear_flow_cookie(jar, domain).add(session)
}
