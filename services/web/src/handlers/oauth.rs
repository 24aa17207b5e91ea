use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use smartstudy_session_types::cookie::{
    SMARTSTUDY_FLOW, clear_flow_cookie, set_flow_cookie, set_session_cookie,
};
use smartstudy_session_types::flow::{OAUTH_FLOW_EXP, PendingFlow, validate_flow_token};

use crate::error::WebServiceError;
use crate::handlers::{DASHBOARD_PATH, LOGIN_PATH, current_session};
use crate::state::AppState;
use crate::usecase::oauth::{OAuthCallbackInput, OAuthCallbackUseCase, StartOAuthUseCase};
use crate::usecase::session::issue_flow_token;

// ── GET /auth/google ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StartOAuthQuery {
    pub next: Option<String>,
}

pub async fn start_google_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<StartOAuthQuery>,
) -> Result<Response, WebServiceError> {
    if current_session(&jar, &state).is_some() {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    let usecase = StartOAuthUseCase {
        google: state.google.clone(),
    };
    let out = usecase.execute(query.next);

    let token = issue_flow_token(&out.flow, OAUTH_FLOW_EXP, &state.session_secret)?;
    let jar = set_flow_cookie(jar, token, state.cookie_domain.clone(), OAUTH_FLOW_EXP);

    Ok((jar, Redirect::to(&out.authorization_url)).into_response())
}

// ── GET /auth/google/callback ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// The controller boundary for the whole callback: any failure past this
/// point (missing pending flow, state mismatch, exchange or userinfo
/// trouble, store errors) becomes a redirect back to the login page with a
/// reason code. A raw error page must never escape here.
pub async fn oauth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<OAuthCallbackQuery>,
) -> Response {
    let flow = jar
        .get(SMARTSTUDY_FLOW)
        .and_then(|c| validate_flow_token(c.value(), &state.session_secret).ok());
    let Some(PendingFlow::Oauth {
        state: stored_state,
        next_url,
    }) = flow
    else {
        // Expired session or a replayed callback: bounce back to login.
        return failed_login(jar, &state, "session_expired");
    };

    let (Some(code), Some(returned_state)) = (query.code, query.state) else {
        // The provider reported an error or the user denied consent.
        return failed_login(jar, &state, "authentication_failed");
    };

    let usecase = OAuthCallbackUseCase {
        google: state.google.clone(),
        users: state.user_repo(),
        session_secret: state.session_secret.clone(),
    };
    match usecase
        .execute(OAuthCallbackInput {
            code,
            returned_state,
            stored_state,
        })
        .await
    {
        Ok(grant) => {
            let jar = clear_flow_cookie(jar, state.cookie_domain.clone());
            let jar =
                set_session_cookie(jar, grant.session_token, state.cookie_domain.clone(), true);
            (jar, Redirect::to(&next_url)).into_response()
        }
        Err(e) => {
            tracing::error!(error = ?e, "oauth callback failed");
            failed_login(jar, &state, "authentication_failed")
        }
    }
}

fn failed_login(jar: CookieJar, state: &AppState, reason: &str) -> Response {
    let jar = clear_flow_cookie(jar, state.cookie_domain.clone());
    (jar, Redirect::to(&format!("{LOGIN_PATH}?error={reason}"))).into_response()
}
