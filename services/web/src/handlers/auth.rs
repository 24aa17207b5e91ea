use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use smartstudy_session_types::cookie::{
    SMARTSTUDY_FLOW, clear_flow_cookie, clear_session_cookies, set_flow_cookie,
    set_session_cookie,
};
use smartstudy_session_types::flow::{FLOW_TOKEN_EXP, PendingFlow, validate_flow_token};

use crate::error::WebServiceError;
use crate::handlers::{DASHBOARD_PATH, current_session};
use crate::state::AppState;
use crate::usecase::login::{ConfirmLoginUseCase, StartLoginUseCase};
use crate::usecase::register::{
    ConfirmRegistrationUseCase, StartRegistrationInput, StartRegistrationUseCase,
};
use crate::usecase::session::issue_flow_token;

#[derive(Serialize)]
pub struct OtpPendingResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct AuthenticatedResponse {
    pub user_id: i64,
}

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

pub async fn start_registration(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<Response, WebServiceError> {
    if current_session(&jar, &state).is_some() {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    let usecase = StartRegistrationUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
    };
    let flow = usecase
        .execute(StartRegistrationInput {
            email: body.email,
            name: body.name,
        })
        .await?;

    let token = issue_flow_token(&flow, FLOW_TOKEN_EXP, &state.session_secret)?;
    let jar = set_flow_cookie(jar, token, state.cookie_domain.clone(), FLOW_TOKEN_EXP);

    Ok((
        StatusCode::ACCEPTED,
        jar,
        Json(OtpPendingResponse { status: "otp_sent" }),
    )
        .into_response())
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
}

pub async fn start_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<Response, WebServiceError> {
    if current_session(&jar, &state).is_some() {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    let usecase = StartLoginUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
    };
    let flow = usecase.execute(body.email).await?;

    let token = issue_flow_token(&flow, FLOW_TOKEN_EXP, &state.session_secret)?;
    let jar = set_flow_cookie(jar, token, state.cookie_domain.clone(), FLOW_TOKEN_EXP);

    Ok((
        StatusCode::ACCEPTED,
        jar,
        Json(OtpPendingResponse { status: "otp_sent" }),
    )
        .into_response())
}

// ── POST /auth/otp ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ConfirmOtpRequest {
    #[serde(default)]
    pub code: String,
}

/// Confirm the OTP for whichever flow the caller has pending. The purpose
/// lives in the signed flow cookie; without a live `Register` or `Login`
/// pending flow this endpoint is unreachable.
pub async fn confirm_otp(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ConfirmOtpRequest>,
) -> Result<Response, WebServiceError> {
    let flow = jar
        .get(SMARTSTUDY_FLOW)
        .and_then(|c| validate_flow_token(c.value(), &state.session_secret).ok())
        .ok_or(WebServiceError::FlowExpired)?;

    let grant = match flow {
        PendingFlow::Register { email, name } => {
            let usecase = ConfirmRegistrationUseCase {
                users: state.user_repo(),
                otps: state.otp_repo(),
                session_secret: state.session_secret.clone(),
            };
            usecase.execute(&email, &name, &body.code).await?
        }
        PendingFlow::Login { email } => {
            let usecase = ConfirmLoginUseCase {
                users: state.user_repo(),
                otps: state.otp_repo(),
                session_secret: state.session_secret.clone(),
            };
            usecase.execute(&email, &body.code).await?
        }
        // An OAuth flow has no OTP step; a stray submission is a dead flow.
        PendingFlow::Oauth { .. } => return Err(WebServiceError::FlowExpired),
    };

    let jar = clear_flow_cookie(jar, state.cookie_domain.clone());
    let jar = set_session_cookie(jar, grant.session_token, state.cookie_domain.clone(), false);

    Ok((
        StatusCode::OK,
        jar,
        Json(AuthenticatedResponse {
            user_id: grant.user.id,
        }),
    )
        .into_response())
}

// ── POST /auth/logout ────────────────────────────────────────────────────────

/// Clears the session and any pending flow. Idempotent, and requires no
/// authentication.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookies(jar, state.cookie_domain.clone());
    (StatusCode::NO_CONTENT, jar)
}
