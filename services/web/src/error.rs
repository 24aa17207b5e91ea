use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Service error variants.
///
/// Wrong-vs-expired OTP and unknown-email-vs-wrong-variant login failures
/// deliberately collapse into one message each; the split exists server-side
/// only, in the `kind` code.
#[derive(Debug, thiserror::Error)]
pub enum WebServiceError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("no account found with this email")]
    AccountNotFound,
    #[error("invalid or expired code")]
    InvalidOtp,
    #[error("login session expired")]
    FlowExpired,
    #[error("authentication failed")]
    StateMismatch,
    #[error("study session not found")]
    StudySessionNotFound,
    #[error("failed to send verification email")]
    MailDelivery(#[source] anyhow::Error),
    #[error("authentication failed")]
    OauthUpstream(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl WebServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::InvalidOtp => "INVALID_OTP",
            Self::FlowExpired => "FLOW_EXPIRED",
            Self::StateMismatch => "STATE_MISMATCH",
            Self::StudySessionNotFound => "STUDY_SESSION_NOT_FOUND",
            Self::MailDelivery(_) => "MAIL_DELIVERY",
            Self::OauthUpstream(_) => "OAUTH_UPSTREAM",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for WebServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::EmailAlreadyRegistered => StatusCode::CONFLICT,
            Self::AccountNotFound | Self::StudySessionNotFound => StatusCode::NOT_FOUND,
            Self::InvalidOtp | Self::FlowExpired | Self::StateMismatch => StatusCode::UNAUTHORIZED,
            Self::MailDelivery(_) | Self::OauthUpstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors — the trace layer already records
        // method/uri/status for them. Upstream and internal failures carry an
        // anyhow chain that must be logged here; the response body stays
        // generic.
        match &self {
            Self::MailDelivery(e) | Self::OauthUpstream(e) | Self::Internal(e) => {
                tracing::error!(error = %e, kind = self.kind(), "request failed");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
