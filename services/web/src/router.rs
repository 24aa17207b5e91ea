use axum::{
    Router,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use smartstudy_core::health::{healthz, readyz};
use smartstudy_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{confirm_otp, logout, start_login, start_registration},
    oauth::{oauth_callback, start_google_login},
    study::{end_study_session, start_study_session},
    user::get_me,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Email OTP flows
        .route("/auth/register", post(start_registration))
        .route("/auth/login", post(start_login))
        .route("/auth/otp", post(confirm_otp))
        .route("/auth/logout", post(logout))
        // Google OAuth flow
        .route("/auth/google", get(start_google_login))
        .route("/auth/google/callback", get(oauth_callback))
        // Authenticated API
        .route("/api/me", get(get_me))
        .route("/api/study-sessions", post(start_study_session))
        .route("/api/study-sessions/{session_id}", patch(end_study_session))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}
