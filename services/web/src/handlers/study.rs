use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use smartstudy_session_types::identity::Identity;

use crate::error::WebServiceError;
use crate::state::AppState;
use crate::usecase::study::{
    EndStudySessionInput, EndStudySessionUseCase, StartStudySessionInput,
    StartStudySessionUseCase,
};

// ── POST /api/study-sessions ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StartSessionRequest {
    pub mode: String,
    pub duration: i32,
}

#[derive(Serialize)]
pub struct StartSessionResponse {
    pub session_id: i64,
}

pub async fn start_study_session(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<StartSessionResponse>), WebServiceError> {
    let usecase = StartStudySessionUseCase {
        sessions: state.study_session_repo(),
    };
    let session_id = usecase
        .execute(StartStudySessionInput {
            user_id: identity.user_id,
            mode: body.mode,
            duration_secs: body.duration,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(StartSessionResponse { session_id }),
    ))
}

// ── PATCH /api/study-sessions/{session_id} ───────────────────────────────────

#[derive(Deserialize)]
pub struct EndSessionRequest {
    /// Seconds actually studied.
    #[serde(default)]
    pub duration: i64,
}

#[derive(Serialize)]
pub struct EndSessionResponse {
    pub success: bool,
    pub points_earned: i32,
    pub study_tip: String,
}

pub async fn end_study_session(
    identity: Identity,
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(body): Json<EndSessionRequest>,
) -> Result<Json<EndSessionResponse>, WebServiceError> {
    let usecase = EndStudySessionUseCase {
        sessions: state.study_session_repo(),
        users: state.user_repo(),
        suggestions: state.suggestions.clone(),
    };
    let out = usecase
        .execute(EndStudySessionInput {
            user_id: identity.user_id,
            session_id,
            duration_secs: body.duration,
        })
        .await?;
    Ok(Json(EndSessionResponse {
        success: true,
        points_earned: out.points_earned,
        study_tip: out.study_tip,
    }))
}
