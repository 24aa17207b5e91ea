use axum::{Json, extract::State};
use serde::Serialize;

use smartstudy_session_types::identity::Identity;

use crate::error::WebServiceError;
use crate::state::AppState;
use crate::usecase::profile::GetProfileUseCase;

// ── GET /api/me ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub points: i32,
    pub total_study_time: i64,
    pub auth_type: &'static str,
    pub email_verified: bool,
}

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, WebServiceError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(ProfileResponse {
        id: user.id,
        email: user.email,
        name: user.name,
        profile_picture: user.profile_picture,
        points: user.points,
        total_study_time: user.total_study_time,
        auth_type: user.kind.tag(),
        email_verified: user.email_verified,
    }))
}
