use chrono::Utc;

use crate::domain::repository::{StudySessionRepository, SuggestionProvider, UserRepository};
use crate::domain::types::{FALLBACK_STUDY_TIP, NewStudySession, SESSION_REWARD_POINTS};
use crate::error::WebServiceError;

// ── Start study session ───────────────────────────────────────────────────────

pub struct StartStudySessionInput {
    pub user_id: i64,
    pub mode: String,
    pub duration_secs: i32,
}

pub struct StartStudySessionUseCase<S>
where
    S: StudySessionRepository,
{
    pub sessions: S,
}

impl<S> StartStudySessionUseCase<S>
where
    S: StudySessionRepository,
{
    pub async fn execute(&self, input: StartStudySessionInput) -> Result<i64, WebServiceError> {
        self.sessions
            .create(&NewStudySession {
                user_id: input.user_id,
                mode: input.mode,
                duration_secs: input.duration_secs,
                started_at: Utc::now(),
            })
            .await
    }
}

// ── End study session ─────────────────────────────────────────────────────────

pub struct EndStudySessionInput {
    pub user_id: i64,
    pub session_id: i64,
    /// Seconds actually studied, credited to the user's total.
    pub duration_secs: i64,
}

#[derive(Debug)]
pub struct EndStudySessionOutput {
    pub points_earned: i32,
    pub study_tip: String,
}

pub struct EndStudySessionUseCase<S, U, P>
where
    S: StudySessionRepository,
    U: UserRepository,
    P: SuggestionProvider,
{
    pub sessions: S,
    pub users: U,
    pub suggestions: P,
}

impl<S, U, P> EndStudySessionUseCase<S, U, P>
where
    S: StudySessionRepository,
    U: UserRepository,
    P: SuggestionProvider,
{
    /// Complete the session (owner-guarded), credit the flat reward plus the
    /// studied seconds in one atomic update, then fetch a study tip. The tip
    /// is decoration: a provider failure degrades to the canned fallback and
    /// never fails the request.
    pub async fn execute(
        &self,
        input: EndStudySessionInput,
    ) -> Result<EndStudySessionOutput, WebServiceError> {
        let completed = self
            .sessions
            .complete(input.session_id, input.user_id, Utc::now())
            .await?;
        if !completed {
            return Err(WebServiceError::StudySessionNotFound);
        }

        self.users
            .add_study_reward(input.user_id, SESSION_REWARD_POINTS, input.duration_secs)
            .await?;

        let study_tip = match self.suggestions.study_tip().await {
            Ok(tip) => tip,
            Err(e) => {
                tracing::warn!(error = %e, "suggestion provider failed, serving fallback tip");
                FALLBACK_STUDY_TIP.to_owned()
            }
        };

        Ok(EndStudySessionOutput {
            points_earned: SESSION_REWARD_POINTS,
            study_tip,
        })
    }
}
