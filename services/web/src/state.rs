use sea_orm::DatabaseConnection;

use smartstudy_session_types::identity::SessionKeyProvider;

use crate::infra::db::{DbOtpRepository, DbStudySessionRepository, DbUserRepository};
use crate::infra::google::GoogleOAuthClient;
use crate::infra::mailer::RelayMailer;
use crate::infra::suggest::ChatSuggestionProvider;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub google: GoogleOAuthClient,
    pub mailer: RelayMailer,
    pub suggestions: ChatSuggestionProvider,
    pub session_secret: String,
    pub cookie_domain: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn study_session_repo(&self) -> DbStudySessionRepository {
        DbStudySessionRepository {
            db: self.db.clone(),
        }
    }
}

impl SessionKeyProvider for AppState {
    fn session_secret(&self) -> &str {
        &self.session_secret
    }
}
