#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use crate::domain::types::{
    GoogleProfile, GoogleUserinfo, NewStudySession, NewUser, OtpRecord, User,
};
use crate::error::WebServiceError;

/// Repository for user accounts. Uniqueness of email and external id is
/// enforced by the storage layer's unique indexes, not re-checked here.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, WebServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WebServiceError>;

    /// Find an account loginable via the OTP path, i.e. variant `email`.
    /// Google-only accounts are invisible here on purpose.
    async fn find_email_account(&self, email: &str) -> Result<Option<User>, WebServiceError>;

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, WebServiceError>;

    /// Insert a new account, returning it with the generated id.
    async fn create(&self, user: &NewUser) -> Result<User, WebServiceError>;

    /// Refresh email/name/picture (and the variant tag) of the account bound
    /// to `google_id`. An external identity can reclaim its email this way.
    async fn update_google_profile(
        &self,
        google_id: &str,
        profile: &GoogleProfile,
    ) -> Result<(), WebServiceError>;

    /// Atomically credit points and study seconds to a user row.
    async fn add_study_reward(
        &self,
        id: i64,
        points: i32,
        seconds: i64,
    ) -> Result<(), WebServiceError>;
}

/// Repository for one-time passwords.
pub trait OtpRepository: Send + Sync {
    /// Store a code for an email, unconditionally replacing any prior one.
    async fn replace(&self, record: &OtpRecord) -> Result<(), WebServiceError>;

    /// Remove and return the outstanding code for an email, in one
    /// transaction. Verification compares *after* the record is gone, so a
    /// wrong or expired submission burns the code exactly like a correct one.
    async fn take(&self, email: &str) -> Result<Option<OtpRecord>, WebServiceError>;
}

/// Repository for study sessions.
pub trait StudySessionRepository: Send + Sync {
    /// Insert a new session, returning its generated id.
    async fn create(&self, session: &NewStudySession) -> Result<i64, WebServiceError>;

    /// Mark a session completed. The `user_id` guard ensures only the owner
    /// can complete it; returns `false` if no matching row exists.
    async fn complete(
        &self,
        id: i64,
        user_id: i64,
        ended_at: DateTime<Utc>,
    ) -> Result<bool, WebServiceError>;
}

/// Outbound mail capability. Failure means "could not deliver", never
/// anything about the address itself.
pub trait Mailer: Send + Sync {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), WebServiceError>;
}

/// OAuth2 authorization-code collaborator (Google).
pub trait GoogleOAuth: Send + Sync {
    /// Authorization URL for the consent screen, carrying `state`.
    fn authorization_url(&self, state: &str) -> String;

    /// Exchange an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<String, WebServiceError>;

    /// Fetch userinfo with an access token. Non-200 is a hard failure.
    async fn fetch_userinfo(
        &self,
        access_token: &str,
    ) -> Result<GoogleUserinfo, WebServiceError>;
}

/// Black-box study-tip capability.
pub trait SuggestionProvider: Send + Sync {
    async fn study_tip(&self) -> Result<String, WebServiceError>;
}
