use chrono::{DateTime, Utc};

/// How an account authenticates. One `users` row per account; this is the
/// domain-side view of the `auth_type` discriminator plus the `google_id`
/// column, so an email account cannot carry an external id by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    Email,
    Google { google_id: String },
}

impl AccountKind {
    /// Storage tag for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Google { .. } => "google",
        }
    }
}

/// User account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub points: i32,
    pub total_study_time: i64,
    pub email_verified: bool,
    pub kind: AccountKind,
}

/// Fields for a new account. `id` is generated by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub email_verified: bool,
    pub kind: AccountKind,
}

/// Outstanding one-time password for an email address.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Profile fields refreshed from Google on every OAuth login.
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// Userinfo payload fetched from Google after the code exchange. `sub` is
/// the stable external identity; email is already verified by the provider.
#[derive(Debug, Clone)]
pub struct GoogleUserinfo {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// One timed study session.
#[derive(Debug, Clone)]
pub struct NewStudySession {
    pub user_id: i64,
    pub mode: String,
    pub duration_secs: i32,
    pub started_at: DateTime<Utc>,
}

/// OTP code length in digits.
pub const OTP_LEN: usize = 6;

/// OTP time-to-live in seconds (10 minutes).
pub const OTP_TTL_SECS: i64 = 600;

/// OAuth `state` token length in characters.
pub const OAUTH_STATE_LEN: usize = 32;

/// Points credited for a completed study session.
pub const SESSION_REWARD_POINTS: i32 = 50;

/// Study tip served when the suggestion provider is unreachable.
pub const FALLBACK_STUDY_TIP: &str =
    "Stay focused and take regular breaks to maintain productivity!";
