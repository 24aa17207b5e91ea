use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use smartstudy_web::domain::repository::{
    GoogleOAuth, Mailer, OtpRepository, StudySessionRepository, SuggestionProvider,
    UserRepository,
};
use smartstudy_web::domain::types::{
    AccountKind, GoogleProfile, GoogleUserinfo, NewStudySession, NewUser, OtpRecord, User,
};
use smartstudy_web::error::WebServiceError;

pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-integration";

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    next_id: Arc<Mutex<i64>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            users: Arc::new(Mutex::new(users)),
            next_id: Arc::new(Mutex::new(next_id)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the stored users for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, WebServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WebServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_email_account(&self, email: &str) -> Result<Option<User>, WebServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email && u.kind == AccountKind::Email)
            .cloned())
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, WebServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| matches!(&u.kind, AccountKind::Google { google_id: id } if id == google_id))
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, WebServiceError> {
        let mut users = self.users.lock().unwrap();
        // The real store enforces this with a unique index.
        if users.iter().any(|u| u.email == user.email) {
            return Err(WebServiceError::Internal(anyhow::anyhow!(
                "unique violation: users.email"
            )));
        }
        let mut next_id = self.next_id.lock().unwrap();
        let created = User {
            id: *next_id,
            email: user.email.clone(),
            name: user.name.clone(),
            profile_picture: user.profile_picture.clone(),
            points: 0,
            total_study_time: 0,
            email_verified: user.email_verified,
            kind: user.kind.clone(),
        };
        *next_id += 1;
        users.push(created.clone());
        Ok(created)
    }

    async fn update_google_profile(
        &self,
        google_id: &str,
        profile: &GoogleProfile,
    ) -> Result<(), WebServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users
            .iter_mut()
            .find(|u| matches!(&u.kind, AccountKind::Google { google_id: id } if id == google_id))
        {
            user.email = profile.email.clone();
            user.name = profile.name.clone();
            user.profile_picture = profile.picture.clone();
        }
        Ok(())
    }

    async fn add_study_reward(
        &self,
        id: i64,
        points: i32,
        seconds: i64,
    ) -> Result<(), WebServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.points += points;
            user.total_study_time += seconds;
        }
        Ok(())
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockOtpRepo {
    pub codes: Arc<Mutex<HashMap<String, OtpRecord>>>,
}

impl MockOtpRepo {
    pub fn empty() -> Self {
        Self {
            codes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn stored_code(&self, email: &str) -> Option<String> {
        self.codes
            .lock()
            .unwrap()
            .get(email)
            .map(|r| r.code.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.codes.lock().unwrap().is_empty()
    }
}

impl OtpRepository for MockOtpRepo {
    async fn replace(&self, record: &OtpRecord) -> Result<(), WebServiceError> {
        self.codes
            .lock()
            .unwrap()
            .insert(record.email.clone(), record.clone());
        Ok(())
    }

    async fn take(&self, email: &str) -> Result<Option<OtpRecord>, WebServiceError> {
        Ok(self.codes.lock().unwrap().remove(email))
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

impl MockMailer {
    pub fn working() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: true,
        }
    }

    /// Code carried by the most recently sent mail.
    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, code)| code.clone())
    }
}

impl Mailer for MockMailer {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), WebServiceError> {
        if self.fail {
            return Err(WebServiceError::MailDelivery(anyhow::anyhow!(
                "relay refused connection"
            )));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), code.to_owned()));
        Ok(())
    }
}

// ── MockGoogle ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockGoogle {
    /// `None` makes the userinfo fetch fail like a non-200 response.
    pub userinfo: Option<GoogleUserinfo>,
    pub fail_exchange: bool,
    pub exchange_calls: Arc<Mutex<u32>>,
}

impl MockGoogle {
    pub fn with_userinfo(userinfo: GoogleUserinfo) -> Self {
        Self {
            userinfo: Some(userinfo),
            fail_exchange: false,
            exchange_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn broken_userinfo() -> Self {
        Self {
            userinfo: None,
            fail_exchange: false,
            exchange_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn broken_exchange() -> Self {
        Self {
            userinfo: None,
            fail_exchange: true,
            exchange_calls: Arc::new(Mutex::new(0)),
        }
    }
}

impl GoogleOAuth for MockGoogle {
    fn authorization_url(&self, state: &str) -> String {
        format!("https://accounts.example.com/authorize?client_id=test&state={state}")
    }

    async fn exchange_code(&self, _code: &str) -> Result<String, WebServiceError> {
        *self.exchange_calls.lock().unwrap() += 1;
        if self.fail_exchange {
            return Err(WebServiceError::OauthUpstream(anyhow::anyhow!(
                "token endpoint returned 500"
            )));
        }
        Ok("mock-access-token".to_owned())
    }

    async fn fetch_userinfo(
        &self,
        _access_token: &str,
    ) -> Result<GoogleUserinfo, WebServiceError> {
        self.userinfo.clone().ok_or_else(|| {
            WebServiceError::OauthUpstream(anyhow::anyhow!("userinfo returned 500"))
        })
    }
}

// ── MockStudySessionRepo ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct StoredSession {
    pub id: i64,
    pub user_id: i64,
    pub mode: String,
    pub duration_secs: i32,
    pub completed: bool,
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct MockStudySessionRepo {
    pub sessions: Arc<Mutex<Vec<StoredSession>>>,
    next_id: Arc<Mutex<i64>>,
}

impl MockStudySessionRepo {
    pub fn empty() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(vec![])),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    pub fn sessions_handle(&self) -> Arc<Mutex<Vec<StoredSession>>> {
        Arc::clone(&self.sessions)
    }
}

impl StudySessionRepository for MockStudySessionRepo {
    async fn create(&self, session: &NewStudySession) -> Result<i64, WebServiceError> {
        let mut next_id = self.next_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;
        self.sessions.lock().unwrap().push(StoredSession {
            id,
            user_id: session.user_id,
            mode: session.mode.clone(),
            duration_secs: session.duration_secs,
            completed: false,
            ended_at: None,
        });
        Ok(id)
    }

    async fn complete(
        &self,
        id: i64,
        user_id: i64,
        ended_at: DateTime<Utc>,
    ) -> Result<bool, WebServiceError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions
            .iter_mut()
            .find(|s| s.id == id && s.user_id == user_id)
        {
            Some(session) => {
                session.completed = true;
                session.ended_at = Some(ended_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockSuggestionProvider ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockSuggestionProvider {
    /// `None` makes the provider fail.
    pub tip: Option<String>,
}

impl SuggestionProvider for MockSuggestionProvider {
    async fn study_tip(&self) -> Result<String, WebServiceError> {
        self.tip
            .clone()
            .ok_or_else(|| WebServiceError::Internal(anyhow::anyhow!("provider unreachable")))
    }
}

// ── Test fixtures ────────────────────────────────────────────────────────────

pub fn email_user(id: i64, email: &str) -> User {
    User {
        id,
        email: email.to_owned(),
        name: "Ann".to_owned(),
        profile_picture: None,
        points: 0,
        total_study_time: 0,
        email_verified: true,
        kind: AccountKind::Email,
    }
}

pub fn google_user(id: i64, email: &str, google_id: &str) -> User {
    User {
        id,
        email: email.to_owned(),
        name: "Gail".to_owned(),
        profile_picture: Some("https://lh3.example.com/photo.jpg".to_owned()),
        points: 0,
        total_study_time: 0,
        email_verified: true,
        kind: AccountKind::Google {
            google_id: google_id.to_owned(),
        },
    }
}

pub fn google_userinfo(sub: &str, email: &str, name: &str) -> GoogleUserinfo {
    GoogleUserinfo {
        sub: sub.to_owned(),
        email: email.to_owned(),
        name: name.to_owned(),
        picture: Some("https://lh3.example.com/new.jpg".to_owned()),
    }
}
