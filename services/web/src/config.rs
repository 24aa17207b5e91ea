/// Service configuration loaded from environment variables once at startup.
/// Values are handed to `AppState` and the outbound clients explicitly;
/// nothing reads the environment mid-request.
#[derive(Debug)]
pub struct WebConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session and pending-flow tokens.
    pub session_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// Google OAuth client id.
    pub google_client_id: String,
    /// Google OAuth client secret.
    pub google_client_secret: String,
    /// Redirect URI registered with Google. Env var: `GOOGLE_REDIRECT_URI`.
    pub google_redirect_uri: String,
    /// Mail relay base URL (OTP delivery).
    pub mail_api_url: String,
    /// Mail relay API key.
    pub mail_api_key: String,
    /// From address for OTP mail.
    pub mail_from: String,
    /// Suggestion provider base URL (OpenAI-compatible). Env var:
    /// `SUGGESTION_API_URL`.
    pub suggestion_api_url: String,
    /// Suggestion provider API key.
    pub suggestion_api_key: String,
    /// TCP port to listen on (default 5000). Env var: `WEB_PORT`.
    pub web_port: u16,
}

impl WebConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            session_secret: std::env::var("SESSION_SECRET").expect("SESSION_SECRET"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            google_client_id: std::env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID"),
            google_client_secret: std::env::var("GOOGLE_CLIENT_SECRET")
                .expect("GOOGLE_CLIENT_SECRET"),
            google_redirect_uri: std::env::var("GOOGLE_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:5000/auth/google/callback".to_owned()),
            mail_api_url: std::env::var("MAIL_API_URL").expect("MAIL_API_URL"),
            mail_api_key: std::env::var("MAIL_API_KEY").expect("MAIL_API_KEY"),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Study Smart Timer <no-reply@smartstudy.app>".to_owned()),
            suggestion_api_url: std::env::var("SUGGESTION_API_URL")
                .unwrap_or_else(|_| "https://api.a4f.co/v1".to_owned()),
            suggestion_api_key: std::env::var("SUGGESTION_API_KEY").expect("SUGGESTION_API_KEY"),
            web_port: std::env::var("WEB_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        }
    }
}
