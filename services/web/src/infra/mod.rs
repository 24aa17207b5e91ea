pub mod db;
pub mod google;
pub mod mailer;
pub mod suggest;

use std::time::Duration;

/// Conservative timeout for every outbound call (mail relay, token exchange,
/// userinfo, suggestions). None of the collaborators specifies one; a hung
/// upstream must not hang the request.
pub(crate) const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(5);

/// Build an outbound HTTP client. Called once per collaborator at startup.
pub(crate) fn outbound_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(OUTBOUND_TIMEOUT)
        .build()
        .expect("failed to build outbound HTTP client")
}
