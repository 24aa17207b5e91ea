use rand::RngExt;

use smartstudy_session_types::flow::PendingFlow;

use crate::domain::repository::{GoogleOAuth, UserRepository};
use crate::domain::types::{AccountKind, GoogleProfile, NewUser, OAUTH_STATE_LEN};
use crate::error::WebServiceError;
use crate::usecase::session::{SessionGrant, issue_session_token};

/// Landing page after a login with no explicit `next` target.
pub const DEFAULT_NEXT_URL: &str = "/dashboard";

/// Charset for the OAuth `state` token (alphanumeric, both cases).
const STATE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

fn generate_state() -> String {
    let mut rng = rand::rng();
    (0..OAUTH_STATE_LEN)
        .map(|_| STATE_CHARSET[rng.random_range(0..STATE_CHARSET.len())] as char)
        .collect()
}

// ── Start OAuth login ─────────────────────────────────────────────────────────

pub struct StartOAuthOutput {
    pub authorization_url: String,
    pub flow: PendingFlow,
}

pub struct StartOAuthUseCase<G>
where
    G: GoogleOAuth,
{
    pub google: G,
}

impl<G> StartOAuthUseCase<G>
where
    G: GoogleOAuth,
{
    /// Mint an unguessable `state`, remember it together with the post-login
    /// target, and point the browser at the consent screen.
    pub fn execute(&self, next_url: Option<String>) -> StartOAuthOutput {
        let state = generate_state();
        let authorization_url = self.google.authorization_url(&state);
        StartOAuthOutput {
            authorization_url,
            flow: PendingFlow::Oauth {
                state,
                next_url: next_url.unwrap_or_else(|| DEFAULT_NEXT_URL.to_owned()),
            },
        }
    }
}

// ── OAuth callback ────────────────────────────────────────────────────────────

pub struct OAuthCallbackInput {
    pub code: String,
    /// `state` query parameter echoed back by the provider.
    pub returned_state: String,
    /// `state` remembered in the caller's pending flow.
    pub stored_state: String,
}

pub struct OAuthCallbackUseCase<G, U>
where
    G: GoogleOAuth,
    U: UserRepository,
{
    pub google: G,
    pub users: U,
    pub session_secret: String,
}

impl<G, U> OAuthCallbackUseCase<G, U>
where
    G: GoogleOAuth,
    U: UserRepository,
{
    /// The state check runs before any outbound call or store mutation; a
    /// forged callback gets rejected with nothing touched. After the
    /// exchange and userinfo fetch, the account bound to the external id is
    /// refreshed in place, or created pre-verified with zero points/time.
    /// OAuth sessions always remember.
    pub async fn execute(
        &self,
        input: OAuthCallbackInput,
    ) -> Result<SessionGrant, WebServiceError> {
        if input.returned_state != input.stored_state {
            return Err(WebServiceError::StateMismatch);
        }

        let access_token = self.google.exchange_code(&input.code).await?;
        let info = self.google.fetch_userinfo(&access_token).await?;

        let user = match self.users.find_by_google_id(&info.sub).await? {
            Some(_) => {
                let profile = GoogleProfile {
                    email: info.email,
                    name: info.name,
                    picture: info.picture,
                };
                self.users.update_google_profile(&info.sub, &profile).await?;
                self.users
                    .find_by_google_id(&info.sub)
                    .await?
                    .ok_or_else(|| {
                        WebServiceError::Internal(anyhow::anyhow!(
                            "user vanished after google profile update"
                        ))
                    })?
            }
            None => {
                self.users
                    .create(&NewUser {
                        email: info.email,
                        name: info.name,
                        profile_picture: info.picture,
                        email_verified: true,
                        kind: AccountKind::Google {
                            google_id: info.sub,
                        },
                    })
                    .await?
            }
        };

        let session_token = issue_session_token(user.id, true, &self.session_secret)?;
        Ok(SessionGrant {
            user,
            session_token,
        })
    }
}
