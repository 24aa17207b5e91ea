use serde::Deserialize;
use url::Url;

use crate::domain::repository::GoogleOAuth;
use crate::domain::types::GoogleUserinfo;
use crate::error::WebServiceError;
use crate::infra::outbound_client;

const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URI: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Scopes requested at the consent screen: OpenID plus enough profile to
/// fill a user row.
const OAUTH_SCOPES: &str = "openid \
    https://www.googleapis.com/auth/userinfo.email \
    https://www.googleapis.com/auth/userinfo.profile";

/// Google OAuth2 authorization-code client.
#[derive(Clone)]
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleOAuthClient {
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            http: outbound_client(),
            client_id,
            client_secret,
            redirect_uri,
        }
    }
}

fn upstream(what: &'static str) -> impl FnOnce(reqwest::Error) -> WebServiceError {
    move |e| WebServiceError::OauthUpstream(anyhow::Error::new(e).context(what))
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserinfoResponse {
    sub: String,
    email: String,
    name: String,
    picture: Option<String>,
}

impl GoogleOAuth for GoogleOAuthClient {
    fn authorization_url(&self, state: &str) -> String {
        // offline access + forced consent, matching the registered client.
        Url::parse_with_params(
            GOOGLE_AUTH_URI,
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", OAUTH_SCOPES),
                ("state", state),
                ("access_type", "offline"),
                ("include_granted_scopes", "true"),
                ("prompt", "consent"),
            ],
        )
        .expect("static authorize URL is valid")
        .to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<String, WebServiceError> {
        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let response = self
            .http
            .post(GOOGLE_TOKEN_URI)
            .form(&params)
            .send()
            .await
            .map_err(upstream("token exchange request"))?
            .error_for_status()
            .map_err(upstream("token exchange status"))?;
        let body: TokenResponse = response
            .json()
            .await
            .map_err(upstream("token exchange body"))?;
        Ok(body.access_token)
    }

    async fn fetch_userinfo(
        &self,
        access_token: &str,
    ) -> Result<GoogleUserinfo, WebServiceError> {
        let response = self
            .http
            .get(GOOGLE_USERINFO_URI)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(upstream("userinfo request"))?;
        if !response.status().is_success() {
            return Err(WebServiceError::OauthUpstream(anyhow::anyhow!(
                "userinfo returned {}",
                response.status()
            )));
        }
        let body: UserinfoResponse =
            response.json().await.map_err(upstream("userinfo body"))?;
        Ok(GoogleUserinfo {
            sub: body.sub,
            email: body.email,
            name: body.name,
            picture: body.picture,
        })
    }
}
