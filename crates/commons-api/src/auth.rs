// Auth service client
//
// Thin client for a GoTrue-compatible auth service (`{auth_url}/auth/v1`).
// Covers the flows the directory needs: email one-time links/codes, OAuth
// redirect URLs, user lookup, token refresh, and logout. The public anon
// key rides along on every request as the `apikey` header.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::{Error, error_message};
use crate::transport::TransportConfig;

/// OAuth identity providers the directory offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Github,
}

impl OAuthProvider {
    /// Provider slug used in the `provider` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Github => "github",
        }
    }
}

/// User object returned by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Session issued by `/verify` or `/token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds from issue.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Absolute expiry, epoch seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: UserResponse,
}

/// HTTP client for the auth service.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Create a new auth client.
    ///
    /// `auth_url` is the service root (e.g. `http://localhost:54321`); the
    /// `/auth/v1` prefix is appended here.
    pub fn new(
        auth_url: &Url,
        anon_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(anon_key.expose_secret())
            .map_err(|_| Error::Authentication {
                message: "anon key contains invalid header characters".into(),
            })?;
        key.set_sensitive(true);
        headers.insert("apikey", key);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            base_url: Self::service_root(auth_url)?,
        })
    }

    /// Create an auth client around a pre-built `reqwest::Client`.
    pub fn from_reqwest(auth_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let auth_url = Url::parse(auth_url)?;
        Ok(Self {
            http,
            base_url: Self::service_root(&auth_url)?,
        })
    }

    fn service_root(auth_url: &Url) -> Result<Url, Error> {
        let mut url = auth_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(auth_url.to_string()))?
            .pop_if_empty()
            .extend(["auth", "v1"]);
        Ok(url)
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .push(path);
        Ok(url)
    }

    // ── Flows ────────────────────────────────────────────────────────

    /// Email a one-time sign-in link (and code) to `email`.
    ///
    /// `POST /otp`. `redirect_to` is where the emailed link lands.
    pub async fn send_otp(
        &self,
        email: &str,
        should_create_user: bool,
        redirect_to: Option<&Url>,
    ) -> Result<(), Error> {
        let mut url = self.url("otp")?;
        if let Some(redirect) = redirect_to {
            url.query_pairs_mut().append_pair("redirect_to", redirect.as_str());
        }
        debug!(email, "requesting one-time sign-in link");

        let body = json!({
            "email": email,
            "create_user": should_create_user,
        });
        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check_status(resp).await.map(drop)
    }

    /// Exchange an emailed one-time code for a session.
    ///
    /// `POST /verify`
    pub async fn verify_otp(&self, email: &str, token: &str) -> Result<SessionResponse, Error> {
        let url = self.url("verify")?;
        debug!(email, "verifying one-time code");

        let body = json!({
            "type": "email",
            "email": email,
            "token": token,
        });
        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse(resp).await
    }

    /// Build the browser URL that starts an OAuth sign-in.
    ///
    /// `GET /authorize?provider=...&redirect_to=...`. Nothing is sent; the
    /// user's browser follows this URL.
    pub fn authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: Option<&Url>,
    ) -> Result<Url, Error> {
        let mut url = self.url("authorize")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("provider", provider.as_str());
            if let Some(redirect) = redirect_to {
                query.append_pair("redirect_to", redirect.as_str());
            }
        }
        Ok(url)
    }

    /// Look up the user owning `access_token`.
    ///
    /// `GET /user`
    pub async fn get_user(&self, access_token: &SecretString) -> Result<UserResponse, Error> {
        let url = self.url("user")?;
        debug!("fetching auth user");

        let resp = self
            .http
            .get(url)
            .bearer_auth(access_token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse(resp).await
    }

    /// Trade a refresh token for a fresh session.
    ///
    /// `POST /token?grant_type=refresh_token`
    pub async fn refresh_session(
        &self,
        refresh_token: &SecretString,
    ) -> Result<SessionResponse, Error> {
        let mut url = self.url("token")?;
        url.query_pairs_mut()
            .append_pair("grant_type", "refresh_token");
        debug!("refreshing session");

        let body = json!({ "refresh_token": refresh_token.expose_secret() });
        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse(resp).await
    }

    /// Revoke the session owning `access_token`.
    ///
    /// `POST /logout`
    pub async fn logout(&self, access_token: &SecretString) -> Result<(), Error> {
        let url = self.url("logout")?;
        debug!("logging out");

        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check_status(resp).await.map(drop)
    }

    // ── Response helpers ─────────────────────────────────────────────

    /// Turn a non-success status into `Error::Authentication`, returning the body otherwise.
    async fn check_status(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::Authentication {
                message: format!("HTTP {status}: {}", error_message(&body)),
            })
        }
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let body = Self::check_status(resp).await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
