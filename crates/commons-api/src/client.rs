// Directory API HTTP client
//
// Wraps `reqwest::Client` with base-URL path joining, bearer injection,
// and status/body decoding. Resource endpoints (programs, providers,
// profile) are implemented as inherent methods in separate files to keep
// this module focused on transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, error_message};
use crate::transport::TransportConfig;

/// Raw HTTP client for the community directory REST API.
///
/// Every method issues exactly one request and returns the parsed body.
/// No payload validation, no retries: a non-success status surfaces as
/// [`Error::Api`] (or [`Error::Unauthorized`] for 401) and the caller decides.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the API root including any prefix, e.g.
    /// `http://localhost:8000/api`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Append path segments to the base URL, percent-encoding each one.
    ///
    /// `["programs", id]` on `http://host/api` yields `http://host/api/programs/{id}`.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a GET request carrying `Authorization: Bearer <token>`.
    pub(crate) async fn get_with_bearer<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &SecretString,
    ) -> Result<T, Error> {
        debug!("GET {} (bearer)", url);

        let resp = self
            .http
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a POST request with JSON body and decode the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a PUT request with JSON body and decode the response.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Map the status to an error or decode the body as `T`.
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized {
                message: error_message(&body),
            });
        }

        if !status.is_success() {
            let message = error_message(&body);
            return Err(Error::Api {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_owned()
                } else {
                    message
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::from_reqwest(base, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn url_appends_to_prefixed_base() {
        let c = client("http://localhost:8000/api");
        let url = c.url(&["programs", "p1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/programs/p1");
    }

    #[test]
    fn url_tolerates_trailing_slash() {
        let c = client("http://localhost:8000/api/");
        let url = c.url(&["providers"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/providers");
    }

    #[test]
    fn url_on_bare_host() {
        let c = client("http://localhost:8000");
        let url = c.url(&["profile"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/profile");
    }

    #[test]
    fn url_encodes_identifier_segments() {
        let c = client("http://localhost:8000/api");
        let url = c.url(&["programs", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/programs/a%2Fb%20c");
    }

    #[test]
    fn url_rejects_cannot_be_a_base() {
        let c = client("mailto:someone@example.org");
        assert!(matches!(c.url(&["programs"]), Err(Error::InvalidBaseUrl(_))));
    }
}
