// ── Runtime connection configuration ──
//
// These types describe *how* to reach the directory API and the auth
// service. They carry credential data and connection tuning but never
// touch disk. The CLI builds a `ClientConfig` and hands it in.

use std::time::Duration;

use commons_api::{TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_AUTH_URL: &str = "http://localhost:54321";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed local stacks).
    DangerAcceptInvalid,
}

/// Configuration for one directory deployment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Directory API base URL, including the `/api` prefix.
    pub api_url: Url,
    /// Auth service root; `/auth/v1` is appended by the auth client.
    pub auth_url: Url,
    /// Public anon key sent as the `apikey` header.
    pub anon_key: SecretString,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Where emailed sign-in links and OAuth flows land. `auth/callback`
    /// is joined onto it for magic links.
    pub redirect_url: Option<Url>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.parse().expect("default API URL is valid"),
            auth_url: DEFAULT_AUTH_URL.parse().expect("default auth URL is valid"),
            anon_key: SecretString::from(String::new()),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            redirect_url: None,
        }
    }
}

impl ClientConfig {
    /// Translate into the transport-level config both HTTP clients share.
    pub fn build_transport(&self) -> TransportConfig {
        TransportConfig {
            tls: tls_to_transport(&self.tls),
            timeout: self.timeout,
        }
    }

    /// Redirect target for emailed sign-in links.
    pub fn magic_link_redirect(&self) -> Option<Url> {
        self.redirect_url.as_ref().and_then(callback_url)
    }
}

/// `{base}/auth/callback`, where emailed sign-in links land.
pub(crate) fn callback_url(base: &Url) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(["auth", "callback"]);
    Some(url)
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_stack() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url.as_str(), "http://localhost:8000/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.magic_link_redirect().is_none());
    }

    #[test]
    fn magic_link_redirect_joins_callback() {
        let config = ClientConfig {
            redirect_url: Some("https://commons.example.org/".parse().unwrap()),
            ..ClientConfig::default()
        };
        assert_eq!(
            config.magic_link_redirect().unwrap().as_str(),
            "https://commons.example.org/auth/callback"
        );
    }

    #[test]
    fn insecure_maps_to_accept_invalid() {
        let config = ClientConfig {
            tls: TlsVerification::DangerAcceptInvalid,
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.build_transport().tls,
            TlsMode::DangerAcceptInvalid
        ));
    }
}
