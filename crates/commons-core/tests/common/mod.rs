// Shared test helpers: an in-memory auth backend and wiremock setup.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use secrecy::SecretString;
use tokio::sync::broadcast;
use url::Url;
use wiremock::MockServer;

use commons_api::{ApiClient, OAuthProvider, TransportConfig};
use commons_core::{AuthBackend, CoreError, Session, SessionEvent, SessionEventKind, User};

pub async fn api_server() -> (MockServer, Arc<ApiClient>) {
    let server = MockServer::start().await;
    let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let api = ApiClient::new(base, &TransportConfig::default()).unwrap();
    (server, Arc::new(api))
}

pub fn session(user_id: &str, token: &str) -> Session {
    Session {
        access_token: SecretString::from(token.to_owned()),
        refresh_token: None,
        expires_at: Some(Utc::now() + Duration::hours(1)),
        user: User {
            id: user_id.into(),
            email: Some(format!("{user_id}@example.org")),
        },
    }
}

/// Arguments captured from a magic-link request.
#[derive(Debug, Clone)]
pub struct OtpCall {
    pub email: String,
    pub should_create_user: bool,
    pub redirect_to: Option<Url>,
}

/// Auth backend that keeps everything in memory and counts calls.
pub struct MemoryAuthBackend {
    session: Mutex<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
    get_session_calls: AtomicUsize,
    subscribe_calls: AtomicUsize,
    otp_calls: Mutex<Vec<OtpCall>>,
    fail_get_session: bool,
    fail_otp: bool,
}

impl MemoryAuthBackend {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            session: Mutex::new(None),
            events,
            get_session_calls: AtomicUsize::new(0),
            subscribe_calls: AtomicUsize::new(0),
            otp_calls: Mutex::new(Vec::new()),
            fail_get_session: false,
            fail_otp: false,
        }
    }

    pub fn with_session(self, session: Session) -> Self {
        *self.session.lock().unwrap() = Some(session);
        self
    }

    pub fn failing_get_session(mut self) -> Self {
        self.fail_get_session = true;
        self
    }

    pub fn failing_otp(mut self) -> Self {
        self.fail_otp = true;
        self
    }

    /// Change the session as the remote service would and announce it.
    pub fn emit(&self, kind: SessionEventKind, session: Option<Session>) {
        *self.session.lock().unwrap() = session.clone();
        let _ = self.events.send(SessionEvent::new(kind, session));
    }

    pub fn get_session_calls(&self) -> usize {
        self.get_session_calls.load(Ordering::SeqCst)
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    pub fn otp_calls(&self) -> Vec<OtpCall> {
        self.otp_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthBackend for MemoryAuthBackend {
    async fn get_session(&self) -> Result<Option<Session>, CoreError> {
        self.get_session_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get_session {
            return Err(CoreError::ConnectionFailed {
                url: "memory://auth".into(),
                reason: "offline".into(),
            });
        }
        Ok(self.session.lock().unwrap().clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.events.subscribe()
    }

    async fn sign_in_with_otp(
        &self,
        email: &str,
        should_create_user: bool,
        redirect_to: Option<&Url>,
    ) -> Result<(), CoreError> {
        self.otp_calls.lock().unwrap().push(OtpCall {
            email: email.to_owned(),
            should_create_user,
            redirect_to: redirect_to.cloned(),
        });
        if self.fail_otp {
            return Err(CoreError::AuthenticationFailed {
                message: "rate limited".into(),
            });
        }
        Ok(())
    }

    async fn verify_otp(&self, email: &str, code: &str) -> Result<Session, CoreError> {
        if code != "123456" {
            return Err(CoreError::AuthenticationFailed {
                message: "Token has expired or is invalid".into(),
            });
        }
        let user_id = email.split('@').next().unwrap_or(email);
        let session = session(user_id, "verified-token");
        self.emit(SessionEventKind::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: Option<&Url>,
    ) -> Result<Url, CoreError> {
        let mut url = Url::parse("https://auth.test/auth/v1/authorize").unwrap();
        url.query_pairs_mut().append_pair("provider", provider.as_str());
        if let Some(redirect) = redirect_to {
            url.query_pairs_mut().append_pair("redirect_to", redirect.as_str());
        }
        Ok(url)
    }

    async fn sign_out(&self) -> Result<(), CoreError> {
        self.emit(SessionEventKind::SignedOut, None);
        Ok(())
    }
}
