// ── Remote auth backend ──
//
// `AuthBackend` over the HTTP auth service. Holds the session in memory
// and broadcasts a `SessionEvent` whenever it changes.

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info, warn};
use url::Url;

use commons_api::{AuthClient, OAuthProvider};

use crate::auth::AuthBackend;
use crate::error::CoreError;
use crate::model::{Session, SessionEvent, SessionEventKind};

const EVENT_CHANNEL_SIZE: usize = 16;

pub struct RemoteAuthBackend {
    client: AuthClient,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
}

impl RemoteAuthBackend {
    pub fn new(client: AuthClient) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self {
            client,
            session: RwLock::new(None),
            events,
        }
    }

    /// Start from a previously persisted session.
    pub fn with_session(client: AuthClient, session: Option<Session>) -> Self {
        let backend = Self::new(client);
        Self {
            session: RwLock::new(session),
            ..backend
        }
    }

    fn emit(&self, kind: SessionEventKind, session: Option<Session>) {
        debug!(%kind, "session event");
        // No receivers is fine; the store may not be initialized yet.
        let _ = self.events.send(SessionEvent::new(kind, session));
    }

    async fn refresh(&self, refresh_token: &SecretString) -> Result<Option<Session>, CoreError> {
        match self.client.refresh_session(refresh_token).await {
            Ok(raw) => {
                let session = Session::from(raw);
                *self.session.write().await = Some(session.clone());
                info!("session refreshed");
                self.emit(SessionEventKind::TokenRefreshed, Some(session.clone()));
                Ok(Some(session))
            }
            Err(e) if e.is_auth_expired() => {
                warn!(error = %e, "refresh token rejected, dropping session");
                *self.session.write().await = None;
                self.emit(SessionEventKind::SignedOut, None);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl AuthBackend for RemoteAuthBackend {
    async fn get_session(&self) -> Result<Option<Session>, CoreError> {
        let current = self.session.read().await.clone();
        let Some(session) = current else {
            return Ok(None);
        };
        if !session.is_expired() {
            return Ok(Some(session));
        }
        match session.refresh_token {
            Some(ref refresh_token) => self.refresh(refresh_token).await,
            None => {
                debug!("session expired without refresh token");
                *self.session.write().await = None;
                self.emit(SessionEventKind::SignedOut, None);
                Ok(None)
            }
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn sign_in_with_otp(
        &self,
        email: &str,
        should_create_user: bool,
        redirect_to: Option<&Url>,
    ) -> Result<(), CoreError> {
        self.client
            .send_otp(email, should_create_user, redirect_to)
            .await?;
        info!(email, "sign-in link sent");
        Ok(())
    }

    async fn verify_otp(&self, email: &str, code: &str) -> Result<Session, CoreError> {
        let session = Session::from(self.client.verify_otp(email, code).await?);
        *self.session.write().await = Some(session.clone());
        info!(user_id = %session.user.id, "signed in");
        self.emit(SessionEventKind::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: Option<&Url>,
    ) -> Result<Url, CoreError> {
        Ok(self.client.authorize_url(provider, redirect_to)?)
    }

    async fn sign_out(&self) -> Result<(), CoreError> {
        let previous = self.session.write().await.take();
        if let Some(session) = previous {
            // Local sign-out still happens when revocation fails.
            if let Err(e) = self.client.logout(&session.access_token).await {
                warn!(error = %e, "remote logout failed (non-fatal)");
            }
        }
        info!("signed out");
        self.emit(SessionEventKind::SignedOut, None);
        Ok(())
    }
}
