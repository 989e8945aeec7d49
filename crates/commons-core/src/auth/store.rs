// ── Auth store ──
//
// Mirrors the auth backend's session into observable state and keeps the
// app profile in step with it. A single background task consumes the
// backend's session events for the life of the store.

use std::sync::Arc;

use secrecy::SecretString;
use strum::Display;
use tokio::sync::{Mutex, OnceCell, broadcast};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use commons_api::{ApiClient, OAuthProvider};

use crate::auth::AuthBackend;
use crate::config::callback_url;
use crate::error::CoreError;
use crate::model::{Profile, Session, SessionEvent, SessionEventKind, User};
use crate::store::Observable;
use crate::stream::StateStream;

/// Lifecycle of the auth store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum AuthState {
    /// `initialize()` has not been called.
    #[default]
    Uninitialized,
    /// The initial session lookup is in flight.
    Initializing,
    Anonymous,
    Authenticated,
}

/// Session, user and profile state. Cheaply cloneable.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<AuthStoreInner>,
}

struct AuthStoreInner {
    api: Arc<ApiClient>,
    backend: Arc<dyn AuthBackend>,
    redirect_url: Option<Url>,
    state: Observable<AuthState>,
    session: Observable<Option<Session>>,
    user: Observable<Option<User>>,
    profile: Observable<Option<Arc<Profile>>>,
    loading: Observable<bool>,
    init: OnceCell<()>,
    cancel: CancellationToken,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl AuthStore {
    /// `redirect_url` is the app's public URL; OAuth flows return there and
    /// emailed links land on `{redirect_url}/auth/callback`.
    pub fn new(
        api: Arc<ApiClient>,
        backend: Arc<dyn AuthBackend>,
        redirect_url: Option<Url>,
    ) -> Self {
        Self {
            inner: Arc::new(AuthStoreInner {
                api,
                backend,
                redirect_url,
                state: Observable::default(),
                session: Observable::default(),
                user: Observable::default(),
                profile: Observable::default(),
                loading: Observable::default(),
                init: OnceCell::new(),
                cancel: CancellationToken::new(),
                listener: Mutex::new(None),
            }),
        }
    }

    // ── State ────────────────────────────────────────────────────────

    pub fn state(&self) -> AuthState {
        self.inner.state.get()
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.session.get()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.user.get()
    }

    pub fn profile(&self) -> Option<Arc<Profile>> {
        self.inner.profile.get()
    }

    /// True while a magic-link request is in flight.
    pub fn loading(&self) -> bool {
        self.inner.loading.get()
    }

    /// A user is present.
    pub fn is_authenticated(&self) -> bool {
        self.inner.user.get().is_some()
    }

    /// The session's access token.
    pub fn token(&self) -> Option<SecretString> {
        self.inner.session.get().map(|s| s.access_token)
    }

    pub fn subscribe_state(&self) -> StateStream<AuthState> {
        self.inner.state.subscribe()
    }

    pub fn subscribe_session(&self) -> StateStream<Option<Session>> {
        self.inner.session.subscribe()
    }

    pub fn subscribe_user(&self) -> StateStream<Option<User>> {
        self.inner.user.subscribe()
    }

    pub fn subscribe_profile(&self) -> StateStream<Option<Arc<Profile>>> {
        self.inner.profile.subscribe()
    }

    pub fn subscribe_loading(&self) -> StateStream<bool> {
        self.inner.loading.subscribe()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Load the current session and start consuming session events.
    ///
    /// Runs once per store. Later and concurrent calls wait for the first
    /// one to finish and then return without touching the backend.
    pub async fn initialize(&self) {
        self.inner
            .init
            .get_or_init(|| self.initialize_once())
            .await;
    }

    async fn initialize_once(&self) {
        self.inner.state.set(AuthState::Initializing);

        // Subscribe before the lookup so no change slips between the two.
        let events = self.inner.backend.subscribe();

        let session = match self.inner.backend.get_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "initial session lookup failed, continuing signed out");
                None
            }
        };
        self.handle_session_event(SessionEvent::new(SessionEventKind::InitialSession, session))
            .await;

        let handle = tokio::spawn(session_listener(
            self.clone(),
            events,
            self.inner.cancel.clone(),
        ));
        *self.inner.listener.lock().await = Some(handle);
        debug!(state = %self.state(), "auth store initialized");
    }

    /// Stop the session-event consumer.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let handle = self.inner.listener.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Email a one-time sign-in link. `loading` is set for the duration.
    pub async fn sign_in_with_magic_link(
        &self,
        email: &str,
        should_create_user: bool,
    ) -> Result<(), CoreError> {
        let redirect = self.inner.redirect_url.as_ref().and_then(callback_url);

        self.inner.loading.set(true);
        let result = self
            .inner
            .backend
            .sign_in_with_otp(email, should_create_user, redirect.as_ref())
            .await;
        self.inner.loading.set(false);
        result
    }

    /// URL that starts a Google sign-in in the user's browser.
    pub async fn sign_in_with_google(&self) -> Result<Url, CoreError> {
        self.sign_in_with_oauth(OAuthProvider::Google).await
    }

    pub async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<Url, CoreError> {
        self.inner
            .backend
            .sign_in_with_oauth(provider, self.inner.redirect_url.as_ref())
            .await
    }

    /// Exchange an emailed one-time code for a session.
    ///
    /// The session is applied here so callers can read it on return; the
    /// profile follows with the backend's `SignedIn` event.
    pub async fn verify_magic_link(&self, email: &str, code: &str) -> Result<Session, CoreError> {
        self.inner.loading.set(true);
        let result = self.inner.backend.verify_otp(email, code).await;
        self.inner.loading.set(false);

        let session = result?;
        self.apply_session(Some(session.clone()));
        Ok(session)
    }

    /// Sign out remotely, then clear all local auth state.
    pub async fn sign_out(&self) -> Result<(), CoreError> {
        self.inner.backend.sign_out().await?;
        self.apply_session(None);
        self.inner.profile.set(None);
        Ok(())
    }

    /// Refresh `profile` from the backend.
    ///
    /// Without a signed-in user or token the profile is cleared and no
    /// request is made. Failures are logged and leave the profile empty.
    pub async fn load_user_profile(&self) {
        if !self.is_authenticated() || self.token().is_none() {
            self.inner.profile.set(None);
            return;
        }

        match self.fetch_profile().await {
            Ok(profile) => {
                debug!(user_id = %profile.user_id, "profile loaded");
                self.inner.profile.set(Some(Arc::new(profile)));
            }
            Err(e) => {
                warn!(error = %e, "failed to load user profile");
                self.inner.profile.set(None);
            }
        }
    }

    /// Fetch the signed-in user's profile without touching store state.
    ///
    /// Asks the backend for a bearer token first and fails with
    /// [`CoreError::NotAuthenticated`] before any request when there is none.
    pub async fn fetch_profile(&self) -> Result<Profile, CoreError> {
        let session = self
            .inner
            .backend
            .get_session()
            .await?
            .ok_or(CoreError::NotAuthenticated)?;
        let raw = self.inner.api.get_profile(&session.access_token).await?;
        Ok(Profile::from(raw))
    }

    // ── Session handling ─────────────────────────────────────────────

    async fn handle_session_event(&self, event: SessionEvent) {
        debug!(kind = %event.kind, "handling session event");

        self.apply_session(event.session);

        if self.is_authenticated() {
            self.load_user_profile().await;
        } else {
            self.inner.profile.set(None);
        }
    }

    fn apply_session(&self, session: Option<Session>) {
        let user = session.as_ref().map(|s| s.user.clone());
        let next = if user.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };

        self.inner.session.set(session);
        self.inner.user.set(user);
        let previous = self.inner.state.get();
        if previous != next {
            info!(from = %previous, to = %next, "auth state changed");
        }
        self.inner.state.set(next);
    }

    async fn resync(&self) {
        match self.inner.backend.get_session().await {
            Ok(session) => {
                self.handle_session_event(SessionEvent::new(
                    SessionEventKind::InitialSession,
                    session,
                ))
                .await;
            }
            Err(e) => warn!(error = %e, "session resync failed"),
        }
    }
}

// ── Background task ──────────────────────────────────────────────

/// Apply every session event the backend announces until cancelled.
async fn session_listener(
    store: AuthStore,
    mut events: broadcast::Receiver<SessionEvent>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            event = events.recv() => match event {
                Ok(event) => store.handle_session_event(event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "session events lagged, resyncing");
                    store.resync().await;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
    debug!("session listener stopped");
}
