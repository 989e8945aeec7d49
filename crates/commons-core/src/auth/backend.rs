// ── Auth backend seam ──

use async_trait::async_trait;
use tokio::sync::broadcast;
use url::Url;

use commons_api::OAuthProvider;

use crate::error::CoreError;
use crate::model::{Session, SessionEvent};

/// The external session service the auth store sits on.
///
/// Implementations own the session and announce every change on the
/// channel returned by [`subscribe`](Self::subscribe).
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// The current session, refreshing it first if it has expired.
    async fn get_session(&self) -> Result<Option<Session>, CoreError>;

    /// Session-change notifications. Only events sent after the call are
    /// delivered.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;

    /// Email a one-time sign-in link.
    async fn sign_in_with_otp(
        &self,
        email: &str,
        should_create_user: bool,
        redirect_to: Option<&Url>,
    ) -> Result<(), CoreError>;

    /// Exchange an emailed one-time code for a session.
    async fn verify_otp(&self, email: &str, code: &str) -> Result<Session, CoreError>;

    /// URL the user's browser should open to start an OAuth sign-in.
    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: Option<&Url>,
    ) -> Result<Url, CoreError>;

    async fn sign_out(&self) -> Result<(), CoreError>;
}
