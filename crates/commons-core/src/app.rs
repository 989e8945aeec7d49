// ── Application wiring ──
//
// Builds the HTTP clients once and hands the same store handles to every
// consumer. There are no globals; whoever owns the `App` owns the state.

use std::sync::Arc;

use commons_api::{ApiClient, AuthClient};
use tracing::debug;

use crate::auth::{AuthBackend, AuthStore, RemoteAuthBackend};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::Session;
use crate::router::{RouteTable, Router};
use crate::seed;
use crate::store::{ProgramStore, ProviderStore};

/// Entry point for consumers. Cheaply cloneable.
#[derive(Clone)]
pub struct App {
    inner: Arc<AppInner>,
}

struct AppInner {
    config: ClientConfig,
    programs: ProgramStore,
    providers: ProviderStore,
    auth: AuthStore,
    router: Router,
}

impl App {
    /// Build an app that talks to the configured backends, optionally
    /// resuming a previously persisted session.
    pub fn new(config: ClientConfig, session: Option<Session>) -> Result<Self, CoreError> {
        let transport = config.build_transport();
        let api = Arc::new(ApiClient::new(config.api_url.clone(), &transport)?);
        let auth_client = AuthClient::new(&config.auth_url, &config.anon_key, &transport)?;
        let backend: Arc<dyn AuthBackend> =
            Arc::new(RemoteAuthBackend::with_session(auth_client, session));
        debug!(api_url = %config.api_url, auth_url = %config.auth_url, "app wired");
        Ok(Self::with_backend(config, api, backend))
    }

    /// Build an app around an existing API client and auth backend.
    pub fn with_backend(
        config: ClientConfig,
        api: Arc<ApiClient>,
        backend: Arc<dyn AuthBackend>,
    ) -> Self {
        let auth = AuthStore::new(Arc::clone(&api), backend, config.redirect_url.clone());
        let router = Router::new(RouteTable::default_routes(), auth.clone());
        Self {
            inner: Arc::new(AppInner {
                programs: ProgramStore::new(Arc::clone(&api)),
                providers: ProviderStore::new(api),
                auth,
                router,
                config,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn programs(&self) -> &ProgramStore {
        &self.inner.programs
    }

    pub fn providers(&self) -> &ProviderStore {
        &self.inner.providers
    }

    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    pub fn router(&self) -> &Router {
        &self.inner.router
    }

    /// Fill both stores with the sample directory.
    pub fn load_seed_data(&self) {
        self.inner.programs.preload(seed::programs());
        self.inner.providers.preload(seed::providers());
    }

    /// Stop background tasks.
    pub async fn shutdown(&self) {
        self.inner.auth.shutdown().await;
    }
}
