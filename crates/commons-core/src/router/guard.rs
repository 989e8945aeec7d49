// ── Guarded navigation ──

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::auth::AuthStore;
use crate::error::CoreError;
use crate::router::{RouteMatch, RouteTable};
use crate::store::Observable;
use crate::stream::StateStream;

const HOME: &str = "home";

/// Outcome of a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Navigation {
    /// The target route was entered.
    Proceed(RouteMatch),
    /// The target needs a signed-in user; home was entered instead.
    Redirect { from: String, to: RouteMatch },
}

impl Navigation {
    /// The route that ended up current.
    pub fn route(&self) -> &RouteMatch {
        match self {
            Self::Proceed(m) | Self::Redirect { to: m, .. } => m,
        }
    }
}

/// Route table plus auth guard. Cheaply cloneable.
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

struct RouterInner {
    table: RouteTable,
    auth: AuthStore,
    current: Observable<Option<RouteMatch>>,
    /// Held for the whole guard so navigations run one at a time.
    nav_lock: Mutex<()>,
}

impl Router {
    pub fn new(table: RouteTable, auth: AuthStore) -> Self {
        Self {
            inner: Arc::new(RouterInner {
                table,
                auth,
                current: Observable::default(),
                nav_lock: Mutex::new(()),
            }),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.inner.table
    }

    pub fn current(&self) -> Option<RouteMatch> {
        self.inner.current.get()
    }

    pub fn subscribe_current(&self) -> StateStream<Option<RouteMatch>> {
        self.inner.current.subscribe()
    }

    /// Navigate to `path`.
    ///
    /// Waits for any navigation already in progress, makes sure auth has
    /// been initialized, then enters the target route, or home when the
    /// target requires sign-in and nobody is signed in.
    pub async fn navigate(&self, path: &str) -> Result<Navigation, CoreError> {
        let _guard = self.inner.nav_lock.lock().await;

        self.inner.auth.initialize().await;

        let target = self
            .inner
            .table
            .resolve(path)
            .ok_or_else(|| CoreError::RouteNotFound {
                path: path.to_owned(),
            })?;

        let outcome = if target.requires_auth && !self.inner.auth.is_authenticated() {
            let home = self.home()?;
            info!(from = %target.path, "sign-in required, redirecting home");
            Navigation::Redirect {
                from: target.path,
                to: home,
            }
        } else {
            debug!(route = target.name, path = %target.path, "navigating");
            Navigation::Proceed(target)
        };

        self.inner.current.set(Some(outcome.route().clone()));
        Ok(outcome)
    }

    fn home(&self) -> Result<RouteMatch, CoreError> {
        let route = self
            .inner
            .table
            .by_name(HOME)
            .ok_or_else(|| CoreError::Internal("route table has no home route".into()))?;
        self.inner
            .table
            .resolve(route.path)
            .ok_or_else(|| CoreError::RouteNotFound {
                path: route.path.to_owned(),
            })
    }
}
