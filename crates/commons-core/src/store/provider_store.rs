// ── Provider store ──

use std::sync::Arc;

use commons_api::ApiClient;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Provider, ProviderId};
use crate::store::Observable;
use crate::stream::StateStream;

/// Reactive, read-only store for providers. Cheaply cloneable.
#[derive(Clone)]
pub struct ProviderStore {
    inner: Arc<ProviderStoreInner>,
}

struct ProviderStoreInner {
    api: Arc<ApiClient>,
    providers: Observable<Arc<Vec<Arc<Provider>>>>,
    provider: Observable<Option<Arc<Provider>>>,
}

impl ProviderStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            inner: Arc::new(ProviderStoreInner {
                api,
                providers: Observable::default(),
                provider: Observable::default(),
            }),
        }
    }

    pub fn providers(&self) -> Arc<Vec<Arc<Provider>>> {
        self.inner.providers.get()
    }

    pub fn provider(&self) -> Option<Arc<Provider>> {
        self.inner.provider.get()
    }

    pub fn subscribe_providers(&self) -> StateStream<Arc<Vec<Arc<Provider>>>> {
        self.inner.providers.subscribe()
    }

    pub fn subscribe_provider(&self) -> StateStream<Option<Arc<Provider>>> {
        self.inner.provider.subscribe()
    }

    /// Fetch every provider and replace the cached list.
    pub async fn list_providers(&self) -> Result<Arc<Vec<Arc<Provider>>>, CoreError> {
        let raw = self.inner.api.list_providers().await?;
        let list: Arc<Vec<Arc<Provider>>> =
            Arc::new(raw.into_iter().map(|p| Arc::new(Provider::from(p))).collect());
        debug!(count = list.len(), "provider list replaced");
        self.inner.providers.set(Arc::clone(&list));
        Ok(list)
    }

    /// Fetch one provider (with its program summaries) and make it current.
    pub async fn get_provider(&self, id: &ProviderId) -> Result<Arc<Provider>, CoreError> {
        let raw = self.inner.api.get_provider(id.as_str()).await?;
        let provider = Arc::new(Provider::from(raw));
        self.inner.provider.set(Some(Arc::clone(&provider)));
        Ok(provider)
    }

    pub fn find_provider(&self, id: &ProviderId) -> Option<Arc<Provider>> {
        self.providers().iter().find(|p| &p.id == id).cloned()
    }

    /// Seed the list without a network call.
    pub fn preload(&self, providers: Vec<Provider>) {
        self.inner
            .providers
            .set(Arc::new(providers.into_iter().map(Arc::new).collect()));
    }
}
