// Provider endpoints (read-only).

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::ProviderResponse;

impl ApiClient {
    /// List every provider.
    ///
    /// `GET /providers`
    pub async fn list_providers(&self) -> Result<Vec<ProviderResponse>, Error> {
        let url = self.url(&["providers"])?;
        debug!("listing providers");
        self.get(url).await
    }

    /// Fetch one provider with its program summaries.
    ///
    /// `GET /providers/{id}`
    pub async fn get_provider(&self, id: &str) -> Result<ProviderResponse, Error> {
        let url = self.url(&["providers", id])?;
        debug!(provider_id = id, "fetching provider");
        self.get(url).await
    }
}
