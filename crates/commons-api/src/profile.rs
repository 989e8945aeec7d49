// Profile endpoint
//
// The only bearer-authenticated call on the directory API. The backend
// creates the profile row on first access.

use secrecy::SecretString;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::ProfileResponse;

impl ApiClient {
    /// Fetch the profile of the user owning `access_token`.
    ///
    /// `GET /profile` with `Authorization: Bearer <access_token>`
    pub async fn get_profile(&self, access_token: &SecretString) -> Result<ProfileResponse, Error> {
        let url = self.url(&["profile"])?;
        debug!("fetching profile");
        self.get_with_bearer(url, access_token).await
    }
}
