// ── Profile domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ProviderId, UserId};

/// Application-side profile of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Set when the user manages a provider.
    pub provider_id: Option<ProviderId>,
}
