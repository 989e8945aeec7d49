// Keyring-backed session persistence.
//
// One JSON blob per profile under `{profile}/session`. Tokens only leave
// `SecretString` at the moment they are serialized for the keyring.

use chrono::DateTime;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use commons_core::{Session, User};

use crate::{ConfigError, KEYRING_SERVICE};

/// Serialized form of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Epoch seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<&Session> for PersistedSession {
    fn from(s: &Session) -> Self {
        Self {
            access_token: s.access_token.expose_secret().to_owned(),
            refresh_token: s
                .refresh_token
                .as_ref()
                .map(|t| t.expose_secret().to_owned()),
            expires_at: s.expires_at.map(|at| at.timestamp()),
            user_id: s.user.id.to_string(),
            email: s.user.email.clone(),
        }
    }
}

impl From<PersistedSession> for Session {
    fn from(p: PersistedSession) -> Self {
        Session {
            access_token: SecretString::from(p.access_token),
            refresh_token: p.refresh_token.map(SecretString::from),
            expires_at: p.expires_at.and_then(|ts| DateTime::from_timestamp(ts, 0)),
            user: User {
                id: p.user_id.into(),
                email: p.email,
            },
        }
    }
}

fn entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/session"),
    )?)
}

/// Load the stored session for a profile. A missing entry is `Ok(None)`.
pub fn load_session(profile_name: &str) -> Result<Option<Session>, ConfigError> {
    match entry(profile_name)?.get_password() {
        Ok(json) => {
            let persisted: PersistedSession = serde_json::from_str(&json)?;
            Ok(Some(persisted.into()))
        }
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn store_session(profile_name: &str, session: &Session) -> Result<(), ConfigError> {
    let json = serde_json::to_string(&PersistedSession::from(session))?;
    entry(profile_name)?.set_password(&json)?;
    debug!(profile = profile_name, "session stored in keyring");
    Ok(())
}

/// Remove the stored session. Removing a missing entry is not an error.
pub fn clear_session(profile_name: &str) -> Result<(), ConfigError> {
    match entry(profile_name)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn persisted_form_keeps_tokens_and_expiry() {
        let expires_at = DateTime::from_timestamp(Utc::now().timestamp() + 3600, 0);
        let session = Session {
            access_token: SecretString::from("access".to_owned()),
            refresh_token: Some(SecretString::from("refresh".to_owned())),
            expires_at,
            user: User {
                id: "user-1".into(),
                email: Some("ada@example.org".into()),
            },
        };

        let json = serde_json::to_string(&PersistedSession::from(&session)).unwrap();
        let back: Session = serde_json::from_str::<PersistedSession>(&json).unwrap().into();

        assert_eq!(back, session);
        assert_eq!(back.refresh_token.unwrap().expose_secret(), "refresh");
    }
}
