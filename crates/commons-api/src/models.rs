// Directory API wire types
//
// Shapes exactly as the backend sends and accepts them. Dates and timestamps
// stay strings here; `commons-core` parses them into strong types. Optional
// fields use `#[serde(default)]` because list endpoints return raw table rows
// while detail endpoints return the denormalized model.

use serde::{Deserialize, Serialize};

// ── Programs ─────────────────────────────────────────────────────────

/// A program record from `GET /programs`, `GET /programs/{id}`, or the
/// create/update responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramResponse {
    pub program_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub date_interval: Option<String>,
    #[serde(default)]
    pub repeat_interval: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub provider_id: Option<String>,
    /// Only present on detail/create responses (joined from `providers`).
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub approved: Option<bool>,
}

/// Body for `POST /programs`. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
}

/// Body for `PUT /programs/{id}`: any subset of the create fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

// ── Providers ────────────────────────────────────────────────────────

/// Program summary nested in `GET /providers/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSummaryResponse {
    pub program_id: String,
    pub name: String,
}

/// A provider record. `programs` is only populated by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub provider_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub programs: Option<Vec<ProgramSummaryResponse>>,
}

// ── Profile ──────────────────────────────────────────────────────────

/// The signed-in user's profile from `GET /profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// RFC 3339 timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub provider_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_row_without_provider_name_parses() {
        let row = json!({
            "program_id": "p1",
            "name": "Food Drive",
            "provider_id": "prov-1",
            "created_at": "2024-05-01T00:00:00+00:00"
        });
        let program: ProgramResponse = serde_json::from_value(row).unwrap();
        assert_eq!(program.provider_id.as_deref(), Some("prov-1"));
        assert!(program.provider_name.is_none());
    }

    #[test]
    fn create_body_omits_unset_fields() {
        let body = ProgramCreate {
            name: "Food Drive".into(),
            ..ProgramCreate::default()
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "name": "Food Drive" }));
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let body = ProgramUpdate::default();
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({}));
    }
}
