// ── Program request types ──
//
// What views hand to `ProgramStore`. Dates are strongly typed here and
// rendered to ISO strings on the way out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::ProviderId;

/// Fields for a new program. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateProgramRequest {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub date_interval: Option<String>,
    pub repeat_interval: Option<String>,
    pub place_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub provider_id: Option<ProviderId>,
}

impl CreateProgramRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A partial update. Unset fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateProgramRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub date_interval: Option<String>,
    pub repeat_interval: Option<String>,
    pub place_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub provider_id: Option<ProviderId>,
    pub approved: Option<bool>,
}

impl UpdateProgramRequest {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
