// ── Program domain type ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{ProgramId, ProviderId};

/// A community-service program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub schedule: Schedule,
    pub location: Location,
    /// Owning provider. `name` is only known on detail/create responses.
    pub provider: Option<ProviderRef>,
    /// Moderation flag; `None` when the backend has not reviewed it.
    pub approved: Option<bool>,
}

/// When a program runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Free-form interval text, e.g. "Every Monday".
    pub date_interval: Option<String>,
    pub repeat_interval: Option<String>,
}

/// Where and how to reach a program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub place_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRef {
    pub id: ProviderId,
    pub name: Option<String>,
}

impl Program {
    /// Whether the program is running on `date`. Open-ended ranges count
    /// as active on the open side.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        let started = self.schedule.start_date.is_none_or(|start| start <= date);
        let not_ended = self.schedule.end_date.is_none_or(|end| date <= end);
        started && not_ended
    }

    pub fn provider_id(&self) -> Option<&ProviderId> {
        self.provider.as_ref().map(|p| &p.id)
    }

    /// Case-insensitive match against name, category and description.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [
            Some(self.name.as_str()),
            self.category.as_deref(),
            self.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}
