// ── Provider domain type ──

use serde::{Deserialize, Serialize};

use super::ids::{ProgramId, ProviderId};

/// An organization offering programs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub description: Option<String>,
    /// Only populated by the detail endpoint.
    pub programs: Option<Vec<ProgramSummary>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSummary {
    pub id: ProgramId,
    pub name: String,
}
