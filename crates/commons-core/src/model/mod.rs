// ── Domain model ──
//
// Canonical representations of directory entities. API wire types are
// converted into these in `crate::convert`; consumers only see these.

pub mod ids;
pub mod profile;
pub mod program;
pub mod provider;
pub mod requests;
pub mod session;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use commons_core::model::*` gives you everything.

pub use ids::{ProgramId, ProviderId, UserId};
pub use profile::Profile;
pub use program::{Location, ProviderRef, Program, Schedule};
pub use provider::{ProgramSummary, Provider};
pub use requests::{CreateProgramRequest, UpdateProgramRequest};
pub use session::{Session, SessionEvent, SessionEventKind, User};
