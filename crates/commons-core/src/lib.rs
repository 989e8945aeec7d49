// commons-core: Reactive data layer between commons-api and consumers (CLI).

pub mod app;
pub mod auth;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod router;
pub mod seed;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use app::App;
pub use auth::{AuthBackend, AuthState, AuthStore, RemoteAuthBackend};
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use router::{Navigation, RouteMatch, RouteTable, Router, View};
pub use store::{Observable, ProgramStore, ProviderStore};
pub use stream::StateStream;

pub use model::{
    CreateProgramRequest, Location, Profile, Program, ProgramId, ProgramSummary, Provider,
    ProviderId, ProviderRef, Schedule, Session, SessionEvent, SessionEventKind,
    UpdateProgramRequest, User, UserId,
};

// Callers build OAuth flows without importing the transport crate.
pub use commons_api::OAuthProvider;
