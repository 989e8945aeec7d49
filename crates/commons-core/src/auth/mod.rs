// ── Authentication ──
//
// `AuthBackend` abstracts the external session service; `AuthStore`
// mirrors its session into observable state and loads the app profile.

mod backend;
mod remote;
mod store;

pub use backend::AuthBackend;
pub use remote::RemoteAuthBackend;
pub use store::{AuthState, AuthStore};
