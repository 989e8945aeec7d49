// commons-api: Async Rust client for the community directory REST API
// (programs, providers, profile) and its GoTrue-compatible auth service.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
mod profile;
mod programs;
mod providers;
pub mod transport;

pub use auth::{AuthClient, OAuthProvider};
pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
