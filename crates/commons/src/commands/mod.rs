//! Command dispatch: bridges CLI args -> core stores -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod profile;
pub mod programs;
pub mod providers;
pub mod route;
pub mod util;

use commons_core::App;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an app-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, app: &App, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Programs(args) => programs::handle(app, args, global).await,
        Command::Providers(args) => providers::handle(app, args, global).await,
        Command::Auth(args) => auth::handle(app, args, global).await,
        Command::Profile => profile::handle(app, global).await,
        Command::Route(args) => route::handle(app, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
