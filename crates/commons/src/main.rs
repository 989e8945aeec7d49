mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use commons_core::{App, AuthState, Session};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands never build an App
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "commons", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let (profile_name, client_config) = config::resolve(&cli.global)?;
            let offline = cli.global.offline;

            let stored = if offline {
                None
            } else {
                load_stored_session(&profile_name)
            };
            let app = App::new(client_config, stored.clone())?;
            if offline {
                app.load_seed_data();
            }

            debug!(command = ?cmd, profile = %profile_name, offline, "dispatching command");
            let result = commands::dispatch(cmd, &app, &cli.global).await;

            if !offline {
                persist_session(&app, &profile_name, stored.as_ref());
            }
            app.shutdown().await;
            result
        }
    }
}

/// A keyring that cannot be read is treated as "not signed in".
fn load_stored_session(profile_name: &str) -> Option<Session> {
    match commons_config::load_session(profile_name) {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "could not read stored session");
            None
        }
    }
}

/// Write back whatever the auth store ended up with, if it changed.
fn persist_session(app: &App, profile_name: &str, stored: Option<&Session>) {
    if app.auth().state() == AuthState::Uninitialized {
        return;
    }
    let current = app.auth().session();
    if current.as_ref() == stored {
        return;
    }

    let outcome = match current {
        Some(ref session) => commons_config::store_session(profile_name, session),
        None => commons_config::clear_session(profile_name),
    };
    if let Err(e) = outcome {
        warn!(error = %e, "could not update stored session");
    }
}
