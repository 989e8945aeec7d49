//! Sign-in command handlers.
//!
//! Session persistence happens in `main` after dispatch; these handlers
//! only drive the auth store.

use chrono::{DateTime, Utc};
use owo_colors::Style;
use serde::Serialize;

use commons_core::{App, AuthState};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

/// What `auth status` reports.
#[derive(Debug, Serialize)]
struct AuthStatus {
    state: String,
    user_id: Option<String>,
    email: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    provider_id: Option<String>,
}

impl AuthStatus {
    fn from_app(app: &App) -> Self {
        let auth = app.auth();
        let session = auth.session();
        Self {
            state: auth.state().to_string(),
            user_id: session.as_ref().map(|s| s.user.id.to_string()),
            email: session.as_ref().and_then(|s| s.user.email.clone()),
            expires_at: session.as_ref().and_then(|s| s.expires_at),
            provider_id: auth
                .profile()
                .and_then(|p| p.provider_id.as_ref().map(ToString::to_string)),
        }
    }
}

fn status_detail(status: &AuthStatus, color: bool) -> String {
    let state = if status.user_id.is_some() {
        output::paint(&status.state, Style::new().green().bold(), color)
    } else {
        output::paint(&status.state, Style::new().yellow(), color)
    };
    output::detail_lines(&[
        ("State", Some(state)),
        ("User", status.user_id.clone()),
        ("Email", status.email.clone()),
        ("Expires", status.expires_at.map(|at| at.to_rfc3339())),
        ("Provider", status.provider_id.clone()),
    ])
}

pub async fn handle(app: &App, args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let auth = app.auth();

    match args.command {
        AuthCommand::Login { email, no_signup } => {
            util::require_online(global, "auth login")?;
            auth.sign_in_with_magic_link(&email, !no_signup).await?;
            output::print_output(
                &format!(
                    "Sent a sign-in link to {email}.\n\
                     Follow the link, or finish here with: commons auth verify --email {email} --code <code>"
                ),
                global.quiet,
            )?;
            Ok(())
        }

        AuthCommand::Verify { email, code } => {
            util::require_online(global, "auth verify")?;
            auth.initialize().await;
            let session = auth.verify_magic_link(&email, &code).await?;
            let who = session
                .user
                .email
                .clone()
                .unwrap_or_else(|| session.user.id.to_string());
            output::print_output(&format!("Signed in as {who}"), global.quiet)?;
            Ok(())
        }

        AuthCommand::Google => {
            let url = auth.sign_in_with_google().await?;
            output::print_output(
                &format!("Open this URL in a browser to sign in with Google:\n{url}"),
                global.quiet,
            )?;
            Ok(())
        }

        AuthCommand::Logout => {
            util::require_online(global, "auth logout")?;
            auth.initialize().await;
            if auth.state() == AuthState::Anonymous {
                output::print_output("Not signed in", global.quiet)?;
                return Ok(());
            }
            auth.sign_out().await?;
            output::print_output("Signed out", global.quiet)?;
            Ok(())
        }

        AuthCommand::Status => {
            auth.initialize().await;
            let status = AuthStatus::from_app(app);
            let color = output::should_color(global.color);
            let out = output::render_single(
                global.output,
                &status,
                |s| status_detail(s, color),
                |s| s.state.clone(),
            )?;
            output::print_output(&out, global.quiet)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_status_shows_only_state() {
        let status = AuthStatus {
            state: AuthState::Anonymous.to_string(),
            user_id: None,
            email: None,
            expires_at: None,
            provider_id: None,
        };
        assert_eq!(status_detail(&status, false), "State:  Anonymous");
    }
}
