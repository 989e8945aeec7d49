//! `commons profile`: the signed-in user's directory profile.

use commons_core::{App, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(p: &Profile) -> String {
    output::detail_lines(&[
        ("User", Some(p.user_id.to_string())),
        ("Email", p.email.clone()),
        ("Created", p.created_at.map(|at| at.to_rfc3339())),
        ("Provider", p.provider_id.as_ref().map(ToString::to_string)),
    ])
}

pub async fn handle(app: &App, global: &GlobalOpts) -> Result<(), CliError> {
    let auth = app.auth();
    auth.initialize().await;

    // Initialization already loads the profile when a session exists; a
    // second fetch surfaces the error that loading swallowed.
    let profile = match auth.profile() {
        Some(profile) => (*profile).clone(),
        None => auth.fetch_profile().await?,
    };

    let out = output::render_single(global.output, &profile, detail, |p| p.user_id.to_string())?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}
