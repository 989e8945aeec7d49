//! Config subcommand handlers.

use std::path::PathBuf;

use dialoguer::{Input, Password, Select};
use secrecy::SecretString;
use serde::Serialize;

use commons_config::Profile;
use commons_core::config::{DEFAULT_API_URL, DEFAULT_AUTH_URL};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// What `config show` reports: the file, the active profile, and its settings.
#[derive(Debug, Serialize)]
struct ConfigView {
    path: PathBuf,
    active_profile: String,
    profiles: Vec<String>,
    profile: Profile,
}

fn view_detail(v: &ConfigView) -> String {
    let p = &v.profile;
    let anon_key = match (&p.anon_key, &p.anon_key_env) {
        (Some(_), _) => Some("(plaintext in config)".to_owned()),
        (None, Some(env)) => Some(format!("from ${env}")),
        (None, None) => Some("(keyring or unset)".to_owned()),
    };
    output::detail_lines(&[
        ("Config file", Some(v.path.display().to_string())),
        ("Profile", Some(v.active_profile.clone())),
        ("Profiles", Some(v.profiles.join(", "))),
        (
            "API URL",
            Some(p.api_url.clone().unwrap_or_else(|| DEFAULT_API_URL.into())),
        ),
        (
            "Auth URL",
            Some(p.auth_url.clone().unwrap_or_else(|| DEFAULT_AUTH_URL.into())),
        ),
        ("Anon key", anon_key),
        ("Redirect URL", p.redirect_url.clone()),
        ("CA cert", p.ca_cert.as_ref().map(|c| c.display().to_string())),
        ("Insecure", p.insecure.map(|b| b.to_string())),
        ("Timeout", p.timeout.map(|t| format!("{t}s"))),
    ])
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = commons_config::config_path();
            eprintln!("Commons CLI configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = commons_config::load_config_or_default();

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(config::active_profile_name(global, &cfg))
                .interact_text()?;

            // 2. Endpoints
            let api_url: String = Input::new()
                .with_prompt("Directory API URL")
                .default(DEFAULT_API_URL.into())
                .interact_text()?;

            let auth_url: String = Input::new()
                .with_prompt("Auth service URL")
                .default(DEFAULT_AUTH_URL.into())
                .interact_text()?;

            let redirect_url: String = Input::new()
                .with_prompt("App URL for sign-in redirects (blank for none)")
                .allow_empty(true)
                .interact_text()?;

            // 3. Anon key
            let key = Password::new()
                .with_prompt("Public anon key (blank to skip)")
                .allow_empty_password(true)
                .interact()?;

            let anon_key = if key.is_empty() {
                None
            } else {
                let store_choices = &[
                    "Store in system keyring (recommended)",
                    "Save to config file (plaintext)",
                ];
                let store_selection = Select::new()
                    .with_prompt("Where to store the anon key?")
                    .items(store_choices)
                    .default(0)
                    .interact()?;

                if store_selection == 0 {
                    commons_config::store_anon_key(&profile_name, &SecretString::from(key))?;
                    eprintln!("   ✓ Anon key stored in system keyring");
                    None
                } else {
                    Some(key)
                }
            };

            // 4. Merge into the existing config
            let profile = Profile {
                api_url: Some(api_url),
                auth_url: Some(auth_url),
                anon_key,
                redirect_url: optional(&redirect_url),
                ..Profile::default()
            };
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            let path = commons_config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: commons programs list");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = commons_config::load_config_or_default();
            let active_profile = config::active_profile_name(global, &cfg);
            let mut profile = cfg.profile(&active_profile).map_err(|_| CliError::ProfileNotFound {
                name: active_profile.clone(),
                available: config::available_profiles(&cfg),
            })?;
            profile.anon_key = profile.anon_key.map(|_| "********".into());
            let mut profiles: Vec<String> = cfg.profiles.keys().cloned().collect();
            profiles.sort_unstable();

            let view = ConfigView {
                path: commons_config::config_path(),
                active_profile,
                profiles,
                profile,
            };
            let out = output::render_single(global.output, &view, view_detail, |v| {
                v.active_profile.clone()
            })?;
            output::print_output(&out, global.quiet)?;
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(
                &commons_config::config_path().display().to_string(),
                global.quiet,
            )?;
            Ok(())
        }
    }
}
