//! Profile resolution with command-line overrides.
//!
//! The file format and keyring handling live in `commons-config`; this
//! module only layers `--api-url`, `--auth-url`, `--insecure` and
//! `--timeout` on top of the selected profile.

use commons_config::{Config, Profile};
use commons_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Name of the profile this invocation targets.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    cfg.active_profile_name(global.profile.as_deref())
}

/// Load the config file and build a `ClientConfig` for the active profile.
pub fn resolve(global: &GlobalOpts) -> Result<(String, ClientConfig), CliError> {
    let cfg = commons_config::load_config_or_default();
    resolve_with(global, &cfg)
}

pub fn resolve_with(global: &GlobalOpts, cfg: &Config) -> Result<(String, ClientConfig), CliError> {
    let name = active_profile_name(global, cfg);
    let mut profile = cfg.profile(&name).map_err(|_| CliError::ProfileNotFound {
        name: name.clone(),
        available: available_profiles(cfg),
    })?;
    apply_overrides(&mut profile, global, cfg);

    let client = commons_config::profile_to_client_config(&profile, &name)?;
    Ok((name, client))
}

/// Flags win over the profile; the profile wins over `[defaults]`.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts, cfg: &Config) {
    if let Some(ref url) = global.api_url {
        profile.api_url = Some(url.clone());
    }
    if let Some(ref url) = global.auth_url {
        profile.auth_url = Some(url.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    } else if profile.insecure.is_none() && cfg.defaults.insecure {
        profile.insecure = Some(true);
    }
    profile.timeout = global
        .timeout
        .or(profile.timeout)
        .or(Some(cfg.defaults.timeout));
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        return "(none)".into();
    }
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    names.join(", ")
}
