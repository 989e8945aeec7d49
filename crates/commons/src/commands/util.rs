//! Shared helpers for command handlers.

use std::path::Path;

use serde::de::DeserializeOwned;

use commons_core::CoreError;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Refuse commands that only make sense against a live backend.
pub fn require_online(global: &GlobalOpts, command: &str) -> Result<(), CliError> {
    if global.offline {
        return Err(CliError::Offline {
            command: command.into(),
        });
    }
    Ok(())
}

/// Re-label a generic 404 with the resource the user asked for.
pub fn label_not_found(
    err: CoreError,
    resource_type: &str,
    identifier: &str,
    list_command: &str,
) -> CliError {
    match err {
        CoreError::NotFound { .. } => not_found(resource_type, identifier, list_command),
        other => other.into(),
    }
}

pub fn not_found(resource_type: &str, identifier: &str, list_command: &str) -> CliError {
    CliError::NotFound {
        resource_type: resource_type.into(),
        identifier: identifier.into(),
        list_command: list_command.into(),
    }
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("{}: {e}", path.display()),
    })
}

/// Render an optional flag as "yes" / "no" / "pending".
pub fn yes_no(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "yes",
        Some(false) => "no",
        None => "pending",
    }
}
