//! Provider command handlers.

use std::sync::Arc;

use tabled::Tabled;

use commons_core::{App, Provider, ProviderId};

use crate::cli::{GlobalOpts, ProvidersArgs, ProvidersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

const DESCRIPTION_WIDTH: usize = 60;

#[derive(Tabled)]
struct ProviderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Arc<Provider>> for ProviderRow {
    fn from(p: &Arc<Provider>) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            description: p
                .description
                .as_deref()
                .map(|d| truncate(d, DESCRIPTION_WIDTH))
                .unwrap_or_default(),
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

fn detail(p: &Arc<Provider>) -> String {
    let mut out = output::detail_lines(&[
        ("ID", Some(p.id.to_string())),
        ("Name", Some(p.name.clone())),
        ("Description", p.description.clone()),
    ]);
    if let Some(ref programs) = p.programs {
        out.push_str(&format!("\n\nPrograms ({}):", programs.len()));
        for summary in programs {
            out.push_str(&format!("\n  {}  {}", summary.id, summary.name));
        }
    }
    out
}

pub async fn handle(app: &App, args: ProvidersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = app.providers();

    match args.command {
        ProvidersCommand::List => {
            let providers = if global.offline {
                store.providers()
            } else {
                store.list_providers().await?
            };
            let out = output::render_list(
                global.output,
                providers.as_slice(),
                |p| ProviderRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet)?;
            Ok(())
        }

        ProvidersCommand::Get { id } => {
            let id = ProviderId::from(id);
            let provider = if global.offline {
                store
                    .find_provider(&id)
                    .ok_or_else(|| util::not_found("provider", id.as_str(), "providers list"))?
            } else {
                store.get_provider(&id).await.map_err(|e| {
                    util::label_not_found(e, "provider", id.as_str(), "providers list")
                })?
            };
            let out = output::render_single(global.output, &provider, detail, |p| p.id.to_string())?;
            output::print_output(&out, global.quiet)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_descriptions_are_truncated() {
        let text = "Emergency relief, disaster recovery, and community support services";
        let short = truncate(text, 20);
        assert_eq!(short.chars().count(), 20);
        assert!(short.ends_with('…'));
        assert_eq!(truncate("Food", 20), "Food");
    }
}
