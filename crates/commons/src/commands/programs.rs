//! Program command handlers.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tabled::Tabled;

use commons_core::{
    App, CreateProgramRequest, Program, ProgramId, ProviderId, UpdateProgramRequest,
};

use crate::cli::{
    GlobalOpts, ProgramCreateArgs, ProgramFields, ProgramFilter, ProgramUpdateArgs, ProgramsArgs,
    ProgramsCommand,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProgramRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Where")]
    location: String,
    #[tabled(rename = "Provider")]
    provider: String,
}

impl From<&Arc<Program>> for ProgramRow {
    fn from(p: &Arc<Program>) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            category: p.category.clone().unwrap_or_default(),
            when: when(p),
            location: p.location.address.clone().unwrap_or_default(),
            provider: provider_label(p).unwrap_or_default(),
        }
    }
}

fn when(p: &Program) -> String {
    match (p.schedule.start_date, p.schedule.end_date) {
        (Some(start), Some(end)) => format!("{start} → {end}"),
        (Some(start), None) => format!("from {start}"),
        (None, Some(end)) => format!("until {end}"),
        (None, None) => p.schedule.date_interval.clone().unwrap_or_default(),
    }
}

fn provider_label(p: &Program) -> Option<String> {
    p.provider.as_ref().map(|r| match r.name {
        Some(ref name) => format!("{name} ({})", r.id),
        None => r.id.to_string(),
    })
}

fn detail(p: &Arc<Program>) -> String {
    output::detail_lines(&[
        ("ID", Some(p.id.to_string())),
        ("Name", Some(p.name.clone())),
        ("Category", p.category.clone()),
        ("Description", p.description.clone()),
        ("Starts", p.schedule.start_date.map(|d| d.to_string())),
        ("Ends", p.schedule.end_date.map(|d| d.to_string())),
        ("Times", p.schedule.date_interval.clone()),
        ("Repeats", p.schedule.repeat_interval.clone()),
        ("Address", p.location.address.clone()),
        ("Place", p.location.place_id.clone()),
        ("Phone", p.location.phone.clone()),
        ("Email", p.location.email.clone()),
        ("Website", p.location.website_url.clone()),
        ("Provider", provider_label(p)),
        ("Approved", Some(util::yes_no(p.approved).to_owned())),
    ])
}

// ── Filtering ───────────────────────────────────────────────────────

fn matches(filter: &ProgramFilter, p: &Program, today: NaiveDate) -> bool {
    if let Some(ref category) = filter.category {
        if !p
            .category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(category))
        {
            return false;
        }
    }
    if let Some(ref provider) = filter.provider {
        if p.provider_id().map(ProviderId::as_str) != Some(provider.as_str()) {
            return false;
        }
    }
    if let Some(ref needle) = filter.search {
        let in_address = p
            .location
            .address
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(&needle.to_lowercase()));
        if !p.matches_text(needle) && !in_address {
            return false;
        }
    }
    !filter.active || p.is_active_on(today)
}

// ── Request building ────────────────────────────────────────────────

fn create_request(args: ProgramCreateArgs) -> Result<CreateProgramRequest, CliError> {
    if let Some(ref path) = args.from_file {
        return util::read_json_file(path);
    }
    let f = args.fields;
    Ok(CreateProgramRequest {
        name: args.name.unwrap_or_default(),
        category: f.category,
        description: f.description,
        start_date: f.start_date,
        end_date: f.end_date,
        date_interval: f.date_interval,
        repeat_interval: f.repeat_interval,
        place_id: f.place_id,
        address: f.address,
        phone: f.phone,
        email: f.email,
        website_url: f.website,
        provider_id: f.provider.map(ProviderId::from),
    })
}

fn update_request(
    name: Option<String>,
    fields: ProgramFields,
    approved: Option<bool>,
) -> UpdateProgramRequest {
    UpdateProgramRequest {
        name,
        category: fields.category,
        description: fields.description,
        start_date: fields.start_date,
        end_date: fields.end_date,
        date_interval: fields.date_interval,
        repeat_interval: fields.repeat_interval,
        place_id: fields.place_id,
        address: fields.address,
        phone: fields.phone,
        email: fields.email,
        website_url: fields.website,
        provider_id: fields.provider.map(ProviderId::from),
        approved,
    }
}

fn patch_from(args: ProgramUpdateArgs) -> Result<(ProgramId, UpdateProgramRequest), CliError> {
    let id = ProgramId::from(args.id);
    let patch = match args.from_file {
        Some(ref path) => util::read_json_file(path)?,
        None => update_request(args.name, args.fields, args.approved),
    };
    if patch.is_empty() {
        return Err(CliError::Validation {
            field: "update".into(),
            reason: "no fields to change; pass at least one flag or --from-file".into(),
        });
    }
    Ok((id, patch))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(app: &App, args: ProgramsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = app.programs();

    match args.command {
        ProgramsCommand::List(filter) => {
            if !global.offline {
                store.list_programs().await?;
            }
            let today = Local::now().date_naive();
            let programs = store.filter_programs(|p| matches(&filter, p, today));
            let out = output::render_list(
                global.output,
                &programs,
                |p| ProgramRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet)?;
            Ok(())
        }

        ProgramsCommand::Get { id } => {
            let id = ProgramId::from(id);
            let program = if global.offline {
                store
                    .find_program(&id)
                    .ok_or_else(|| util::not_found("program", id.as_str(), "programs list"))?
            } else {
                store
                    .get_program(&id)
                    .await
                    .map_err(|e| util::label_not_found(e, "program", id.as_str(), "programs list"))?
            };
            render_one(&program, global)
        }

        ProgramsCommand::Create(args) => {
            util::require_online(global, "programs create")?;
            let req = create_request(args)?;
            let created = store.create_program(&req).await?;
            render_one(&created, global)
        }

        ProgramsCommand::Update(args) => {
            util::require_online(global, "programs update")?;
            let (id, patch) = patch_from(args)?;
            let updated = store
                .update_program(&id, &patch)
                .await
                .map_err(|e| util::label_not_found(e, "program", id.as_str(), "programs list"))?;
            render_one(&updated, global)
        }

        ProgramsCommand::Approve { id } => {
            util::require_online(global, "programs approve")?;
            let id = ProgramId::from(id);
            let patch = UpdateProgramRequest {
                approved: Some(true),
                ..UpdateProgramRequest::default()
            };
            let updated = store
                .update_program(&id, &patch)
                .await
                .map_err(|e| util::label_not_found(e, "program", id.as_str(), "programs list"))?;
            render_one(&updated, global)
        }
    }
}

fn render_one(program: &Arc<Program>, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(global.output, program, detail, |p| p.id.to_string())?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use commons_core::seed;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn count(filter: &ProgramFilter) -> usize {
        seed::programs()
            .iter()
            .filter(|p| matches(filter, p, today()))
            .count()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        assert_eq!(count(&ProgramFilter::default()), 20);
    }

    #[test]
    fn search_covers_address() {
        let filter = ProgramFilter {
            search: Some("sydney cbd".into()),
            ..ProgramFilter::default()
        };
        assert_eq!(count(&filter), 4);
    }

    #[test]
    fn category_filter_skips_uncategorized() {
        let filter = ProgramFilter {
            category: Some("Legal".into()),
            ..ProgramFilter::default()
        };
        assert_eq!(count(&filter), 0);
    }

    #[test]
    fn update_without_fields_is_rejected() {
        let args = ProgramUpdateArgs {
            id: "p1".into(),
            name: None,
            fields: ProgramFields::default(),
            approved: None,
            from_file: None,
        };
        assert!(matches!(
            patch_from(args),
            Err(CliError::Validation { ref field, .. }) if field == "update"
        ));
    }

    #[test]
    fn flags_become_create_request() {
        let args = ProgramCreateArgs {
            name: Some("Food Drive".into()),
            fields: ProgramFields {
                category: Some("Food Security".into()),
                provider: Some("prov-1".into()),
                ..ProgramFields::default()
            },
            from_file: None,
        };
        let req = create_request(args).unwrap();
        assert_eq!(req.name, "Food Drive");
        assert_eq!(req.category.as_deref(), Some("Food Security"));
        assert_eq!(req.provider_id, Some(ProviderId::from("prov-1")));
    }
}
