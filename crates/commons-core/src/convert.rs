// ── API-to-domain type conversions ──
//
// Bridges raw `commons_api` wire types into canonical `commons_core::model`
// domain types and back for request bodies. Each `From` impl parses
// strings into strong types and silently drops values that do not parse.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use secrecy::SecretString;

use commons_api::auth::{SessionResponse, UserResponse};
use commons_api::models::{
    ProfileResponse, ProgramCreate, ProgramResponse, ProgramSummaryResponse, ProgramUpdate,
    ProviderResponse,
};

use crate::model::{
    CreateProgramRequest, Location, Profile, Program, ProgramSummary, Provider, ProviderRef,
    Schedule, Session, UpdateProgramRequest, User,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an ISO date, tolerating a trailing time component.
fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    let date_part = raw.split_once('T').map_or(raw, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

// ── Programs ───────────────────────────────────────────────────────

impl From<ProgramResponse> for Program {
    fn from(p: ProgramResponse) -> Self {
        let schedule = Schedule {
            start_date: parse_date(p.start_date.as_deref()),
            end_date: parse_date(p.end_date.as_deref()),
            date_interval: p.date_interval,
            repeat_interval: p.repeat_interval,
        };
        let location = Location {
            place_id: p.place_id,
            address: p.address,
            phone: p.phone,
            email: p.email,
            website_url: p.website_url,
        };
        let provider = p.provider_id.map(|id| ProviderRef {
            id: id.into(),
            name: p.provider_name,
        });

        Program {
            id: p.program_id.into(),
            name: p.name,
            category: p.category,
            description: p.description,
            schedule,
            location,
            provider,
            approved: p.approved,
        }
    }
}

impl From<&CreateProgramRequest> for ProgramCreate {
    fn from(r: &CreateProgramRequest) -> Self {
        ProgramCreate {
            name: r.name.clone(),
            category: r.category.clone(),
            description: r.description.clone(),
            start_date: format_date(r.start_date),
            end_date: format_date(r.end_date),
            date_interval: r.date_interval.clone(),
            repeat_interval: r.repeat_interval.clone(),
            place_id: r.place_id.clone(),
            address: r.address.clone(),
            phone: r.phone.clone(),
            email: r.email.clone(),
            website_url: r.website_url.clone(),
            provider_id: r.provider_id.as_ref().map(ToString::to_string),
        }
    }
}

impl From<&UpdateProgramRequest> for ProgramUpdate {
    fn from(r: &UpdateProgramRequest) -> Self {
        ProgramUpdate {
            name: r.name.clone(),
            category: r.category.clone(),
            description: r.description.clone(),
            start_date: format_date(r.start_date),
            end_date: format_date(r.end_date),
            date_interval: r.date_interval.clone(),
            repeat_interval: r.repeat_interval.clone(),
            place_id: r.place_id.clone(),
            address: r.address.clone(),
            phone: r.phone.clone(),
            email: r.email.clone(),
            website_url: r.website_url.clone(),
            provider_id: r.provider_id.as_ref().map(ToString::to_string),
            approved: r.approved,
        }
    }
}

// ── Providers ──────────────────────────────────────────────────────

impl From<ProgramSummaryResponse> for ProgramSummary {
    fn from(s: ProgramSummaryResponse) -> Self {
        ProgramSummary {
            id: s.program_id.into(),
            name: s.name,
        }
    }
}

impl From<ProviderResponse> for Provider {
    fn from(p: ProviderResponse) -> Self {
        Provider {
            id: p.provider_id.into(),
            name: p.name,
            description: p.description,
            programs: p
                .programs
                .map(|list| list.into_iter().map(ProgramSummary::from).collect()),
        }
    }
}

// ── Profile / session ──────────────────────────────────────────────

impl From<ProfileResponse> for Profile {
    fn from(p: ProfileResponse) -> Self {
        Profile {
            user_id: p.user_id.into(),
            email: p.email,
            created_at: parse_datetime(p.created_at.as_deref()),
            provider_id: p.provider_id.map(Into::into),
        }
    }
}

impl From<UserResponse> for User {
    fn from(u: UserResponse) -> Self {
        User {
            id: u.id.into(),
            email: u.email,
        }
    }
}

impl From<SessionResponse> for Session {
    fn from(s: SessionResponse) -> Self {
        let expires_at = s
            .expires_at
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .or_else(|| {
                s.expires_in
                    .map(|secs| Utc::now() + Duration::seconds(secs))
            });

        Session {
            access_token: SecretString::from(s.access_token),
            refresh_token: s.refresh_token.map(SecretString::from),
            expires_at,
            user: s.user.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn response(value: serde_json::Value) -> ProgramResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn program_dates_and_provider_are_typed() {
        let program: Program = response(json!({
            "program_id": "p1",
            "name": "Food Drive",
            "start_date": "2024-03-01",
            "end_date": "2024-03-31T00:00:00",
            "provider_id": "prov-1",
            "provider_name": "Foodbank NSW"
        }))
        .into();

        assert_eq!(program.id.as_str(), "p1");
        assert_eq!(program.schedule.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(program.schedule.end_date, NaiveDate::from_ymd_opt(2024, 3, 31));
        let provider = program.provider.unwrap();
        assert_eq!(provider.id.as_str(), "prov-1");
        assert_eq!(provider.name.as_deref(), Some("Foodbank NSW"));
    }

    #[test]
    fn unparseable_date_is_dropped() {
        let program: Program = response(json!({
            "program_id": "p1",
            "name": "Food Drive",
            "start_date": "next Tuesday"
        }))
        .into();
        assert!(program.schedule.start_date.is_none());
    }

    #[test]
    fn create_request_renders_iso_dates() {
        let req = CreateProgramRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 7, 9),
            provider_id: Some("prov-1".into()),
            ..CreateProgramRequest::named("Food Drive")
        };
        let body = ProgramCreate::from(&req);
        assert_eq!(body.start_date.as_deref(), Some("2024-07-09"));
        assert_eq!(body.provider_id.as_deref(), Some("prov-1"));
    }

    #[test]
    fn session_expiry_prefers_absolute_timestamp() {
        let session: Session = SessionResponse {
            access_token: "tok".into(),
            token_type: Some("bearer".into()),
            expires_in: Some(3600),
            expires_at: Some(1_900_000_000),
            refresh_token: None,
            user: UserResponse {
                id: "user-1".into(),
                email: None,
                created_at: None,
            },
        }
        .into();
        assert_eq!(session.expires_at.unwrap().timestamp(), 1_900_000_000);
    }

    #[test]
    fn profile_timestamp_parses() {
        let profile: Profile = ProfileResponse {
            user_id: "user-1".into(),
            email: Some("ada@example.org".into()),
            created_at: Some("2024-05-01T10:00:00+00:00".into()),
            provider_id: Some("prov-1".into()),
        }
        .into();
        assert!(profile.created_at.is_some());
        assert_eq!(profile.provider_id.unwrap().as_str(), "prov-1");
    }
}
