#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` and `AuthClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commons_api::models::{ProgramCreate, ProgramUpdate};
use commons_api::{ApiClient, AuthClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client =
        ApiClient::from_reqwest(&format!("{}/api", server.uri()), reqwest::Client::new()).unwrap();
    (server, client)
}

async fn setup_auth() -> (MockServer, AuthClient) {
    let server = MockServer::start().await;
    let client = AuthClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn session_body() -> serde_json::Value {
    json!({
        "access_token": "access-abc",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 1_900_000_000,
        "refresh_token": "refresh-xyz",
        "user": { "id": "user-1", "email": "ada@example.org" }
    })
}

// ── Programs ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_programs() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/programs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "program_id": "p1", "name": "Food Drive", "start_date": "2024-03-01" },
            { "program_id": "p2", "name": "Legal Aid Clinic", "provider_id": "prov-1" },
        ])))
        .mount(&server)
        .await;

    let programs = client.list_programs().await.unwrap();

    assert_eq!(programs.len(), 2);
    assert_eq!(programs[0].program_id, "p1");
    assert_eq!(programs[0].start_date.as_deref(), Some("2024-03-01"));
    assert_eq!(programs[1].provider_id.as_deref(), Some("prov-1"));
}

#[tokio::test]
async fn test_get_program_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/programs/p9"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "detail": "Program with ID p9 not found" })),
        )
        .mount(&server)
        .await;

    let err = client.get_program("p9").await.unwrap_err();

    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Program with ID p9 not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_program_sends_only_set_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/programs"))
        .and(body_json(json!({ "name": "Food Drive", "phone": "02 9999 0000" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "program_id": "p1",
            "name": "Food Drive",
            "phone": "02 9999 0000",
            "provider_name": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = ProgramCreate {
        name: "Food Drive".into(),
        phone: Some("02 9999 0000".into()),
        ..ProgramCreate::default()
    };
    let created = client.create_program(&body).await.unwrap();

    assert_eq!(created.program_id, "p1");
    assert_eq!(created.phone.as_deref(), Some("02 9999 0000"));
}

#[tokio::test]
async fn test_update_program_uses_put() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/programs/p1"))
        .and(body_json(json!({ "description": "Weekly hampers" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "program_id": "p1",
            "name": "Food Drive",
            "description": "Weekly hampers"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = ProgramUpdate {
        description: Some("Weekly hampers".into()),
        ..ProgramUpdate::default()
    };
    let updated = client.update_program("p1", &patch).await.unwrap();

    assert_eq!(updated.description.as_deref(), Some("Weekly hampers"));
}

#[tokio::test]
async fn test_validation_error_message_is_joined() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/programs"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{ "loc": ["body", "start_date"], "msg": "invalid date format" }]
        })))
        .mount(&server)
        .await;

    let err = client
        .create_program(&ProgramCreate {
            name: "x".into(),
            start_date: Some("yesterday".into()),
            ..ProgramCreate::default()
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::Api { status: 422, ref message } if message == "invalid date format"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/programs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_programs().await.unwrap_err();

    assert!(
        matches!(err, Error::Deserialization { ref body, .. } if body.contains("oops")),
        "unexpected error: {err:?}"
    );
}

// ── Providers ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_provider_with_programs() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/providers/prov-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "provider_id": "prov-1",
            "name": "Foodbank NSW",
            "description": "Fighting hunger",
            "programs": [{ "program_id": "p1", "name": "Food Drive" }]
        })))
        .mount(&server)
        .await;

    let provider = client.get_provider("prov-1").await.unwrap();

    assert_eq!(provider.name, "Foodbank NSW");
    let programs = provider.programs.unwrap();
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0].name, "Food Drive");
}

#[tokio::test]
async fn test_list_providers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "provider_id": "prov-1", "name": "Foodbank NSW", "description": null }
        ])))
        .mount(&server)
        .await;

    let providers = client.list_providers().await.unwrap();

    assert_eq!(providers.len(), 1);
    assert!(providers[0].description.is_none());
    assert!(providers[0].programs.is_none());
}

// ── Profile ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_profile_sends_bearer() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer access-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "user-1",
            "email": "ada@example.org",
            "created_at": "2024-05-01T10:00:00+00:00",
            "provider_id": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = SecretString::from("access-abc".to_owned());
    let profile = client.get_profile(&token).await.unwrap();

    assert_eq!(profile.user_id, "user-1");
    assert!(profile.provider_id.is_none());
}

#[tokio::test]
async fn test_get_profile_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Invalid token: User not found." })),
        )
        .mount(&server)
        .await;

    let token = SecretString::from("stale".to_owned());
    let err = client.get_profile(&token).await.unwrap_err();

    assert!(err.is_auth_expired());
    assert!(matches!(err, Error::Unauthorized { ref message } if message.contains("User not found")));
}

// ── Auth service ────────────────────────────────────────────────────

#[tokio::test]
async fn test_send_otp_passes_redirect() {
    let (server, client) = setup_auth().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/otp"))
        .and(query_param("redirect_to", "https://commons.example.org/auth/callback"))
        .and(body_json(json!({ "email": "ada@example.org", "create_user": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let redirect = url::Url::parse("https://commons.example.org/auth/callback").unwrap();
    client
        .send_otp("ada@example.org", true, Some(&redirect))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_verify_otp_returns_session() {
    let (server, client) = setup_auth().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/verify"))
        .and(body_json(json!({ "type": "email", "email": "ada@example.org", "token": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body()))
        .mount(&server)
        .await;

    let session = client.verify_otp("ada@example.org", "123456").await.unwrap();

    assert_eq!(session.access_token, "access-abc");
    assert_eq!(session.refresh_token.as_deref(), Some("refresh-xyz"));
    assert_eq!(session.user.email.as_deref(), Some("ada@example.org"));
}

#[tokio::test]
async fn test_verify_otp_rejected() {
    let (server, client) = setup_auth().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/verify"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "code": 403, "msg": "Token has expired or is invalid" })),
        )
        .mount(&server)
        .await;

    let err = client.verify_otp("ada@example.org", "000000").await.unwrap_err();

    assert!(
        matches!(err, Error::Authentication { ref message } if message.contains("expired")),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_refresh_session() {
    let (server, client) = setup_auth().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({ "refresh_token": "refresh-xyz" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body()))
        .mount(&server)
        .await;

    let refresh = SecretString::from("refresh-xyz".to_owned());
    let session = client.refresh_session(&refresh).await.unwrap();

    assert_eq!(session.user.id, "user-1");
}

#[tokio::test]
async fn test_logout_accepts_no_content() {
    let (server, client) = setup_auth().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer access-abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let token = SecretString::from("access-abc".to_owned());
    client.logout(&token).await.unwrap();
}
