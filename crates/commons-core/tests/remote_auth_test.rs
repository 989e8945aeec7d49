#![allow(clippy::unwrap_used)]
// `RemoteAuthBackend` against a mock auth service.

mod common;

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tokio::sync::broadcast;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commons_api::{AuthClient, TransportConfig};
use commons_core::{AuthBackend, RemoteAuthBackend, Session, SessionEvent, SessionEventKind};

use common::session;

async fn auth_server() -> (MockServer, AuthClient) {
    let server = MockServer::start().await;
    let client = AuthClient::new(
        &Url::parse(&server.uri()).unwrap(),
        &SecretString::from("anon-key".to_owned()),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

fn session_body(access_token: &str) -> serde_json::Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-2",
        "user": { "id": "user-1", "email": "user-1@example.org" }
    })
}

fn expired(refresh_token: Option<&str>) -> Session {
    Session {
        refresh_token: refresh_token.map(|t| SecretString::from(t.to_owned())),
        expires_at: Some(Utc::now() - Duration::minutes(5)),
        ..session("user-1", "stale-token")
    }
}

fn next_event(events: &mut broadcast::Receiver<SessionEvent>) -> SessionEvent {
    events.try_recv().unwrap()
}

// ── Session lookup ──────────────────────────────────────────────────

#[tokio::test]
async fn fresh_session_is_returned_without_requests() {
    let (server, client) = auth_server().await;
    let backend = RemoteAuthBackend::with_session(client, Some(session("user-1", "tok-1")));
    let mut events = backend.subscribe();

    let current = backend.get_session().await.unwrap().unwrap();

    assert_eq!(current.access_token.expose_secret(), "tok-1");
    assert!(events.try_recv().is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn expired_session_is_refreshed() {
    let (server, client) = auth_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(header("apikey", "anon-key"))
        .and(body_json(json!({ "refresh_token": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("fresh-token")))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RemoteAuthBackend::with_session(client, Some(expired(Some("refresh-1"))));
    let mut events = backend.subscribe();

    let refreshed = backend.get_session().await.unwrap().unwrap();
    assert_eq!(refreshed.access_token.expose_secret(), "fresh-token");
    assert!(!refreshed.is_expired());

    let event = next_event(&mut events);
    assert_eq!(event.kind, SessionEventKind::TokenRefreshed);
    assert_eq!(event.session, Some(refreshed.clone()));

    // The refreshed session is kept; no second refresh.
    let again = backend.get_session().await.unwrap().unwrap();
    assert_eq!(again, refreshed);
}

#[tokio::test]
async fn rejected_refresh_token_signs_out() {
    let (server, client) = auth_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid Refresh Token: Refresh Token Not Found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RemoteAuthBackend::with_session(client, Some(expired(Some("revoked"))));
    let mut events = backend.subscribe();

    assert!(backend.get_session().await.unwrap().is_none());

    let event = next_event(&mut events);
    assert_eq!(event.kind, SessionEventKind::SignedOut);
    assert!(event.session.is_none());
    assert!(backend.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn expired_session_without_refresh_token_is_dropped() {
    let (server, client) = auth_server().await;
    let backend = RemoteAuthBackend::with_session(client, Some(expired(None)));
    let mut events = backend.subscribe();

    assert!(backend.get_session().await.unwrap().is_none());

    assert_eq!(next_event(&mut events).kind, SessionEventKind::SignedOut);
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Sign-in / sign-out ──────────────────────────────────────────────

#[tokio::test]
async fn verify_stores_session_and_announces_sign_in() {
    let (server, client) = auth_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/verify"))
        .and(body_json(json!({
            "type": "email",
            "email": "user-1@example.org",
            "token": "123456"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("verified")))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RemoteAuthBackend::new(client);
    let mut events = backend.subscribe();

    let signed_in = backend.verify_otp("user-1@example.org", "123456").await.unwrap();
    assert_eq!(signed_in.user.id.as_str(), "user-1");
    assert_eq!(signed_in.refresh_token.as_ref().unwrap().expose_secret(), "refresh-2");

    let event = next_event(&mut events);
    assert_eq!(event.kind, SessionEventKind::SignedIn);
    assert_eq!(event.session, Some(signed_in.clone()));
    assert_eq!(backend.get_session().await.unwrap(), Some(signed_in));
}

#[tokio::test]
async fn sign_out_survives_failed_logout() {
    let (server, client) = auth_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "msg": "boom" })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RemoteAuthBackend::with_session(client, Some(session("user-1", "tok-1")));
    let mut events = backend.subscribe();

    backend.sign_out().await.unwrap();

    assert_eq!(next_event(&mut events).kind, SessionEventKind::SignedOut);
    assert!(backend.get_session().await.unwrap().is_none());
}
