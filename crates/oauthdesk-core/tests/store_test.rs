#![allow(clippy::unwrap_used)]
// Integration tests for the entity stores using wiremock.

use std::sync::Arc;
use std::time::Duration;

use oauthdesk_api::ApiClient;
use oauthdesk_core::store::{Applications, Authorizations, Scopes, Secrets, Summaries};
use oauthdesk_core::{
    Application, CoreError, EntityId, EntityStore, NewApplication, NewAuthorization, NewScope,
    NewSecret, SessionContext, UserId,
};
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn ctx() -> SessionContext {
    SessionContext::new(UserId::new(7), SecretString::from("test-jwt"))
}

fn app_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "website_uri": format!("https://{}.example.com", name.to_lowercase()),
        "callback_uri": format!("https://{}.example.com/cb", name.to_lowercase()),
    })
}

fn names(snapshot: &[Arc<Application>]) -> Vec<(i64, String)> {
    snapshot
        .iter()
        .map(|app| (app.id.get(), app.name.clone()))
        .collect()
}

// ── Select / create / remove scenario ───────────────────────────────

#[tokio::test]
async fn select_create_remove_round() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/applications"))
        .and(header("Authorization", "Bearer test-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([app_json(1, "A")])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/7/applications"))
        .and(body_json(json!({
            "name": "B",
            "website_uri": "https://b.example.com",
            "callback_uri": "https://b.example.com/cb",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(app_json(2, "B")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/7/applications/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = EntityStore::<Applications>::new(client);
    let mut sub = store.subscribe();
    assert!(sub.recv().await.unwrap().is_empty());

    let selected = store.select(&ctx(), ()).await.unwrap();
    assert_eq!(names(&selected), vec![(1, "A".into())]);

    let created = store
        .create(
            &ctx(),
            (),
            NewApplication::new("B", "https://b.example.com", "https://b.example.com/cb"),
        )
        .await
        .unwrap();
    assert_eq!(created.id, EntityId::new(2));
    assert_eq!(
        names(&store.snapshot()),
        vec![(1, "A".into()), (2, "B".into())]
    );

    let first = Arc::clone(&store.snapshot()[0]);
    store.remove(&ctx(), (), &first).await.unwrap();
    assert_eq!(names(&store.snapshot()), vec![(2, "B".into())]);

    // Subscriber saw every step in order.
    assert_eq!(names(&sub.recv().await.unwrap()), vec![(1, "A".into())]);
    assert_eq!(sub.recv().await.unwrap().len(), 2);
    assert_eq!(names(&sub.recv().await.unwrap()), vec![(2, "B".into())]);
    assert!(sub.try_recv().is_none());
    assert_eq!(store.version(), 3);
}

// ── Failures leave the snapshot alone ───────────────────────────────

#[tokio::test]
async fn failed_select_keeps_snapshot_and_publishes_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([app_json(1, "A")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/applications"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let store = EntityStore::<Applications>::new(client);
    store.select(&ctx(), ()).await.unwrap();
    let mut sub = store.subscribe();
    sub.recv().await.unwrap();

    let err = store.select(&ctx(), ()).await.unwrap_err();
    assert!(
        matches!(err, CoreError::Api { status: Some(500), .. }),
        "expected Api 500, got: {err:?}"
    );
    assert_eq!(names(&store.snapshot()), vec![(1, "A".into())]);
    assert_eq!(store.version(), 1);
    assert!(sub.try_recv().is_none());
}

#[tokio::test]
async fn unauthorized_select_reports_authentication_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/applications"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "token expired"
        })))
        .mount(&server)
        .await;

    let store = EntityStore::<Applications>::new(client);
    let err = store.select(&ctx(), ()).await.unwrap_err();
    assert!(err.requires_sign_in(), "got: {err:?}");
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn rejected_create_is_a_validation_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/7/applications"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "callback_uri must be absolute",
            "code": "INVALID_PARAM"
        })))
        .mount(&server)
        .await;

    let store = EntityStore::<Applications>::new(client);
    let err = store
        .create(&ctx(), (), NewApplication::new("B", "https://b", "cb"))
        .await
        .unwrap_err();

    match err {
        CoreError::ValidationFailed { message, code } => {
            assert_eq!(message, "callback_uri must be absolute");
            assert_eq!(code.as_deref(), Some("INVALID_PARAM"));
        }
        other => panic!("expected ValidationFailed, got: {other:?}"),
    }
    assert_eq!(store.version(), 0);
}

#[tokio::test]
async fn failed_remove_keeps_entity() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([app_json(1, "A")])))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/7/applications/1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "not the owner"
        })))
        .mount(&server)
        .await;

    let store = EntityStore::<Applications>::new(client);
    let snapshot = store.select(&ctx(), ()).await.unwrap();

    let err = store.remove(&ctx(), (), &snapshot[0]).await.unwrap_err();
    assert!(matches!(err, CoreError::PermissionDenied { .. }), "got: {err:?}");
    assert_eq!(store.snapshot().len(), 1);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .mount(&server)
        .await;

    let store = EntityStore::<Applications>::new(client);
    let err = store.select(&ctx(), ()).await.unwrap_err();
    assert!(matches!(err, CoreError::Decode { .. }), "got: {err:?}");
    assert!(store.snapshot().is_empty());
}

// ── Nested collections ──────────────────────────────────────────────

#[tokio::test]
async fn secrets_are_scoped_to_their_application() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/applications/3/secrets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 10, "client_id": "aa01" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/7/applications/3/secrets"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11, "client_id": "bb02", "client_secret": "s3cr3t"
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/7/applications/3/secrets/10"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let app = EntityId::new(3);
    let store = EntityStore::<Secrets>::new(client);
    let snapshot = store.select(&ctx(), app).await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot[0].client_secret.is_none());

    let created = store.create(&ctx(), app, NewSecret::default()).await.unwrap();
    assert_eq!(created.client_secret.as_deref(), Some("s3cr3t"));

    store.remove(&ctx(), app, &snapshot[0]).await.unwrap();
    let ids: Vec<i64> = store.snapshot().iter().map(|s| s.id.get()).collect();
    assert_eq!(ids, vec![11]);
}

#[tokio::test]
async fn scopes_are_scoped_to_their_application() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/applications/5/scopes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "profile:read", "description": "Read the profile" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/7/applications/5/scopes"))
        .and(body_json(json!({ "name": "profile:write", "description": "Edit" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 2, "name": "profile:write", "description": "Edit"
        })))
        .mount(&server)
        .await;

    let store = EntityStore::<Scopes>::new(client);
    store.select(&ctx(), EntityId::new(5)).await.unwrap();
    store
        .create(&ctx(), EntityId::new(5), NewScope::new("profile:write", "Edit"))
        .await
        .unwrap();

    let names: Vec<String> = store.snapshot().iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, vec!["profile:read", "profile:write"]);
}

#[tokio::test]
async fn selecting_another_application_replaces_its_scopes() {
    let (server, client) = setup().await;

    for (app, id, name) in [(3, 1, "a:read"), (5, 9, "b:read")] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/users/7/applications/{app}/scopes")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "id": id, "name": name }])),
            )
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/api/v1/users/7/applications/5/scopes"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 10, "name": "b:write" })),
        )
        .mount(&server)
        .await;

    let store = EntityStore::<Scopes>::new(client);
    store.select(&ctx(), EntityId::new(3)).await.unwrap();
    // The snapshot does not track its parent: a create under another
    // application appends to whatever was selected last.
    store
        .create(&ctx(), EntityId::new(5), NewScope::new("b:write", ""))
        .await
        .unwrap();
    let ids: Vec<i64> = store.snapshot().iter().map(|s| s.id.get()).collect();
    assert_eq!(ids, vec![1, 10]);

    store.select(&ctx(), EntityId::new(5)).await.unwrap();
    let ids: Vec<i64> = store.snapshot().iter().map(|s| s.id.get()).collect();
    assert_eq!(ids, vec![9]);
}

// ── Authorizations and summary ──────────────────────────────────────

fn authorization_json(id: i64, client: &str) -> serde_json::Value {
    json!({
        "id": id,
        "client_app": app_json(id + 10, client),
        "scope": { "id": 1, "name": "profile:read" }
    })
}

#[tokio::test]
async fn authorization_create_returns_grant_and_keeps_snapshot() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/authorizations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([authorization_json(1, "Client")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/users/7/authorizations"))
        .and(body_json(json!({
            "client_id": "0a0b",
            "scope": "profile:read",
            "redirect_uri": "https://client/cb",
            "response_type": "code",
            "state": "xyz",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "deadbeef",
            "state": "xyz"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = EntityStore::<Authorizations>::new(client);
    store.select(&ctx(), ()).await.unwrap();
    let mut sub = store.subscribe();
    assert_eq!(sub.recv().await.unwrap().len(), 1);

    let grant = store
        .create(
            &ctx(),
            (),
            NewAuthorization::code("0a0b", "profile:read", "https://client/cb", "xyz"),
        )
        .await
        .unwrap();

    assert_eq!(grant.code, "deadbeef");
    assert_eq!(grant.state, "xyz");
    // No blank record was appended and nothing was published.
    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(store.snapshot()[0].id, EntityId::new(1));
    assert_eq!(store.version(), 1);
    assert!(sub.try_recv().is_none());
}

#[tokio::test]
async fn authorization_remove_drops_it_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/authorizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            authorization_json(1, "First"),
            authorization_json(2, "Second"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/7/authorizations/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(authorization_json(1, "First")))
        .expect(1)
        .mount(&server)
        .await;

    let store = EntityStore::<Authorizations>::new(client);
    let snapshot = store.select(&ctx(), ()).await.unwrap();
    store.remove(&ctx(), (), &snapshot[0]).await.unwrap();

    let remaining = store.snapshot();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].client_name(), Some("Second"));
}

#[tokio::test]
async fn summary_is_a_singleton() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "applications": { "total": 5, "used": 2 },
            "authorizations": { "total": 10, "used": 10 },
            "contacts": { "total": 1, "used": 0 }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/summary"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = EntityStore::<Summaries>::new(client);
    assert!(store.snapshot().is_none());

    let summary = store.select(&ctx(), ()).await.unwrap().unwrap();
    assert_eq!(summary.applications.remaining(), 3);
    assert!(summary.authorizations.is_exhausted());

    store.select(&ctx(), ()).await.unwrap_err();
    assert_eq!(store.snapshot().unwrap().applications.used, 2);
}

// ── Ordering and cancellation ───────────────────────────────────────

#[tokio::test]
async fn slow_select_does_not_discard_later_create() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/applications"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([app_json(1, "A")]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/7/applications"))
        .respond_with(ResponseTemplate::new(201).set_body_json(app_json(2, "B")))
        .mount(&server)
        .await;

    let store = EntityStore::<Applications>::new(client);
    let select = tokio::spawn({
        let store = store.clone();
        async move { store.select(&ctx(), ()).await }
    });
    // Let the select reach the server before the create is issued.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let payload = NewApplication::new("B", "https://b.example.com", "https://b.example.com/cb");
    store.create(&ctx(), (), payload).await.unwrap();
    select.await.unwrap().unwrap();

    assert_eq!(
        names(&store.snapshot()),
        vec![(1, "A".into()), (2, "B".into())]
    );
}

#[tokio::test]
async fn abandoned_create_still_applies() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/7/applications"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(app_json(2, "B"))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let store = EntityStore::<Applications>::new(client);
    let mut sub = store.subscribe();
    sub.recv().await.unwrap();

    let payload = NewApplication::new("B", "https://b.example.com", "https://b.example.com/cb");
    let outcome =
        tokio::time::timeout(Duration::from_millis(20), store.create(&ctx(), (), payload)).await;
    assert!(outcome.is_err(), "create should still be in flight");

    let next = tokio::time::timeout(Duration::from_secs(5), sub.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(names(&next), vec![(2, "B".into())]);
}

// ── Subscribers ─────────────────────────────────────────────────────

#[tokio::test]
async fn late_subscriber_gets_current_snapshot_and_dropped_ones_are_pruned() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([app_json(1, "A")])))
        .mount(&server)
        .await;

    let store = EntityStore::<Applications>::new(client);
    let early = store.subscribe();
    store.select(&ctx(), ()).await.unwrap();

    let mut late = store.subscribe();
    assert_eq!(names(&late.recv().await.unwrap()), vec![(1, "A".into())]);
    assert_eq!(store.subscriber_count(), 2);

    drop(early);
    store.select(&ctx(), ()).await.unwrap();
    assert_eq!(store.subscriber_count(), 1);
    assert_eq!(late.recv().await.unwrap().len(), 1);
}

#[tokio::test]
async fn subscription_works_as_a_stream() {
    use futures_util::StreamExt;

    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([app_json(1, "A")])))
        .mount(&server)
        .await;

    let store = EntityStore::<Applications>::new(client);
    let stream = store.subscribe().into_stream();
    store.select(&ctx(), ()).await.unwrap();

    let lens: Vec<usize> = stream.take(2).map(|snap| snap.len()).collect().await;
    assert_eq!(lens, vec![0, 1]);
}
