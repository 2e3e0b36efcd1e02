//! Session bootstrap, login and logout tests against a mocked backend

use coursedesk::api::ApiClient;
use coursedesk::auth::{AuthState, SessionManager, TokenStore};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_in(dir: &TempDir) -> TokenStore {
    TokenStore::new(dir.path().join("token"), dir.path().join("token_mirror"))
}

fn session_with(uri: &str, store: TokenStore, offline_fallback: bool) -> SessionManager {
    SessionManager::new(ApiClient::new(uri), store, offline_fallback)
}

/// A properly signed JWT whose payload the fallback path can decode
fn signed_token(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("Failed to sign token")
}

fn future_exp() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

fn admin_user() -> serde_json::Value {
    json!({
        "id": "7",
        "email": "ana@example.com",
        "nome": "Ana Admin",
        "perfil": "ADMINISTRADOR"
    })
}

#[tokio::test]
async fn test_resolve_without_token_skips_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut session = session_with(&mock_server.uri(), store_in(&dir), true);
    assert!(session.is_loading());

    session.resolve().await;

    assert_eq!(session.state(), &AuthState::Unauthenticated);
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_resolve_validates_admin_session() {
    let mock_server = MockServer::start().await;
    let token = signed_token(json!({ "sub": "7", "exp": future_exp() }));

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .and(header("authorization", format!("Bearer {}", token)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": admin_user() })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(&token).unwrap();

    let mut session = session_with(&mock_server.uri(), store.clone(), true);
    session.resolve().await;

    assert!(session.is_authenticated());
    let user = session.current_user().expect("Expected an active session");
    assert_eq!(user.email, "ana@example.com");
    assert_eq!(user.name, "Ana Admin");
    // The validated token stays stored
    assert_eq!(store.load().as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn test_resolve_purges_non_admin_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "id": "12",
                "email": "aluno@example.com",
                "nome": "Aluno",
                "perfil": "ALUNO"
            }
        })))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .save(&signed_token(json!({ "sub": "12", "exp": future_exp() })))
        .unwrap();

    let mut session = session_with(&mock_server.uri(), store.clone(), true);
    session.resolve().await;

    assert!(!session.is_authenticated());
    assert_eq!(session.state(), &AuthState::Unauthenticated);
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_resolve_purges_rejected_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .save(&signed_token(json!({ "sub": "7", "exp": future_exp() })))
        .unwrap();

    let mut session = session_with(&mock_server.uri(), store.clone(), true);
    session.resolve().await;

    assert!(!session.is_authenticated());
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_resolve_falls_back_to_token_claims_during_outage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let token = signed_token(json!({
        "sub": "42",
        "email": "gestor@example.com",
        "exp": future_exp()
    }));
    store.save(&token).unwrap();

    let mut session = session_with(&mock_server.uri(), store.clone(), true);
    session.resolve().await;

    assert!(session.is_authenticated());
    let user = session.current_user().expect("Expected a fallback session");
    assert_eq!(user.id, "42");
    assert_eq!(user.email, "gestor@example.com");
    assert_eq!(user.name, "Administrador");
    assert_eq!(store.load().as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn test_resolve_fallback_fills_in_missing_claims() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .save(&signed_token(json!({ "exp": future_exp() })))
        .unwrap();

    let mut session = session_with(&mock_server.uri(), store.clone(), true);
    session.resolve().await;

    let user = session.current_user().expect("Expected a fallback session");
    assert_eq!(user.id, "1");
    assert_eq!(user.email, "admin@admin.com");
}

#[tokio::test]
async fn test_resolve_fallback_purges_expired_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .save(&signed_token(json!({
            "sub": "42",
            "exp": chrono::Utc::now().timestamp() - 60
        })))
        .unwrap();

    let mut session = session_with(&mock_server.uri(), store.clone(), true);
    session.resolve().await;

    assert!(!session.is_authenticated());
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_resolve_fallback_purges_token_without_expiry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(&signed_token(json!({ "sub": "42" }))).unwrap();

    let mut session = session_with(&mock_server.uri(), store.clone(), true);
    session.resolve().await;

    assert!(!session.is_authenticated());
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_resolve_fallback_purges_undecodable_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save("not-a-jwt-at-all").unwrap();

    let mut session = session_with(&mock_server.uri(), store.clone(), true);
    session.resolve().await;

    assert!(!session.is_authenticated());
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_resolve_without_fallback_purges_on_outage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .save(&signed_token(json!({ "sub": "42", "exp": future_exp() })))
        .unwrap();

    let mut session = session_with(&mock_server.uri(), store.clone(), false);
    session.resolve().await;

    assert!(!session.is_authenticated());
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_resolve_treats_malformed_validate_body_as_outage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .save(&signed_token(json!({ "sub": "42", "exp": future_exp() })))
        .unwrap();

    let mut session = session_with(&mock_server.uri(), store.clone(), true);
    session.resolve().await;

    // A 200 with an unreadable body is no verdict, so the fallback runs
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_resolve_handles_unreachable_backend() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .save(&signed_token(json!({ "sub": "42", "exp": future_exp() })))
        .unwrap();

    // Nothing listens on port 1, so the request itself fails
    let mut session = session_with("http://127.0.0.1:1", store, true);
    session.resolve().await;

    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_login_stores_token_for_admin() {
    let mock_server = MockServer::start().await;
    let token = signed_token(json!({ "sub": "7", "exp": future_exp() }));

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "ana@example.com",
            "password": "s3cret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": token,
            "user": admin_user()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut session = session_with(&mock_server.uri(), store.clone(), true);

    assert!(session.login("ana@example.com", "s3cret").await);
    assert!(session.is_authenticated());
    assert_eq!(
        session.current_user().map(|u| u.email.as_str()),
        Some("ana@example.com")
    );

    // The token lands in both storage locations
    assert_eq!(store.load().as_deref(), Some(token.as_str()));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("token_mirror")).unwrap(),
        token
    );
}

#[tokio::test]
async fn test_login_refuses_non_admin_account() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": signed_token(json!({ "sub": "12", "exp": future_exp() })),
            "user": {
                "id": "12",
                "email": "aluno@example.com",
                "nome": "Aluno",
                "perfil": "ALUNO"
            }
        })))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut session = session_with(&mock_server.uri(), store.clone(), true);

    assert!(!session.login("aluno@example.com", "s3cret").await);
    assert!(!session.is_authenticated());
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Credenciais inválidas" })),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut session = session_with(&mock_server.uri(), store.clone(), true);

    assert!(!session.login("ana@example.com", "wrong").await);
    assert!(!session.is_authenticated());
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_login_survives_backend_outage() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut session = session_with("http://127.0.0.1:1", store.clone(), true);

    assert!(!session.login("ana@example.com", "s3cret").await);
    assert!(!session.is_authenticated());
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_logout_purges_both_locations() {
    let mock_server = MockServer::start().await;
    let token = signed_token(json!({ "sub": "7", "exp": future_exp() }));

    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": admin_user() })))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(&token).unwrap();

    let mut session = session_with(&mock_server.uri(), store.clone(), true);
    session.resolve().await;
    assert!(session.is_authenticated());

    session.logout();
    assert!(!session.is_authenticated());
    assert_eq!(session.state(), &AuthState::Unauthenticated);
    assert_eq!(store.load(), None);
    assert!(!dir.path().join("token").exists());
    assert!(!dir.path().join("token_mirror").exists());

    // Logging out twice is fine
    session.logout();
    assert_eq!(store.load(), None);
}
