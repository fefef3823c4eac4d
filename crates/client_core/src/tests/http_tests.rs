use super::*;
use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::error::ErrorCode;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    controller::Controller,
    navigation::ScreenState,
    prober,
    types::PhotoUpload,
};

const CHEF_TOKEN: &str = "tok-chef";
const READER_TOKEN: &str = "tok-reader";

#[derive(Default)]
struct Captured {
    find_query: Option<HashMap<String, String>>,
    upload_fields: HashMap<String, Vec<u8>>,
    create_query: Option<HashMap<String, String>>,
    create_body: Option<Value>,
}

#[derive(Clone)]
struct ServerState {
    healthy: bool,
    malformed_list: bool,
    captured: Arc<Mutex<Captured>>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "message": message, "statusCode": status.as_u16() })),
    )
        .into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn user_for_token(token: Option<String>) -> Option<Value> {
    match token.as_deref() {
        Some(CHEF_TOKEN) => Some(json!({
            "id": "u-chef", "name": "Demo Chef", "email": "chef@example.com", "role": "chef"
        })),
        Some(READER_TOKEN) => Some(json!({
            "id": "u-reader", "name": "Reader", "email": "reader@example.com", "role": "reader"
        })),
        _ => None,
    }
}

async fn handle_health(State(state): State<ServerState>) -> Response {
    if state.healthy {
        (StatusCode::OK, "ok").into_response()
    } else {
        error_response(StatusCode::SERVICE_UNAVAILABLE, "maintenance")
    }
}

async fn handle_login(Json(body): Json<LoginRequest>) -> Response {
    match (body.email.as_str(), body.password.as_str()) {
        ("chef@example.com", "password") => Json(json!({ "token": CHEF_TOKEN })).into_response(),
        ("reader@example.com", "password") => {
            Json(json!({ "token": READER_TOKEN })).into_response()
        }
        _ => error_response(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

async fn handle_me(headers: HeaderMap) -> Response {
    match user_for_token(bearer(&headers)) {
        Some(user) => Json(user).into_response(),
        None => error_response(StatusCode::UNAUTHORIZED, "Unauthorized"),
    }
}

async fn handle_find(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.captured.lock().await.find_query = Some(query);
    if state.malformed_list {
        return (StatusCode::OK, "not json").into_response();
    }
    Json(json!({
        "data": [
            { "id": "r-2", "title": "Salad", "prepTime": 5,
              "author": { "id": "u-chef", "name": "Demo Chef", "email": "chef@example.com", "role": "chef" } },
            { "id": "r-1", "title": "Stew", "description": "Slow", "prepTime": 90 }
        ],
        "currentPage": 1,
        "lastPage": 1,
        "total": 2,
        "perPage": 20
    }))
    .into_response()
}

async fn handle_upload(
    State(state): State<ServerState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if user_for_token(bearer(&headers)).is_none() {
        return error_response(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let mut fields = HashMap::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        fields.insert(name, bytes);
    }
    state.captured.lock().await.upload_fields = fields;
    Json(json!({ "thumbnail": { "url": "http://cdn.test/thumb/soup.jpg" } })).into_response()
}

async fn handle_create(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let Some(author) = user_for_token(bearer(&headers)) else {
        return error_response(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    if author["role"] != "chef" && author["role"] != "admin" {
        return error_response(StatusCode::FORBIDDEN, "Forbidden resource");
    }
    {
        let mut captured = state.captured.lock().await;
        captured.create_query = Some(query);
        captured.create_body = Some(body.clone());
    }
    let mut created = body;
    created["id"] = json!("r-3");
    created["author"] = author;
    created["createdAt"] = json!("2024-05-01T12:00:00Z");
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn spawn_backend_server(
    healthy: bool,
    malformed_list: bool,
) -> anyhow::Result<(String, Arc<Mutex<Captured>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let captured = Arc::new(Mutex::new(Captured::default()));
    let state = ServerState {
        healthy,
        malformed_list,
        captured: captured.clone(),
    };
    let app = Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/auth/users/login", post(handle_login))
        .route("/api/auth/users/me", get(handle_me))
        .route(
            "/api/collections/recipes",
            get(handle_find).post(handle_create),
        )
        .route("/api/upload/image", post(handle_upload))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), captured))
}

fn backend_for(server_url: &str) -> HttpBackend {
    HttpBackend::new(ClientConfig::new(server_url).expect("config"))
}

fn soup() -> NewRecipe {
    NewRecipe {
        title: "Soup".into(),
        description: "Warm and simple".into(),
        prep_time_minutes: 25,
        photo: PhotoUpload {
            filename: "soup.jpg".into(),
            mime_type: Some("image/jpeg".into()),
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        },
    }
}

#[tokio::test]
async fn health_check_succeeds_on_any_success_status() {
    let (server_url, _) = spawn_backend_server(true, false).await.expect("spawn server");
    backend_for(&server_url).health().await.expect("healthy");
}

#[tokio::test]
async fn probe_reports_unreachable_for_error_status() {
    let (server_url, _) = spawn_backend_server(false, false).await.expect("spawn server");
    let backend = backend_for(&server_url);
    let err = prober::probe(&backend).await.expect_err("must be unreachable");
    assert!(err.reason.contains("maintenance"), "unexpected reason: {}", err.reason);
}

#[tokio::test]
async fn probe_reports_unreachable_when_nothing_listens() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let backend = backend_for(&format!("http://{addr}"));
    assert!(prober::probe(&backend).await.is_err());
}

#[tokio::test]
async fn me_without_credential_fails_locally() {
    let backend = backend_for("http://127.0.0.1:9");
    assert!(matches!(
        backend.me().await,
        Err(BackendError::MissingCredential)
    ));
}

#[tokio::test]
async fn login_stores_token_used_by_me() {
    let (server_url, _) = spawn_backend_server(true, false).await.expect("spawn server");
    let backend = backend_for(&server_url);

    backend
        .login("chef@example.com", "password")
        .await
        .expect("login");
    assert_eq!(backend.token().await.as_deref(), Some(CHEF_TOKEN));

    let user = backend.me().await.expect("me");
    assert_eq!(user.name, "Demo Chef");
    assert!(user.can_publish());

    backend.logout().await.expect("logout");
    assert!(backend.token().await.is_none());
}

#[tokio::test]
async fn rejected_login_maps_to_unauthorized() {
    let (server_url, _) = spawn_backend_server(true, false).await.expect("spawn server");
    let backend = backend_for(&server_url);

    let err = backend
        .login("chef@example.com", "nope")
        .await
        .expect_err("must fail");
    match err {
        BackendError::Api(api) => {
            assert_eq!(api.code, ErrorCode::Unauthorized);
            assert_eq!(api.message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(backend.token().await.is_none());
}

#[tokio::test]
async fn find_sends_sort_and_relation_directives() {
    let (server_url, captured) = spawn_backend_server(true, false).await.expect("spawn server");
    let backend = backend_for(&server_url);

    let recipes = backend
        .find_recipes(&FindQuery::recipes_newest_first())
        .await
        .expect("find");
    let ids: Vec<&str> = recipes.iter().map(|r| r.id.0.as_str()).collect();
    assert_eq!(ids, vec!["r-2", "r-1"]);
    assert_eq!(recipes[0].author_label(), "Demo Chef");
    assert_eq!(recipes[1].author_label(), "Unknown Chef");

    let query = captured.lock().await.find_query.clone().expect("query");
    assert_eq!(query.get("relations").map(String::as_str), Some("author"));
    assert_eq!(query.get("orderBy").map(String::as_str), Some("createdAt"));
    assert_eq!(query.get("order").map(String::as_str), Some("DESC"));
}

#[tokio::test]
async fn malformed_list_is_a_decode_error() {
    let (server_url, _) = spawn_backend_server(true, true).await.expect("spawn server");
    let backend = backend_for(&server_url);
    assert!(matches!(
        backend.find_recipes(&FindQuery::recipes_newest_first()).await,
        Err(BackendError::Decode(_))
    ));
}

#[tokio::test]
async fn create_uploads_photo_then_posts_record() {
    let (server_url, captured) = spawn_backend_server(true, false).await.expect("spawn server");
    let backend = HttpBackend::with_token(
        ClientConfig::new(&server_url).expect("config"),
        CHEF_TOKEN,
    );

    let created = backend.create_recipe(&soup()).await.expect("create");
    assert_eq!(created.id.0, "r-3");
    assert_eq!(created.prep_time_minutes, 25);
    assert_eq!(created.author_label(), "Demo Chef");
    assert_eq!(created.thumbnail_url(), Some("http://cdn.test/thumb/soup.jpg"));

    let captured = captured.lock().await;
    assert_eq!(
        captured.upload_fields.get("entity").map(Vec::as_slice),
        Some(b"recipes".as_slice())
    );
    assert_eq!(
        captured.upload_fields.get("property").map(Vec::as_slice),
        Some(b"photo".as_slice())
    );
    assert_eq!(
        captured.upload_fields.get("image"),
        Some(&vec![0xFF, 0xD8, 0xFF, 0xE0])
    );
    let query = captured.create_query.clone().expect("create query");
    assert_eq!(query.get("relations").map(String::as_str), Some("author"));
    let body = captured.create_body.clone().expect("create body");
    assert_eq!(body["title"], "Soup");
    assert_eq!(body["prepTime"], 25);
    assert_eq!(body["photo"]["thumbnail"]["url"], "http://cdn.test/thumb/soup.jpg");
}

#[tokio::test]
async fn create_by_non_publisher_is_forbidden() {
    let (server_url, captured) = spawn_backend_server(true, false).await.expect("spawn server");
    let backend = HttpBackend::with_token(
        ClientConfig::new(&server_url).expect("config"),
        READER_TOKEN,
    );

    let err = backend.create_recipe(&soup()).await.expect_err("must fail");
    assert_eq!(err.code(), Some(ErrorCode::Forbidden));
    assert!(err.is_auth_rejection());
    assert!(captured.lock().await.create_body.is_none());
}

#[tokio::test]
async fn unusable_mime_type_fails_before_upload() {
    let (server_url, captured) = spawn_backend_server(true, false).await.expect("spawn server");
    let backend = HttpBackend::with_token(
        ClientConfig::new(&server_url).expect("config"),
        CHEF_TOKEN,
    );
    let mut recipe = soup();
    recipe.photo.mime_type = Some("not a mime type".into());

    let err = backend.create_recipe(&recipe).await.expect_err("must fail");
    assert!(matches!(err, BackendError::InvalidUpload(_)), "unexpected error: {err}");
    assert!(!err.is_auth_rejection());
    let captured = captured.lock().await;
    assert!(captured.upload_fields.is_empty());
    assert!(captured.create_body.is_none());
}

#[tokio::test]
async fn controller_resumes_stored_credential_and_loads() {
    let (server_url, _) = spawn_backend_server(true, false).await.expect("spawn server");
    let config = ClientConfig::new(&server_url).expect("config");
    let backend = Arc::new(HttpBackend::with_token(config.clone(), CHEF_TOKEN));
    let mut controller = Controller::new(backend, &config);

    let state = controller.startup().await;
    assert_eq!(state.screen(), ScreenState::Dashboard);

    let state = controller
        .dispatch(crate::reducer::Intent::LoadCollection)
        .await;
    assert_eq!(state.recipes().len(), 2);

    let view = controller.view();
    assert_eq!(view.admin_url, format!("{server_url}/admin"));
    assert!(view.can_create);
}
