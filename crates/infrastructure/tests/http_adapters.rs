//! Wire-level tests for the reqwest adapters against local stub servers.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;

use newsdesk_application::ports::{
    ArticleApi, ArticleApiError, Clock, TokenEndpoint, TokenEndpointError,
};
use newsdesk_domain::{ArticleService, Credentials, IdentityProvider};
use newsdesk_infrastructure::{KeycloakTokenEndpoint, ReqwestArticleApi, SystemClock};

const TOKEN_PATH: &str = "/realms/news_realm/protocol/openid-connect/token";

type Recorded = Arc<Mutex<Vec<(HashMap<String, String>, Option<String>)>>>;

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn token_handler(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    recorded.lock().unwrap().push((form.clone(), content_type));

    let grant = form.get("grant_type").map(String::as_str);
    let field = |name: &str| form.get(name).map(String::as_str);
    match grant {
        Some("password")
            if field("username") == Some("alice") && field("password") == Some("s3cr&t") =>
        {
            Json(json!({
                "access_token": "A1",
                "refresh_token": "R1",
                "expires_in": 300,
                "refresh_expires_in": 1800,
                "token_type": "Bearer"
            }))
            .into_response()
        }
        Some("password") if field("username") == Some("garbled") => {
            (StatusCode::OK, "not json").into_response()
        }
        Some("refresh_token") if field("refresh_token") == Some("R1") => {
            Json(json!({ "access_token": "A2", "expires_in": 60 })).into_response()
        }
        Some("refresh_token") => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Token is not active" })),
        )
            .into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid user credentials"
            })),
        )
            .into_response(),
    }
}

async fn token_server() -> (SocketAddr, Recorded) {
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route(TOKEN_PATH, post(token_handler))
        .with_state(recorded.clone());
    (serve(router).await, recorded)
}

fn endpoint(addr: SocketAddr, timeout: Duration) -> KeycloakTokenEndpoint {
    let provider =
        IdentityProvider::new(&format!("http://{addr}"), "news_realm", "news_app_client").unwrap();
    KeycloakTokenEndpoint::new(provider, Arc::new(SystemClock::new()), timeout).unwrap()
}

#[tokio::test]
async fn password_grant_sends_form_and_parses_tokens() {
    let (addr, recorded) = token_server().await;
    let endpoint = endpoint(addr, Duration::from_secs(5));
    let before = SystemClock::new().now();

    let response = endpoint
        .password_grant(&Credentials::new("alice", "s3cr&t").unwrap())
        .await
        .unwrap();

    assert_eq!(response.access_token, "A1");
    assert_eq!(response.refresh_token.as_deref(), Some("R1"));
    assert_eq!(response.expires_in, 300);
    let lifetime = (response.expires_at - before).num_seconds();
    assert!((299..=301).contains(&lifetime), "lifetime was {lifetime}");

    let recorded = recorded.lock().unwrap();
    let (form, content_type) = &recorded[0];
    assert_eq!(form.get("grant_type").unwrap(), "password");
    assert_eq!(form.get("client_id").unwrap(), "news_app_client");
    assert_eq!(form.get("username").unwrap(), "alice");
    assert_eq!(form.get("password").unwrap(), "s3cr&t");
    assert_eq!(
        content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
}

#[tokio::test]
async fn password_grant_rejection_carries_detail() {
    let (addr, _) = token_server().await;
    let endpoint = endpoint(addr, Duration::from_secs(5));

    let error = endpoint
        .password_grant(&Credentials::new("alice", "wrong").unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        error,
        TokenEndpointError::Rejected {
            status: 401,
            detail: Some("Invalid user credentials".to_string()),
        }
    );
}

#[tokio::test]
async fn garbage_success_body_is_malformed() {
    let (addr, _) = token_server().await;
    let endpoint = endpoint(addr, Duration::from_secs(5));

    let error = endpoint
        .password_grant(&Credentials::new("garbled", "x").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(error, TokenEndpointError::Malformed(_)));
}

#[tokio::test]
async fn refresh_grant_sends_refresh_token() {
    let (addr, recorded) = token_server().await;
    let endpoint = endpoint(addr, Duration::from_secs(5));

    let response = endpoint.refresh_grant("R1").await.unwrap();

    assert_eq!(response.access_token, "A2");
    assert_eq!(response.refresh_token, None);

    let recorded = recorded.lock().unwrap();
    let (form, _) = &recorded[0];
    assert_eq!(form.get("grant_type").unwrap(), "refresh_token");
    assert_eq!(form.get("client_id").unwrap(), "news_app_client");
    assert_eq!(form.get("refresh_token").unwrap(), "R1");
    assert!(form.get("password").is_none());
}

#[tokio::test]
async fn revoked_refresh_token_is_rejected() {
    let (addr, _) = token_server().await;
    let endpoint = endpoint(addr, Duration::from_secs(5));

    let error = endpoint.refresh_grant("revoked").await.unwrap_err();

    assert!(matches!(error, TokenEndpointError::Rejected { status: 400, .. }));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let router = Router::new().route(
        TOKEN_PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "access_token": "late", "expires_in": 60 }))
        }),
    );
    let addr = serve(router).await;
    let endpoint = endpoint(addr, Duration::from_millis(200));

    let error = endpoint.refresh_grant("R1").await.unwrap_err();

    assert_eq!(error, TokenEndpointError::Timeout { timeout_ms: 200 });
}

#[tokio::test]
async fn unreachable_provider_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let endpoint = endpoint(addr, Duration::from_secs(2));

    let error = endpoint.refresh_grant("R1").await.unwrap_err();

    assert!(matches!(error, TokenEndpointError::Transport(_)));
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

async fn article_server() -> SocketAddr {
    let router = Router::new()
        .route(
            "/api/articles/titles",
            get(|headers: HeaderMap| async move {
                if bearer(&headers) != Some("Bearer good") {
                    return StatusCode::UNAUTHORIZED.into_response();
                }
                Json(json!([
                    { "id": 7, "title": "Seventh" },
                    { "id": 3, "title": "Third" }
                ]))
                .into_response()
            }),
        )
        .route(
            "/api/articles/{id}",
            get(|Path(id): Path<u64>, headers: HeaderMap| async move {
                if bearer(&headers) != Some("Bearer good") {
                    return StatusCode::UNAUTHORIZED.into_response();
                }
                match id {
                    7 => Json(json!({ "id": 7, "title": "Seventh", "content": "Body" }))
                        .into_response(),
                    8 => Json(json!({ "id": 8 })).into_response(),
                    _ => StatusCode::NOT_FOUND.into_response(),
                }
            }),
        );
    serve(router).await
}

fn article_api(addr: SocketAddr) -> ReqwestArticleApi {
    let service = ArticleService::new(&format!("http://{addr}")).unwrap();
    ReqwestArticleApi::new(service, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn titles_keep_catalog_order() {
    let api = article_api(article_server().await);

    let titles = api.list_titles("good").await.unwrap();

    let ids: Vec<u64> = titles.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![7, 3]);
}

#[tokio::test]
async fn article_fetch_by_id() {
    let api = article_api(article_server().await);

    let article = api.fetch_article("good", 7).await.unwrap();

    assert_eq!(article.title, "Seventh");
    assert_eq!(article.content, "Body");
}

#[tokio::test]
async fn article_errors_are_classified() {
    let api = article_api(article_server().await);

    assert_eq!(
        api.list_titles("bad").await.unwrap_err(),
        ArticleApiError::Status { status: 401 }
    );
    assert_eq!(
        api.fetch_article("good", 404).await.unwrap_err(),
        ArticleApiError::Status { status: 404 }
    );
    assert!(matches!(
        api.fetch_article("good", 8).await.unwrap_err(),
        ArticleApiError::Malformed(_)
    ));
}

#[test]
fn system_clock_is_utc_now() {
    let drift = (SystemClock::new().now() - Utc::now()).num_seconds().abs();
    assert!(drift < 5);
}
