//! 로그인부터 주문 조작까지의 전체 흐름 테스트.
//!
//! 데모 데이터를 적재한 상태에서 실제 라우터 구성으로 요청을 보냅니다.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracker_api::auth::{issue_token_at, JwtSettings, Role};
use tracker_api::openapi::openapi_router;
use tracker_api::routes::create_api_router;
use tracker_api::seed::{seed, DEMO_PASSWORD};
use tracker_api::AppState;

async fn app() -> (Router, Arc<AppState>) {
    let jwt = JwtSettings::new(
        "order-tracker",
        "order-tracker-clients",
        "integration-test-signing-key-0123",
        60,
    )
    .unwrap();
    let state = Arc::new(AppState::new(jwt));
    seed(&state).await.unwrap();

    let router = create_api_router()
        .merge(openapi_router())
        .with_state(state.clone());
    (router, state)
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn with_token(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(router: &Router, username: &str, password: &str) -> Response {
    send(
        router,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": username, "password": password }),
        ),
    )
    .await
}

async fn token_for(router: &Router, username: &str) -> String {
    let response = login(router, username, DEMO_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn admin_login_then_delete_order_twice() {
    let (router, _) = app().await;

    let response = login(&router, "admin", DEMO_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["role"], "Admin");
    assert_eq!(body["username"], "admin");
    let token = body["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());
    assert!(body["expires"].as_str().is_some());

    let response = send(&router, with_token("DELETE", "/api/orders/3", &token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&router, with_token("DELETE", "/api/orders/3", &token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_user_and_wrong_password_get_identical_401() {
    let (router, _) = app().await;

    let unknown = login(&router, "mallory", DEMO_PASSWORD).await;
    let wrong = login(&router, "admin", "Password124!").await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let unknown_body = to_bytes(unknown.into_body(), usize::MAX).await.unwrap();
    let wrong_body = to_bytes(wrong.into_body(), usize::MAX).await.unwrap();
    assert!(unknown_body.is_empty());
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn non_admin_create_is_forbidden_and_anonymous_is_unauthorized() {
    let (router, state) = app().await;
    let user_token = token_for(&router, "user").await;
    let order = json!({
        "product": "Scarf",
        "status": "pending",
        "orderDate": "2025-10-01",
        "amount": 1
    });

    let response = send(
        &router,
        json_request("POST", "/api/orders", Some(&user_token), order.clone()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&router, json_request("POST", "/api/orders", None, order)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(state.orders.len().await, 7);
}

#[tokio::test]
async fn admin_create_returns_location() {
    let (router, _) = app().await;
    let token = token_for(&router, "admin").await;

    let response = send(
        &router,
        json_request(
            "POST",
            "/api/orders",
            Some(&token),
            json!({
                "product": "Scarf",
                "status": "pending",
                "orderDate": "2025-10-01",
                "amount": 2
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/api/orders/8");

    let response = send(&router, with_token("GET", "/api/orders/8", &token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["product"], "Scarf");
}

#[tokio::test]
async fn list_orders_includes_seeded_history() {
    let (router, _) = app().await;
    let token = token_for(&router, "user").await;

    let response = send(&router, with_token("GET", "/api/orders", &token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let orders = json_body(response).await;
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 7);
    assert_eq!(orders[0]["product"], "Sunglasses");
    assert_eq!(orders[4]["history"].as_array().unwrap().len(), 2);
    assert_eq!(orders[4]["history"][0]["changedBy"], "Rob");
}

#[tokio::test]
async fn history_endpoint_is_open_without_token() {
    let (router, _) = app().await;

    let response = send(
        &router,
        Request::builder()
            .uri("/api/orders/7/history")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await[0]["status"], "cancelled");

    let response = send(
        &router,
        Request::builder()
            .uri("/api/orders/1/history")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_change_via_put_is_recorded() {
    let (router, _) = app().await;
    let token = token_for(&router, "user").await;

    let response = send(
        &router,
        json_request(
            "PUT",
            "/api/orders/1",
            Some(&token),
            json!({
                "id": 1,
                "product": "Sunglasses",
                "status": "shipped",
                "orderDate": "2025-09-23",
                "amount": 3
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &router,
        Request::builder()
            .uri("/api/orders/1/history")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let history = json_body(response).await;
    assert_eq!(history[0]["status"], "shipped");
    assert_eq!(history[0]["changedBy"], "user");
}

#[tokio::test]
async fn put_with_mismatched_id_is_bad_request() {
    let (router, _) = app().await;
    let token = token_for(&router, "user").await;

    let response = send(
        &router,
        json_request(
            "PUT",
            "/api/orders/2",
            Some(&token),
            json!({
                "id": 3,
                "product": "Purse",
                "status": "delivered",
                "orderDate": "2025-06-03",
                "amount": 1
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn expired_or_foreign_tokens_are_rejected() {
    let (router, state) = app().await;

    let expired = issue_token_at(
        "1",
        "admin",
        Role::Admin,
        &state.jwt,
        chrono::Utc::now() - chrono::Duration::minutes(61),
    )
    .unwrap();
    let response = send(&router, with_token("GET", "/api/secret", &expired.token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let foreign_settings = JwtSettings::new(
        "someone-else",
        "order-tracker-clients",
        "integration-test-signing-key-0123",
        60,
    )
    .unwrap();
    let foreign =
        tracker_api::auth::issue_token("1", "admin", Role::Admin, &foreign_settings).unwrap();
    let response = send(&router, with_token("GET", "/api/secret", &foreign.token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn secret_greets_authenticated_user() {
    let (router, _) = app().await;
    let token = token_for(&router, "user").await;

    let response = send(&router, with_token("GET", "/api/secret", &token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        "Hello user — you are authenticated!"
    );
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (router, _) = app().await;

    let response = send(
        &router,
        Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await["paths"]["/api/auth/login"].is_object());
}
