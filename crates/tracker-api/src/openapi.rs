//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성하고
//! `/api-docs/openapi.json` 경로로 제공합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::{routing::get, Json, Router};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::auth::Role;
use crate::error::ApiErrorResponse;
use crate::routes::{HealthResponse, LoginRequest, LoginResponse, OrderPayload};
use tracker_core::{Order, OrderHistory};

/// Bearer 토큰 보안 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Order Tracker API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order Tracker API",
        description = r#"
주문 및 주문 이력 관리를 위한 REST API입니다.

## 인증

`POST /api/auth/login`으로 토큰을 발급받은 뒤
`Authorization: Bearer <token>` 헤더를 포함하세요.
주문 생성/삭제는 Admin 역할이 필요합니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 로그인 및 토큰 발급"),
        (name = "orders", description = "주문 관리 - 주문 및 이력 CRUD")
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            // ===== Common =====
            ApiErrorResponse,

            // ===== Health =====
            HealthResponse,

            // ===== Auth =====
            LoginRequest,
            LoginResponse,
            Role,

            // ===== Orders =====
            Order,
            OrderHistory,
            OrderPayload,
        )
    ),
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Auth =====
        crate::routes::auth::login,
        crate::routes::auth::secret,

        // ===== Orders =====
        crate::routes::orders::list_orders,
        crate::routes::orders::get_order,
        crate::routes::orders::get_order_history,
        crate::routes::orders::update_order,
        crate::routes::orders::create_order,
        crate::routes::orders::delete_order,
    )
)]
pub struct ApiDoc;

/// OpenAPI JSON 라우터 생성.
///
/// `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Order Tracker API"));

        // 경로 확인
        assert!(json.contains("/health/ready"));
        assert!(json.contains("/api/auth/login"));
        assert!(json.contains("/api/orders/{id}"));
        assert!(json.contains("/api/orders/{orderId}/history"));

        // 스키마 확인
        assert!(json.contains("OrderHistory"));
        assert!(json.contains("LoginResponse"));
        assert!(json.contains("bearer_auth"));
    }

    #[tokio::test]
    async fn test_openapi_route_serves_json() {
        let app: Router = openapi_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["paths"]["/api/orders"].is_object());
    }
}
