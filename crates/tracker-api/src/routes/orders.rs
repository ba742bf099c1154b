//! 주문 관리 endpoint.
//!
//! # 엔드포인트
//!
//! | 메서드 | 경로 | 권한 |
//! |---|---|---|
//! | GET | `/api/orders` | 인증 |
//! | GET | `/api/orders/{id}` | 인증 |
//! | GET | `/api/orders/{orderId}/history` | 없음 |
//! | PUT | `/api/orders/{id}` | 인증 |
//! | POST | `/api/orders` | Admin |
//! | DELETE | `/api/orders/{id}` | Admin |
//!
//! 이력 조회만 인증 없이 열려 있습니다. 기존 클라이언트 호환을 위해 유지하고 있으므로,
//! 다른 엔드포인트와 권한을 맞출 때 함께 정리해야 합니다.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;
use tracker_core::{Order, OrderHistory, OrderInput};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{AdminAuth, JwtAuth};
use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 주문 생성/교체 요청 본문.
///
/// `history` 필드가 함께 와도 무시합니다. 이력은 서버가 관리합니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// 주문 ID (생성 시 무시, 교체 시 경로 ID와 같아야 함)
    #[serde(default)]
    pub id: i32,
    /// 상품명
    #[validate(length(min = 1, message = "product must not be empty"))]
    pub product: String,
    /// 주문 상태
    pub status: String,
    /// 주문 일자 (YYYY-MM-DD)
    pub order_date: NaiveDate,
    /// 수량
    #[validate(range(min = 1, message = "amount must be positive"))]
    pub amount: i32,
}

impl OrderPayload {
    fn into_input(self) -> ApiResult<OrderInput> {
        self.validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        Ok(OrderInput::new(
            self.product,
            self.status,
            self.order_date,
            self.amount,
        ))
    }
}

/// 주문 목록 조회 (이력 포함).
///
/// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "주문 목록", body = [Order]),
        (status = 401, description = "인증 필요")
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    _auth: JwtAuth,
) -> Json<Vec<Order>> {
    Json(state.orders.list_with_history().await)
}

/// 주문 단건 조회 (이력 포함).
///
/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "주문 ID")),
    responses(
        (status = 200, description = "주문", body = Order),
        (status = 401, description = "인증 필요"),
        (status = 404, description = "주문 없음", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    _auth: JwtAuth,
    Path(id): Path<i32>,
) -> ApiResult<Json<Order>> {
    let order = state
        .orders
        .find_with_history(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("order {} not found", id)))?;

    Ok(Json(order))
}

/// 주문 이력 조회.
///
/// GET /api/orders/{orderId}/history
///
/// 인증 없이 호출할 수 있습니다. 이력이 하나도 없으면 404입니다.
#[utoipa::path(
    get,
    path = "/api/orders/{orderId}/history",
    params(("orderId" = i32, Path, description = "주문 ID")),
    responses(
        (status = 200, description = "이력 목록", body = [OrderHistory]),
        (status = 404, description = "이력 없음", body = ApiErrorResponse)
    ),
    tag = "orders"
)]
pub async fn get_order_history(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<i32>,
) -> ApiResult<Json<Vec<OrderHistory>>> {
    let history = state.orders.history_for(order_id).await;
    if history.is_empty() {
        return Err(ApiError::NotFound(format!(
            "history for order {} not found",
            order_id
        )));
    }

    Ok(Json(history))
}

/// 주문 전체 교체.
///
/// PUT /api/orders/{id}
///
/// 상태가 바뀌면 호출자 이름과 오늘 날짜로 이력이 추가됩니다.
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "주문 ID")),
    request_body = OrderPayload,
    responses(
        (status = 204, description = "교체 성공"),
        (status = 400, description = "ID 불일치 또는 입력 오류", body = ApiErrorResponse),
        (status = 401, description = "인증 필요"),
        (status = 404, description = "주문 없음", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(id): Path<i32>,
    Json(payload): Json<OrderPayload>,
) -> ApiResult<StatusCode> {
    if payload.id != id {
        return Err(ApiError::BadRequest(format!(
            "path id {} does not match body id {}",
            id, payload.id
        )));
    }
    let input = payload.into_input()?;

    let order = state
        .orders
        .replace(id, input, &claims.name, Utc::now().date_naive())
        .await?;

    info!(order_id = order.id, status = %order.status, changed_by = %claims.name, "Order updated");
    Ok(StatusCode::NO_CONTENT)
}

/// 주문 생성 (Admin 전용).
///
/// POST /api/orders
///
/// 본문의 `id`는 무시하고 저장소가 새 ID를 부여합니다.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "생성 성공", body = Order),
        (status = 400, description = "입력 오류", body = ApiErrorResponse),
        (status = 401, description = "인증 필요"),
        (status = 403, description = "Admin 권한 필요")
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    AdminAuth(claims): AdminAuth,
    Json(payload): Json<OrderPayload>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.into_input()?;
    let order = state.orders.insert(input).await?;

    info!(order_id = order.id, created_by = %claims.name, "Order created");

    let location = format!("/api/orders/{}", order.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(order)))
}

/// 주문 삭제 (Admin 전용). 이력도 함께 삭제됩니다.
///
/// DELETE /api/orders/{id}
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "주문 ID")),
    responses(
        (status = 204, description = "삭제 성공"),
        (status = 401, description = "인증 필요"),
        (status = 403, description = "Admin 권한 필요"),
        (status = 404, description = "주문 없음", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    AdminAuth(claims): AdminAuth,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    if !state.orders.delete(id).await {
        return Err(ApiError::NotFound(format!("order {} not found", id)));
    }

    info!(order_id = id, deleted_by = %claims.name, "Order deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// 주문 라우터 생성.
pub fn orders_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/{id}/history", get(get_order_history))
}
