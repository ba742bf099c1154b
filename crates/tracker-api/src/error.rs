//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//!
//! - 400/404/500: [`ApiErrorResponse`] JSON 본문
//! - 401/403: 빈 본문 (사유는 응답에 노출하지 않음)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use tracker_core::TrackerError;
use utoipa::ToSchema;

/// API 에러 응답 본문.
///
/// # 예시
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "order 42",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "BAD_REQUEST", "NOT_FOUND", "INTERNAL_ERROR")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    pub timestamp: i64,
}

impl ApiErrorResponse {
    /// 현재 시각 기준 에러 생성.
    ///
    /// # Example
    ///
    /// ```
    /// use tracker_api::error::ApiErrorResponse;
    ///
    /// let error = ApiErrorResponse::new("NOT_FOUND", "order 42");
    /// assert_eq!(error.code, "NOT_FOUND");
    /// ```
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// 핸들러 에러.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// 응답 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Unauthenticated | ApiError::Forbidden => return status.into_response(),
            ApiError::NotFound(message) => ApiErrorResponse::new("NOT_FOUND", message),
            ApiError::BadRequest(message) => ApiErrorResponse::new("BAD_REQUEST", message),
            ApiError::Internal(message) => {
                error!(error = %message, "Internal server error");
                ApiErrorResponse::new("INTERNAL_ERROR", "internal server error")
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::NotFound(what) => ApiError::NotFound(format!("{} not found", what)),
            TrackerError::Config(message) | TrackerError::Internal(message) => {
                ApiError::Internal(message)
            }
        }
    }
}

/// API 핸들러 Result 타입 별칭.
///
/// # Example
///
/// ```ignore
/// async fn get_order(
///     Path(id): Path<i32>,
///     State(state): State<Arc<AppState>>,
/// ) -> ApiResult<Json<Order>> {
///     let order = state.orders
///         .find_with_history(id)
///         .await
///         .ok_or_else(|| ApiError::NotFound(format!("order {} not found", id)))?;
///
///     Ok(Json(order))
/// }
/// ```
pub type ApiResult<T> = Result<T, ApiError>;
