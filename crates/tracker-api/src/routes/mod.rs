//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/auth/login` - 로그인 및 토큰 발급
//! - `/api/secret` - 토큰 검증 확인
//! - `/api/orders` - 주문 관리

pub mod auth;
pub mod health;
pub mod orders;

pub use auth::{auth_router, LoginRequest, LoginResponse};
pub use health::{health_router, HealthResponse};
pub use orders::{orders_router, OrderPayload};

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // 인증
        .nest("/api/auth", auth_router())
        .route("/api/secret", get(auth::secret))
        // 주문
        .nest("/api/orders", orders_router())
}
