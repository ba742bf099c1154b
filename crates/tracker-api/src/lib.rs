//! 주문 추적 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - PBKDF2 비밀번호 검증과 JWT 인증
//! - 역할 기반 접근 제어 (Admin, User)
//! - 헬스 체크 엔드포인트
//! - OpenAPI 문서
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 인증 및 권한 관리
//! - [`repository`]: 메모리 기반 사용자/주문 저장소
//! - [`seed`]: 데모 데이터 적재
//! - [`openapi`]: OpenAPI 문서

pub mod auth;
pub mod error;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod state;

pub use auth::{hash_password, verify_password, AdminAuth, Claims, JwtAuth, JwtAuthError, Role};
pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use routes::{create_api_router, HealthResponse, LoginRequest, LoginResponse, OrderPayload};
pub use state::AppState;

#[cfg(test)]
pub use state::create_test_state;
