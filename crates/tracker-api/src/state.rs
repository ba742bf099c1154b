//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::sync::Arc;

use tracker_core::AuthConfig;

use crate::auth::{JwtError, JwtSettings};
use crate::repository::{InMemoryUserStore, OrderRepository};

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Debug, Clone)]
pub struct AppState {
    /// 토큰 서명/검증 설정
    pub jwt: Arc<JwtSettings>,

    /// 사용자 저장소 - 로그인 시 자격증명 조회
    pub users: Arc<InMemoryUserStore>,

    /// 주문 저장소 - 주문 및 주문 이력
    pub orders: Arc<OrderRepository>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 빈 저장소로 새로운 AppState 생성.
    pub fn new(jwt: JwtSettings) -> Self {
        Self {
            jwt: Arc::new(jwt),
            users: Arc::new(InMemoryUserStore::new()),
            orders: Arc::new(OrderRepository::new()),
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 인증 설정 섹션에서 생성.
    pub fn from_config(config: &AuthConfig) -> Result<Self, JwtError> {
        Ok(Self::new(JwtSettings::from_config(config)?))
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}

/// 테스트용 AppState 생성.
///
/// 고정된 테스트 서명 키를 사용하며 저장소는 비어 있습니다.
#[cfg(test)]
pub fn create_test_state() -> AppState {
    let jwt = JwtSettings::new(
        "order-tracker-test",
        "order-tracker-test-clients",
        "test-signing-key-0123456789abcdef",
        60,
    )
    .expect("test JWT settings must be valid");

    AppState::new(jwt)
}
