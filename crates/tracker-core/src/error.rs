//! 주문 추적 시스템의 에러 타입.
//!
//! 이 모듈은 도메인/저장소 계층 전반에서 사용되는 에러 타입을 정의합니다.
//! HTTP 상태 코드로의 변환은 API 크레이트가 담당합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type TrackerResult<T> = Result<T, TrackerError>;

impl From<config::ConfigError> for TrackerError {
    fn from(err: config::ConfigError) -> Self {
        TrackerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let err: TrackerError = config::ConfigError::NotFound("auth.issuer".to_string()).into();
        assert!(matches!(err, TrackerError::Config(ref message) if message.contains("auth.issuer")));
    }

    #[test]
    fn test_error_display() {
        let err = TrackerError::NotFound("order 42".to_string());
        assert_eq!(err.to_string(), "찾을 수 없음: order 42");
    }
}
