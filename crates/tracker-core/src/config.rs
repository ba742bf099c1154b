//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 기본값 → TOML 파일 → 환경 변수(`TRACKER__SECTION__KEY`) 순으로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};

/// 서명 키 최소 길이 (바이트, 128비트).
pub const MIN_SIGNING_KEY_BYTES: usize = 16;

/// 토큰 유효 시간 상한 (분, 1년).
pub const MAX_EXPIRY_MINUTES: i64 = 60 * 24 * 365;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 인증 토큰 설정
    pub auth: AuthConfig,
    /// CORS 설정
    #[serde(default)]
    pub cors: CorsConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 시드 데이터 설정
    #[serde(default)]
    pub seed: SeedConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// 인증 토큰 설정.
///
/// 서명 키는 코드에 포함하지 않습니다. 설정 파일이나
/// `TRACKER__AUTH__SIGNING_KEY` 환경 변수로 주입해야 합니다.
#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// 토큰 발급자 (`iss`)
    pub issuer: String,
    /// 토큰 대상 (`aud`)
    pub audience: String,
    /// HMAC-SHA256 대칭 서명 키
    #[serde(default)]
    pub signing_key: String,
    /// 토큰 만료 시간 (분)
    pub expiry_minutes: i64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("signing_key", &"[REDACTED]")
            .field("expiry_minutes", &self.expiry_minutes)
            .finish()
    }
}

/// CORS 설정.
///
/// 단일 origin만 허용하며, 모든 헤더와 메서드를 허용합니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// 허용할 origin (예: Angular 개발 서버)
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:4200".to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 시드 데이터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    /// 시작 시 데모 사용자/주문 적재 여부
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 에러가 아닙니다. 로드 후 [`AppConfig::validate`]를 호출합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("auth.issuer", "order-tracker")?
            .set_default("auth.audience", "order-tracker-clients")?
            .set_default("auth.expiry_minutes", 60)?
            .set_default("cors.allowed_origin", "http://localhost:4200")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("seed.enabled", true)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("TRACKER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> TrackerResult<Self> {
        Self::load("config/default.toml")
    }

    /// 설정 값의 유효성을 검사합니다.
    pub fn validate(&self) -> TrackerResult<()> {
        self.auth.validate()?;

        if self.cors.allowed_origin.trim().is_empty() {
            return Err(TrackerError::Config(
                "cors.allowed_origin must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl AuthConfig {
    /// 인증 설정의 유효성을 검사합니다.
    pub fn validate(&self) -> TrackerResult<()> {
        if self.issuer.trim().is_empty() {
            return Err(TrackerError::Config("auth.issuer must not be empty".to_string()));
        }
        if self.audience.trim().is_empty() {
            return Err(TrackerError::Config(
                "auth.audience must not be empty".to_string(),
            ));
        }
        if self.signing_key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(TrackerError::Config(format!(
                "auth.signing_key must be at least {} bytes (set TRACKER__AUTH__SIGNING_KEY)",
                MIN_SIGNING_KEY_BYTES
            )));
        }
        if !(1..=MAX_EXPIRY_MINUTES).contains(&self.expiry_minutes) {
            return Err(TrackerError::Config(format!(
                "auth.expiry_minutes must be between 1 and {}",
                MAX_EXPIRY_MINUTES
            )));
        }
        Ok(())
    }
}
