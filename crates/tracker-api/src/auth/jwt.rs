//! JWT 토큰 처리.
//!
//! Access Token 생성/검증 로직. 서명은 HS256(HMAC-SHA256)이며,
//! 검증 시 서명·발급자(`iss`)·대상(`aud`)·만료(`exp`)를 모두 확인합니다.
//! 만료 검사는 허용 오차(leeway) 없이 수행합니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracker_core::{AuthConfig, MAX_EXPIRY_MINUTES, MIN_SIGNING_KEY_BYTES};

use super::Role;

/// 토큰 서명/검증 설정.
///
/// 서명 키는 설정에서만 주입되며 `Debug` 출력에 노출되지 않습니다.
#[derive(Debug)]
pub struct JwtSettings {
    /// 발급자 (`iss`)
    pub issuer: String,
    /// 대상 (`aud`)
    pub audience: String,
    /// 토큰 만료 시간 (분)
    pub expiry_minutes: i64,
    signing_key: SecretString,
}

impl JwtSettings {
    /// 새 설정 생성.
    ///
    /// # Errors
    ///
    /// 서명 키가 16바이트 미만이거나 만료 시간이 범위를 벗어나면 `JwtError::InvalidSettings`.
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        signing_key: impl Into<String>,
        expiry_minutes: i64,
    ) -> Result<Self, JwtError> {
        let signing_key: String = signing_key.into();

        if signing_key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(JwtError::InvalidSettings(format!(
                "signing key must be at least {} bytes",
                MIN_SIGNING_KEY_BYTES
            )));
        }
        if !(1..=MAX_EXPIRY_MINUTES).contains(&expiry_minutes) {
            return Err(JwtError::InvalidSettings(format!(
                "expiry must be between 1 and {} minutes",
                MAX_EXPIRY_MINUTES
            )));
        }

        Ok(Self {
            issuer: issuer.into(),
            audience: audience.into(),
            expiry_minutes,
            signing_key: SecretString::from(signing_key),
        })
    }

    /// 인증 설정 섹션에서 생성.
    pub fn from_config(config: &AuthConfig) -> Result<Self, JwtError> {
        Self::new(
            config.issuer.clone(),
            config.audience.clone(),
            config.signing_key.clone(),
            config.expiry_minutes,
        )
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.signing_key.expose_secret().as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.signing_key.expose_secret().as_bytes())
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = 0;
        validation
    }
}

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// 사용자 이름
    pub name: String,
    /// 사용자 역할
    pub role: Role,
    /// JWT ID - 토큰 고유 식별자 (재사용 탐지/폐기 대비)
    pub jti: String,
    /// 발급자
    pub iss: String,
    /// 대상
    pub aud: String,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `user_id` - 사용자 ID
    /// * `username` - 사용자 이름
    /// * `role` - 사용자 역할
    /// * `settings` - 발급자/대상/만료 설정
    /// * `issued_at` - 발급 시각
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        role: Role,
        settings: &JwtSettings,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: user_id.into(),
            name: username.into(),
            role,
            jti: uuid::Uuid::new_v4().to_string(),
            iss: settings.issuer.clone(),
            aud: settings.audience.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::minutes(settings.expiry_minutes)).timestamp(),
        }
    }

    /// 특정 역할 이상인지 확인.
    pub fn has_role(&self, required_role: Role) -> bool {
        self.role.satisfies(required_role)
    }
}

/// 발급된 토큰과 만료 시각.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// 인코딩된 JWT 문자열
    pub token: String,
    /// 만료 시각 (UTC)
    pub expires_at: DateTime<Utc>,
    /// 토큰에 담긴 클레임
    pub claims: Claims,
}

/// JWT 토큰 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("잘못된 토큰 설정: {0}")]
    InvalidSettings(String),
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("서명이 유효하지 않습니다")]
    InvalidSignature,
    #[error("발급자가 일치하지 않습니다")]
    InvalidIssuer,
    #[error("대상이 일치하지 않습니다")]
    InvalidAudience,
    #[error("잘못된 토큰 형식")]
    InvalidToken,
}

/// Access Token 생성.
pub fn create_token(claims: &Claims, settings: &JwtSettings) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &settings.encoding_key(),
    )
    .map_err(JwtError::from)
}

/// 사용자에게 현재 시각 기준으로 토큰을 발급합니다.
pub fn issue_token(
    user_id: &str,
    username: &str,
    role: Role,
    settings: &JwtSettings,
) -> Result<IssuedToken, JwtError> {
    issue_token_at(user_id, username, role, settings, Utc::now())
}

/// 지정한 발급 시각 기준으로 토큰을 발급합니다.
pub fn issue_token_at(
    user_id: &str,
    username: &str,
    role: Role,
    settings: &JwtSettings,
    issued_at: DateTime<Utc>,
) -> Result<IssuedToken, JwtError> {
    let claims = Claims::new(user_id, username, role, settings, issued_at);
    let token = create_token(&claims, settings)?;

    Ok(IssuedToken {
        token,
        expires_at: issued_at + Duration::minutes(settings.expiry_minutes),
        claims,
    })
}

/// JWT 토큰 디코딩 및 검증.
///
/// 만료 시각과 같은 순간부터 만료로 취급합니다.
pub fn decode_token(token: &str, settings: &JwtSettings) -> Result<Claims, JwtError> {
    let claims = decode::<Claims>(token, &settings.decoding_key(), &settings.validation())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
            ErrorKind::InvalidAudience => JwtError::InvalidAudience,
            _ => JwtError::InvalidToken,
        })?;

    if claims.exp <= Utc::now().timestamp() {
        return Err(JwtError::TokenExpired);
    }

    Ok(claims)
}
