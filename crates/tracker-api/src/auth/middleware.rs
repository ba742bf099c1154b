//! Axum용 JWT 인증 추출기.
//!
//! 보호된 핸들러는 인자에 추출기를 선언하는 것으로 인증/인가를 조합합니다.
//! 추출기는 핸들러 본문보다 먼저 실행되므로, 인증 실패 시 본문 파싱도 일어나지 않습니다.
//!
//! 거부 사유는 debug 레벨 로그로만 남기고, 응답은 [`ApiError`]로 변환하여
//! 상태 코드만 돌려줍니다 (401/403, 빈 본문).

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::{decode_token, Claims, JwtError, Role};
use crate::error::ApiError;
use crate::state::AppState;

/// JWT 인증 추출기.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(JwtAuth(claims): JwtAuth) -> impl IntoResponse {
///     format!("Authenticated user: {}", claims.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

/// JWT 인증 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtAuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("유효하지 않은 토큰: {0}")]
    InvalidToken(#[from] JwtError),
    #[error("권한이 부족합니다")]
    InsufficientPermission,
}

impl From<JwtAuthError> for ApiError {
    fn from(err: JwtAuthError) -> Self {
        match err {
            JwtAuthError::InsufficientPermission => ApiError::Forbidden,
            _ => ApiError::Unauthenticated,
        }
    }
}

impl IntoResponse for JwtAuthError {
    fn into_response(self) -> Response {
        debug!(reason = %self, "Request rejected by auth guard");
        ApiError::from(self).into_response()
    }
}

/// `Authorization: Bearer <token>` 헤더에서 토큰을 꺼냅니다.
///
/// 스킴 이름은 대소문자를 구분하지 않습니다.
fn bearer_token(parts: &Parts) -> Result<&str, JwtAuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(JwtAuthError::MissingToken)?
        .to_str()
        .map_err(|_| JwtAuthError::InvalidAuthHeader)?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or(JwtAuthError::InvalidAuthHeader)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
        return Err(JwtAuthError::InvalidAuthHeader);
    }

    Ok(token)
}

impl<S> FromRequestParts<S> for JwtAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let app_state = Arc::<AppState>::from_ref(state);

        let claims = decode_token(token, &app_state.jwt)?;

        Ok(JwtAuth(claims))
    }
}

/// 특정 역할 이상의 권한을 요구하는 가드.
///
/// # Returns
///
/// 권한이 충분하면 Ok(()), 부족하면 Err(JwtAuthError::InsufficientPermission)
pub fn require_role(required_role: Role, claims: &Claims) -> Result<(), JwtAuthError> {
    if claims.has_role(required_role) {
        Ok(())
    } else {
        Err(JwtAuthError::InsufficientPermission)
    }
}

/// Admin 권한을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct AdminAuth(pub Claims);

impl<S> FromRequestParts<S> for AdminAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let JwtAuth(claims) = JwtAuth::from_request_parts(parts, state).await?;
        require_role(Role::Admin, &claims)?;
        Ok(AdminAuth(claims))
    }
}
