//! 인증 endpoint.
//!
//! # 엔드포인트
//!
//! - `POST /api/auth/login` - 사용자명/비밀번호로 토큰 발급
//! - `GET /api/secret` - 토큰 검증 확인용 보호 리소스
//!
//! 존재하지 않는 사용자와 틀린 비밀번호는 구분 없이 같은 401 응답(빈 본문)을 돌려주며,
//! 두 경우 모두 PBKDF2 키 파생을 거칩니다.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::auth::{issue_token, verify_password, JwtAuth, Role, DUMMY_HASH};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// 로그인 요청.
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    /// 사용자명 (대소문자 무시)
    pub username: String,
    /// 비밀번호
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// 로그인 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer 토큰
    pub token: String,
    /// 만료 시각 (UTC, RFC 3339)
    pub expires: DateTime<Utc>,
    /// 저장된 사용자명
    pub username: String,
    /// 사용자 역할
    pub role: Role,
}

/// 로그인.
///
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "토큰 발급 성공", body = LoginResponse),
        (status = 401, description = "인증 실패 (빈 본문)")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let LoginRequest { username, password } = request;
    let user = state.users.find_by_username(&username).await;

    // 없는 사용자도 더미 해시로 같은 비용의 키 파생을 수행.
    // PBKDF2 검증은 CPU 집약적이므로 블로킹 스레드 풀에서 수행
    let password_hash = user
        .as_ref()
        .map_or_else(|| DUMMY_HASH.to_string(), |user| user.password_hash.clone());
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| ApiError::Internal(format!("password verification task failed: {}", e)))?;

    let user = match user {
        Some(user) if verified => user,
        _ => {
            warn!(username = %username, "Login failed");
            return Err(ApiError::Unauthenticated);
        }
    };

    let issued = issue_token(&user.id, &user.username, user.role, &state.jwt)
        .map_err(|e| ApiError::Internal(format!("token signing failed: {}", e)))?;

    info!(username = %user.username, role = %user.role, "Login succeeded");

    Ok(Json(LoginResponse {
        token: issued.token,
        expires: issued.expires_at,
        username: user.username,
        role: user.role,
    }))
}

/// 인증 확인용 보호 리소스.
///
/// GET /api/secret
#[utoipa::path(
    get,
    path = "/api/secret",
    responses(
        (status = 200, description = "인증됨", body = String, content_type = "text/plain"),
        (status = 401, description = "토큰 없음 또는 무효 (빈 본문)")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn secret(JwtAuth(claims): JwtAuth) -> String {
    format!("Hello {} — you are authenticated!", claims.name)
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}
