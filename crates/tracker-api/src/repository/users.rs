//! 사용자 저장소.
//!
//! 로그인 대상 사용자를 메모리에 보관합니다. 사용자명은 대소문자를 구분하지 않고
//! 유일하며, 비밀번호는 해시 형태로만 저장됩니다.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::Role;

/// 사용자 레코드.
#[derive(Clone)]
pub struct User {
    /// 사용자 ID (UUID 문자열)
    pub id: String,
    /// 사용자명 (원래 표기 유지)
    pub username: String,
    /// `salt:key` 형식의 PBKDF2 해시
    pub password_hash: String,
    /// 역할
    pub role: Role,
}

impl User {
    /// 새 ID를 부여한 사용자 생성.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// 메모리 기반 사용자 저장소.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    /// 빈 저장소 생성.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(username: &str) -> String {
        username.to_lowercase()
    }

    /// 사용자명으로 조회 (대소문자 무시).
    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.read().await.get(&Self::key(username)).cloned()
    }

    /// 사용자 추가. 같은 사용자명이 있으면 교체합니다.
    pub async fn insert(&self, user: User) {
        self.users
            .write()
            .await
            .insert(Self::key(&user.username), user);
    }

    /// 등록된 사용자 수.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// 비어 있는지 확인.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
