//! 역할 기반 접근 제어 (RBAC).
//!
//! 사용자 역할 정의. 역할은 문자열이 아닌 닫힌 열거형으로 다루며,
//! 토큰의 `role` 클레임에는 `"Admin"` / `"User"`로 직렬화됩니다.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 사용자 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// 관리자 - 주문 생성/삭제 포함 모든 권한
    Admin,
    /// 일반 사용자 - 주문 조회/수정
    User,
}

impl Role {
    /// 역할의 우선순위 레벨 반환 (높을수록 더 많은 권한).
    pub fn level(&self) -> u8 {
        match self {
            Role::Admin => 100,
            Role::User => 10,
        }
    }

    /// `required` 역할의 권한을 포함하는지 확인.
    pub fn satisfies(&self, required: Role) -> bool {
        self.level() >= required.level()
    }

    /// 표준 표기 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
