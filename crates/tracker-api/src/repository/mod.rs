//! 저장소 계층.
//!
//! 데이터 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 모든 저장소는 메모리 기반이며 `AppState`가 소유합니다.

pub mod orders;
pub mod users;

pub use orders::OrderRepository;
pub use users::{InMemoryUserStore, User};
