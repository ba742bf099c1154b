//! 데모 데이터 시딩.
//!
//! 서버 시작 시 데모용 사용자, 주문, 주문 이력을 적재합니다.
//! 이미 데이터가 있는 테이블은 건너뜁니다.
//!
//! 시딩 실패는 서버 시작을 막지 않습니다. [`seed_demo_data`]는 에러를 로그로만 남깁니다.

use chrono::NaiveDate;
use tracing::{error, info};
use tracker_core::{NewOrderHistory, OrderInput, TrackerError, TrackerResult};

use crate::auth::{hash_password, Role};
use crate::repository::User;
use crate::state::AppState;

/// 데모 계정 비밀번호.
pub const DEMO_PASSWORD: &str = "Password123!";

/// 시딩 결과.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub orders: usize,
    pub history: usize,
}

fn date(year: i32, month: u32, day: u32) -> TrackerResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TrackerError::Internal(format!("invalid seed date {year}-{month}-{day}")))
}

/// 데모 데이터를 적재하고, 실패하면 에러 로그만 남깁니다.
pub async fn seed_demo_data(state: &AppState) {
    match seed(state).await {
        Ok(report) => info!(
            users = report.users,
            orders = report.orders,
            history = report.history,
            "Seed data loaded"
        ),
        Err(e) => error!(error = %e, "Seeding failed"),
    }
}

/// 데모 데이터 적재.
///
/// 각 테이블이 비어 있을 때만 적재하며, 적재한 행 수를 반환합니다.
pub async fn seed(state: &AppState) -> TrackerResult<SeedReport> {
    let mut report = SeedReport::default();

    if state.users.is_empty().await {
        for (username, role) in [("admin", Role::Admin), ("user", Role::User)] {
            let hash = tokio::task::spawn_blocking(|| hash_password(DEMO_PASSWORD))
                .await
                .map_err(|e| TrackerError::Internal(e.to_string()))?
                .map_err(|e| TrackerError::Internal(e.to_string()))?;
            state.users.insert(User::new(username, hash, role)).await;
            report.users += 1;
        }
    }

    if state.orders.is_empty().await {
        let orders = [
            ("Sunglasses", "pending", date(2025, 9, 23)?, 3),
            ("Purse", "delivered", date(2025, 6, 3)?, 1),
            ("Watch", "pending", date(2025, 7, 13)?, 1),
            ("Dress", "shipped", date(2025, 3, 3)?, 4),
            ("Slacks", "delivered", date(2025, 6, 4)?, 3),
            ("Tie", "delivered", date(2025, 8, 28)?, 1),
            ("Belt", "canceled", date(2025, 5, 23)?, 2),
        ];
        for (product, status, order_date, amount) in orders {
            state
                .orders
                .insert(OrderInput::new(product, status, order_date, amount))
                .await?;
            report.orders += 1;
        }
    }

    if !state.orders.has_history().await {
        let history = [
            (5, "shipped", date(2025, 9, 24)?, "Rob"),
            (5, "delivered", date(2025, 9, 28)?, "Rob"),
            (7, "cancelled", date(2025, 9, 24)?, "Susan"),
        ];
        for (order_id, status, changed_at, changed_by) in history {
            state
                .orders
                .append_history(order_id, NewOrderHistory::new(status, changed_at, changed_by))
                .await?;
            report.history += 1;
        }
    }

    Ok(report)
}
