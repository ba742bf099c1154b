//! 주문 및 주문 이력 타입.
//!
//! 이 모듈은 주문 추적 시스템의 주문 관련 타입을 정의합니다:
//! - `Order` - 주문 엔티티 (이력 포함)
//! - `OrderHistory` - 주문 상태 변경 이력 (추가 전용)
//! - `OrderInput` - 주문 생성/교체 입력
//! - `NewOrderHistory` - 이력 추가 입력
//!
//! JSON 필드명은 camelCase(`orderDate`, `orderId`, `changedAt`, `changedBy`)를 사용하며,
//! 날짜는 `YYYY-MM-DD` 형식입니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 주문 엔티티.
///
/// 이력(`history`)은 주문이 소유하며 독립적인 생명주기를 갖지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// 주문 ID (저장소가 부여)
    pub id: i32,
    /// 상품명
    pub product: String,
    /// 주문 상태 (예: "pending", "shipped", "delivered", "canceled")
    pub status: String,
    /// 주문 일자
    pub order_date: NaiveDate,
    /// 수량
    pub amount: i32,
    /// 상태 변경 이력 (ID 순)
    #[serde(default)]
    pub history: Vec<OrderHistory>,
}

impl Order {
    /// 입력값으로 이력이 없는 새 주문을 생성합니다.
    pub fn from_input(id: i32, input: OrderInput) -> Self {
        Self {
            id,
            product: input.product,
            status: input.status,
            order_date: input.order_date,
            amount: input.amount,
            history: Vec::new(),
        }
    }

    /// 입력값으로 주문 필드를 교체합니다.
    ///
    /// 이력은 건드리지 않습니다. 상태가 바뀌었으면 `true`를 반환합니다.
    pub fn apply(&mut self, input: OrderInput) -> bool {
        let status_changed = self.status != input.status;
        self.product = input.product;
        self.status = input.status;
        self.order_date = input.order_date;
        self.amount = input.amount;
        status_changed
    }

    /// 이력을 붙인 사본을 반환합니다.
    pub fn with_history(mut self, history: Vec<OrderHistory>) -> Self {
        self.history = history;
        self
    }
}

/// 주문 상태 변경 이력.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OrderHistory {
    /// 이력 ID (저장소가 부여)
    pub id: i32,
    /// 소유 주문 ID
    pub order_id: i32,
    /// 변경된 상태
    pub status: String,
    /// 변경 일자
    pub changed_at: NaiveDate,
    /// 변경자
    pub changed_by: String,
}

/// 주문 생성/교체 입력.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub product: String,
    pub status: String,
    pub order_date: NaiveDate,
    pub amount: i32,
}

impl OrderInput {
    /// 새 입력 생성.
    pub fn new(
        product: impl Into<String>,
        status: impl Into<String>,
        order_date: NaiveDate,
        amount: i32,
    ) -> Self {
        Self {
            product: product.into(),
            status: status.into(),
            order_date,
            amount,
        }
    }
}

/// 이력 추가 입력.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderHistory {
    pub status: String,
    pub changed_at: NaiveDate,
    pub changed_by: String,
}

impl NewOrderHistory {
    /// 새 이력 입력 생성.
    pub fn new(
        status: impl Into<String>,
        changed_at: NaiveDate,
        changed_by: impl Into<String>,
    ) -> Self {
        Self {
            status: status.into(),
            changed_at,
            changed_by: changed_by.into(),
        }
    }
}
