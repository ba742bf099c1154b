//! 주문 저장소.
//!
//! 주문과 주문 이력을 메모리 테이블에 보관합니다. 두 테이블은 하나의 `RwLock`으로
//! 묶여 있어 모든 변경이 단일 임계 구역 안에서 처리됩니다.
//!
//! - 주문 ID와 이력 ID는 1부터 단조 증가하며 재사용되지 않습니다.
//! - 이력은 반드시 존재하는 주문을 참조해야 합니다.
//! - 주문 삭제 시 해당 이력도 함께 삭제됩니다.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracker_core::{
    NewOrderHistory, Order, OrderHistory, OrderInput, TrackerError, TrackerResult,
};

#[derive(Debug)]
struct OrderTable {
    orders: BTreeMap<i32, Order>,
    history: BTreeMap<i32, OrderHistory>,
    next_order_id: i32,
    next_history_id: i32,
}

impl Default for OrderTable {
    fn default() -> Self {
        Self {
            orders: BTreeMap::new(),
            history: BTreeMap::new(),
            next_order_id: 1,
            next_history_id: 1,
        }
    }
}

impl OrderTable {
    fn history_of(&self, order_id: i32) -> Vec<OrderHistory> {
        self.history
            .values()
            .filter(|h| h.order_id == order_id)
            .cloned()
            .collect()
    }

    fn push_history(&mut self, order_id: i32, entry: NewOrderHistory) -> TrackerResult<OrderHistory> {
        if !self.orders.contains_key(&order_id) {
            return Err(TrackerError::NotFound(format!("order {}", order_id)));
        }

        let id = self.next_history_id;
        self.next_history_id = id
            .checked_add(1)
            .ok_or_else(|| TrackerError::Internal("history id space exhausted".to_string()))?;

        let record = OrderHistory {
            id,
            order_id,
            status: entry.status,
            changed_at: entry.changed_at,
            changed_by: entry.changed_by,
        };
        self.history.insert(id, record.clone());
        Ok(record)
    }
}

/// 메모리 기반 주문 저장소.
#[derive(Debug, Default)]
pub struct OrderRepository {
    table: RwLock<OrderTable>,
}

impl OrderRepository {
    /// 빈 저장소 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 모든 주문을 ID 순으로, 각 주문의 이력과 함께 반환합니다.
    pub async fn list_with_history(&self) -> Vec<Order> {
        let table = self.table.read().await;
        table
            .orders
            .values()
            .map(|order| order.clone().with_history(table.history_of(order.id)))
            .collect()
    }

    /// ID로 주문 조회 (이력 포함).
    pub async fn find_with_history(&self, id: i32) -> Option<Order> {
        let table = self.table.read().await;
        table
            .orders
            .get(&id)
            .map(|order| order.clone().with_history(table.history_of(id)))
    }

    /// 주문 ID의 이력을 ID 순으로 반환합니다.
    ///
    /// 주문이 없으면 빈 목록입니다.
    pub async fn history_for(&self, order_id: i32) -> Vec<OrderHistory> {
        self.table.read().await.history_of(order_id)
    }

    /// 새 주문 생성. 다음 ID를 부여하며 이력은 비어 있습니다.
    pub async fn insert(&self, input: OrderInput) -> TrackerResult<Order> {
        let mut table = self.table.write().await;

        let id = table.next_order_id;
        table.next_order_id = id
            .checked_add(1)
            .ok_or_else(|| TrackerError::Internal("order id space exhausted".to_string()))?;

        let order = Order::from_input(id, input);
        table.orders.insert(id, order.clone());
        Ok(order)
    }

    /// 주문 전체 교체.
    ///
    /// 상태가 바뀌면 `changed_by`/`today`로 이력 항목을 추가합니다.
    /// 주문이 없으면 `TrackerError::NotFound`.
    pub async fn replace(
        &self,
        id: i32,
        input: OrderInput,
        changed_by: &str,
        today: NaiveDate,
    ) -> TrackerResult<Order> {
        let mut table = self.table.write().await;

        let order = table
            .orders
            .get_mut(&id)
            .ok_or_else(|| TrackerError::NotFound(format!("order {}", id)))?;

        let status_changed = order.apply(input);
        let new_status = order.status.clone();

        if status_changed {
            table.push_history(id, NewOrderHistory::new(new_status, today, changed_by))?;
        }

        let updated = table
            .orders
            .get(&id)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(format!("order {}", id)))?;
        Ok(updated.with_history(table.history_of(id)))
    }

    /// 이력 항목 추가.
    ///
    /// 부모 주문이 없으면 `TrackerError::NotFound`.
    pub async fn append_history(
        &self,
        order_id: i32,
        entry: NewOrderHistory,
    ) -> TrackerResult<OrderHistory> {
        self.table.write().await.push_history(order_id, entry)
    }

    /// 주문 삭제. 이력도 함께 삭제되며, 주문이 있었으면 `true`.
    pub async fn delete(&self, id: i32) -> bool {
        let mut table = self.table.write().await;

        if table.orders.remove(&id).is_none() {
            return false;
        }
        table.history.retain(|_, h| h.order_id != id);
        true
    }

    /// 주문 수.
    pub async fn len(&self) -> usize {
        self.table.read().await.orders.len()
    }

    /// 주문이 없는지 확인.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.orders.is_empty()
    }

    /// 이력 항목이 하나라도 있는지 확인.
    pub async fn has_history(&self) -> bool {
        !self.table.read().await.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(product: &str, status: &str) -> OrderInput {
        OrderInput::new(product, status, date(2025, 6, 4), 3)
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = OrderRepository::new();
        assert!(repo.is_empty().await);

        let a = repo.insert(input("Slacks", "pending")).await.unwrap();
        let b = repo.insert(input("Tie", "pending")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.history.is_empty());
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = OrderRepository::new();
        let a = repo.insert(input("Slacks", "pending")).await.unwrap();
        assert!(repo.delete(a.id).await);

        let b = repo.insert(input("Tie", "pending")).await.unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_list_is_ordered_with_history() {
        let repo = OrderRepository::new();
        repo.insert(input("Sunglasses", "pending")).await.unwrap();
        repo.insert(input("Purse", "pending")).await.unwrap();
        repo.append_history(2, NewOrderHistory::new("shipped", date(2025, 9, 24), "Rob"))
            .await
            .unwrap();

        let orders = repo.list_with_history().await;
        assert_eq!(orders.iter().map(|o| o.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(orders[0].history.is_empty());
        assert_eq!(orders[1].history.len(), 1);
        assert_eq!(orders[1].history[0].changed_by, "Rob");
    }

    #[tokio::test]
    async fn test_append_history_requires_existing_order() {
        let repo = OrderRepository::new();

        let err = repo
            .append_history(99, NewOrderHistory::new("shipped", date(2025, 9, 24), "Rob"))
            .await
            .unwrap_err();

        assert!(matches!(err, TrackerError::NotFound(_)));
        assert!(!repo.has_history().await);
    }

    #[tokio::test]
    async fn test_history_for_is_ordered_by_id() {
        let repo = OrderRepository::new();
        repo.insert(input("Slacks", "pending")).await.unwrap();
        repo.append_history(1, NewOrderHistory::new("shipped", date(2025, 9, 24), "Rob"))
            .await
            .unwrap();
        repo.append_history(1, NewOrderHistory::new("delivered", date(2025, 9, 28), "Rob"))
            .await
            .unwrap();

        let history = repo.history_for(1).await;
        assert_eq!(history.len(), 2);
        assert!(history[0].id < history[1].id);
        assert_eq!(history[1].status, "delivered");
        assert!(repo.history_for(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_replace_appends_history_on_status_change() {
        let repo = OrderRepository::new();
        repo.insert(input("Watch", "pending")).await.unwrap();
        let today = date(2025, 10, 1);

        let same = repo
            .replace(1, OrderInput::new("Watch", "pending", date(2025, 7, 13), 2), "admin", today)
            .await
            .unwrap();
        assert_eq!(same.amount, 2);
        assert!(same.history.is_empty());

        let shipped = repo
            .replace(1, OrderInput::new("Watch", "shipped", date(2025, 7, 13), 2), "admin", today)
            .await
            .unwrap();
        assert_eq!(shipped.status, "shipped");
        assert_eq!(shipped.history.len(), 1);
        assert_eq!(shipped.history[0].status, "shipped");
        assert_eq!(shipped.history[0].changed_by, "admin");
        assert_eq!(shipped.history[0].changed_at, today);
    }

    #[tokio::test]
    async fn test_replace_missing_order_is_not_found() {
        let repo = OrderRepository::new();

        let err = repo
            .replace(5, input("Belt", "canceled"), "user", date(2025, 10, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, TrackerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades_history() {
        let repo = OrderRepository::new();
        repo.insert(input("Belt", "pending")).await.unwrap();
        repo.insert(input("Dress", "pending")).await.unwrap();
        repo.append_history(1, NewOrderHistory::new("cancelled", date(2025, 9, 24), "Susan"))
            .await
            .unwrap();
        repo.append_history(2, NewOrderHistory::new("shipped", date(2025, 9, 24), "Rob"))
            .await
            .unwrap();

        assert!(repo.delete(1).await);
        assert!(!repo.delete(1).await);

        assert!(repo.find_with_history(1).await.is_none());
        assert!(repo.history_for(1).await.is_empty());
        assert_eq!(repo.history_for(2).await.len(), 1);
    }
}
