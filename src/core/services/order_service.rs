//! Order creation and lifecycle management over an [`OrderStore`].

use chrono::Utc;
use uuid::Uuid;

use crate::core::gateway::OrderGateway;
use crate::domain::{BookingSummary, Order, OrderStatus, OrderTimeline};
use crate::errors::Result;
use crate::storage::OrderStore;

pub struct OrderService {
    store: Box<dyn OrderStore>,
}

impl OrderService {
    pub fn new(store: Box<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Creates a pending order from a submitted booking and stores it.
    pub fn create_from_summary(&self, summary: BookingSummary) -> Result<Order> {
        let order = Order::new(summary, Utc::now());
        self.store.save(&order)?;
        tracing::info!(
            order_id = %order.id,
            tailor = %order.tailor_id,
            total = order.total_price,
            "order created"
        );
        Ok(order)
    }

    pub fn get(&self, id: Uuid) -> Result<Order> {
        self.store.load(id)
    }

    pub fn list(&self) -> Result<Vec<Order>> {
        self.store.list()
    }

    pub fn list_for_tailor(&self, tailor_id: &str) -> Result<Vec<Order>> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .filter(|order| order.tailor_id == tailor_id)
            .collect())
    }

    /// Moves the order to `next`, rejecting anything but the adjacent lifecycle step.
    pub fn advance(&self, id: Uuid, next: OrderStatus) -> Result<Order> {
        let mut order = self.store.load(id)?;
        let previous = order.status;
        if let Err(err) = order.transition(next, Utc::now()) {
            tracing::warn!(order_id = %id, from = %previous, to = %next, "rejected status change");
            return Err(err);
        }
        self.store.save(&order)?;
        tracing::info!(order_id = %id, from = %previous, to = %next, "order status changed");
        Ok(order)
    }

    pub fn cancel(&self, id: Uuid) -> Result<Order> {
        self.advance(id, OrderStatus::Cancelled)
    }

    pub fn timeline(&self, id: Uuid) -> Result<OrderTimeline> {
        Ok(self.store.load(id)?.timeline())
    }
}

impl OrderGateway for OrderService {
    fn submit(&self, summary: &BookingSummary) -> Result<String> {
        let order = self.create_from_summary(summary.clone())?;
        Ok(order.id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookingDraft;
    use crate::errors::BookingError;
    use crate::storage::InMemoryOrderStore;

    fn service() -> OrderService {
        OrderService::new(Box::new(InMemoryOrderStore::new()))
    }

    fn summary(tailor: &str) -> BookingSummary {
        let mut draft = BookingDraft::new(150.0);
        draft.select_fabric("silk", 85.0);
        BookingSummary::from_draft(&draft, "svc-1", tailor)
    }

    #[test]
    fn created_order_starts_pending_with_draft_total() {
        let service = service();
        let order = service.create_from_summary(summary("t-1")).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_price, 235.0);
        assert_eq!(service.get(order.id).unwrap().id, order.id);
    }

    #[test]
    fn advance_persists_new_status() {
        let service = service();
        let order = service.create_from_summary(summary("t-1")).unwrap();
        service.advance(order.id, OrderStatus::Confirmed).unwrap();
        let stored = service.get(order.id).unwrap();
        assert_eq!(stored.status, OrderStatus::Confirmed);
        assert_eq!(stored.history.len(), 2);
    }

    #[test]
    fn cancel_after_work_started_is_rejected() {
        let service = service();
        let order = service.create_from_summary(summary("t-1")).unwrap();
        service.advance(order.id, OrderStatus::Confirmed).unwrap();
        service.advance(order.id, OrderStatus::InProgress).unwrap();
        let err = service.cancel(order.id).expect_err("cannot cancel in progress");
        assert!(matches!(err, BookingError::InvalidTransition(_)));
        assert_eq!(service.get(order.id).unwrap().status, OrderStatus::InProgress);
    }

    #[test]
    fn list_for_tailor_filters() {
        let service = service();
        service.create_from_summary(summary("t-1")).unwrap();
        service.create_from_summary(summary("t-2")).unwrap();
        service.create_from_summary(summary("t-1")).unwrap();
        assert_eq!(service.list_for_tailor("t-1").unwrap().len(), 2);
        assert_eq!(service.list().unwrap().len(), 3);
    }

    #[test]
    fn unknown_order_is_reported() {
        let service = service();
        let id = Uuid::new_v4();
        assert!(matches!(service.timeline(id), Err(BookingError::OrderNotFound(_))));
    }
}
