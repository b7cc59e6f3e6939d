use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use super::OrderStore;
use crate::{
    domain::Order,
    errors::{BookingError, Result},
};

/// Process-local store used by tests and by shells that do not persist orders.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: Mutex<HashMap<Uuid, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Order>>> {
        self.orders
            .lock()
            .map_err(|_| BookingError::StorageError("order store lock poisoned".into()))
    }
}

impl OrderStore for InMemoryOrderStore {
    fn save(&self, order: &Order) -> Result<()> {
        self.guard()?.insert(order.id, order.clone());
        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<Order> {
        self.guard()?
            .get(&id)
            .cloned()
            .ok_or(BookingError::OrderNotFound(id))
    }

    fn list(&self) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self.guard()?.values().cloned().collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(orders)
    }
}
