use std::{
    fs,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use super::OrderStore;
use crate::{
    domain::Order,
    errors::{BookingError, Result},
    utils::paths::{ensure_dir, write_atomic, PathResolver},
};

const ORDER_EXTENSION: &str = "json";

/// Keeps one pretty-printed JSON file per order under `<base>/orders/`.
#[derive(Clone)]
pub struct JsonOrderStore {
    orders_dir: PathBuf,
}

impl JsonOrderStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        let orders_dir = PathResolver::orders_dir_in(&base);
        ensure_dir(&orders_dir)?;
        Ok(Self { orders_dir })
    }

    pub fn order_path(&self, id: Uuid) -> PathBuf {
        self.orders_dir.join(format!("{id}.{ORDER_EXTENSION}"))
    }

    pub fn orders_dir(&self) -> &Path {
        &self.orders_dir
    }
}

impl OrderStore for JsonOrderStore {
    fn save(&self, order: &Order) -> Result<()> {
        let json = serde_json::to_string_pretty(order)?;
        write_atomic(&self.order_path(order.id), &json)?;
        tracing::debug!(order_id = %order.id, "order written");
        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<Order> {
        let path = self.order_path(id);
        if !path.exists() {
            return Err(BookingError::OrderNotFound(id));
        }
        load_order_from_path(&path)
    }

    fn list(&self) -> Result<Vec<Order>> {
        let mut orders = Vec::new();
        for entry in fs::read_dir(&self.orders_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ORDER_EXTENSION) {
                continue;
            }
            match load_order_from_path(&path) {
                Ok(order) => orders.push(order),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable order file")
                }
            }
        }
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(orders)
    }
}

pub fn load_order_from_path(path: &Path) -> Result<Order> {
    let data = fs::read_to_string(path)?;
    let order: Order = serde_json::from_str(&data)?;
    Ok(order)
}
