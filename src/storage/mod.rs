pub mod json_backend;
pub mod memory;

use uuid::Uuid;

use crate::{domain::Order, errors::Result};

/// Abstraction over persistence backends capable of storing orders.
///
/// Stands in for the remote backend the mobile app talks to; drafts never go
/// through a store.
pub trait OrderStore: Send + Sync {
    fn save(&self, order: &Order) -> Result<()>;
    fn load(&self, id: Uuid) -> Result<Order>;
    fn list(&self) -> Result<Vec<Order>>;
}

pub use json_backend::JsonOrderStore;
pub use memory::InMemoryOrderStore;
