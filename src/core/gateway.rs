//! Seam between the wizard's submit action and whatever creates orders.

use crate::domain::BookingSummary;
use crate::errors::Result;

/// Identifier handed to `OrderDetail` when no real order is created.
pub const PLACEHOLDER_ORDER_ID: &str = "order-placeholder";

/// Receives a submitted booking and returns the id of the resulting order.
pub trait OrderGateway {
    fn submit(&self, summary: &BookingSummary) -> Result<String>;
}

/// Accepts every submission without creating anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderGateway;

impl OrderGateway for PlaceholderGateway {
    fn submit(&self, summary: &BookingSummary) -> Result<String> {
        tracing::info!(
            service = %summary.service_id,
            tailor = %summary.tailor_id,
            "booking submitted without a backend, using placeholder order"
        );
        Ok(PLACEHOLDER_ORDER_ID.to_string())
    }
}
