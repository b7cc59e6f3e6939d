use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::booking::BookingSummary;
use crate::domain::common::Displayable;
use crate::errors::{BookingError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    InProgress,
    ReadyForFitting,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Forward lifecycle shown on the order timeline. `Cancelled` sits outside it.
    pub const LIFECYCLE: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::InProgress,
        OrderStatus::ReadyForFitting,
        OrderStatus::Completed,
    ];

    pub fn lifecycle_index(&self) -> Option<usize> {
        Self::LIFECYCLE.iter().position(|status| status == self)
    }

    /// Orders move one lifecycle step at a time; only early orders can be cancelled.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match next {
            OrderStatus::Cancelled => {
                matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
            }
            _ => match (self.lifecycle_index(), next.lifecycle_index()) {
                (Some(from), Some(to)) => to == from + 1,
                _ => false,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::InProgress => "In progress",
            OrderStatus::ReadyForFitting => "Ready for fitting",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = BookingError;

    fn from_str(value: &str) -> Result<Self> {
        let normalized: String = value
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "inprogress" => Ok(OrderStatus::InProgress),
            "readyforfitting" | "fitting" => Ok(OrderStatus::ReadyForFitting),
            "completed" | "done" => Ok(OrderStatus::Completed),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(BookingError::InvalidInput(format!(
                "unknown order status `{}`",
                value.trim()
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub service_id: String,
    pub tailor_id: String,
    pub booking: BookingSummary,
    pub total_price: f64,
    pub status: OrderStatus,
    pub history: Vec<StatusChange>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(booking: BookingSummary, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            service_id: booking.service_id.clone(),
            tailor_id: booking.tailor_id.clone(),
            total_price: booking.prices.total,
            booking,
            status: OrderStatus::Pending,
            history: vec![StatusChange {
                status: OrderStatus::Pending,
                at: created_at,
            }],
            created_at,
        }
    }

    pub fn transition(&mut self, next: OrderStatus, at: DateTime<Utc>) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(BookingError::InvalidTransition(format!(
                "order {} cannot move from {} to {}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        self.history.push(StatusChange { status: next, at });
        Ok(())
    }

    pub fn reached_at(&self, status: OrderStatus) -> Option<DateTime<Utc>> {
        self.history
            .iter()
            .find(|change| change.status == status)
            .map(|change| change.at)
    }

    pub fn timeline(&self) -> OrderTimeline {
        OrderTimeline::for_order(self)
    }
}

impl Displayable for Order {
    fn display_label(&self) -> String {
        format!("order:{} [{}] {:.2}", self.id, self.status, self.total_price)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub status: OrderStatus,
    pub reached: bool,
    pub current: bool,
    pub at: Option<DateTime<Utc>>,
}

/// Order-detail projection of the lifecycle: every forward status in order,
/// plus a trailing `Cancelled` entry when the order was cancelled.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTimeline {
    pub entries: Vec<TimelineEntry>,
}

impl OrderTimeline {
    pub fn for_order(order: &Order) -> Self {
        let cancelled = order.status == OrderStatus::Cancelled;
        let mut entries: Vec<TimelineEntry> = OrderStatus::LIFECYCLE
            .iter()
            .map(|status| {
                let at = order.reached_at(*status);
                TimelineEntry {
                    status: *status,
                    reached: at.is_some(),
                    current: !cancelled && order.status == *status,
                    at,
                }
            })
            .collect();
        if cancelled {
            entries.push(TimelineEntry {
                status: OrderStatus::Cancelled,
                reached: true,
                current: true,
                at: order.reached_at(OrderStatus::Cancelled),
            });
        }
        Self { entries }
    }

    pub fn current(&self) -> Option<&TimelineEntry> {
        self.entries.iter().find(|entry| entry.current)
    }
}
