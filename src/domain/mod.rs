pub mod booking;
pub mod common;
pub mod fabric;
pub mod measurements;
pub mod order;
pub mod route;

pub use booking::{BookingDraft, BookingSummary, FabricChoice, PriceBreakdown};
pub use common::Displayable;
pub use fabric::FabricOption;
pub use measurements::{MeasurementCategory, MeasurementForm};
pub use order::{Order, OrderStatus, OrderTimeline, StatusChange, TimelineEntry};
pub use route::Route;

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;
