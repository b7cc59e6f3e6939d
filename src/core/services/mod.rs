pub mod draft_service;
pub mod order_service;
pub mod pricing_service;

pub use draft_service::{DraftService, DraftUpdate};
pub use order_service::OrderService;
pub use pricing_service::PricingService;
