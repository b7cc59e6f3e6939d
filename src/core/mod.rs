pub mod gateway;
pub mod services;
pub mod wizard;

pub use gateway::{OrderGateway, PlaceholderGateway, PLACEHOLDER_ORDER_ID};
pub use wizard::{BookingWizard, Transition, WizardPhase, WizardStep};
