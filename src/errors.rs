use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Error type shared by the wizard, the order services and the storage layer.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Booking wizard already finished")]
    WizardFinished,
    #[error("Measurements sub-flow is not open")]
    NotInSubFlow,
    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, BookingError>;

impl From<std::io::Error> for BookingError {
    fn from(err: std::io::Error) -> Self {
        BookingError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::StorageError(err.to_string())
    }
}
