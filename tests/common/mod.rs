#![allow(dead_code)]

use std::sync::Mutex;

use once_cell::sync::Lazy;
use tailor_booking::{
    config::Config,
    core::{services::OrderService, BookingWizard},
    storage::JsonOrderStore,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Order service backed by a JSON store in a fresh temp directory.
pub fn json_order_service() -> (OrderService, std::path::PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let store = JsonOrderStore::new(Some(base.clone())).expect("create json order store");
    (OrderService::new(Box::new(store)), base)
}

pub fn wizard() -> BookingWizard {
    BookingWizard::new("bespoke-suit", "tailor-7", &Config::default())
}
