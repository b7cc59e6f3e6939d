#![doc(test(attr(deny(warnings))))]

//! Tailor Booking is the domain core behind the marketplace's booking flow:
//! the booking wizard and its draft, price derivation, and the order lifecycle
//! shown on the order detail screen. Hosts drive it through the Rust API, the
//! C ABI in [`ffi`], or the interactive shell in [`cli`].

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ffi;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tailor booking tracing initialized.");
    });
}
