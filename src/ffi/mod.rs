//! Foreign Function Interface (FFI) surface.
//!
//! Exposes the booking wizard to the mobile shell (Swift/Kotlin) through a
//! stable C ABI. A session is an opaque [`WizardHandle`] owned by the caller
//! and released with [`tb_wizard_free`]. Strings returned to the caller are
//! released with [`tb_string_free`].

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_double, c_int};
use std::path::PathBuf;
use std::ptr;
use std::sync::OnceLock;

use crate::config::{Config, ConfigManager};
use crate::core::{BookingWizard, PlaceholderGateway, Transition, WizardPhase};
use crate::errors::BookingError;

/// Semantic version of the Rust core (mirrors `Cargo.toml`).
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Semantic version of the FFI surface. Bumps when ABI/contract changes.
pub const FFI_VERSION: &str = "0.1.0";

/// Status codes returned by every fallible FFI call.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiStatus {
    Ok = 0,
    Validation = 1,
    Persistence = 2,
    State = 3,
    NullPointer = 4,
}

impl From<FfiStatus> for i32 {
    fn from(value: FfiStatus) -> Self {
        value as i32
    }
}

/// Transition kinds written to the `out_transition` parameter.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiTransition {
    Advanced = 0,
    Retreated = 1,
    OpenMeasurements = 2,
    Submitted = 3,
    Exit = 4,
}

impl From<&Transition> for FfiTransition {
    fn from(value: &Transition) -> Self {
        match value {
            Transition::Advanced(_) => FfiTransition::Advanced,
            Transition::Retreated(_) => FfiTransition::Retreated,
            Transition::OpenMeasurements(_) => FfiTransition::OpenMeasurements,
            Transition::Submitted(_) => FfiTransition::Submitted,
            Transition::Exit => FfiTransition::Exit,
        }
    }
}

pub fn classify_error(err: &BookingError) -> FfiStatus {
    match err {
        BookingError::InvalidInput(_) | BookingError::ConfigError(_) => FfiStatus::Validation,
        BookingError::InvalidTransition(_)
        | BookingError::WizardFinished
        | BookingError::NotInSubFlow => FfiStatus::State,
        BookingError::StorageError(_) | BookingError::OrderNotFound(_) => FfiStatus::Persistence,
    }
}

/// Opaque wizard session handed across the boundary.
pub struct WizardHandle {
    wizard: BookingWizard,
    gateway: PlaceholderGateway,
}

/// Returns the core (Rust) semantic version as a C string.
#[no_mangle]
pub extern "C" fn ffi_core_version() -> *const c_char {
    static CORE: OnceLock<CString> = OnceLock::new();
    CORE.get_or_init(|| CString::new(CORE_VERSION).unwrap_or_default())
        .as_ptr()
}

/// Returns the FFI interface semantic version as a C string.
#[no_mangle]
pub extern "C" fn ffi_version() -> *const c_char {
    static FFI: OnceLock<CString> = OnceLock::new();
    FFI.get_or_init(|| CString::new(FFI_VERSION).unwrap_or_default())
        .as_ptr()
}

/// Starts a wizard session for the given service and tailor, configured from
/// the default app home (`TAILOR_BOOKING_HOME` or `~/.tailor_booking`).
///
/// Returns null when either argument is null or not UTF-8.
///
/// # Safety
/// `service_id` and `tailor_id` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn tb_wizard_new(
    service_id: *const c_char,
    tailor_id: *const c_char,
) -> *mut WizardHandle {
    let Ok((service_id, tailor_id)) = read_pair(service_id, tailor_id) else {
        return ptr::null_mut();
    };
    let config = load_config(ConfigManager::new());
    new_session(service_id, tailor_id, &config)
}

/// Same as [`tb_wizard_new`], reading `config.json` from the `home` directory
/// the host app owns instead of the default app home.
///
/// Returns null when any argument is null or not UTF-8.
///
/// # Safety
/// `home`, `service_id` and `tailor_id` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn tb_wizard_new_in(
    home: *const c_char,
    service_id: *const c_char,
    tailor_id: *const c_char,
) -> *mut WizardHandle {
    let (Ok(home), Ok((service_id, tailor_id))) =
        (read_str(home), read_pair(service_id, tailor_id))
    else {
        return ptr::null_mut();
    };
    let config = load_config(ConfigManager::with_base_dir(PathBuf::from(home)));
    new_session(service_id, tailor_id, &config)
}

/// # Safety
/// `handle` must be null or a pointer returned by [`tb_wizard_new`] that was not freed yet.
#[no_mangle]
pub unsafe extern "C" fn tb_wizard_free(handle: *mut WizardHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// # Safety
/// `handle` must come from [`tb_wizard_new`]; `out_transition` may be null.
#[no_mangle]
pub unsafe extern "C" fn tb_wizard_next(
    handle: *mut WizardHandle,
    out_transition: *mut c_int,
) -> c_int {
    let Some(session) = handle.as_mut() else {
        return FfiStatus::NullPointer.into();
    };
    let result = session.wizard.next(&session.gateway);
    report_transition(result, out_transition)
}

/// # Safety
/// `handle` must come from [`tb_wizard_new`]; `out_transition` may be null.
#[no_mangle]
pub unsafe extern "C" fn tb_wizard_back(
    handle: *mut WizardHandle,
    out_transition: *mut c_int,
) -> c_int {
    let Some(session) = handle.as_mut() else {
        return FfiStatus::NullPointer.into();
    };
    let result = session.wizard.back();
    report_transition(result, out_transition)
}

/// Replaces one draft field by key, see `DraftService::update_field`.
///
/// A null argument yields `NullPointer`; text that is not UTF-8 yields `Validation`.
///
/// # Safety
/// `handle` must come from [`tb_wizard_new`]; `key` and `value` must be valid C strings.
#[no_mangle]
pub unsafe extern "C" fn tb_wizard_update_field(
    handle: *mut WizardHandle,
    key: *const c_char,
    value: *const c_char,
) -> c_int {
    let Some(session) = handle.as_mut() else {
        return FfiStatus::NullPointer.into();
    };
    let (key, value) = match read_pair(key, value) {
        Ok(pair) => pair,
        Err(status) => return status.into(),
    };
    status_of(session.wizard.update_field(&key, &value))
}

/// # Safety
/// `handle` must come from [`tb_wizard_new`]; `key` and `value` must be valid C strings.
#[no_mangle]
pub unsafe extern "C" fn tb_wizard_set_measurement(
    handle: *mut WizardHandle,
    key: *const c_char,
    value: *const c_char,
) -> c_int {
    let Some(session) = handle.as_mut() else {
        return FfiStatus::NullPointer.into();
    };
    let (key, value) = match read_pair(key, value) {
        Ok(pair) => pair,
        Err(status) => return status.into(),
    };
    status_of(session.wizard.set_measurement(&key, &value))
}

/// # Safety
/// `handle` must come from [`tb_wizard_new`].
#[no_mangle]
pub unsafe extern "C" fn tb_wizard_complete_measurements(handle: *mut WizardHandle) -> c_int {
    let Some(session) = handle.as_mut() else {
        return FfiStatus::NullPointer.into();
    };
    status_of(session.wizard.complete_measurements().map(|_| ()))
}

/// Zero-based step index, or -1 while capturing measurements, after exit or
/// submission, and for a null handle.
///
/// # Safety
/// `handle` must be null or come from [`tb_wizard_new`].
#[no_mangle]
pub unsafe extern "C" fn tb_wizard_step_index(handle: *const WizardHandle) -> c_int {
    handle
        .as_ref()
        .and_then(|session| session.wizard.step_index())
        .map_or(-1, |index| index as c_int)
}

/// Current total price; NaN for a null handle.
///
/// # Safety
/// `handle` must be null or come from [`tb_wizard_new`].
#[no_mangle]
pub unsafe extern "C" fn tb_wizard_total_price(handle: *const WizardHandle) -> c_double {
    handle
        .as_ref()
        .map_or(f64::NAN, |session| session.wizard.draft().total_price())
}

/// JSON of the review summary. Free with [`tb_string_free`].
///
/// # Safety
/// `handle` must be null or come from [`tb_wizard_new`].
#[no_mangle]
pub unsafe extern "C" fn tb_wizard_review_json(handle: *const WizardHandle) -> *mut c_char {
    let Some(session) = handle.as_ref() else {
        return ptr::null_mut();
    };
    match serde_json::to_string(&session.wizard.review()) {
        Ok(json) => into_c_string(json),
        Err(err) => {
            tracing::warn!(error = %err, "failed to encode review summary");
            ptr::null_mut()
        }
    }
}

/// Order id produced by submission, or null before submitting. Free with [`tb_string_free`].
///
/// # Safety
/// `handle` must be null or come from [`tb_wizard_new`].
#[no_mangle]
pub unsafe extern "C" fn tb_last_order_id(handle: *const WizardHandle) -> *mut c_char {
    match handle.as_ref().map(|session| session.wizard.phase()) {
        Some(WizardPhase::Submitted { order_id }) => into_c_string(order_id.clone()),
        _ => ptr::null_mut(),
    }
}

/// # Safety
/// `value` must be null or a string returned by this library that was not freed yet.
#[no_mangle]
pub unsafe extern "C" fn tb_string_free(value: *mut c_char) {
    if !value.is_null() {
        drop(CString::from_raw(value));
    }
}

fn new_session(service_id: String, tailor_id: String, config: &Config) -> *mut WizardHandle {
    let handle = WizardHandle {
        wizard: BookingWizard::new(service_id, tailor_id, config),
        gateway: PlaceholderGateway,
    };
    Box::into_raw(Box::new(handle))
}

fn load_config(manager: crate::errors::Result<ConfigManager>) -> Config {
    manager
        .and_then(|manager| manager.load())
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default configuration");
            Config::default()
        })
}

unsafe fn read_str(value: *const c_char) -> Result<String, FfiStatus> {
    if value.is_null() {
        return Err(FfiStatus::NullPointer);
    }
    CStr::from_ptr(value)
        .to_str()
        .map(str::to_string)
        .map_err(|_| FfiStatus::Validation)
}

unsafe fn read_pair(
    first: *const c_char,
    second: *const c_char,
) -> Result<(String, String), FfiStatus> {
    Ok((read_str(first)?, read_str(second)?))
}

fn into_c_string(value: String) -> *mut c_char {
    CString::new(value).map_or(ptr::null_mut(), CString::into_raw)
}

fn status_of(result: crate::errors::Result<()>) -> c_int {
    match result {
        Ok(()) => FfiStatus::Ok.into(),
        Err(err) => {
            tracing::warn!(error = %err, "ffi call failed");
            classify_error(&err).into()
        }
    }
}

unsafe fn report_transition(
    result: crate::errors::Result<Transition>,
    out_transition: *mut c_int,
) -> c_int {
    match result {
        Ok(transition) => {
            if let Some(out) = out_transition.as_mut() {
                *out = FfiTransition::from(&transition) as c_int;
            }
            FfiStatus::Ok.into()
        }
        Err(err) => status_of(Err(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FabricOption;
    use tempfile::TempDir;

    fn c(value: &str) -> CString {
        CString::new(value).unwrap()
    }

    fn session_in(home: &TempDir) -> *mut WizardHandle {
        let home = c(home.path().to_str().unwrap());
        let (svc, tailor) = (c("svc"), c("tailor"));
        unsafe { tb_wizard_new_in(home.as_ptr(), svc.as_ptr(), tailor.as_ptr()) }
    }

    #[test]
    fn exposes_versions() {
        assert!(!ffi_core_version().is_null());
        assert!(!ffi_version().is_null());
    }

    #[test]
    fn classifies_errors() {
        let err = BookingError::InvalidInput("bad".into());
        assert_eq!(classify_error(&err), FfiStatus::Validation);
        assert_eq!(classify_error(&BookingError::WizardFinished), FfiStatus::State);
    }

    #[test]
    fn null_arguments_are_rejected() {
        unsafe {
            assert!(tb_wizard_new(ptr::null(), ptr::null()).is_null());
            assert_eq!(tb_wizard_next(ptr::null_mut(), ptr::null_mut()), FfiStatus::NullPointer as i32);
            assert_eq!(tb_wizard_step_index(ptr::null()), -1);
            assert!(tb_wizard_total_price(ptr::null()).is_nan());
        }
    }

    #[test]
    fn session_reads_catalog_from_given_home() {
        let home = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(home.path().to_path_buf()).unwrap();
        let config = Config {
            fabrics: vec![FabricOption::new("tweed", "Harris Tweed", 70.0)],
            ..Config::default()
        };
        manager.save(&config).unwrap();

        unsafe {
            let handle = session_in(&home);
            let status = tb_wizard_update_field(handle, c("fabric").as_ptr(), c("cotton").as_ptr());
            assert_eq!(status, FfiStatus::Validation as i32);
            let status = tb_wizard_update_field(handle, c("fabric").as_ptr(), c("tweed").as_ptr());
            assert_eq!(status, FfiStatus::Ok as i32);
            assert_eq!(tb_wizard_total_price(handle), config.base_price + 70.0);
            tb_wizard_free(handle);
        }
    }

    #[test]
    fn invalid_utf8_is_a_validation_error() {
        let home = TempDir::new().unwrap();
        let garbled = CString::new(vec![0xff, 0xfe, 0x41]).unwrap();
        unsafe {
            let handle = session_in(&home);
            assert_eq!(
                tb_wizard_update_field(handle, c("color").as_ptr(), garbled.as_ptr()),
                FfiStatus::Validation as i32
            );
            assert_eq!(
                tb_wizard_set_measurement(handle, garbled.as_ptr(), c("90").as_ptr()),
                FfiStatus::Validation as i32
            );
            assert_eq!(
                tb_wizard_update_field(handle, ptr::null(), c("ivory").as_ptr()),
                FfiStatus::NullPointer as i32
            );
            tb_wizard_free(handle);
        }
        let (svc, tailor) = (c("svc"), c("tailor"));
        unsafe {
            assert!(tb_wizard_new_in(ptr::null(), svc.as_ptr(), tailor.as_ptr()).is_null());
            assert!(tb_wizard_new(garbled.as_ptr(), tailor.as_ptr()).is_null());
        }
    }

    #[test]
    fn fabric_exclusivity_holds_through_ffi() {
        let home = TempDir::new().unwrap();
        unsafe {
            let handle = session_in(&home);
            assert!(!handle.is_null());
            let base = tb_wizard_total_price(handle);

            let status = tb_wizard_update_field(handle, c("fabric").as_ptr(), c("cotton").as_ptr());
            assert_eq!(status, FfiStatus::Ok as i32);
            let with_fabric = tb_wizard_total_price(handle);
            assert!(with_fabric > base);

            tb_wizard_update_field(handle, c("bring_own_fabric").as_ptr(), c("on").as_ptr());
            assert_eq!(tb_wizard_total_price(handle), base);
            let session = &*handle;
            assert!(session.wizard.draft().selected_fabric_id().is_none());

            tb_wizard_free(handle);
        }
    }

    #[test]
    fn full_session_reaches_order_detail() {
        let home = TempDir::new().unwrap();
        unsafe {
            let handle = session_in(&home);
            let mut transition: c_int = -1;
            for expected in 1..=3 {
                assert_eq!(tb_wizard_next(handle, &mut transition), 0);
                assert_eq!(tb_wizard_step_index(handle), expected);
            }
            assert_eq!(tb_wizard_next(handle, &mut transition), 0);
            assert_eq!(transition, FfiTransition::OpenMeasurements as c_int);
            assert_eq!(tb_wizard_step_index(handle), -1);

            let status = tb_wizard_set_measurement(handle, c("chest").as_ptr(), c("100").as_ptr());
            assert_eq!(status, 0);
            assert_eq!(tb_wizard_complete_measurements(handle), 0);
            assert_eq!(tb_wizard_step_index(handle), 4);

            assert!(tb_last_order_id(handle).is_null());
            assert_eq!(tb_wizard_next(handle, &mut transition), 0);
            assert_eq!(transition, FfiTransition::Submitted as c_int);

            let order_id = tb_last_order_id(handle);
            assert!(!order_id.is_null());
            tb_string_free(order_id);

            let review = tb_wizard_review_json(handle);
            let json = CStr::from_ptr(review).to_str().unwrap().to_string();
            assert!(json.contains("\"chest\":\"100\""));
            tb_string_free(review);

            assert_eq!(tb_wizard_back(handle, &mut transition), FfiStatus::State as i32);
            tb_wizard_free(handle);
        }
    }
}
