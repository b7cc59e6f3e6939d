//! Single entry point for booking draft mutations.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::domain::{BookingDraft, FabricOption};
use crate::errors::{BookingError, Result};

/// Keys accepted by [`DraftService::update_field`].
pub const DRAFT_FIELDS: [&str; 9] = [
    "color_preference",
    "design_notes",
    "reference_image",
    "fabric",
    "bring_own_fabric",
    "appointment_date",
    "appointment_time",
    "urgent_delivery",
    "has_measurements",
];

/// One replacement of one draft field.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftUpdate {
    ColorPreference(String),
    DesignNotes(String),
    AddReferenceImage(String),
    RemoveReferenceImage(usize),
    SelectFabric(String),
    BringOwnFabric(bool),
    AppointmentDate(String),
    AppointmentTime(String),
    UrgentDelivery(bool),
    HasMeasurements(bool),
    Measurements(BTreeMap<String, String>),
}

/// Applies draft updates with the catalog and fees from configuration.
#[derive(Debug, Clone)]
pub struct DraftService {
    catalog: Vec<FabricOption>,
    urgent_fee: f64,
}

impl DraftService {
    pub fn new(catalog: Vec<FabricOption>, urgent_fee: f64) -> Self {
        Self {
            catalog,
            urgent_fee,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.fabrics.clone(), config.urgent_fee)
    }

    pub fn catalog(&self) -> &[FabricOption] {
        &self.catalog
    }

    pub fn new_draft(&self, base_price: f64) -> BookingDraft {
        BookingDraft::new(base_price)
    }

    /// Replaces one draft field. Text content is stored unvalidated.
    pub fn apply(&self, draft: &mut BookingDraft, update: DraftUpdate) -> Result<()> {
        match update {
            DraftUpdate::ColorPreference(value) => draft.color_preference = value,
            DraftUpdate::DesignNotes(value) => draft.design_notes = value,
            DraftUpdate::AddReferenceImage(uri) => draft.reference_images.push(uri),
            DraftUpdate::RemoveReferenceImage(index) => {
                if index >= draft.reference_images.len() {
                    return Err(BookingError::InvalidInput(format!(
                        "no reference image at position {index}"
                    )));
                }
                draft.reference_images.remove(index);
            }
            DraftUpdate::SelectFabric(id) => {
                let fabric = FabricOption::find(&self.catalog, &id).ok_or_else(|| {
                    BookingError::InvalidInput(format!("unknown fabric `{id}`"))
                })?;
                draft.select_fabric(fabric.id.clone(), fabric.price);
            }
            DraftUpdate::BringOwnFabric(enabled) => draft.set_bring_own_fabric(enabled),
            DraftUpdate::AppointmentDate(value) => draft.appointment_date = value,
            DraftUpdate::AppointmentTime(value) => draft.appointment_time = value,
            DraftUpdate::UrgentDelivery(enabled) => {
                draft.set_urgent_delivery(enabled, self.urgent_fee)
            }
            DraftUpdate::HasMeasurements(value) => draft.has_measurements = value,
            DraftUpdate::Measurements(values) => draft.set_measurements(values),
        }
        tracing::debug!(total = draft.total_price(), "draft updated");
        Ok(())
    }

    /// String-keyed variant of [`DraftService::apply`] used by the FFI and the shell.
    pub fn update_field(&self, draft: &mut BookingDraft, key: &str, value: &str) -> Result<()> {
        let update = Self::parse_update(key, value)?;
        self.apply(draft, update)
    }

    pub fn parse_update(key: &str, value: &str) -> Result<DraftUpdate> {
        let update = match key.trim().to_ascii_lowercase().as_str() {
            "color_preference" | "color" => DraftUpdate::ColorPreference(value.to_string()),
            "design_notes" | "notes" => DraftUpdate::DesignNotes(value.to_string()),
            "reference_image" | "image" => DraftUpdate::AddReferenceImage(value.to_string()),
            "fabric" | "selected_fabric_id" => DraftUpdate::SelectFabric(value.trim().to_string()),
            "bring_own_fabric" => DraftUpdate::BringOwnFabric(parse_flag(key, value)?),
            "appointment_date" | "date" => DraftUpdate::AppointmentDate(value.to_string()),
            "appointment_time" | "time" => DraftUpdate::AppointmentTime(value.to_string()),
            "urgent_delivery" | "urgent" => DraftUpdate::UrgentDelivery(parse_flag(key, value)?),
            "has_measurements" => DraftUpdate::HasMeasurements(parse_flag(key, value)?),
            other => {
                return Err(BookingError::InvalidInput(format!(
                    "unknown draft field `{other}`"
                )))
            }
        };
        Ok(update)
    }
}

pub fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(BookingError::InvalidInput(format!(
            "`{key}` expects on/off, got `{other}`"
        ))),
    }
}
