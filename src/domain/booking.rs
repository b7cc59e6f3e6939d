use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the garment's fabric is sourced. One variant at a time, so a catalog
/// selection and "bring own fabric" can never both be set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum FabricChoice {
    #[default]
    Undecided,
    Catalog { fabric_id: String, price: f64 },
    BringOwn,
}

/// Form state accumulated across the booking wizard steps.
///
/// Lives for one wizard session and is never persisted. Prices are only ever
/// summed on read, see [`BookingDraft::total_price`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingDraft {
    pub color_preference: String,
    pub design_notes: String,
    pub reference_images: Vec<String>,
    pub fabric: FabricChoice,
    pub appointment_date: String,
    pub appointment_time: String,
    pub urgent_delivery: bool,
    pub urgent_fee: f64,
    pub has_measurements: bool,
    pub measurements: BTreeMap<String, String>,
    pub base_price: f64,
}

impl BookingDraft {
    pub fn new(base_price: f64) -> Self {
        Self {
            color_preference: String::new(),
            design_notes: String::new(),
            reference_images: Vec::new(),
            fabric: FabricChoice::Undecided,
            appointment_date: String::new(),
            appointment_time: String::new(),
            urgent_delivery: false,
            urgent_fee: 0.0,
            has_measurements: false,
            measurements: BTreeMap::new(),
            base_price,
        }
    }

    pub fn selected_fabric_id(&self) -> Option<&str> {
        match &self.fabric {
            FabricChoice::Catalog { fabric_id, .. } => Some(fabric_id),
            _ => None,
        }
    }

    pub fn bring_own_fabric(&self) -> bool {
        matches!(self.fabric, FabricChoice::BringOwn)
    }

    pub fn fabric_price(&self) -> f64 {
        match &self.fabric {
            FabricChoice::Catalog { price, .. } => *price,
            _ => 0.0,
        }
    }

    /// Selecting a catalog fabric replaces any bring-own choice.
    pub fn select_fabric(&mut self, fabric_id: impl Into<String>, price: f64) {
        self.fabric = FabricChoice::Catalog {
            fabric_id: fabric_id.into(),
            price,
        };
    }

    /// Turning bring-own on drops the catalog selection and its price.
    /// Turning it off only clears bring-own; a catalog selection stays.
    pub fn set_bring_own_fabric(&mut self, enabled: bool) {
        if enabled {
            self.fabric = FabricChoice::BringOwn;
        } else if self.bring_own_fabric() {
            self.fabric = FabricChoice::Undecided;
        }
    }

    pub fn set_urgent_delivery(&mut self, enabled: bool, fee: f64) {
        self.urgent_delivery = enabled;
        self.urgent_fee = if enabled { fee } else { 0.0 };
    }

    pub fn set_measurements(&mut self, values: BTreeMap<String, String>) {
        self.has_measurements = true;
        self.measurements = values;
    }

    pub fn total_price(&self) -> f64 {
        self.base_price + self.fabric_price() + self.urgent_fee
    }

    pub fn price_breakdown(&self) -> PriceBreakdown {
        PriceBreakdown {
            base: self.base_price,
            fabric: self.fabric_price(),
            urgent: self.urgent_fee,
            total: self.total_price(),
        }
    }
}

/// The three price components and their sum, as shown on the review step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceBreakdown {
    pub base: f64,
    pub fabric: f64,
    pub urgent: f64,
    pub total: f64,
}

/// Read-only projection of a draft handed to the review step and to order creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingSummary {
    pub service_id: String,
    pub tailor_id: String,
    pub color_preference: String,
    pub design_notes: String,
    pub reference_images: Vec<String>,
    pub fabric: FabricChoice,
    pub appointment_date: String,
    pub appointment_time: String,
    pub urgent_delivery: bool,
    pub measurements: BTreeMap<String, String>,
    pub prices: PriceBreakdown,
}

impl BookingSummary {
    pub fn from_draft(
        draft: &BookingDraft,
        service_id: impl Into<String>,
        tailor_id: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            tailor_id: tailor_id.into(),
            color_preference: draft.color_preference.clone(),
            design_notes: draft.design_notes.clone(),
            reference_images: draft.reference_images.clone(),
            fabric: draft.fabric.clone(),
            appointment_date: draft.appointment_date.clone(),
            appointment_time: draft.appointment_time.clone(),
            urgent_delivery: draft.urgent_delivery,
            measurements: draft.measurements.clone(),
            prices: draft.price_breakdown(),
        }
    }
}
