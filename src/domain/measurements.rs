use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category tab the measurement form is scoped to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MeasurementCategory {
    #[default]
    Top,
    Bottom,
    FullBody,
}

impl MeasurementCategory {
    /// Canonical field keys shown on this tab, in display order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            MeasurementCategory::Top => &[
                "chest",
                "waist",
                "shoulder",
                "sleeve_length",
                "neck",
                "shirt_length",
            ],
            MeasurementCategory::Bottom => &["waist", "hip", "inseam", "outseam", "thigh", "knee"],
            MeasurementCategory::FullBody => &[
                "height",
                "chest",
                "waist",
                "hip",
                "shoulder",
                "full_length",
            ],
        }
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields().contains(&key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MeasurementCategory::Top => "Top",
            MeasurementCategory::Bottom => "Bottom",
            MeasurementCategory::FullBody => "Full body",
        }
    }
}

impl fmt::Display for MeasurementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MeasurementCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" | "upper" => Ok(MeasurementCategory::Top),
            "bottom" | "lower" => Ok(MeasurementCategory::Bottom),
            "full" | "fullbody" | "full_body" | "full-body" => Ok(MeasurementCategory::FullBody),
            other => Err(format!("unknown measurement category `{other}`")),
        }
    }
}

/// Flat `field -> text` map for one category tab.
///
/// Values are stored exactly as typed; nothing here validates that they are numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MeasurementForm {
    pub category: MeasurementCategory,
    pub values: BTreeMap<String, String>,
}

impl MeasurementForm {
    pub fn new(category: MeasurementCategory) -> Self {
        Self {
            category,
            values: BTreeMap::new(),
        }
    }

    /// Seeds a form from previously captured values, keeping only keys on this tab.
    pub fn from_values(category: MeasurementCategory, values: &BTreeMap<String, String>) -> Self {
        let values = values
            .iter()
            .filter(|(key, _)| category.has_field(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self { category, values }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parses a value for display; free text yields `None`.
    pub fn numeric(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|raw| raw.trim().parse::<f64>().ok())
    }

    /// Switches tab, keeping values for keys the new category shares.
    pub fn switch_category(&mut self, category: MeasurementCategory) {
        if self.category == category {
            return;
        }
        self.values.retain(|key, _| category.has_field(key));
        self.category = category;
    }

    /// Canonical fields of the current tab that have no value yet.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.category
            .fields()
            .iter()
            .copied()
            .filter(|key| self.get(key).map_or(true, |v| v.trim().is_empty()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> BTreeMap<String, String> {
        self.values
    }
}
