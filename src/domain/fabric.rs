use serde::{Deserialize, Serialize};

/// A fabric the tailor can source for the garment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FabricOption {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl FabricOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }

    /// Catalog used when the configuration does not provide one.
    pub fn default_catalog() -> Vec<FabricOption> {
        vec![
            FabricOption::new("cotton", "Premium Cotton", 25.0),
            FabricOption::new("linen", "Irish Linen", 40.0),
            FabricOption::new("silk", "Mulberry Silk", 85.0),
            FabricOption::new("wool", "Merino Wool", 60.0),
        ]
    }

    pub fn find<'a>(catalog: &'a [FabricOption], id: &str) -> Option<&'a FabricOption> {
        catalog.iter().find(|fabric| fabric.id.eq_ignore_ascii_case(id))
    }
}
