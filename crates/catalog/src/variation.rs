//! Item variations (SKUs).

use std::collections::BTreeMap;

use discover_core::{ImageId, VariationId};
use serde::{Deserialize, Serialize};

use crate::inventory::InventoryAssociation;
use crate::pricing::Money;

/// A SKU-level specialization of a sellable item.
///
/// `properties` is the sparse, open set of distinguishing properties
/// (`Color`, `Size`, ...). The map is ordered by property name, which is the
/// canonical order used for combination keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub id: VariationId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub list_prices: Vec<Money>,
    #[serde(default)]
    pub inventory: Vec<InventoryAssociation>,
    #[serde(default)]
    pub images: Vec<ImageId>,
}

impl Variation {
    pub fn new(id: impl Into<VariationId>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            description: String::new(),
            properties: BTreeMap::new(),
            list_prices: Vec::new(),
            inventory: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Properties with a non-blank value, in property-name order.
    pub fn populated_properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn has_populated_properties(&self) -> bool {
        self.populated_properties().next().is_some()
    }

    /// Populated value of `name`, matched case-insensitively.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.populated_properties()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}
