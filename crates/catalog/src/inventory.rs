//! Inventory associations and the records they point at.

use discover_core::InventoryInformationId;
use serde::{Deserialize, Serialize};

/// Links an item (or variation) to its inventory record in one inventory set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryAssociation {
    pub inventory_set: String,
    pub inventory_information: InventoryInformationId,
}

impl InventoryAssociation {
    /// Association for `inventory_set` (case-insensitive), if the item has one.
    pub fn for_set<'a>(
        associations: &'a [InventoryAssociation],
        inventory_set: &str,
    ) -> Option<&'a InventoryAssociation> {
        associations
            .iter()
            .find(|a| a.inventory_set.eq_ignore_ascii_case(inventory_set))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryInformation {
    pub id: InventoryInformationId,
    pub quantity: i64,
}
