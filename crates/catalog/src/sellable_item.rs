//! Sellable items (products).

use discover_core::{Entity, FriendlyId, ImageId, ParentRef};
use serde::{Deserialize, Serialize};

use crate::inventory::InventoryAssociation;
use crate::pricing::Money;
use crate::variation::Variation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellableItem {
    pub id: FriendlyId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub is_bundle: bool,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "crate::parents::deserialize")]
    pub parents: Vec<ParentRef>,
    #[serde(default)]
    pub list_prices: Vec<Money>,
    #[serde(default)]
    pub inventory: Vec<InventoryAssociation>,
    #[serde(default)]
    pub images: Vec<ImageId>,
    #[serde(default)]
    pub variations: Vec<Variation>,
}

impl SellableItem {
    pub fn new(id: FriendlyId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            description: String::new(),
            published: true,
            is_bundle: false,
            brand: String::new(),
            manufacturer: String::new(),
            tags: Vec::new(),
            parents: Vec::new(),
            list_prices: Vec::new(),
            inventory: Vec::new(),
            images: Vec::new(),
            variations: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<ParentRef>) -> Self {
        self.parents.push(parent.into());
        self
    }

    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variations.push(variation);
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.list_prices.push(price);
        self
    }
}

impl Entity for SellableItem {
    type Id = FriendlyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
