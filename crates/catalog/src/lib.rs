//! `discover-catalog`: the source catalog model.
//!
//! Catalogs contain categories and sellable items; sellable items carry
//! variations. This crate also hosts the variant consistency check that
//! decides whether an item folds into one feed row or explodes into SKU rows.

pub mod catalog_item;
pub mod category;
pub mod images;
pub mod inventory;
pub mod pricing;
pub mod sellable_item;
pub mod storefront;
pub mod variants;
pub mod variation;

mod parents;

pub use catalog_item::{Catalog, CatalogItem, EntityKind};
pub use category::Category;
pub use images::ImageAsset;
pub use inventory::{InventoryAssociation, InventoryInformation};
pub use pricing::Money;
pub use sellable_item::SellableItem;
pub use storefront::Storefront;
pub use variants::{FoldDecision, Inconsistency, VariantError, check_variants};
pub use variation::Variation;
