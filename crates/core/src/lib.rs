//! `discover-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the catalog-scoped composite id and the domain error.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{CatalogEntity, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{FriendlyId, ImageId, InventoryInformationId, ParentRef, RunId, VariationId};
pub use value_object::ValueObject;
