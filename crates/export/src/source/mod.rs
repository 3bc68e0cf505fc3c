//! Catalog source boundary.
//!
//! The export never talks to a catalog store directly: candidate ids,
//! entities and their components all come through [`CatalogSource`].

mod in_memory;

pub use in_memory::{CandidateIndex, CatalogSnapshot, InMemoryCatalog};

use std::sync::Arc;

use discover_catalog::{CatalogItem, EntityKind, ImageAsset, InventoryInformation, Storefront};
use discover_core::{FriendlyId, ImageId, InventoryInformationId, ParentRef};

/// Catalog source abstraction (external index + entity store).
///
/// `Ok(None)` means "does not exist"; `Err` is an infrastructure failure
/// that aborts the run.
pub trait CatalogSource: Send + Sync {
    /// Candidate ids of `kind`, in enumeration order.
    fn list_ids(&self, kind: EntityKind) -> Result<Vec<FriendlyId>, SourceError>;

    /// Fetch an entity of `kind`. An entity of another kind is `None`.
    fn find(&self, kind: EntityKind, id: &FriendlyId) -> Result<Option<CatalogItem>, SourceError>;

    /// Fetch whatever entity a direct-parent reference points at.
    fn resolve_parent(&self, parent: &ParentRef) -> Result<Option<CatalogItem>, SourceError>;

    fn find_inventory(
        &self,
        id: &InventoryInformationId,
    ) -> Result<Option<InventoryInformation>, SourceError>;

    fn find_image(&self, id: &ImageId) -> Result<Option<ImageAsset>, SourceError>;

    fn find_storefront(&self, name: &str) -> Result<Option<Storefront>, SourceError>;
}

/// Catalog source error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("malformed catalog data: {0}")]
    Malformed(String),
}

impl<S> CatalogSource for Arc<S>
where
    S: CatalogSource + ?Sized,
{
    fn list_ids(&self, kind: EntityKind) -> Result<Vec<FriendlyId>, SourceError> {
        (**self).list_ids(kind)
    }

    fn find(&self, kind: EntityKind, id: &FriendlyId) -> Result<Option<CatalogItem>, SourceError> {
        (**self).find(kind, id)
    }

    fn resolve_parent(&self, parent: &ParentRef) -> Result<Option<CatalogItem>, SourceError> {
        (**self).resolve_parent(parent)
    }

    fn find_inventory(
        &self,
        id: &InventoryInformationId,
    ) -> Result<Option<InventoryInformation>, SourceError> {
        (**self).find_inventory(id)
    }

    fn find_image(&self, id: &ImageId) -> Result<Option<ImageAsset>, SourceError> {
        (**self).find_image(id)
    }

    fn find_storefront(&self, name: &str) -> Result<Option<Storefront>, SourceError> {
        (**self).find_storefront(name)
    }
}
