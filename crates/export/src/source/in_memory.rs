use std::collections::HashMap;
use std::sync::RwLock;

use discover_catalog::{CatalogItem, EntityKind, ImageAsset, InventoryInformation, Storefront};
use discover_core::{Entity, FriendlyId, ImageId, InventoryInformationId, ParentRef};
use serde::{Deserialize, Serialize};

use super::{CatalogSource, SourceError};

/// Explicit candidate lists. When absent for a kind, every stored entity of
/// that kind is a candidate, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateIndex {
    pub categories: Option<Vec<FriendlyId>>,
    pub sellable_items: Option<Vec<FriendlyId>>,
}

/// Serializable catalog dump an [`InMemoryCatalog`] can be loaded from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
    pub items: Vec<CatalogItem>,
    pub inventory: Vec<InventoryInformation>,
    pub images: Vec<ImageAsset>,
    pub storefronts: Vec<Storefront>,
    pub candidates: CandidateIndex,
}

#[derive(Debug, Default)]
struct Inner {
    items: HashMap<FriendlyId, CatalogItem>,
    order: Vec<FriendlyId>,
    inventory: HashMap<InventoryInformationId, InventoryInformation>,
    images: HashMap<ImageId, ImageAsset>,
    storefronts: HashMap<String, Storefront>,
    candidates: CandidateIndex,
}

/// In-memory catalog source for tests, benches and the CLI.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<Inner>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let catalog = Self::new();
        for item in snapshot.items {
            catalog.insert(item);
        }
        for info in snapshot.inventory {
            catalog.insert_inventory(info);
        }
        for image in snapshot.images {
            catalog.insert_image(image);
        }
        for storefront in snapshot.storefronts {
            catalog.insert_storefront(storefront);
        }
        if let Ok(mut inner) = catalog.inner.write() {
            inner.candidates = snapshot.candidates;
        }
        catalog
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let snapshot: CatalogSnapshot =
            serde_json::from_str(json).map_err(|e| SourceError::Malformed(e.to_string()))?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Insert or replace an entity. Replacing keeps its enumeration position.
    pub fn insert(&self, item: impl Into<CatalogItem>) {
        let item = item.into();
        if let Ok(mut inner) = self.inner.write() {
            let id = item.id().clone();
            if inner.items.insert(id.clone(), item).is_none() {
                inner.order.push(id);
            }
        }
    }

    pub fn insert_inventory(&self, info: InventoryInformation) {
        if let Ok(mut inner) = self.inner.write() {
            inner.inventory.insert(info.id.clone(), info);
        }
    }

    pub fn insert_image(&self, image: ImageAsset) {
        if let Ok(mut inner) = self.inner.write() {
            inner.images.insert(image.id.clone(), image);
        }
    }

    pub fn insert_storefront(&self, storefront: Storefront) {
        if let Ok(mut inner) = self.inner.write() {
            inner.storefronts.insert(storefront.name.clone(), storefront);
        }
    }

    /// Override the candidate list for `kind` (ids need not exist).
    pub fn set_candidates(&self, kind: EntityKind, ids: Vec<FriendlyId>) {
        if let Ok(mut inner) = self.inner.write() {
            match kind {
                EntityKind::Category => inner.candidates.categories = Some(ids),
                EntityKind::SellableItem => inner.candidates.sellable_items = Some(ids),
                EntityKind::Catalog => {}
            }
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, SourceError> {
        self.inner
            .read()
            .map_err(|_| SourceError::Unavailable("in-memory catalog lock poisoned".to_string()))
    }
}

impl CatalogSource for InMemoryCatalog {
    fn list_ids(&self, kind: EntityKind) -> Result<Vec<FriendlyId>, SourceError> {
        let inner = self.read()?;

        let explicit = match kind {
            EntityKind::Category => inner.candidates.categories.as_ref(),
            EntityKind::SellableItem => inner.candidates.sellable_items.as_ref(),
            EntityKind::Catalog => None,
        };
        if let Some(ids) = explicit {
            return Ok(ids.clone());
        }

        Ok(inner
            .order
            .iter()
            .filter(|id| inner.items.get(*id).is_some_and(|item| item.kind() == kind))
            .cloned()
            .collect())
    }

    fn find(&self, kind: EntityKind, id: &FriendlyId) -> Result<Option<CatalogItem>, SourceError> {
        let inner = self.read()?;
        Ok(inner
            .items
            .get(id)
            .filter(|item| item.kind() == kind)
            .cloned())
    }

    fn resolve_parent(&self, parent: &ParentRef) -> Result<Option<CatalogItem>, SourceError> {
        // References that are not composite ids point nowhere in this store.
        let Ok(id) = parent.as_str().parse::<FriendlyId>() else {
            return Ok(None);
        };
        let inner = self.read()?;
        Ok(inner.items.get(&id).cloned())
    }

    fn find_inventory(
        &self,
        id: &InventoryInformationId,
    ) -> Result<Option<InventoryInformation>, SourceError> {
        Ok(self.read()?.inventory.get(id).cloned())
    }

    fn find_image(&self, id: &ImageId) -> Result<Option<ImageAsset>, SourceError> {
        Ok(self.read()?.images.get(id).cloned())
    }

    fn find_storefront(&self, name: &str) -> Result<Option<Storefront>, SourceError> {
        Ok(self.read()?.storefronts.get(name).cloned())
    }
}
