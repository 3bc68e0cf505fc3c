//! The catalog item sum type.

use discover_core::{DomainResult, Entity, FriendlyId};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::sellable_item::SellableItem;

/// Catalog root. By convention its composite id is `"{name}-{name}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: FriendlyId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default = "published_by_default")]
    pub published: bool,
}

fn published_by_default() -> bool {
    true
}

impl Catalog {
    pub fn new(name: &str) -> DomainResult<Self> {
        Ok(Self {
            id: FriendlyId::new(name, name)?,
            display_name: name.to_string(),
            published: true,
        })
    }
}

/// Kinds of catalog entity the source can enumerate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Catalog,
    Category,
    SellableItem,
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            EntityKind::Catalog => "catalog",
            EntityKind::Category => "category",
            EntityKind::SellableItem => "sellable item",
        })
    }
}

/// Any entity stored in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CatalogItem {
    Catalog(Catalog),
    Category(Category),
    SellableItem(SellableItem),
}

impl CatalogItem {
    pub fn kind(&self) -> EntityKind {
        match self {
            CatalogItem::Catalog(_) => EntityKind::Catalog,
            CatalogItem::Category(_) => EntityKind::Category,
            CatalogItem::SellableItem(_) => EntityKind::SellableItem,
        }
    }

    pub fn into_category(self) -> Option<Category> {
        match self {
            CatalogItem::Category(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_sellable_item(self) -> Option<SellableItem> {
        match self {
            CatalogItem::SellableItem(s) => Some(s),
            _ => None,
        }
    }
}

impl Entity for CatalogItem {
    type Id = FriendlyId;

    fn id(&self) -> &Self::Id {
        match self {
            CatalogItem::Catalog(c) => &c.id,
            CatalogItem::Category(c) => &c.id,
            CatalogItem::SellableItem(s) => &s.id,
        }
    }
}

impl From<Category> for CatalogItem {
    fn from(value: Category) -> Self {
        CatalogItem::Category(value)
    }
}

impl From<SellableItem> for CatalogItem {
    fn from(value: SellableItem) -> Self {
        CatalogItem::SellableItem(value)
    }
}

impl From<Catalog> for CatalogItem {
    fn from(value: Catalog) -> Self {
        CatalogItem::Catalog(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discover_core::{CatalogEntity, ParentRef};

    #[test]
    fn deserializes_tagged_items() {
        let json = r#"[
            {"kind": "Catalog", "id": "Shop-Shop"},
            {"kind": "Category", "id": "Shop-Shirts", "published": true, "parents": "Shop-Shop"},
            {"kind": "SellableItem", "id": "Shop-P1", "display_name": "Shirt",
             "parents": ["Shop-Shirts|Shop-Sale"],
             "variations": [{"id": "v1", "properties": {"Color": "Red"}}]}
        ]"#;

        let items: Vec<CatalogItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].kind(), EntityKind::Catalog);
        assert_eq!(items[0].local_name(), "Shop");

        assert_eq!(items[1].kind(), EntityKind::Category);
        let category = items[1].clone().into_category().unwrap();
        assert!(category.published);
        assert_eq!(category.parents, vec![ParentRef::from("Shop-Shop")]);

        let item = items[2].clone().into_sellable_item().unwrap();
        assert_eq!(item.local_name(), "P1");
        assert!(!item.published);
        assert_eq!(item.parents.len(), 2);
        assert_eq!(item.variations[0].property("color"), Some("Red"));
    }

    #[test]
    fn rejects_malformed_composite_id() {
        let json = r#"{"kind": "Category", "id": "NoCatalogPart"}"#;
        assert!(serde_json::from_str::<CatalogItem>(json).is_err());
    }

    #[test]
    fn narrowing_to_wrong_kind_yields_none() {
        let item: CatalogItem = Catalog::new("Shop").unwrap().into();
        assert!(item.clone().into_category().is_none());
        assert!(item.into_sellable_item().is_none());
    }
}
