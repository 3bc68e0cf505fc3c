//! Entity trait: identity that survives reloads from the catalog source.

use crate::id::FriendlyId;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Catalog-scoped entity addressed by a [`FriendlyId`].
pub trait CatalogEntity: Entity<Id = FriendlyId> {
    /// Catalog-local name, used as the feed identifier.
    fn local_name(&self) -> &str {
        self.id().name()
    }

    /// Catalog this entity lives in.
    fn catalog(&self) -> &str {
        self.id().catalog()
    }
}

impl<T: Entity<Id = FriendlyId>> CatalogEntity for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shelf {
        id: FriendlyId,
    }

    impl Entity for Shelf {
        type Id = FriendlyId;

        fn id(&self) -> &Self::Id {
            &self.id
        }
    }

    #[test]
    fn catalog_entity_splits_its_id() {
        let shelf = Shelf {
            id: "Habitat-Top-Shelf".parse().unwrap(),
        };
        assert_eq!(shelf.catalog(), "Habitat");
        assert_eq!(shelf.local_name(), "Top-Shelf");
    }
}
