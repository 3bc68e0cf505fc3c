//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Identifier of one export run (log correlation and run summaries).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Create a new run identifier.
    ///
    /// Uses UUIDv7 (time-ordered) so run ids sort by start time.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RunId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RunId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("RunId: {e}")))?;
        Ok(Self(uuid))
    }
}

/// Opaque string identifiers owned by the catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationId(String);

/// Reference to an image asset attached to an item or variation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

/// Reference to an inventory information record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryInformationId(String);

/// Direct-parent reference as stored on a catalog item.
///
/// The reference is opaque: only the catalog source knows which entity it
/// points at (a catalog root, a category, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParentRef(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err(DomainError::invalid_id(concat!($name, ": empty")));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_string_newtype!(VariationId, "VariationId");
impl_string_newtype!(ImageId, "ImageId");
impl_string_newtype!(InventoryInformationId, "InventoryInformationId");
impl_string_newtype!(ParentRef, "ParentRef");

impl ParentRef {
    /// Split a `|`-joined parent list, dropping empty segments.
    pub fn parse_list(list: &str) -> Vec<ParentRef> {
        list.split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ParentRef::from)
            .collect()
    }
}

/// Catalog-scoped composite identifier, rendered `"{catalog}-{name}"`.
///
/// The catalog part never contains `-`; the name part may.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FriendlyId {
    catalog: String,
    name: String,
}

impl FriendlyId {
    pub fn new(catalog: impl Into<String>, name: impl Into<String>) -> DomainResult<Self> {
        let catalog = catalog.into();
        let name = name.into();

        if catalog.trim().is_empty() {
            return Err(DomainError::invalid_id("FriendlyId: empty catalog part"));
        }
        if catalog.contains('-') {
            return Err(DomainError::invalid_id(format!(
                "FriendlyId: catalog part '{catalog}' contains '-'"
            )));
        }
        if name.trim().is_empty() {
            return Err(DomainError::invalid_id("FriendlyId: empty name part"));
        }

        Ok(Self { catalog, name })
    }

    /// Catalog the entity belongs to.
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// Catalog-local name of the entity (the id the feeds use).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn in_catalog(&self, catalog: &str) -> bool {
        self.catalog == catalog
    }
}

impl ValueObject for FriendlyId {}

impl core::fmt::Display for FriendlyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.catalog, self.name)
    }
}

impl FromStr for FriendlyId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (catalog, name) = s
            .split_once('-')
            .ok_or_else(|| DomainError::invalid_id(format!("FriendlyId: '{s}' has no catalog part")))?;
        Self::new(catalog, name)
    }
}

impl TryFrom<String> for FriendlyId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FriendlyId> for String {
    fn from(value: FriendlyId) -> Self {
        value.to_string()
    }
}
