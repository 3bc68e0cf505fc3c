//! Variant consistency check and the fold-vs-explode decision.
//!
//! A sellable item's variations must share one uniform set of populated
//! distinguishing properties, and every variation must carry a distinct
//! combination of values for that set. The first variation defines the set.
//! Property names compare ASCII case-insensitively.

use std::collections::{BTreeMap, HashMap};

use discover_core::VariationId;
use thiserror::Error;

use crate::variation::Variation;

/// How a consistent item is written to the product feed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FoldDecision {
    /// One row whose SKU is the product id.
    Standalone,
    /// One SKU row per variation, no product-level row.
    VariantBearing,
}

/// Which side of the uniformity rule a variation broke.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// Populated on the first variation, empty here.
    Missing,
    /// Populated here, absent from the first variation.
    Unexpected,
}

impl core::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Inconsistency::Missing => "is empty but populated on the first variation",
            Inconsistency::Unexpected => "is populated but absent on the first variation",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VariantError {
    #[error("variation '{variation}' is inconsistent: property '{property}' {kind}")]
    Inconsistent {
        variation: VariationId,
        property: String,
        kind: Inconsistency,
    },

    #[error("variation '{variation}' is not unique: same property values as '{duplicate_of}'")]
    NotUnique {
        variation: VariationId,
        duplicate_of: VariationId,
    },
}

/// Validate `variations` and decide how the owning item is written.
///
/// Zero variations, or a single variation without populated properties,
/// fold into a standalone row. A single variation with properties is
/// variant-bearing and trivially consistent.
pub fn check_variants(variations: &[Variation]) -> Result<FoldDecision, VariantError> {
    let Some((first, rest)) = variations.split_first() else {
        return Ok(FoldDecision::Standalone);
    };

    if rest.is_empty() {
        return Ok(if first.has_populated_properties() {
            FoldDecision::VariantBearing
        } else {
            FoldDecision::Standalone
        });
    }

    let schema = folded_properties(first);
    let mut seen: HashMap<Vec<&str>, &VariationId> = HashMap::with_capacity(variations.len());

    for variation in variations {
        let populated = folded_properties(variation);

        if let Some((_, (name, _))) = schema.iter().find(|(k, _)| !populated.contains_key(*k)) {
            return Err(VariantError::Inconsistent {
                variation: variation.id.clone(),
                property: (*name).to_string(),
                kind: Inconsistency::Missing,
            });
        }
        if let Some((_, (name, _))) = populated.iter().find(|(k, _)| !schema.contains_key(*k)) {
            return Err(VariantError::Inconsistent {
                variation: variation.id.clone(),
                property: (*name).to_string(),
                kind: Inconsistency::Unexpected,
            });
        }

        // Values in folded-name order; the key sets match here.
        let key: Vec<&str> = populated.values().map(|(_, value)| *value).collect();
        if let Some(previous) = seen.insert(key, &variation.id) {
            return Err(VariantError::NotUnique {
                variation: variation.id.clone(),
                duplicate_of: previous.clone(),
            });
        }
    }

    Ok(FoldDecision::VariantBearing)
}

/// Populated properties keyed by ASCII-lowercased name, keeping the name as
/// written. `Color` and `color` are the same property, as for
/// [`Variation::property`].
fn folded_properties(variation: &Variation) -> BTreeMap<String, (&str, &str)> {
    variation
        .populated_properties()
        .map(|(name, value)| (name.to_ascii_lowercase(), (name, value)))
        .collect()
}
