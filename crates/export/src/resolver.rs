//! Nearest-category-ancestor resolution.
//!
//! Resolution is a single hop: the direct parent counts only if it is itself
//! a category of the active catalog. Deeper ancestors are never walked, so a
//! category under a non-category node is exported as a root category.

use discover_catalog::{Category, CatalogItem};
use discover_core::{Entity, ParentRef};
use tracing::info;

use crate::context::ExportContext;
use crate::error::ExportResult;

/// The category `parent` points at, if it is one in the active catalog.
pub fn resolve_nearest_category(
    ctx: &ExportContext<'_>,
    parent: &ParentRef,
) -> ExportResult<Option<Category>> {
    let Some(item) = ctx.source.resolve_parent(parent)? else {
        info!(parent = %parent, "parent not found, possibly orphaned reference");
        return Ok(None);
    };

    let category = match item {
        CatalogItem::Category(category) => category,
        other => {
            info!(parent = %other.id(), kind = %other.kind(), "parent is not a category");
            return Ok(None);
        }
    };

    if !category.id.in_catalog(&ctx.active_catalog) {
        info!(
            parent = %category.id,
            active_catalog = %ctx.active_catalog,
            "parent category belongs to another catalog"
        );
        return Ok(None);
    }

    Ok(Some(category))
}
