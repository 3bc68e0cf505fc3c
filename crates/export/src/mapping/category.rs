use discover_catalog::Category;
use discover_core::CatalogEntity;
use tracing::debug;

use crate::context::ExportContext;
use crate::error::ExportResult;
use crate::feed::CategoryRow;
use crate::resolver::resolve_nearest_category;

/// Build the feed row of a validated category.
///
/// The validator guarantees exactly one direct parent; when that parent does
/// not resolve to a category of the active catalog the row is a root row
/// with an empty `parent_ccid`.
pub fn map_category(ctx: &ExportContext<'_>, category: &Category) -> ExportResult<CategoryRow> {
    let name = category.local_name();

    let parent_ccid = match category.parents.first() {
        Some(parent) => resolve_nearest_category(ctx, parent)?
            .map(|parent| parent.local_name().to_string())
            .unwrap_or_default(),
        None => String::new(),
    };

    debug!(category = %category.id, parent_ccid = %parent_ccid, "category mapped");

    Ok(CategoryRow {
        id: name.to_string(),
        ccid: name.to_string(),
        name: category.display_name.clone(),
        url_path: format!(
            "{}/{}",
            ctx.settings.category_feed.url_prefix.trim_end_matches('/'),
            urlencoding::encode(name)
        ),
        desc: category.description.clone(),
        parent_ccid,
    })
}
