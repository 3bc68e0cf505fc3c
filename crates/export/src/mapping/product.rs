use discover_catalog::{FoldDecision, InventoryAssociation, Money, SellableItem, Variation};
use discover_core::CatalogEntity;
use tracing::debug;

use crate::context::ExportContext;
use crate::error::ExportResult;
use crate::feed::ProductRow;
use crate::images::first_image_url;
use crate::resolver::resolve_nearest_category;
use crate::settings::MissingPrice;
use crate::tracker::FeedKind;
use crate::validate::ErrorReason;

const PRODUCT_TYPE: &str = "Product";
const SKU_TYPE: &str = "SKU";

/// Build every feed row of a validated sellable item.
///
/// Standalone items yield one row with `sku == product_id`. Variant-bearing
/// items yield one SKU row per variation and no product-level row. All rows
/// are built before any is returned, so a failure yields none.
pub fn map_sellable_item(
    ctx: &ExportContext<'_>,
    item: &SellableItem,
    fold: FoldDecision,
) -> ExportResult<Result<Vec<ProductRow>, ErrorReason>> {
    let base = match product_row(ctx, item)? {
        Ok(row) => row,
        Err(reason) => return Ok(Err(reason)),
    };

    let rows = match fold {
        FoldDecision::Standalone => vec![base],
        FoldDecision::VariantBearing => item
            .variations
            .iter()
            .map(|variation| sku_row(ctx, item, variation, &base))
            .collect::<ExportResult<Vec<_>>>()?,
    };

    debug!(product = %item.id, rows = rows.len(), "sellable item mapped");
    Ok(Ok(rows))
}

fn product_row(
    ctx: &ExportContext<'_>,
    item: &SellableItem,
) -> ExportResult<Result<ProductRow, ErrorReason>> {
    let policy = &ctx.settings.product_feed;

    let price = match Money::find_in(&item.list_prices, &policy.default_currency) {
        Some(price) => price.to_string(),
        None => match policy.missing_price {
            MissingPrice::Zero => Money::zero(policy.default_currency.as_str()).to_string(),
            MissingPrice::Error => {
                return Ok(Err(ErrorReason::MissingPrice(policy.default_currency.clone())));
            }
        },
    };

    let product_id = item.local_name().to_string();

    Ok(Ok(ProductRow {
        product_url: format!("products/{}", urlencoding::encode(&product_id)),
        image_url: first_image_url(ctx, &item.id, &item.images)?,
        name: item.display_name.clone(),
        description: item.description.clone(),
        sku: product_id.clone(),
        ccids: category_ids(ctx, item)?,
        sale_price: price.clone(),
        price,
        is_active: true,
        product_type: PRODUCT_TYPE.to_string(),
        search_keywords: item.tags.join("|"),
        brand: item.brand.clone(),
        manufacturer: item.manufacturer.clone(),
        stock_quantity: quantity(ctx, &item.inventory)?,
        product_id,
        ..ProductRow::default()
    }))
}

fn sku_row(
    ctx: &ExportContext<'_>,
    item: &SellableItem,
    variation: &Variation,
    base: &ProductRow,
) -> ExportResult<ProductRow> {
    let currency = &ctx.settings.product_feed.default_currency;
    let override_price = Money::find_in(&variation.list_prices, currency)
        .map(Money::to_string)
        .unwrap_or_default();

    Ok(ProductRow {
        sku: variation.id.to_string(),
        product_type: SKU_TYPE.to_string(),
        sku_name: variation.display_name.clone(),
        sku_description: variation.description.clone(),
        sku_image_url: first_image_url(ctx, &item.id, &variation.images)?,
        override_sale_price: override_price.clone(),
        override_price,
        override_stock_quantity: quantity(ctx, &variation.inventory)?,
        color: variation.property("Color").unwrap_or_default().to_string(),
        size: variation.property("Size").unwrap_or_default().to_string(),
        ..base.clone()
    })
}

/// `|`-joined local names of the item's parent categories in the active
/// catalog, leaving out categories the category stage rejected.
fn category_ids(ctx: &ExportContext<'_>, item: &SellableItem) -> ExportResult<String> {
    let mut ids = Vec::with_capacity(item.parents.len());
    for parent in &item.parents {
        let Some(category) = resolve_nearest_category(ctx, parent)? else {
            continue;
        };
        if ctx.tracker.is_problem(FeedKind::Categories, &category.id) {
            debug!(product = %item.id, category = %category.id, "skipping rejected category");
            continue;
        }
        ids.push(category.local_name().to_string());
    }
    Ok(ids.join("|"))
}

/// Quantity from the configured inventory set; `None` without an association.
fn quantity(ctx: &ExportContext<'_>, associations: &[InventoryAssociation]) -> ExportResult<Option<i64>> {
    let set = &ctx.settings.product_feed.inventory_set_id;
    let Some(association) = InventoryAssociation::for_set(associations, set) else {
        return Ok(None);
    };
    Ok(ctx
        .source
        .find_inventory(&association.inventory_information)?
        .map(|info| info.quantity))
}
