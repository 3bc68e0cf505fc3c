use serde::Serialize;

/// A flat record with a fixed column schema.
///
/// `COLUMNS` must list the serialized field names in declaration order; the
/// header line is written from it.
pub trait FeedRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

/// One line of the category feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    pub id: String,
    pub ccid: String,
    pub name: String,
    pub url_path: String,
    pub desc: String,
    pub parent_ccid: String,
}

impl FeedRow for CategoryRow {
    const COLUMNS: &'static [&'static str] = &["id", "ccid", "name", "url_path", "desc", "parent_ccid"];
}

/// One line of the product feed. Standalone products and SKU rows share it;
/// the `sku_*`/`override_*` columns stay empty on standalone rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub product_id: String,
    pub name: String,
    pub product_url: String,
    pub image_url: String,
    pub description: String,
    pub sku: String,
    pub ccids: String,
    pub price: String,
    pub sale_price: String,
    pub is_active: bool,
    pub product_type: String,
    pub search_keywords: String,
    pub brand: String,
    pub manufacturer: String,
    pub stock_quantity: Option<i64>,
    pub sku_name: String,
    pub sku_description: String,
    pub sku_url: String,
    pub sku_image_url: String,
    pub override_price: String,
    pub override_sale_price: String,
    pub override_stock_quantity: Option<i64>,
    pub color: String,
    pub size: String,
}

impl FeedRow for ProductRow {
    const COLUMNS: &'static [&'static str] = &[
        "product_id",
        "name",
        "product_url",
        "image_url",
        "description",
        "sku",
        "ccids",
        "price",
        "sale_price",
        "is_active",
        "product_type",
        "search_keywords",
        "brand",
        "manufacturer",
        "stock_quantity",
        "sku_name",
        "sku_description",
        "sku_url",
        "sku_image_url",
        "override_price",
        "override_sale_price",
        "override_stock_quantity",
        "color",
        "size",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Header csv derives from the struct must equal the declared columns.
    fn derived_header<R: FeedRow + Default>() -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(R::default()).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        text.lines().next().unwrap().to_string()
    }

    #[test]
    fn category_columns_match_fields() {
        assert_eq!(derived_header::<CategoryRow>(), CategoryRow::COLUMNS.join(","));
    }

    #[test]
    fn product_columns_match_fields() {
        assert_eq!(derived_header::<ProductRow>(), ProductRow::COLUMNS.join(","));
    }
}
