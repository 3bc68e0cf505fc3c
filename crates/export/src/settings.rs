//! Export run settings.
//!
//! Deserialized from JSON; every field has a default so partial documents
//! are accepted. [`ExportSettings::validate`] rejects combinations a run
//! cannot start with.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};

/// Feed types enabled for this run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessFlags {
    pub categories: bool,
    pub products: bool,
}

/// One site the export runs for. The first site's catalog is the active one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub name: String,
    pub catalog: String,
    pub domain: String,
    pub storefront: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryFeedPolicy {
    pub file_path: PathBuf,
    /// Leading path segment of category `url_path` values.
    pub url_prefix: String,
}

impl Default for CategoryFeedPolicy {
    fn default() -> Self {
        Self {
            file_path: PathBuf::new(),
            url_prefix: "products".to_string(),
        }
    }
}

/// What to do when an item has no list price in the default currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPrice {
    /// Write a zero price.
    #[default]
    Zero,
    /// Fail the product.
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFeedPolicy {
    pub file_path: PathBuf,
    pub include_standalone_products: bool,
    pub include_products_with_variants: bool,
    pub inventory_set_id: String,
    pub default_currency: String,
    pub include_images: bool,
    pub missing_price: MissingPrice,
}

/// Object storage that hosts product images. Only URLs are built from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudStoragePolicy {
    pub connection_string: String,
    pub base_url: String,
    pub container: String,
}

impl CloudStoragePolicy {
    pub fn is_valid(&self) -> bool {
        !self.connection_string.trim().is_empty()
            && !self.base_url.trim().is_empty()
            && !self.container.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub process: ProcessFlags,
    pub sites: Vec<SiteSettings>,
    pub category_feed: CategoryFeedPolicy,
    pub product_feed: ProductFeedPolicy,
    pub cloud_storage: CloudStoragePolicy,
    /// Worker threads per stage; 1 processes entities in enumeration order.
    pub max_workers: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            process: ProcessFlags::default(),
            sites: Vec::new(),
            category_feed: CategoryFeedPolicy::default(),
            product_feed: ProductFeedPolicy::default(),
            cloud_storage: CloudStoragePolicy::default(),
            max_workers: 1,
        }
    }
}

impl ExportSettings {
    pub fn from_json(json: &str) -> ExportResult<Self> {
        serde_json::from_str(json).map_err(|e| ExportError::invalid_settings(e.to_string()))
    }

    pub fn any_feed_enabled(&self) -> bool {
        self.process.categories || self.process.products
    }

    /// Catalog of the first configured site.
    pub fn active_catalog(&self) -> Option<&str> {
        self.sites.first().map(|s| s.catalog.as_str())
    }

    pub fn is_catalog_selected(&self, catalog: &str) -> bool {
        self.sites.iter().any(|s| s.catalog == catalog)
    }

    pub fn validate(&self) -> ExportResult<()> {
        if self.max_workers == 0 {
            return Err(ExportError::invalid_settings("max_workers must be at least 1"));
        }

        if self.process.categories && self.category_feed.file_path.as_os_str().is_empty() {
            return Err(ExportError::invalid_settings(
                "category feed is enabled but has no file path",
            ));
        }

        if self.process.products {
            if self.product_feed.file_path.as_os_str().is_empty() {
                return Err(ExportError::invalid_settings(
                    "product feed is enabled but has no file path",
                ));
            }
            if self.product_feed.default_currency.trim().is_empty() {
                return Err(ExportError::invalid_settings(
                    "product feed is enabled but has no default currency",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> ExportSettings {
        ExportSettings {
            process: ProcessFlags {
                categories: true,
                products: true,
            },
            sites: vec![SiteSettings {
                name: "Storefront".into(),
                catalog: "Habitat_Master".into(),
                domain: "example.com".into(),
                storefront: "Storefront".into(),
            }],
            category_feed: CategoryFeedPolicy {
                file_path: "out/categories.csv".into(),
                ..CategoryFeedPolicy::default()
            },
            product_feed: ProductFeedPolicy {
                file_path: "out/products.csv".into(),
                default_currency: "USD".into(),
                ..ProductFeedPolicy::default()
            },
            ..ExportSettings::default()
        }
    }

    #[test]
    fn partial_json_uses_defaults() {
        let settings = ExportSettings::from_json(
            r#"{"process": {"products": true}, "product_feed": {"missing_price": "error"}}"#,
        )
        .unwrap();

        assert!(settings.process.products);
        assert!(!settings.process.categories);
        assert_eq!(settings.max_workers, 1);
        assert_eq!(settings.category_feed.url_prefix, "products");
        assert_eq!(settings.product_feed.missing_price, MissingPrice::Error);
        assert!(!settings.product_feed.include_standalone_products);
    }

    #[test]
    fn malformed_json_is_invalid_settings() {
        let err = ExportSettings::from_json("{").unwrap_err();
        assert!(matches!(err, ExportError::InvalidSettings(_)));
    }

    #[test]
    fn validate_accepts_complete_settings() {
        assert!(enabled().validate().is_ok());
    }

    #[test]
    fn validate_rejects_enabled_feed_without_path() {
        let mut settings = enabled();
        settings.category_feed.file_path = PathBuf::new();
        assert!(matches!(settings.validate(), Err(ExportError::InvalidSettings(_))));

        // Disabled feeds do not need a path.
        settings.process.categories = false;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn validate_rejects_products_without_currency() {
        let mut settings = enabled();
        settings.product_feed.default_currency = " ".into();
        assert!(matches!(settings.validate(), Err(ExportError::InvalidSettings(_))));
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let mut settings = enabled();
        settings.max_workers = 0;
        assert!(matches!(settings.validate(), Err(ExportError::InvalidSettings(_))));
    }

    #[test]
    fn first_site_catalog_is_active() {
        let mut settings = enabled();
        settings.sites.push(SiteSettings {
            catalog: "Other".into(),
            ..SiteSettings::default()
        });
        assert_eq!(settings.active_catalog(), Some("Habitat_Master"));
        assert!(settings.is_catalog_selected("Other"));
        assert!(!settings.is_catalog_selected("Missing"));
    }

    #[test]
    fn cloud_storage_requires_all_parts() {
        let mut policy = CloudStoragePolicy {
            connection_string: "conn".into(),
            base_url: "https://cdn.example.com".into(),
            container: "images".into(),
        };
        assert!(policy.is_valid());
        policy.container.clear();
        assert!(!policy.is_valid());
    }
}
