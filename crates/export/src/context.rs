//! Per-run context shared by every stage.

use discover_core::RunId;
use tracing::{info, warn};

use crate::error::{ExportError, ExportResult};
use crate::images::ImageUrlBuilder;
use crate::settings::ExportSettings;
use crate::source::CatalogSource;
use crate::tracker::RunTracker;

/// Everything a validation/mapping step may read, passed by reference.
///
/// The tracker is the only shared mutable state.
pub struct ExportContext<'a> {
    pub run_id: RunId,
    pub settings: &'a ExportSettings,
    pub source: &'a dyn CatalogSource,
    pub tracker: &'a RunTracker,
    /// Catalog of the first configured site; parents outside it are ignored.
    pub active_catalog: String,
    /// `None` when image columns stay empty for this run.
    pub images: Option<ImageUrlBuilder>,
}

impl<'a> ExportContext<'a> {
    /// Prepare stage: check settings and storefronts, decide image handling.
    pub fn prepare(
        run_id: RunId,
        settings: &'a ExportSettings,
        source: &'a dyn CatalogSource,
        tracker: &'a RunTracker,
    ) -> ExportResult<Self> {
        settings.validate()?;

        if settings.any_feed_enabled() && settings.sites.is_empty() {
            return Err(ExportError::invalid_settings(
                "a feed is enabled but no site is configured",
            ));
        }

        for site in &settings.sites {
            if source.find_storefront(&site.storefront)?.is_none() {
                return Err(ExportError::StorefrontNotFound(site.storefront.clone()));
            }
        }

        let images = if settings.process.products && settings.product_feed.include_images {
            let builder = ImageUrlBuilder::from_policy(&settings.cloud_storage);
            if builder.is_none() {
                warn!("images requested but cloud storage policy is incomplete; image columns stay empty");
            }
            builder
        } else {
            None
        };

        let active_catalog = settings.active_catalog().unwrap_or_default().to_string();
        info!(
            sites = settings.sites.len(),
            active_catalog = %active_catalog,
            images = images.is_some(),
            "export prepared"
        );

        Ok(Self {
            run_id,
            settings,
            source,
            tracker,
            active_catalog,
            images,
        })
    }
}
