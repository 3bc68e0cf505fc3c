//! Feed orchestrator: drives one export run.
//!
//! Stages run in a fixed order: prepare, categories, products. The category
//! stage completes before products start, because product mapping reads the
//! category problem set. Within a stage every candidate runs through
//! validate → map → append as an isolated step; only infrastructure errors
//! stop the run.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use chrono::Utc;
use discover_catalog::{EntityKind, FoldDecision};
use discover_core::{FriendlyId, RunId};
use thiserror::Error;
use tracing::{Span, debug, error, info, info_span};

use crate::context::ExportContext;
use crate::error::{ExportError, ExportResult};
use crate::feed::{CategoryRow, FeedWriter, ProductRow};
use crate::mapping::{map_category, map_sellable_item};
use crate::settings::ExportSettings;
use crate::source::CatalogSource;
use crate::tracker::{FeedKind, FeedResult, RunTracker, StepOutcome};
use crate::validate::{Rejection, validate_category, validate_sellable_item};

/// A run stopped by an infrastructure error, with the counters gathered so far.
#[derive(Debug, Error)]
#[error("export run {run} aborted: {error}", run = .result.run_id)]
pub struct RunAborted {
    #[source]
    pub error: ExportError,
    pub result: FeedResult,
}

/// Runs feed exports against one catalog source.
pub struct FeedExporter<S: CatalogSource> {
    source: S,
}

impl<S: CatalogSource> FeedExporter<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Run one export. Always yields the run's counters, also on abort.
    pub fn run(&self, settings: &ExportSettings) -> Result<FeedResult, RunAborted> {
        let run_id = RunId::new();
        let span = info_span!("export_run", run_id = %run_id);
        let _enter = span.enter();

        let tracker = RunTracker::new(run_id, Utc::now());
        info!(
            categories = settings.process.categories,
            products = settings.process.products,
            workers = settings.max_workers,
            "export run started"
        );

        match self.run_stages(run_id, settings, &tracker) {
            Ok(()) => {
                let result = tracker.finish(Utc::now());
                info!(
                    categories_appended = result.categories.appended,
                    categories_skipped = result.categories.skipped,
                    categories_errored = result.categories.errored,
                    products_appended = result.products.appended,
                    products_skipped = result.products.skipped,
                    products_errored = result.products.errored,
                    skus_appended = result.skus.appended,
                    image_errors = result.product_images.errored,
                    "export run finished"
                );
                Ok(result)
            }
            Err(error) => {
                error!(error = %error, "export run aborted");
                Err(RunAborted {
                    error,
                    result: tracker.finish(Utc::now()),
                })
            }
        }
    }

    fn run_stages(
        &self,
        run_id: RunId,
        settings: &ExportSettings,
        tracker: &RunTracker,
    ) -> ExportResult<()> {
        let ctx = ExportContext::prepare(run_id, settings, &self.source, tracker)?;

        if settings.process.categories {
            export_categories(&ctx)?;
        } else {
            info!("category feed disabled");
        }

        if settings.process.products {
            export_products(&ctx)?;
        } else {
            info!("product feed disabled");
        }

        Ok(())
    }
}

fn export_categories(ctx: &ExportContext<'_>) -> ExportResult<()> {
    let writer = FeedWriter::<CategoryRow>::create(&ctx.settings.category_feed.file_path)?;
    let ids = ctx.source.list_ids(EntityKind::Category)?;
    info!(candidates = ids.len(), path = %writer.path().display(), "exporting categories");

    for_each_candidate(ctx.settings.max_workers, &ids, |id| {
        category_step(ctx, &writer, id)
    })
}

fn export_products(ctx: &ExportContext<'_>) -> ExportResult<()> {
    let writer = FeedWriter::<ProductRow>::create(&ctx.settings.product_feed.file_path)?;
    let ids = ctx.source.list_ids(EntityKind::SellableItem)?;
    info!(candidates = ids.len(), path = %writer.path().display(), "exporting sellable items");

    for_each_candidate(ctx.settings.max_workers, &ids, |id| {
        product_step(ctx, &writer, id)
    })
}

fn category_step(
    ctx: &ExportContext<'_>,
    writer: &FeedWriter<CategoryRow>,
    id: &FriendlyId,
) -> ExportResult<()> {
    debug!(run_id = %ctx.run_id, category = %id, "processing category");

    let outcome = match validate_category(ctx, id)? {
        Err(rejection) => reject(&rejection, EntityKind::Category, id),
        Ok(category) => {
            let row = map_category(ctx, &category)?;
            writer.append(&row)?;
            info!(category = %id, "category appended");
            StepOutcome::Appended
        }
    };

    ctx.tracker.record(FeedKind::Categories, id, outcome);
    Ok(())
}

fn product_step(
    ctx: &ExportContext<'_>,
    writer: &FeedWriter<ProductRow>,
    id: &FriendlyId,
) -> ExportResult<()> {
    debug!(run_id = %ctx.run_id, product = %id, "processing sellable item");

    let outcome = match validate_sellable_item(ctx, id)? {
        Err(rejection) => reject(&rejection, EntityKind::SellableItem, id),
        Ok(validated) => match map_sellable_item(ctx, &validated.item, validated.fold)? {
            Err(reason) => reject(&Rejection::Errored(reason), EntityKind::SellableItem, id),
            Ok(rows) => {
                for row in &rows {
                    writer.append(row)?;
                    if validated.fold == FoldDecision::VariantBearing {
                        debug!(product = %id, sku = %row.sku, "sku appended");
                        ctx.tracker
                            .record_anonymous(FeedKind::Skus, StepOutcome::Appended);
                    }
                }
                info!(product = %id, rows = rows.len(), "sellable item appended");
                StepOutcome::Appended
            }
        },
    };

    ctx.tracker.record(FeedKind::Products, id, outcome);
    Ok(())
}

fn reject(rejection: &Rejection, kind: EntityKind, id: &FriendlyId) -> StepOutcome {
    rejection.log(kind, id);
    rejection.outcome()
}

/// Run `step` for every id.
///
/// With one worker ids run in order on the calling thread. With more, scoped
/// workers claim ids from a shared cursor; the first error stops further
/// claims and is returned once all workers have stopped.
fn for_each_candidate<F>(workers: usize, ids: &[FriendlyId], step: F) -> ExportResult<()>
where
    F: Fn(&FriendlyId) -> ExportResult<()> + Sync,
{
    if workers <= 1 || ids.len() <= 1 {
        return ids.iter().try_for_each(|id| step(id));
    }

    let cursor = AtomicUsize::new(0);
    let abort = AtomicBool::new(false);
    let first_error: Mutex<Option<ExportError>> = Mutex::new(None);
    let span = Span::current();

    thread::scope(|scope| {
        for _ in 0..workers.min(ids.len()) {
            scope.spawn(|| {
                let _enter = span.enter();
                while !abort.load(Ordering::Acquire) {
                    let index = cursor.fetch_add(1, Ordering::AcqRel);
                    let Some(id) = ids.get(index) else {
                        break;
                    };
                    if let Err(e) = step(id) {
                        abort.store(true, Ordering::Release);
                        first_error
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .get_or_insert(e);
                        break;
                    }
                }
            });
        }
    });

    match first_error.into_inner().unwrap_or_else(PoisonError::into_inner) {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
