//! Entity validation gates.
//!
//! Each validator fetches one candidate and runs its gates in order; the
//! first failing gate classifies the entity. The outer `ExportResult` carries
//! infrastructure failures only.

use discover_catalog::{
    Category, EntityKind, FoldDecision, SellableItem, VariantError, check_variants,
};
use discover_core::{CatalogEntity, FriendlyId};
use thiserror::Error;
use tracing::{info, warn};

use crate::context::ExportContext;
use crate::error::ExportResult;
use crate::tracker::StepOutcome;

/// Expected, benign reasons an entity is left out of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("catalog '{0}' is not selected by any site")]
    NotSelected(String),
    #[error("not published")]
    Unpublished,
    #[error("pending deletion")]
    PendingDeletion,
    #[error("bundles are not supported")]
    Bundle,
    #[error("product type not supported: {}", product_type(.0))]
    ProductTypeNotSupported(FoldDecision),
    #[error("orphan category: no direct parent")]
    Orphan,
}

fn product_type(fold: &FoldDecision) -> &'static str {
    match fold {
        FoldDecision::Standalone => "standalone product",
        FoldDecision::VariantBearing => "product with variants",
    }
}

/// Data-integrity failures; the entity is counted as errored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorReason {
    #[error("entity not found")]
    NotFound,
    #[error("ambiguous category: {0} direct parents")]
    AmbiguousParents(usize),
    #[error(transparent)]
    Variants(#[from] VariantError),
    #[error("no list price in currency '{0}'")]
    MissingPrice(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("skipped: {0}")]
    Skipped(SkipReason),
    #[error("errored: {0}")]
    Errored(ErrorReason),
}

impl Rejection {
    pub fn outcome(&self) -> StepOutcome {
        match self {
            Rejection::Skipped(_) => StepOutcome::Skipped,
            Rejection::Errored(_) => StepOutcome::Errored,
        }
    }

    pub fn log(&self, kind: EntityKind, id: &FriendlyId) {
        match self {
            Rejection::Skipped(reason) => info!(kind = %kind, id = %id, reason = %reason, "entity skipped"),
            Rejection::Errored(reason) => warn!(kind = %kind, id = %id, reason = %reason, "entity errored"),
        }
    }
}

impl From<SkipReason> for Rejection {
    fn from(value: SkipReason) -> Self {
        Rejection::Skipped(value)
    }
}

impl From<ErrorReason> for Rejection {
    fn from(value: ErrorReason) -> Self {
        Rejection::Errored(value)
    }
}

/// A sellable item that passed every gate, with its fold decision.
#[derive(Debug, Clone)]
pub struct ValidatedItem {
    pub item: SellableItem,
    pub fold: FoldDecision,
}

fn selection_gate(
    ctx: &ExportContext<'_>,
    entity: &impl CatalogEntity,
    published: bool,
) -> Result<(), Rejection> {
    if !ctx.settings.is_catalog_selected(entity.catalog()) {
        return Err(SkipReason::NotSelected(entity.catalog().to_string()).into());
    }
    if !published {
        return Err(SkipReason::Unpublished.into());
    }
    Ok(())
}

pub fn validate_category(
    ctx: &ExportContext<'_>,
    id: &FriendlyId,
) -> ExportResult<Result<Category, Rejection>> {
    let Some(category) = ctx
        .source
        .find(EntityKind::Category, id)?
        .and_then(|item| item.into_category())
    else {
        return Ok(Err(ErrorReason::NotFound.into()));
    };

    Ok(check_category(ctx, category))
}

fn check_category(ctx: &ExportContext<'_>, category: Category) -> Result<Category, Rejection> {
    selection_gate(ctx, &category, category.published)?;

    if category.pending_deletion {
        return Err(SkipReason::PendingDeletion.into());
    }

    match category.parents.len() {
        0 => Err(SkipReason::Orphan.into()),
        1 => Ok(category),
        n => Err(ErrorReason::AmbiguousParents(n).into()),
    }
}

pub fn validate_sellable_item(
    ctx: &ExportContext<'_>,
    id: &FriendlyId,
) -> ExportResult<Result<ValidatedItem, Rejection>> {
    let Some(item) = ctx
        .source
        .find(EntityKind::SellableItem, id)?
        .and_then(|item| item.into_sellable_item())
    else {
        return Ok(Err(ErrorReason::NotFound.into()));
    };

    Ok(check_sellable_item(ctx, item))
}

fn check_sellable_item(ctx: &ExportContext<'_>, item: SellableItem) -> Result<ValidatedItem, Rejection> {
    selection_gate(ctx, &item, item.published)?;

    if item.is_bundle {
        return Err(SkipReason::Bundle.into());
    }

    let fold = check_variants(&item.variations).map_err(ErrorReason::from)?;

    let policy = &ctx.settings.product_feed;
    let supported = match fold {
        FoldDecision::Standalone => policy.include_standalone_products,
        FoldDecision::VariantBearing => policy.include_products_with_variants,
    };
    if !supported {
        return Err(SkipReason::ProductTypeNotSupported(fold).into());
    }

    Ok(ValidatedItem { item, fold })
}
