//! `discover-export`: the catalog feed export pipeline.
//!
//! One run validates every candidate category and sellable item, maps the
//! survivors to flat rows and appends them to two CSV feeds. Per-entity
//! failures are classified and counted; only infrastructure failures abort.

pub mod context;
pub mod error;
pub mod feed;
pub mod images;
pub mod mapping;
pub mod orchestrator;
pub mod resolver;
pub mod settings;
pub mod source;
pub mod tracker;
pub mod validate;


pub use context::ExportContext;
pub use error::{ExportError, ExportResult};
pub use feed::{CategoryRow, FeedRow, FeedWriter, ProductRow};
pub use orchestrator::{FeedExporter, RunAborted};
pub use settings::{
    CategoryFeedPolicy, CloudStoragePolicy, ExportSettings, MissingPrice, ProcessFlags,
    ProductFeedPolicy, SiteSettings,
};
pub use source::{CatalogSnapshot, CatalogSource, InMemoryCatalog, SourceError};
pub use tracker::{FeedCounters, FeedKind, FeedResult, ProblemSet, RunTracker, StepOutcome};
pub use validate::{ErrorReason, Rejection, SkipReason};
