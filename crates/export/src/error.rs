//! Infrastructure errors that abort an export run.
//!
//! Per-entity outcomes (skips, data-integrity errors) are not errors at this
//! level; see [`crate::validate::Rejection`].

use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceError;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("feed file io failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("feed csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog source failed: {0}")]
    Source(#[from] SourceError),

    #[error("storefront not found: {0}")]
    StorefrontNotFound(String),

    #[error("invalid export settings: {0}")]
    InvalidSettings(String),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_settings(msg: impl Into<String>) -> Self {
        Self::InvalidSettings(msg.into())
    }
}
