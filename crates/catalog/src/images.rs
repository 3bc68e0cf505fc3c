//! Image assets referenced by items and variations.

use discover_core::ImageId;
use serde::{Deserialize, Serialize};

/// An uploaded image; `name` is the blob file name in the image container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub id: ImageId,
    pub name: String,
}
