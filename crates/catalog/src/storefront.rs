//! Storefront configuration entity.

use serde::{Deserialize, Serialize};

/// A storefront a site is served by. The export only checks it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storefront {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}
