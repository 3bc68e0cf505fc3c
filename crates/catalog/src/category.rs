//! Categories.

use discover_core::{Entity, FriendlyId, ParentRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: FriendlyId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published: bool,
    /// Set while a delete is in flight; such categories never reach a feed.
    #[serde(default)]
    pub pending_deletion: bool,
    #[serde(default, deserialize_with = "crate::parents::deserialize")]
    pub parents: Vec<ParentRef>,
}

impl Category {
    pub fn new(id: FriendlyId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            description: String::new(),
            published: true,
            pending_deletion: false,
            parents: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<ParentRef>) -> Self {
        self.parents.push(parent.into());
        self
    }
}

impl Entity for Category {
    type Id = FriendlyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
