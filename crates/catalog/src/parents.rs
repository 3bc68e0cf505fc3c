//! Serde helper for direct-parent lists.
//!
//! Parent lists arrive either as a JSON array or as a single `|`-joined string.

use discover_core::ParentRef;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawParents {
    Joined(String),
    List(Vec<String>),
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<ParentRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = match RawParents::deserialize(deserializer)? {
        RawParents::Joined(joined) => ParentRef::parse_list(&joined),
        RawParents::List(list) => list
            .iter()
            .flat_map(|entry| ParentRef::parse_list(entry))
            .collect(),
    };
    Ok(refs)
}
