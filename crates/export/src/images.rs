//! Image URL construction.
//!
//! Only the first image of an item (or variation) is exported. Images are
//! hosted in object storage; the URL is `{base_url}/{container}/{owner}/{file}`.

use discover_core::{FriendlyId, ImageId};
use tracing::error;

use crate::context::ExportContext;
use crate::error::ExportResult;
use crate::settings::CloudStoragePolicy;
use crate::tracker::{FeedKind, StepOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    base_url: String,
    container: String,
}

impl ImageUrlBuilder {
    /// `None` unless connection string, base URL and container are all set.
    pub fn from_policy(policy: &CloudStoragePolicy) -> Option<Self> {
        policy.is_valid().then(|| Self {
            base_url: policy.base_url.trim().trim_end_matches('/').to_string(),
            container: policy.container.trim().trim_matches('/').to_string(),
        })
    }

    /// Deterministic URL of `file_name` stored for `owner`.
    pub fn url(&self, owner: &FriendlyId, file_name: &str) -> String {
        let owner = owner.to_string();
        let mut url = self.base_url.clone();
        for segment in [self.container.as_str(), owner.as_str(), file_name] {
            let segment = segment.trim_matches('/');
            if segment.is_empty() {
                continue;
            }
            url.push('/');
            url.push_str(segment);
        }
        url
    }
}

/// URL of the first image in `images`, or empty.
///
/// A missing image asset is counted as an image error and yields an empty
/// URL; it never fails the owning product.
pub fn first_image_url(
    ctx: &ExportContext<'_>,
    owner: &FriendlyId,
    images: &[ImageId],
) -> ExportResult<String> {
    let (Some(builder), Some(image_id)) = (ctx.images.as_ref(), images.first()) else {
        return Ok(String::new());
    };

    match ctx.source.find_image(image_id)? {
        Some(asset) => {
            ctx.tracker
                .record_anonymous(FeedKind::ProductImages, StepOutcome::Appended);
            Ok(builder.url(owner, &asset.name))
        }
        None => {
            ctx.tracker
                .record_anonymous(FeedKind::ProductImages, StepOutcome::Errored);
            error!(image = %image_id, owner = %owner, "image asset not found");
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(base: &str, container: &str) -> ImageUrlBuilder {
        ImageUrlBuilder::from_policy(&CloudStoragePolicy {
            connection_string: "conn".into(),
            base_url: base.into(),
            container: container.into(),
        })
        .unwrap()
    }

    #[test]
    fn joins_segments_with_single_slashes() {
        let owner = FriendlyId::new("Shop", "P1").unwrap();
        let expected = "https://cdn.example.com/images/Shop-P1/shirt.png";

        assert_eq!(builder("https://cdn.example.com", "images").url(&owner, "shirt.png"), expected);
        assert_eq!(builder("https://cdn.example.com/", "/images/").url(&owner, "/shirt.png"), expected);
    }

    #[test]
    fn incomplete_policy_disables_urls() {
        let policy = CloudStoragePolicy {
            connection_string: String::new(),
            base_url: "https://cdn.example.com".into(),
            container: "images".into(),
        };
        assert!(ImageUrlBuilder::from_policy(&policy).is_none());
    }
}
