use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of a successful public image upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoredImage {
    /// Object path inside the public bucket, e.g. `uploads/1700000000000-....png`
    #[schema(example = "uploads/1700000000000-7f3c1f9e-....png")]
    pub path: String,
    /// Public URL resolving to the stored object.
    pub url: String,
}

/// One entry of a bucket listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageItem {
    #[schema(example = "1700000000000-sample.png")]
    pub name: String,
    #[schema(example = "uploads/1700000000000-sample.png")]
    pub path: String,
    pub url: String,
}
