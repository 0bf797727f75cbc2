//! Types used by the upload service

use corkboard_core::ImageKind;

/// An upload that has passed every validation stage.
///
/// Produced only by [`super::UploadService::validate`]; the store stage
/// accepts nothing else, so bytes cannot reach storage without having been
/// validated first.
pub struct ValidatedImage {
    pub data: Vec<u8>,
    /// Format detected from the leading bytes. Persisted as the object's
    /// content type; the client-declared type is discarded here.
    pub kind: ImageKind,
}
