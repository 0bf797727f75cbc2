//! Public image upload pipeline.

mod service;
mod types;

pub use service::UploadService;
pub use types::ValidatedImage;
