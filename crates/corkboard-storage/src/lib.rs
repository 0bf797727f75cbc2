//! Corkboard Storage Library
//!
//! This crate provides the object-storage abstraction and its backends: the
//! managed platform bucket (REST), the local filesystem (development), and an
//! in-memory fake (tests). It also owns object-path generation.
//!
//! # Object path format
//!
//! `{folder}/{millisecond-timestamp}-{uuid-v4}{extension}`, generated by the
//! `keys` module. Folders are normalized (no leading/trailing slashes, empty
//! falls back to `uploads`); nothing of the original filename except a
//! bounded, lower-cased extension reaches the path.

pub mod factory;
pub mod keys;
pub mod local;
pub mod memory;
pub mod supabase;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{build_object_path, normalize_folder, normalize_prefix, DEFAULT_FOLDER};
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use supabase::SupabaseStorage;
pub use traits::{ListOptions, ObjectInfo, Storage, StorageError, StorageResult, UploadOptions};
