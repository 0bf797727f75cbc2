//! Object path generation.
//!
//! Paths are `{folder}/{millisecond-timestamp}-{uuid-v4}{extension}`. The
//! UUID v4 token comes from the OS CSPRNG, so paths are unpredictable; a
//! predictable path in a public bucket would invite enumeration and
//! overwrite races. Only a bounded, lower-cased extension of the original
//! filename survives into the path.

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

/// Folder used when the caller supplies none (or only whitespace/slashes).
pub const DEFAULT_FOLDER: &str = "uploads";

/// Longest extension carried over from the original filename, dot included.
/// Anything longer falls back to `.bin`.
const MAX_EXTENSION_LEN: usize = 12;

/// Trim a folder hint and strip leading/trailing slash runs; empty input
/// collapses to [`DEFAULT_FOLDER`].
pub fn normalize_folder(folder: &str) -> String {
    let cleaned = folder.trim().trim_matches('/');
    if cleaned.is_empty() {
        DEFAULT_FOLDER.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Like [`normalize_folder`] but without the default: listing an empty
/// prefix means listing the bucket root.
pub fn normalize_prefix(prefix: &str) -> String {
    prefix.trim().trim_matches('/').to_string()
}

/// Lower-cased extension of the original filename including the dot, when
/// present and within [`MAX_EXTENSION_LEN`]; `.bin` otherwise.
fn safe_extension(original_filename: &str) -> String {
    match Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) if !ext.is_empty() && ext.len() + 1 <= MAX_EXTENSION_LEN => {
            format!(".{}", ext.to_lowercase())
        }
        _ => ".bin".to_string(),
    }
}

/// Derive a unique, traversal-safe object path for an upload.
///
/// No part of `original_filename` other than its extension reaches the
/// result, so hostile filenames cannot inject path components.
pub fn build_object_path(original_filename: &str, folder: &str) -> String {
    let safe_folder = normalize_folder(folder);
    let extension = safe_extension(original_filename);
    format!(
        "{}/{}-{}{}",
        safe_folder,
        Utc::now().timestamp_millis(),
        Uuid::new_v4(),
        extension
    )
}
