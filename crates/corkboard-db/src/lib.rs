//! Corkboard database layer
//!
//! Repositories for the rows the application owns (posts and synced users).
//! Storage objects are not tracked here; the bucket is the source of truth
//! for uploaded images.

pub mod db;

pub use db::{PostRepository, UserRepository};
