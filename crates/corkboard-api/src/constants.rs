//! API constants.

/// Base path prefix for every route.
pub const API_PREFIX: &str = "/api";
