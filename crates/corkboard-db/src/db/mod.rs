//! Database repositories for the data access layer
//!
//! Each repository is responsible for a single domain entity and provides
//! the queries the HTTP layer needs; no query strings live in handlers.

pub mod posts;
pub mod users;

pub use posts::PostRepository;
pub use users::UserRepository;
