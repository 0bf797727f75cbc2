//! Authentication: identity-provider client, middleware, and request
//! extractors.

pub mod middleware;
pub mod models;
pub mod provider;

pub use middleware::auth_middleware;
pub use models::CurrentUser;
pub use provider::{GoTrueProvider, IdentityProvider};
