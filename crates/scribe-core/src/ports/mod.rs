//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod catalog;
mod repository;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use catalog::InterestCatalog;
pub use repository::{DraftRepository, PostRepository};
