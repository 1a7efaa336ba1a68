//! In-memory implementations - the fallback when PostgreSQL is not configured.

mod catalog;
mod store;

pub use catalog::InMemoryInterestCatalog;
pub use store::InMemoryStore;
