//! PostgreSQL persistence via SeaORM.

mod catalog;
mod connections;
pub mod entity;
mod postgres_base;
mod postgres_repo;

pub use catalog::PostgresInterestCatalog;
pub use connections::{
    CATALOG_DB, DatabaseConfig, DatabaseConnections, NamedConnection, SecondaryDbConfig,
};
pub use postgres_repo::{PostgresDraftRepository, PostgresPostRepository};

#[cfg(test)]
mod tests;
