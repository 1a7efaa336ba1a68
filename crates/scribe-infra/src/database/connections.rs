use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Name of the optional secondary database holding the interest catalog.
pub const CATALOG_DB: &str = "catalog";

/// Configuration for the main database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub main_url: String,
    pub main_max_connections: u32,
    pub main_min_connections: u32,
    pub secondary_databases: Vec<SecondaryDbConfig>,
}

/// Configuration for a secondary database.
#[derive(Debug, Clone)]
pub struct SecondaryDbConfig {
    pub name: String,
    pub url: String,
    pub max_connections: u32,
}

/// A named connection to a secondary database.
pub struct NamedConnection {
    pub name: String,
    pub conn: DbConn,
}

/// Multi-database connection manager.
///
/// Drafts and posts always live in `main`. The interest catalog may be served
/// from a secondary database named [`CATALOG_DB`]; otherwise it shares `main`.
///
/// # Example
/// ```ignore
/// let db = DatabaseConnections::init(&config).await?;
/// let drafts = PostgresDraftRepository::new(db.main.clone());
/// let catalog = PostgresInterestCatalog::new(db.catalog().clone(), policy);
/// ```
pub struct DatabaseConnections {
    /// Primary database.
    pub main: DbConn,
    /// Secondary databases, looked up by name.
    pub secondary: Vec<NamedConnection>,
}

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

fn pool_options(url: &str, max: u32, min: u32) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(max)
        .min_connections(min)
        .connect_timeout(CONNECT_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .sqlx_logging(false);
    opts
}

impl DatabaseConnections {
    /// Open the main pool, then every configured secondary pool.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let main = Database::connect(pool_options(
            &config.main_url,
            config.main_max_connections,
            config.main_min_connections,
        ))
        .await?;
        tracing::info!(
            pool = config.main_max_connections,
            "Connected to main database"
        );

        let mut secondary = Vec::with_capacity(config.secondary_databases.len());
        for db in &config.secondary_databases {
            let conn = Database::connect(pool_options(&db.url, db.max_connections, 1)).await?;
            tracing::info!(
                name = %db.name,
                pool = db.max_connections,
                "Connected to secondary database"
            );
            secondary.push(NamedConnection {
                name: db.name.clone(),
                conn,
            });
        }

        if secondary.iter().all(|named| named.name != CATALOG_DB) {
            tracing::debug!("No '{CATALOG_DB}' database configured; catalog shares main");
        }

        Ok(Self { main, secondary })
    }

    /// Get a secondary database connection by name.
    pub fn get(&self, name: &str) -> Option<&DbConn> {
        self.secondary
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.conn)
    }

    /// Connection serving the interest catalog.
    pub fn catalog(&self) -> &DbConn {
        self.get(CATALOG_DB).unwrap_or(&self.main)
    }

    /// Ping every pool.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.main.ping().await?;
        for named in &self.secondary {
            named.conn.ping().await?;
        }
        Ok(())
    }
}
