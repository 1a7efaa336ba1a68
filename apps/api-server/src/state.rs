//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{DraftRepository, InterestCatalog, PostRepository, TokenService};
use scribe_core::service::{DraftService, EngagementService, PublishCoordinator};
use scribe_core::validation::Validator;
use scribe_infra::{InMemoryInterestCatalog, InMemoryStore, JwtTokenService};

#[cfg(feature = "postgres")]
use scribe_infra::database::{
    DatabaseConnections, PostgresDraftRepository, PostgresInterestCatalog, PostgresPostRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub drafts: DraftService,
    pub publisher: PublishCoordinator,
    pub engagement: EngagementService,
    pub catalog: Arc<dyn InterestCatalog>,
    pub tokens: Arc<dyn TokenService>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    let catalog = Arc::new(PostgresInterestCatalog::new(
                        conn.catalog().clone(),
                        config.read_time.clone(),
                    ));
                    let mut state = Self::from_parts(
                        Arc::new(PostgresDraftRepository::new(conn.main.clone())),
                        Arc::new(PostgresPostRepository::new(conn.main.clone())),
                        catalog,
                        tokens,
                    );
                    state.db = Some(conn);
                    tracing::info!("Application state initialized (postgres)");
                    return state;
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        let state = Self::in_memory(config, tokens);
        tracing::info!("Application state initialized (in-memory)");
        state
    }

    /// State over the in-memory store and a catalog seeded from configuration.
    pub fn in_memory(config: &AppConfig, tokens: Arc<dyn TokenService>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let catalog = Arc::new(InMemoryInterestCatalog::new(
            config.interest_catalog.clone(),
            config.read_time.clone(),
        ));
        Self::from_parts(store.clone(), store, catalog, tokens)
    }

    fn from_parts(
        drafts: Arc<dyn DraftRepository>,
        posts: Arc<dyn PostRepository>,
        catalog: Arc<dyn InterestCatalog>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        let validator = Validator::new(catalog.clone());
        Self {
            drafts: DraftService::new(drafts.clone()),
            publisher: PublishCoordinator::new(drafts, posts.clone(), validator),
            engagement: EngagementService::new(posts),
            catalog,
            tokens,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Storage backend label for the health endpoint.
    pub fn storage(&self) -> &'static str {
        #[cfg(feature = "postgres")]
        if self.db.is_some() {
            return "postgres";
        }
        "memory"
    }
}
