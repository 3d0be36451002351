use std::sync::Arc;

use feedback_db::store::PgFeedbackStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and store share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: feedback_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Read-side store handed to the resolvers.
    pub store: PgFeedbackStore,
}

impl AppState {
    pub fn new(pool: feedback_db::DbPool, config: ServerConfig) -> Self {
        Self {
            store: PgFeedbackStore::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}
