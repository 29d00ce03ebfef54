use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone. There is no in-process cache: settings and setup state
/// are read from the database on every request.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kobonat_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
