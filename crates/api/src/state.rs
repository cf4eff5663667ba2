use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notify::Notifier;

/// Shared application state, reached from handlers via `State<AppState>`.
///
/// Cloning is cheap: the pool and notifier clone by handle and the config
/// sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: helios_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Fire-and-forget webhook notifier for reclamation transitions.
    pub notifier: Notifier,
}
