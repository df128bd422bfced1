use std::sync::Arc;

use aquareport_db::DbPool;
use aquareport_notify::Notifier;

use crate::config::ServerConfig;
use crate::storage::BlobStore;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: DbPool,
    /// Server configuration (immutable after startup).
    pub config: Arc<ServerConfig>,
    /// Best-effort email notifications.
    pub notifier: Arc<Notifier>,
    /// Image storage backend.
    pub blob_store: Arc<dyn BlobStore>,
}
