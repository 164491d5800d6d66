use std::sync::Arc;

use tracing::{error, info};

use crate::config::{AppConfig, StoreBackend};
use crate::store::{MemoryStore, PgStore, Store, UnavailableStore};

/// Shared by every handler; services are derived from it through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    /// Opens the configured store. A database that cannot be reached is
    /// logged and replaced by a store that fails every call, so the server
    /// still starts.
    pub async fn init(config: &AppConfig) -> Self {
        let store: Arc<dyn Store> = match config.store_backend {
            StoreBackend::Memory => {
                info!("using in-memory store");
                return Self::in_memory();
            }
            StoreBackend::Postgres => match PgStore::connect(&config.database).await {
                Ok(store) => {
                    info!("connected to database");
                    Arc::new(store)
                }
                Err(e) => {
                    let reason = format!("{e:#}");
                    error!(error = %reason, "database connection failed; serving without a store");
                    Arc::new(UnavailableStore::new(reason))
                }
            },
        };
        Self::from_store(store)
    }

    pub fn from_store(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[tokio::test]
    async fn unreachable_database_degrades_instead_of_failing() {
        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            store_backend: StoreBackend::Postgres,
            database: DatabaseConfig {
                // Not a valid connection string, so connecting fails immediately.
                url: "definitely-not-a-url".into(),
                max_connections: 1,
            },
        };
        let state = AppState::init(&config).await;
        let err = state.store.find_books_by_owner(uuid::Uuid::new_v4()).await.unwrap_err();
        assert!(err.to_string().contains("store unavailable"));
    }
}
