//! Database Module
//!
//! Opens the SurrealDB connection and applies the schema.
//!
//! The connection string picks the engine:
//!
//! | URL | Engine |
//! |-----|--------|
//! | `mem://` | in-memory (tests) |
//! | `rocksdb://data/staff.db` | embedded RocksDB |
//! | `ws://host:8000` | remote server |

pub mod repository;
pub mod schema;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;

use crate::core::config::DatabaseConfig;
use crate::utils::AppError;

/// Database service, owns the process-wide SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Any>,
}

impl DbService {
    /// Connect, authenticate if credentials are configured, select the
    /// namespace/database and apply the schema
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        if let Some(path) = config.url.strip_prefix("rocksdb://")
            && let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::database(format!("Failed to create data directory: {e}"))
            })?;
        }

        let db = any::connect(config.url.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            db.signin(Root {
                username: username.as_str(),
                password: password.as_str(),
            })
            .await
            .map_err(|e| AppError::database(format!("Failed to sign in: {e}")))?;
        }

        db.use_ns(config.namespace.clone())
            .use_db(config.database.clone())
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        tracing::info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Database connection established"
        );

        schema::apply(&db)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }

    /// In-memory database with the schema applied
    pub async fn open_in_memory() -> Result<Self, AppError> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    /// Round-trip to the engine
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.db
            .health()
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }
}
