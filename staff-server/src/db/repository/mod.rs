//! Repository Module
//!
//! CRUD operations over SurrealDB tables.

pub mod employee;

pub use employee::EmployeeRepository;

use shared::SchemaError;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("{0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<SchemaError> for RepoError {
    fn from(err: SchemaError) -> Self {
        RepoError::Validation(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention
// =============================================================================
//
// Records are keyed `table:key`; only the key leaves the repository.
//   - 创建: RecordId::from_table_key("employee", key)
//   - 查询: record::id(id) AS id 投影出纯 key
//
// Never splice ids into SurrealQL text; always bind them as `$thing`.

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Any>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Any> {
        &self.db
    }
}
