//! Service layer over the raw database handle.
//!
//! `PetService` wraps `PetDb`. Repository reads, node resolution, catalog
//! listings, feedback, and disease import are all implemented as
//! `impl PetService` blocks in their own modules.

use pet_config::DatabaseConfig;

use crate::PetDb;
use crate::error::DatabaseError;

/// Entry point for every storage operation.
///
/// Shared across request handlers behind an `Arc`; all methods take `&self`.
pub struct PetService {
    db: PetDb,
}

impl PetService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = PetDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create a service backed by a remote libSQL server.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the server cannot be reached.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = PetDb::open_remote(url, auth_token).await?;
        Ok(Self { db })
    }

    /// Open whichever backend the configuration points at.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            tracing::info!(url = %config.url, "opening remote database");
            Self::new_remote(&config.url, &config.auth_token).await
        } else {
            tracing::info!(path = %config.url, "opening local database");
            Self::new_local(&config.url).await
        }
    }

    /// Create from an existing `PetDb` (for testing).
    #[must_use]
    pub const fn from_db(db: PetDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &PetDb {
        &self.db
    }
}
