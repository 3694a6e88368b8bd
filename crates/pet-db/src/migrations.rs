//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. Every statement is idempotent (`IF NOT EXISTS`,
//! `INSERT OR IGNORE`), so reopening an existing database is safe.

use crate::PetDb;
use crate::error::DatabaseError;

/// Schema: catalog, decision graph, and feedback tables.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");
/// Reference rows: risk categories 1-3 and the dog/cat animals.
const MIGRATION_002: &str = include_str!("../migrations/002_reference_data.sql");

impl PetDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        self.conn
            .execute_batch(MIGRATION_002)
            .await
            .map_err(|e| DatabaseError::Migration(format!("002_reference_data: {e}")))?;
        tracing::debug!(remote = self.remote, "migrations applied");
        Ok(())
    }
}
