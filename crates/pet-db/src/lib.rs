//! # pet-db
//!
//! libSQL storage for the pet diagnosis backend.
//!
//! Handles all relational state: the animal/symptom catalog, the decision
//! graph (`actionable` nodes with `question`, `response`, `option`, `result`,
//! and `risk_category` payloads), and the append-only feedback table.
//!
//! Layers, leaf first:
//! - [`repos`]: typed, parameterised reads and inserts (the node store)
//! - [`resolver`]: turns a node id into a hydrated [`pet_core::entities::ActionableNode`]
//! - [`catalog`]: animal and symptom listings
//! - [`import`]: offline loading of enriched disease records
//!
//! Uses the `libsql` crate, so the same code runs against a local file,
//! `:memory:`, or a remote libSQL server.

pub mod catalog;
pub mod error;
pub mod helpers;
pub mod import;
mod migrations;
pub mod repos;
pub mod resolver;
pub mod service;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Created once at startup and handed to [`service::PetService`]. The
/// `libsql::Connection` is a cheap, cloneable handle; concurrent statements
/// are serialised by the engine.
pub struct PetDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
}

impl PetDb {
    /// Open a local database at the given path (`:memory:` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let pet_db = Self {
            db,
            conn,
            remote: false,
        };
        pet_db.run_migrations().await?;
        Ok(pet_db)
    }

    /// Open a remote libSQL database over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let pet_db = Self {
            db,
            conn,
            remote: true,
        };
        pet_db.run_migrations().await?;
        Ok(pet_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle talks to a remote server.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> PetDb {
        PetDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "animal",
            "actionable",
            "symptom",
            "question",
            "response",
            "option",
            "risk_category",
            "result",
            "feedback",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
        assert!(!db.is_remote());
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        // Run migrations again: reference rows must not be duplicated
        db.run_migrations().await.unwrap();

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM risk_category", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 3);
    }

    #[tokio::test]
    async fn reference_animals_are_seeded() {
        let db = test_db().await;
        let mut rows = db
            .conn()
            .query(
                "SELECT id FROM animal WHERE \"type\" IN ('dog', 'cat') ORDER BY id",
                (),
            )
            .await
            .unwrap();
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            ids.push(row.get::<i64>(0).unwrap());
        }
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn option_next_action_must_reference_a_node() {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO actionable (id, \"type\") VALUES (1, 'Question');
                 INSERT INTO response (id, action_id) VALUES (1, 1);",
            )
            .await
            .unwrap();

        let result = db
            .conn()
            .execute(
                "INSERT INTO \"option\" (response_id, text, next_action_id) VALUES (1, 'Yes', 999)",
                (),
            )
            .await;
        assert!(result.is_err(), "dangling next_action_id should be rejected");
    }

    #[tokio::test]
    async fn file_backed_database_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.db");
        let path = path.to_str().unwrap();

        {
            let db = PetDb::open_local(path).await.unwrap();
            db.conn()
                .execute("INSERT INTO actionable (id, \"type\") VALUES (7, 'Result')", ())
                .await
                .unwrap();
        }

        let db = PetDb::open_local(path).await.unwrap();
        let mut rows = db
            .conn()
            .query("SELECT \"type\" FROM actionable WHERE id = 7", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "Result");
    }
}
