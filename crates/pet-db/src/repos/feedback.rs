//! Feedback sink: append-only free-text feedback.
//!
//! Rows are inserted, listed, and never updated or deleted.

use chrono::{SecondsFormat, Utc};

use pet_core::entities::Feedback;
use pet_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_i64, parse_datetime};
use crate::service::PetService;

/// Upper bound on rows returned by [`PetService::list_feedback`].
pub const FEEDBACK_LIST_LIMIT: u32 = 100;

/// Longest accepted feedback body, in characters.
pub const MAX_FEEDBACK_CHARS: usize = 2000;

const FEEDBACK_COLS: &str = "id, diagnose_id, content, created_at";

impl PetService {
    /// Store one feedback entry and return it with its assigned id and timestamp.
    ///
    /// `diagnose_id` is stored as given; it is not checked against the
    /// decision graph.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` (wrapped) if `content` is blank or
    /// longer than [`MAX_FEEDBACK_CHARS`]; nothing is inserted in that case.
    /// Returns `DatabaseError` if the insert fails.
    pub async fn create_feedback(
        &self,
        diagnose_id: Option<i64>,
        content: &str,
    ) -> Result<Feedback, DatabaseError> {
        validate_content(content)?;

        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO feedback (diagnose_id, content, created_at) VALUES (?1, ?2, ?3)
                 RETURNING id, created_at",
                libsql::params![diagnose_id, content, now],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        let feedback = Feedback {
            id: row.get::<i64>(0)?,
            diagnose_id,
            content: content.to_string(),
            created_at: parse_datetime(&row.get::<String>(1)?)?,
        };
        tracing::info!(feedback_id = feedback.id, ?diagnose_id, "feedback stored");
        Ok(feedback)
    }

    /// List the most recent feedback, newest first, capped at
    /// [`FEEDBACK_LIST_LIMIT`] rows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_feedback(&self) -> Result<Vec<Feedback>, DatabaseError> {
        let sql = format!(
            "SELECT {FEEDBACK_COLS} FROM feedback
             ORDER BY created_at DESC, id DESC LIMIT {FEEDBACK_LIST_LIMIT}"
        );
        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_feedback(&row)?);
        }
        Ok(entries)
    }
}

fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("content is required".into()));
    }
    if content.chars().count() > MAX_FEEDBACK_CHARS {
        return Err(CoreError::Validation(format!(
            "content must be at most {MAX_FEEDBACK_CHARS} characters"
        )));
    }
    Ok(())
}

fn row_to_feedback(row: &libsql::Row) -> Result<Feedback, DatabaseError> {
    Ok(Feedback {
        id: row.get::<i64>(0)?,
        diagnose_id: get_opt_i64(row, 1)?,
        content: row.get::<String>(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}
