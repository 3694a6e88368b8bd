use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Anonymous free-text feedback, optionally tied to a diagnosis node.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Feedback {
    pub id: i64,
    /// Not validated against `actionable`; feedback is free-floating.
    pub diagnose_id: Option<i64>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
