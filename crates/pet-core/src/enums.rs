//! Node kinds, risk levels, and species.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! except [`NodeKind`], whose tags are stored capitalised in the `actionable.type`
//! column (`"Question"`, `"Result"`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// Variant of a decision-graph node.
///
/// Only the literal tag `"Question"` selects [`NodeKind::Question`]. Every other
/// tag, including unknown ones, falls through to [`NodeKind::Result`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum NodeKind {
    Question,
    Result,
}

impl NodeKind {
    /// Classify a stored `actionable.type` tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag == Self::Question.as_str() {
            Self::Question
        } else {
            Self::Result
        }
    }

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "Question",
            Self::Result => "Result",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Urgency classification backed by the three reference `risk_category` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Urgent,
    NonUrgent,
    LowRisk,
}

impl RiskLevel {
    /// Severity assumed when a record carries no usable score.
    pub const DEFAULT_SEVERITY: f64 = 5.0;

    /// Map a 0-10 severity score onto a risk level.
    ///
    /// ```text
    /// score >= 8  → urgent
    /// score >= 5  → non_urgent
    /// otherwise   → low_risk
    /// ```
    #[must_use]
    pub fn from_severity(score: f64) -> Self {
        if score >= 8.0 {
            Self::Urgent
        } else if score >= 5.0 {
            Self::NonUrgent
        } else {
            Self::LowRisk
        }
    }

    /// Primary key of the seeded `risk_category` row.
    #[must_use]
    pub const fn category_id(self) -> i64 {
        match self {
            Self::Urgent => 1,
            Self::NonUrgent => 2,
            Self::LowRisk => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::NonUrgent => "non_urgent",
            Self::LowRisk => "low_risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// Species an imported disease applies to. Matches `animal.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    /// Classify free-form species text. Unrecognised text defaults to [`Species::Dog`].
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("dog") || lower.contains("canine") {
            Self::Dog
        } else if lower.contains("cat") || lower.contains("feline") {
            Self::Cat
        } else {
            Self::Dog
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
