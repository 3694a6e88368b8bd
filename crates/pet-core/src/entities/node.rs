use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::NodeKind;

/// A selectable answer on a question node.
///
/// `next_action_id` is `None` when the answer ends the traversal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnswerOption {
    pub text: Option<String>,
    pub next_action_id: Option<i64>,
    pub response_id: Option<i64>,
}

/// Question payload: the prompt plus its outgoing options.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Question {
    pub actionable_id: i64,
    pub text: Option<String>,
    pub options: Vec<AnswerOption>,
}

/// Urgency classification attached to a result.
///
/// Joined optionally: a result without a category carries an all-`None` value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RiskCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub text_1: Option<String>,
    pub iframe_desc: Option<String>,
    pub iframe_text_1: Option<String>,
    pub country_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub rating: Option<String>,
}

/// Result payload: advisory text, risk category, and disease details.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResultDetail {
    pub risk_category: RiskCategory,
    pub additional_advice: Option<String>,
    pub first_aid_text: Option<String>,
    pub problem_text: Option<String>,
    pub travel_advice_text: Option<String>,
    pub iframe_first_aid_text: Option<String>,
    pub iframe_problem_text: Option<String>,
    /// Disease name in English.
    pub disease_name: Option<String>,
    /// Disease name in Vietnamese.
    pub name_vi: Option<String>,
    pub medications_text: Option<String>,
    pub nutrition_text: Option<String>,
    /// Structured diet advice (`should_eat`, `avoid`, `suggestion`).
    pub nutrition_advice: Option<serde_json::Value>,
    /// Illustration image references.
    pub images_json: Option<serde_json::Value>,
}

/// A hydrated question node.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionNode {
    pub id: i64,
    /// Stored variant tag.
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub question: Question,
}

/// A hydrated result node.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResultNode {
    pub id: i64,
    /// Stored variant tag. May be any non-`"Question"` value.
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub result: ResultDetail,
}

/// A decision-graph node, fully hydrated for one traversal step.
///
/// Serialised without a wrapper: clients tell the variants apart by the
/// presence of `question` or `result`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum ActionableNode {
    Question(QuestionNode),
    Result(ResultNode),
}

impl ActionableNode {
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Question(node) => node.id,
            Self::Result(node) => node.id,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Question(_) => NodeKind::Question,
            Self::Result(_) => NodeKind::Result,
        }
    }

    /// Outgoing edges of this node. Result nodes have none.
    #[must_use]
    pub fn next_action_ids(&self) -> Vec<i64> {
        match self {
            Self::Question(node) => node
                .question
                .options
                .iter()
                .filter_map(|option| option.next_action_id)
                .collect(),
            Self::Result(_) => Vec::new(),
        }
    }
}
