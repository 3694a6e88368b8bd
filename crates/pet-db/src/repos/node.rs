//! Node store: reads over the decision graph.
//!
//! A node is an `actionable` row whose `"type"` tag picks the payload tables:
//! `question` + `response` + `option` for questions, `response` + `result` +
//! `risk_category` for everything else. All payload joins are LEFT joins, so
//! a node with missing payload rows hydrates with `None` fields instead of
//! failing.

use pet_core::entities::{
    AnswerOption, Question, QuestionNode, ResultDetail, ResultNode, RiskCategory,
};
use pet_core::enums::NodeKind;
use pet_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_datetime, get_opt_i64, get_opt_string, parse_lenient_json};
use crate::service::PetService;

const NODE_COLS: &str = "a.id, a.\"type\", a.created_at, a.updated_at";

const RESULT_COLS: &str = "res.additional_advice, res.first_aid_text, res.problem_text, \
     res.travel_advice_text, res.iframe_first_aid_text, res.iframe_problem_text, \
     res.disease_name, res.name_vi, res.medications_text, res.nutrition_text, \
     res.nutrition_advice, res.images_json";

const RISK_COLS: &str = "rc.name, rc.description, rc.text_1, rc.iframe_desc, rc.iframe_text_1, \
     rc.country_id, rc.created_at, rc.updated_at, rc.rating";

impl PetService {
    /// Read the variant of a node.
    ///
    /// Returns `None` when no node has this id. A NULL or unrecognised tag
    /// classifies as [`NodeKind::Result`].
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn fetch_node_variant(&self, id: i64) -> Result<Option<NodeKind>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT \"type\" FROM actionable WHERE id = ?1", [id])
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let tag = get_opt_string(&row, 0)?;
        Ok(Some(NodeKind::from_tag(tag.as_deref().unwrap_or_default())))
    }

    /// Fetch the options of a question node, joined through `response`.
    ///
    /// One entry per response row authored under the node; a response with
    /// no option row contributes an all-`None` entry. Nodes without a
    /// `question` row have no options.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn fetch_options_for_question(
        &self,
        id: i64,
    ) -> Result<Vec<AnswerOption>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT o.text, o.next_action_id, o.response_id
                 FROM response r
                 JOIN question q ON q.actionable_id = r.action_id
                 LEFT JOIN \"option\" o ON o.response_id = r.id
                 WHERE r.action_id = ?1
                 ORDER BY r.id, o.id",
                [id],
            )
            .await?;

        let mut options = Vec::new();
        while let Some(row) = rows.next().await? {
            options.push(AnswerOption {
                text: get_opt_string(&row, 0)?,
                next_action_id: get_opt_i64(&row, 1)?,
                response_id: get_opt_i64(&row, 2)?,
            });
        }
        Ok(options)
    }

    /// Hydrate a question node: prompt text plus options.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) if no node has this id, or
    /// `DatabaseError` if a query fails.
    pub async fn fetch_question_node(&self, id: i64) -> Result<QuestionNode, DatabaseError> {
        let sql = format!(
            "SELECT {NODE_COLS}, q.actionable_id, q.text
             FROM actionable a
             LEFT JOIN question q ON q.actionable_id = a.id
             WHERE a.id = ?1"
        );
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("actionable", id))?;

        let node_id = row.get::<i64>(0)?;
        let options = self.fetch_options_for_question(id).await?;

        Ok(QuestionNode {
            id: node_id,
            node_type: get_opt_string(&row, 1)?,
            created_at: get_opt_datetime(&row, 2)?,
            updated_at: get_opt_datetime(&row, 3)?,
            question: Question {
                actionable_id: get_opt_i64(&row, 4)?.unwrap_or(node_id),
                text: get_opt_string(&row, 5)?,
                options,
            },
        })
    }

    /// Hydrate a result node with its advisory payload and risk category.
    ///
    /// When several responses under the node carry results, the one on the
    /// lowest response id wins.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) if no node has this id, or
    /// `DatabaseError` if a query fails.
    pub async fn fetch_result_node(&self, id: i64) -> Result<ResultNode, DatabaseError> {
        let sql = format!(
            "SELECT {NODE_COLS}, {RESULT_COLS}, {RISK_COLS}
             FROM actionable a
             LEFT JOIN response r ON r.action_id = a.id
             LEFT JOIN result res ON res.response_id = r.id
             LEFT JOIN risk_category rc ON rc.id = res.risk_category_id
             WHERE a.id = ?1
             ORDER BY res.id IS NULL, r.id, res.id
             LIMIT 1"
        );
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("actionable", id))?;
        row_to_result_node(&row)
    }
}

fn row_to_result_node(row: &libsql::Row) -> Result<ResultNode, DatabaseError> {
    let risk_category = RiskCategory {
        name: get_opt_string(row, 16)?,
        description: get_opt_string(row, 17)?,
        text_1: get_opt_string(row, 18)?,
        iframe_desc: get_opt_string(row, 19)?,
        iframe_text_1: get_opt_string(row, 20)?,
        country_id: get_opt_string(row, 21)?,
        created_at: get_opt_datetime(row, 22)?,
        updated_at: get_opt_datetime(row, 23)?,
        rating: get_opt_string(row, 24)?,
    };

    let result = ResultDetail {
        risk_category,
        additional_advice: get_opt_string(row, 4)?,
        first_aid_text: get_opt_string(row, 5)?,
        problem_text: get_opt_string(row, 6)?,
        travel_advice_text: get_opt_string(row, 7)?,
        iframe_first_aid_text: get_opt_string(row, 8)?,
        iframe_problem_text: get_opt_string(row, 9)?,
        disease_name: get_opt_string(row, 10)?,
        name_vi: get_opt_string(row, 11)?,
        medications_text: get_opt_string(row, 12)?,
        nutrition_text: get_opt_string(row, 13)?,
        nutrition_advice: parse_lenient_json(get_opt_string(row, 14)?.as_deref()),
        images_json: parse_lenient_json(get_opt_string(row, 15)?.as_deref()),
    };

    Ok(ResultNode {
        id: row.get::<i64>(0)?,
        node_type: get_opt_string(row, 1)?,
        created_at: get_opt_datetime(row, 2)?,
        updated_at: get_opt_datetime(row, 3)?,
        result,
    })
}

#[cfg(test)]
mod tests {
    use pet_core::enums::NodeKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use crate::test_support::seeded_service;

    #[rstest]
    #[case(100, Some(NodeKind::Question))]
    #[case(200, Some(NodeKind::Result))]
    #[case(300, Some(NodeKind::Result))]
    #[case(500, Some(NodeKind::Result))]
    #[case(9999, None)]
    #[tokio::test]
    async fn node_variant(#[case] id: i64, #[case] expected: Option<NodeKind>) {
        let svc = seeded_service().await;
        assert_eq!(svc.fetch_node_variant(id).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn options_follow_response_rows() {
        let svc = seeded_service().await;
        let options = svc.fetch_options_for_question(100).await.unwrap();
        let pairs: Vec<_> = options
            .iter()
            .map(|o| (o.text.as_deref(), o.next_action_id, o.response_id))
            .collect();
        assert_eq!(
            pairs,
            vec![(Some("Yes"), Some(200), Some(1)), (Some("No"), Some(201), Some(2))]
        );
    }

    #[tokio::test]
    async fn question_without_responses_has_no_options() {
        let svc = seeded_service().await;
        assert!(svc.fetch_options_for_question(400).await.unwrap().is_empty());
        // Result nodes have responses but no question row
        assert!(svc.fetch_options_for_question(200).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn response_without_option_yields_empty_entry() {
        let svc = seeded_service().await;
        svc.db()
            .conn()
            .execute("INSERT INTO response (id, action_id) VALUES (9, 400)", ())
            .await
            .unwrap();
        let options = svc.fetch_options_for_question(400).await.unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0], pet_core::entities::AnswerOption::default());
    }

    #[tokio::test]
    async fn question_node_is_hydrated() {
        let svc = seeded_service().await;
        let node = svc.fetch_question_node(100).await.unwrap();
        assert_eq!(node.id, 100);
        assert_eq!(node.node_type.as_deref(), Some("Question"));
        assert_eq!(node.question.actionable_id, 100);
        assert_eq!(
            node.question.text.as_deref(),
            Some("Has your dog vomited more than twice today?")
        );
        assert_eq!(node.question.options.len(), 2);
        assert!(node.created_at.is_some());
    }

    #[tokio::test]
    async fn result_node_carries_risk_category() {
        let svc = seeded_service().await;
        let node = svc.fetch_result_node(200).await.unwrap();
        assert_eq!(node.result.risk_category.name.as_deref(), Some("urgent"));
        assert_eq!(node.result.risk_category.rating.as_deref(), Some("high"));
        assert_eq!(node.result.disease_name.as_deref(), Some("Gastric obstruction"));
        assert_eq!(
            node.result.nutrition_advice,
            Some(json!({"should_eat": ["boiled rice"], "avoid": ["bones"], "suggestion": "small meals"}))
        );
        assert_eq!(
            node.result.images_json,
            Some(json!(["https://img.example/gastric-1.jpg"]))
        );
        assert_eq!(node.result.additional_advice, None);
    }

    #[tokio::test]
    async fn missing_risk_category_leaves_nulls() {
        let svc = seeded_service().await;
        let node = svc.fetch_result_node(201).await.unwrap();
        assert_eq!(node.result.problem_text.as_deref(), Some("Mild indigestion"));
        assert_eq!(node.result.risk_category, pet_core::entities::RiskCategory::default());
    }

    #[tokio::test]
    async fn result_node_without_payload_is_all_null() {
        let svc = seeded_service().await;
        let node = svc.fetch_result_node(500).await.unwrap();
        assert_eq!(node.id, 500);
        assert_eq!(node.node_type, None);
        assert_eq!(node.created_at, None);
        assert_eq!(node.result, pet_core::entities::ResultDetail::default());
    }

    #[tokio::test]
    async fn unknown_node_is_not_found() {
        let svc = seeded_service().await;
        assert!(svc.fetch_result_node(9999).await.unwrap_err().is_not_found());
        assert!(svc.fetch_question_node(9999).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn out_of_range_ids_resolve_to_nothing() {
        let svc = seeded_service().await;
        assert_eq!(svc.fetch_node_variant(-1).await.unwrap(), None);
        assert_eq!(svc.fetch_node_variant(i64::MAX).await.unwrap(), None);
        assert_eq!(svc.fetch_node_variant(100).await.unwrap(), Some(NodeKind::Question));
    }
}
