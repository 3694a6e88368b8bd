//! JSON shape and JsonSchema validation tests for the API-facing entities.
//!
//! Absent values must serialise as `null`, and the untagged node union must
//! resolve to the right variant when read back.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use schemars::schema_for;
use serde_json::json;

use pet_core::entities::*;
use pet_core::enums::NodeKind;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn sample_question() -> ActionableNode {
    ActionableNode::Question(QuestionNode {
        id: 100,
        node_type: Some("Question".into()),
        created_at: None,
        updated_at: None,
        question: Question {
            actionable_id: 100,
            text: Some("Is your dog vomiting?".into()),
            options: vec![
                AnswerOption {
                    text: Some("Yes".into()),
                    next_action_id: Some(200),
                    response_id: Some(1),
                },
                AnswerOption {
                    text: Some("No".into()),
                    next_action_id: None,
                    response_id: Some(2),
                },
            ],
        },
    })
}

fn sample_result() -> ActionableNode {
    ActionableNode::Result(ResultNode {
        id: 200,
        node_type: Some("Result".into()),
        created_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()),
        updated_at: None,
        result: ResultDetail {
            risk_category: RiskCategory {
                name: Some("urgent".into()),
                ..RiskCategory::default()
            },
            problem_text: Some("Possible gastric torsion".into()),
            nutrition_advice: Some(json!({"should_eat": ["rice"], "avoid": ["bones"]})),
            ..ResultDetail::default()
        },
    })
}

#[test]
fn absent_animal_fields_serialise_as_null() {
    let animal = Animal {
        id: 1,
        name: Some("Dog".into()),
        animal_type: None,
        animal_order: None,
        image: None,
    };
    let value = serde_json::to_value(&animal).unwrap();
    assert_eq!(
        value,
        json!({"id": 1, "name": "Dog", "type": null, "animal_order": null, "image": null})
    );
}

#[test]
fn empty_risk_category_is_object_of_nulls() {
    let value = serde_json::to_value(RiskCategory::default()).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 9);
    assert!(object.values().all(serde_json::Value::is_null));
}

#[test]
fn question_node_has_no_wrapper_tag() {
    let value = serde_json::to_value(sample_question()).unwrap();
    assert_eq!(value["id"], 100);
    assert_eq!(value["type"], "Question");
    assert_eq!(value["question"]["options"][0]["next_action_id"], 200);
    assert!(value["question"]["options"][1]["next_action_id"].is_null());
    assert!(value.get("Question").is_none());
}

#[test]
fn untagged_union_reads_back_into_matching_variant() {
    for node in [sample_question(), sample_result()] {
        let text = serde_json::to_string(&node).unwrap();
        let recovered: ActionableNode = serde_json::from_str(&text).unwrap();
        assert_eq!(recovered.kind(), node.kind());
        assert_eq!(recovered, node);
    }
}

#[test]
fn next_action_ids_skip_terminal_options() {
    assert_eq!(sample_question().next_action_ids(), vec![200]);
    assert!(sample_result().next_action_ids().is_empty());
    assert_eq!(sample_result().kind(), NodeKind::Result);
}

#[test]
fn nodes_validate_against_schema() {
    let schema = serde_json::to_value(schema_for!(ActionableNode)).unwrap();
    for node in [sample_question(), sample_result()] {
        let instance = serde_json::to_value(&node).unwrap();
        let errors = validate_against_schema(&schema, &instance);
        assert!(errors.is_empty(), "schema validation failed: {errors:?}");
    }
}

#[test]
fn feedback_validates_against_schema() {
    let feedback = Feedback {
        id: 7,
        diagnose_id: None,
        content: "Very helpful".into(),
        created_at: Utc::now(),
    };
    let schema = serde_json::to_value(schema_for!(Feedback)).unwrap();
    let instance = serde_json::to_value(&feedback).unwrap();
    assert!(instance["diagnose_id"].is_null());
    assert!(validate_against_schema(&schema, &instance).is_empty());
}

#[test]
fn affiliate_product_nulls() {
    let product = AffiliateProduct {
        disease_id: "42".into(),
        product_name: Some("Probiotic paste".into()),
        link_shopee: None,
        color: Some("green".into()),
        reason: None,
        pet_type: Some("all".into()),
    };
    let value = serde_json::to_value(&product).unwrap();
    assert_eq!(value["disease_id"], "42");
    assert!(value["link_shopee"].is_null());
    assert!(value["reason"].is_null());
}
