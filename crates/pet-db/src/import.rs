//! Offline disease import.
//!
//! Loads enriched disease records (a JSON array) into the decision graph.
//! Each record becomes one `Result` node with a response and result row; each
//! species present gets one symptom group pointing at its first imported
//! node. The whole batch commits in a single transaction.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use pet_core::enums::{NodeKind, RiskLevel, Species};
use pet_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::helpers::json_column;
use crate::service::PetService;

/// Longest stored disease name, in characters.
pub const MAX_NAME_CHARS: usize = 400;

/// One enriched disease record as produced by the content pipeline.
///
/// Unknown keys are ignored; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiseaseRecord {
    pub disease_name: Option<String>,
    pub disease_name_vi: Option<String>,
    pub species: Option<String>,
    /// Number or numeric string on a 0-10 scale.
    pub severity_score: serde_json::Value,
    #[serde(alias = "summary_vi")]
    pub problem_text: Option<String>,
    #[serde(alias = "first_aid_text_vi")]
    pub first_aid_text: Option<String>,
    #[serde(alias = "medications_text_vi")]
    pub medications_text: Option<String>,
    #[serde(alias = "diet_vi_string")]
    pub nutrition_text: Option<String>,
    pub nutrition_advice: serde_json::Value,
    pub images_json: serde_json::Value,
}

impl DiseaseRecord {
    /// Risk level derived from `severity_score`; unusable scores count as
    /// [`RiskLevel::DEFAULT_SEVERITY`].
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        let score = match &self.severity_score {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        RiskLevel::from_severity(
            score
                .filter(|s| s.is_finite())
                .unwrap_or(RiskLevel::DEFAULT_SEVERITY),
        )
    }

    #[must_use]
    pub fn species(&self) -> Species {
        Species::from_text(self.species.as_deref().unwrap_or_default())
    }

    fn name(&self) -> Option<String> {
        non_empty(self.disease_name.as_deref()).map(cap_name)
    }

    fn name_vi(&self) -> Option<String> {
        non_empty(self.disease_name_vi.as_deref())
            .map(cap_name)
            .or_else(|| self.name())
    }
}

/// Counts reported after a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub diseases: usize,
    pub symptom_groups: usize,
    pub species: Vec<Species>,
}

/// Read and parse a disease file.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if the file cannot be read, or
/// `CoreError::Validation` (wrapped) if it is not a JSON array of records.
pub async fn load_disease_file(path: &Path) -> Result<Vec<DiseaseRecord>, DatabaseError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DatabaseError::Other(anyhow::anyhow!("reading {}: {e}", path.display())))?;
    let records = serde_json::from_str(&text).map_err(|e| {
        CoreError::Validation(format!("{} is not a disease record array: {e}", path.display()))
    })?;
    Ok(records)
}

impl PetService {
    /// Import disease records into the decision graph.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` (wrapped) for an empty batch,
    /// `CoreError::NotFound` (wrapped) if no animal matches a species, or
    /// `DatabaseError` if a statement fails. Nothing is committed on error.
    pub async fn import_diseases(
        &self,
        records: &[DiseaseRecord],
    ) -> Result<ImportSummary, DatabaseError> {
        if records.is_empty() {
            return Err(CoreError::Validation("no disease records to import".into()).into());
        }

        let tx = self.db().conn().transaction().await?;
        let first_node = match write_batch(&tx, records).await {
            Ok(first_node) => first_node,
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        };
        tx.commit().await?;

        let summary = ImportSummary {
            diseases: records.len(),
            symptom_groups: first_node.len(),
            species: first_node.into_keys().collect(),
        };
        tracing::info!(
            diseases = summary.diseases,
            symptom_groups = summary.symptom_groups,
            "disease import committed"
        );
        Ok(summary)
    }
}

/// Insert every record and one symptom group per species.
///
/// Returns the first node id imported for each species.
async fn write_batch(
    tx: &libsql::Transaction,
    records: &[DiseaseRecord],
) -> Result<BTreeMap<Species, i64>, DatabaseError> {
    let mut first_node: BTreeMap<Species, i64> = BTreeMap::new();

    for record in records {
        let mut rows = tx
            .query(
                "INSERT INTO actionable (\"type\") VALUES (?1) RETURNING id",
                [NodeKind::Result.as_str()],
            )
            .await?;
        let node_id = rows
            .next()
            .await?
            .ok_or(DatabaseError::NoResult)?
            .get::<i64>(0)?;

        let mut rows = tx
            .query(
                "INSERT INTO response (action_id) VALUES (?1) RETURNING id",
                [node_id],
            )
            .await?;
        let response_id = rows
            .next()
            .await?
            .ok_or(DatabaseError::NoResult)?
            .get::<i64>(0)?;

        tx.execute(
            "INSERT INTO result (response_id, risk_category_id, problem_text, first_aid_text,
                 disease_name, name_vi, medications_text, nutrition_text,
                 nutrition_advice, images_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            libsql::params![
                response_id,
                record.risk_level().category_id(),
                non_empty(record.problem_text.as_deref()),
                non_empty(record.first_aid_text.as_deref()),
                record.name(),
                record.name_vi(),
                non_empty(record.medications_text.as_deref()),
                non_empty(record.nutrition_text.as_deref()),
                json_column(&record.nutrition_advice)?,
                json_column(&record.images_json)?,
            ],
        )
        .await?;

        first_node.entry(record.species()).or_insert(node_id);
    }

    for (species, node_id) in &first_node {
        let mut rows = tx
            .query(
                "SELECT id FROM animal WHERE lower(\"type\") = ?1 ORDER BY id LIMIT 1",
                [species.as_str()],
            )
            .await?;
        let animal_id = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("animal", species))?
            .get::<i64>(0)?;

        tx.execute(
            "INSERT INTO symptom (animal_id, description, initial_action_id) VALUES (?1, ?2, ?3)",
            libsql::params![animal_id, symptom_group_name(*species), *node_id],
        )
        .await?;
    }

    Ok(first_node)
}

/// Label of the catch-all symptom that roots each species' imported diseases.
const fn symptom_group_name(species: Species) -> &'static str {
    match species {
        Species::Dog => "Tất cả triệu chứng bệnh (Chó)",
        Species::Cat => "Tất cả triệu chứng bệnh (Mèo)",
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn cap_name(name: String) -> String {
    if name.chars().count() <= MAX_NAME_CHARS {
        name
    } else {
        name.chars().take(MAX_NAME_CHARS).collect()
    }
}
