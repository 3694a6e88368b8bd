use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A kind of pet (dog, cat, ...). Root of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Animal {
    pub id: i64,
    pub name: Option<String>,
    /// Category tag, also used to match imported diseases by species.
    #[serde(rename = "type")]
    pub animal_type: Option<String>,
    pub animal_order: Option<i64>,
    pub image: Option<String>,
}
