//! Catalog resolver: the entry points of a diagnosis.
//!
//! Animals are the roots; each symptom group points at the first node of
//! its subtree via `initial_action_id`.

use pet_core::entities::{Animal, Symptom};

use crate::error::DatabaseError;
use crate::service::PetService;

impl PetService {
    /// List all animals in display order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_animals(&self) -> Result<Vec<Animal>, DatabaseError> {
        let animals = self.fetch_animals().await?;
        tracing::debug!(count = animals.len(), "listed animals");
        Ok(animals)
    }

    /// List the symptom groups of one animal. Unknown animals yield `[]`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_symptoms(&self, animal_id: i64) -> Result<Vec<Symptom>, DatabaseError> {
        let symptoms = self.fetch_symptoms(animal_id).await?;
        tracing::debug!(animal_id, count = symptoms.len(), "listed symptoms");
        Ok(symptoms)
    }
}
