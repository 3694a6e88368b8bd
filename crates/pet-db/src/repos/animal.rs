//! Animal and symptom repository.

use pet_core::entities::{Animal, Symptom};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_datetime, get_opt_i64, get_opt_string};
use crate::service::PetService;

const ANIMAL_COLS: &str = "id, name, \"type\", animal_order, image";
const SYMPTOM_COLS: &str =
    "id, animal_id, description, created_at, updated_at, initial_action_id";

impl PetService {
    /// Fetch every animal, ordered by `animal_order` (unordered rows last),
    /// then by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn fetch_animals(&self) -> Result<Vec<Animal>, DatabaseError> {
        let sql = format!(
            "SELECT {ANIMAL_COLS} FROM animal
             ORDER BY animal_order IS NULL, animal_order, id"
        );
        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut animals = Vec::new();
        while let Some(row) = rows.next().await? {
            animals.push(row_to_animal(&row)?);
        }
        Ok(animals)
    }

    /// Fetch the symptoms belonging to one animal, ordered by id.
    ///
    /// An unknown animal id yields an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn fetch_symptoms(&self, animal_id: i64) -> Result<Vec<Symptom>, DatabaseError> {
        let sql = format!("SELECT {SYMPTOM_COLS} FROM symptom WHERE animal_id = ?1 ORDER BY id");
        let mut rows = self.db().conn().query(&sql, [animal_id]).await?;
        let mut symptoms = Vec::new();
        while let Some(row) = rows.next().await? {
            symptoms.push(row_to_symptom(&row)?);
        }
        Ok(symptoms)
    }
}

fn row_to_animal(row: &libsql::Row) -> Result<Animal, DatabaseError> {
    Ok(Animal {
        id: row.get::<i64>(0)?,
        name: get_opt_string(row, 1)?,
        animal_type: get_opt_string(row, 2)?,
        animal_order: get_opt_i64(row, 3)?,
        image: get_opt_string(row, 4)?,
    })
}

fn row_to_symptom(row: &libsql::Row) -> Result<Symptom, DatabaseError> {
    Ok(Symptom {
        id: row.get::<i64>(0)?,
        animal_id: get_opt_i64(row, 1)?,
        description: get_opt_string(row, 2)?,
        created_at: get_opt_datetime(row, 3)?,
        updated_at: get_opt_datetime(row, 4)?,
        initial_action_id: get_opt_i64(row, 5)?,
    })
}
