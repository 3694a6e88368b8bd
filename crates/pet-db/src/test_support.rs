//! Shared test utilities for pet-db and downstream test suites.
//!
//! Compiled for this crate's own tests and, through the `test-support`
//! feature, for crates that need a seeded in-memory service.

use crate::PetDb;
use crate::service::PetService;

/// Small decision graph: dog symptoms 10 and 11, cat symptom 20, a rabbit
/// with no symptoms, question 100 branching to results 200 and 201.
pub const SCENARIO_SQL: &str = include_str!("../tests/fixtures/scenario.sql");

/// Create an in-memory `PetService` with schema and reference rows only.
///
/// # Panics
///
/// Panics if the in-memory database cannot be opened.
pub async fn test_service() -> PetService {
    let db = PetDb::open_local(":memory:")
        .await
        .expect("in-memory database opens");
    PetService::from_db(db)
}

/// Create an in-memory `PetService` loaded with [`SCENARIO_SQL`].
///
/// # Panics
///
/// Panics if the scenario cannot be applied.
pub async fn seeded_service() -> PetService {
    let svc = test_service().await;
    svc.db()
        .conn()
        .execute_batch(SCENARIO_SQL)
        .await
        .expect("scenario fixture applies");
    svc
}
