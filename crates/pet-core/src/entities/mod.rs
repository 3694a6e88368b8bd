//! Entity structs for all domain objects.
//!
//! Catalog and decision-graph entities map to tables in the libSQL schema
//! (see `pet-db/migrations`). Affiliate products are sourced from a remote
//! feed and never persisted. All structs derive `Serialize`, `Deserialize`,
//! and `JsonSchema` so response shapes can be validated in tests.

mod affiliate;
mod animal;
mod feedback;
mod node;
mod symptom;

pub use affiliate::AffiliateProduct;
pub use animal::Animal;
pub use feedback::Feedback;
pub use node::{ActionableNode, AnswerOption, Question, QuestionNode, ResultDetail, ResultNode, RiskCategory};
pub use symptom::Symptom;
