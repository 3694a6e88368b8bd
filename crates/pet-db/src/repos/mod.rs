//! Repository modules: typed reads and inserts over the libSQL schema.
//!
//! Each module adds methods to `PetService` via `impl PetService` blocks.
//! Every statement is parameterised; ids never reach SQL text.

pub mod animal;
pub mod feedback;
pub mod node;
