//! # pet-core
//!
//! Core types and error types for the pet diagnosis backend.
//!
//! This crate provides the foundational types shared across all crates:
//! - Entity structs for the catalog (animals, symptoms), the decision graph
//!   (question and result nodes, options, risk categories), feedback, and
//!   affiliate products
//! - The two-variant node kind used to dispatch decision-graph lookups
//! - Cross-cutting error types
//!
//! Every optional column is an `Option<_>` and serialises as JSON `null`
//! when absent, never as an empty string or zero.

pub mod entities;
pub mod enums;
pub mod errors;
