//! The mutation operator engine.
//!
//! Applies randomized, type-consistent structural edits to a validated
//! domain's actions and records every edit in an ordered audit log.
//!
//! Candidate atoms are generated from the domain's own predicate catalogue
//! grounded over each action's parameters ([`matched_atoms`]); the edits
//! themselves are the closed operator set in [`MutationOp`]; the randomized
//! passes live on [`Mutator`].

mod candidates;
mod engine;
mod operators;

pub use candidates::{matched_atoms, EQUALITY_PREDICATE};
pub use engine::{MutationConfig, Mutator};
pub use operators::MutationOp;
