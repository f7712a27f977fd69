//! The specification model: typed in-memory representation of a planning
//! domain and task.
//!
//! A [`Domain`] owns its types, predicates, and actions for the duration of
//! one mutation or transformation run; the mutation engine and the
//! cross-validation transformer are its sole writers during that run.
//! Instances are created by the parser, edited in place, serialized back to
//! text, and discarded.

mod action;
mod atom;
mod condition;
mod domain;
mod task;

pub use action::{Action, Effect, Parameter};
pub use atom::Atom;
pub use condition::Condition;
pub use domain::{Domain, Predicate, Requirements, TypeDef, TypedObject};
pub use task::Task;
