//! # planfuzz - labeled benchmark generation for planning domains
//!
//! planfuzz mutates and cross-validates PDDL planning domains. Given a
//! correct domain it produces a *perturbed* variant differing by a small,
//! type-consistent set of precondition/effect edits (with a machine-diffable
//! audit trail), and it can combine two domain variants into one *composite*
//! domain whose solutions certify that a plan is legal under both variants
//! in lockstep. Together these support generating labeled correct/incorrect
//! planning benchmarks for model-diagnosis research.
//!
//! ## Core Concepts
//!
//! - **Atom / Condition / Effect**: literals and the STRIPS formulas built
//!   from them
//! - **Domain / Task**: the specification model, parsed from and rendered to
//!   PDDL text
//! - **Mutator**: randomized harden/relax passes over a validated domain
//! - **Transformer**: the two-track lockstep composite construction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use planfuzz::{parse_domain, validate, domain_to_pddl};
//! use planfuzz::{MutationConfig, Mutator, NegativePreconditionPolicy};
//!
//! let mut domain = parse_domain(&text)?;
//! validate(&mut domain, NegativePreconditionPolicy::Reject)?;
//!
//! let mut mutator = Mutator::new(MutationConfig::default());
//! mutator.harden(&mut domain)?;
//!
//! let mutated = domain_to_pddl(&domain);
//! let audit = mutator.audit_log().render();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core model and boundaries
pub mod error;
pub mod model;
pub mod parse;
pub mod serialize;

// Pipeline stages
pub mod audit;
pub mod mutate;
pub mod transform;
pub mod validate;

// Re-export primary types at crate root for convenience
pub use audit::{AuditLog, EditKind, EditRecord};
pub use error::{
    EditSite, FuzzResult, MutationError, ParseError, PlanFuzzError, TransformError,
    ValidationError,
};
pub use model::{
    Action, Atom, Condition, Domain, Effect, Parameter, Predicate, Requirements, Task, TypeDef,
    TypedObject,
};
pub use mutate::{matched_atoms, MutationConfig, MutationOp, Mutator, EQUALITY_PREDICATE};
pub use parse::{parse_domain, parse_task};
pub use serialize::{domain_to_pddl, task_to_pddl};
pub use transform::{
    Transformer, COPY_SUFFIX, INVALID_PREDICATE, LOCK_SUFFIX, TURNING_ACTION, UNLOCK_PREDICATE,
};
pub use validate::{validate, NegativePreconditionPolicy, DISALLOWED_REQUIREMENTS};
