//! Tasks: a concrete problem instance over a domain.

use serde::{Deserialize, Serialize};

use super::atom::Atom;
use super::condition::Condition;
use super::domain::{Requirements, TypedObject};

/// A planning task: objects, initial state, and goal for a named domain.
///
/// Numeric fluent initializers (`(= ...)` forms) are carried as opaque text
/// and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Problem name.
    pub name: String,

    /// Name of the domain this task instantiates.
    pub domain_name: String,

    /// Declared requirements flags.
    #[serde(default)]
    pub requirements: Requirements,

    /// Task objects.
    #[serde(default)]
    pub objects: Vec<TypedObject>,

    /// Initial-state ground atoms.
    pub init: Vec<Atom>,

    /// Numeric fluent initializers, passed through unchanged.
    #[serde(default)]
    pub numeric_init: Vec<String>,

    /// Goal formula.
    pub goal: Condition,

    /// True if the task declares a minimization metric.
    #[serde(default)]
    pub use_metric: bool,
}

impl Task {
    /// Creates a task with an empty object list and initial state.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        domain_name: impl Into<String>,
        goal: Condition,
    ) -> Self {
        Self {
            name: name.into(),
            domain_name: domain_name.into(),
            requirements: Requirements::empty(),
            objects: Vec::new(),
            init: Vec::new(),
            numeric_init: Vec::new(),
            goal,
            use_metric: false,
        }
    }
}
